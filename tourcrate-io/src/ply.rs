//! PLY format support

use crate::{error::IoError, PointCloudReader};
use tourcrate_core::{ColoredPoint3f, ColoredPointCloud3f, Point3f, Result};
use std::path::Path;
use std::fs::File;
use std::io::BufReader;
use ply_rs::{
    parser::Parser,
    ply::{Property, DefaultElement},
};
use tracing::debug;

pub struct PlyReader;

impl PointCloudReader for PlyReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<ColoredPointCloud3f> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IoError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => IoError::Io(e),
        })?;
        let mut reader = BufReader::new(file);

        // Parse PLY header and payload
        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(&mut reader)?;

        let Some(vertex_element) = ply.payload.get("vertex") else {
            return Err(IoError::ParseError {
                message: "PLY file has no vertex element".to_string(),
            }
            .into());
        };

        let mut cloud = ColoredPointCloud3f::with_capacity(vertex_element.len());
        let mut colored = 0usize;

        for vertex in vertex_element {
            let x = extract_property_value(vertex, "x")?;
            let y = extract_property_value(vertex, "y")?;
            let z = extract_property_value(vertex, "z")?;

            let color = match (
                extract_color_channel(vertex, "red"),
                extract_color_channel(vertex, "green"),
                extract_color_channel(vertex, "blue"),
            ) {
                (Some(r), Some(g), Some(b)) => {
                    colored += 1;
                    [r, g, b]
                }
                _ => [255, 255, 255],
            };

            cloud.push(ColoredPoint3f::new(Point3f::new(x, y, z), color));
        }

        debug!("Read {} vertices ({} with color) from PLY", cloud.len(), colored);
        Ok(cloud)
    }
}

/// Extract a property value as f32 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> Result<f32> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val),
        Some(Property::Double(val)) => Ok(*val as f32),
        Some(Property::Int(val)) => Ok(*val as f32),
        Some(Property::UInt(val)) => Ok(*val as f32),
        Some(Property::Short(val)) => Ok(*val as f32),
        Some(Property::UShort(val)) => Ok(*val as f32),
        _ => Err(IoError::ParseError {
            message: format!("Property '{}' not found or invalid type", name),
        }
        .into()),
    }
}

/// Extract an 8-bit color channel; float channels are taken as [0, 1]
fn extract_color_channel(element: &DefaultElement, name: &str) -> Option<u8> {
    match element.get(name)? {
        Property::UChar(val) => Some(*val),
        Property::UShort(val) => Some((*val >> 8) as u8),
        Property::Float(val) => Some((val.clamp(0.0, 1.0) * 255.0).round() as u8),
        Property::Double(val) => Some((val.clamp(0.0, 1.0) * 255.0).round() as u8),
        _ => None,
    }
}
