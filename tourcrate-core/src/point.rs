//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A point with color information, as captured by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColoredPoint3f {
    pub position: Point3f,
    pub color: [u8; 3],
}

impl ColoredPoint3f {
    pub fn new(position: Point3f, color: [u8; 3]) -> Self {
        Self { position, color }
    }

    /// Color as normalized RGB
    pub fn color_f32(&self) -> [f32; 3] {
        [
            self.color[0] as f32 / 255.0,
            self.color[1] as f32 / 255.0,
            self.color[2] as f32 / 255.0,
        ]
    }
}

impl Default for ColoredPoint3f {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            color: [255, 255, 255],
        }
    }
}

/// Anything that has a location in world space
pub trait Positioned {
    fn position(&self) -> Point3f;
}

impl Positioned for Point3f {
    fn position(&self) -> Point3f {
        *self
    }
}

impl Positioned for ColoredPoint3f {
    fn position(&self) -> Point3f {
        self.position
    }
}
