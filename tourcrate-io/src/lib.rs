//! I/O for tourcrate
//!
//! Reads the three startup inputs of a tour:
//! - the pose document (JSON) with camera intrinsics and viewpoints
//! - the captured point cloud (PLY)
//! - one photograph per viewpoint

pub mod ply;
pub mod pose_data;
pub mod images;
pub mod error;

pub use error::*;
pub use pose_data::{load_poses_or_default, Intrinsics, LoadedPoses, PoseDocument, DEFAULT_FOV_DEG};
pub use images::{ImageCatalog, Photo};

use tourcrate_core::{ColoredPointCloud3f, Result};

/// Trait for reading point clouds from files
pub trait PointCloudReader {
    fn read_point_cloud<P: AsRef<std::path::Path>>(path: P) -> Result<ColoredPointCloud3f>;
}

/// Auto-detect format and read point cloud
pub fn read_point_cloud<P: AsRef<std::path::Path>>(path: P) -> Result<ColoredPointCloud3f> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("ply") => ply::PlyReader::read_point_cloud(path),
        _ => Err(IoError::InvalidFormat {
            format: format!("Unsupported point cloud format: {:?}", path.extension()),
        }
        .into()),
    }
}
