//! Startup: turn the configured assets into a ready-to-drive tour

use tourcrate_core::{
    ColoredPointCloud3f, Drawable, FrameDriver, PoseStore, Result, TransitionController,
};
use tourcrate_io::{load_poses_or_default, read_point_cloud};
use tracing::info;

use crate::config::ViewerConfig;

/// Everything the viewer needs once assets are loaded
#[derive(Debug)]
pub struct Tour {
    pub fov_deg: f32,
    pub cloud: ColoredPointCloud3f,
    pub driver: FrameDriver,
}

impl Tour {
    /// Load poses and the point cloud, then settle on the first pose.
    ///
    /// A missing or malformed pose document yields an empty tour. A point
    /// cloud that cannot be read is an error.
    pub fn load(config: &ViewerConfig) -> Result<Self> {
        config.validate()?;

        let loaded = load_poses_or_default(&config.pose_data);

        let cloud = read_point_cloud(&config.point_cloud)?;
        let center = cloud.center();
        info!(
            "Point cloud loaded: {} points, centroid ({:.3}, {:.3}, {:.3})",
            cloud.len(),
            center.x,
            center.y,
            center.z
        );

        let store = PoseStore::new(loaded.poses, center);
        let controller = TransitionController::new(store, config.transition_frames);

        Ok(Self {
            fov_deg: loaded.fov_deg,
            cloud,
            driver: FrameDriver::new(controller),
        })
    }
}
