//! Viewer configuration
//!
//! Every field has a default, so a TOML file only needs the keys it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tourcrate_core::{Error, Result, DEFAULT_TRANSITION_FRAMES};
use tourcrate_gpu::RenderConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// JSON document with intrinsics and camera poses
    pub pose_data: PathBuf,
    /// PLY scan used as the backdrop
    pub point_cloud: PathBuf,
    /// Directory holding one photograph per pose label
    pub image_dir: PathBuf,
    /// Length of one transition in rendered frames
    pub transition_frames: u32,
    pub near: f32,
    pub far: f32,
    pub background_color: [f64; 4],
    /// Replaces the scanned point colours when set
    pub point_color: Option<[f32; 3]>,
    /// Multiplier applied to both photograph layers
    pub overlay_opacity: f32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            pose_data: PathBuf::from("assets/camera_data_for_web.json"),
            point_cloud: PathBuf::from("assets/point_cloud.ply"),
            image_dir: PathBuf::from("assets/images/"),
            transition_frames: DEFAULT_TRANSITION_FRAMES,
            near: 0.1,
            far: 1000.0,
            background_color: [0.0, 0.0, 0.0, 1.0],
            point_color: None,
            overlay_opacity: 1.0,
            window_width: 1280,
            window_height: 800,
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| Error::InvalidData(format!("Invalid viewer config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Reject settings the viewer cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.transition_frames == 0 {
            return Err(Error::InvalidData("transition_frames must be at least 1".to_string()));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(Error::InvalidData(format!(
                "Clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(Error::InvalidData(format!(
                "overlay_opacity must be within [0, 1], got {}",
                self.overlay_opacity
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(Error::InvalidData("Window size must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            background_color: self.background_color,
            overlay_opacity: self.overlay_opacity,
        }
    }
}
