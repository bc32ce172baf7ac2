//! Pose document: camera intrinsics plus the captured viewpoints
//!
//! ```json
//! {
//!   "intrinsics": { "fov_deg": 60.0 },
//!   "camera_poses": [
//!     { "label": "IMG_0001.jpg", "position_C": [0.1, 1.5, -3.2] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tourcrate_core::{PoseList, RawCameraPose, Result};
use tracing::{error, info};

use crate::error::IoError;

/// Field of view used when the pose document cannot be loaded
pub const DEFAULT_FOV_DEG: f32 = 75.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    /// Vertical field of view in degrees
    pub fov_deg: f32,
}

impl Default for Intrinsics {
    fn default() -> Self {
        Self {
            fov_deg: DEFAULT_FOV_DEG,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseDocument {
    pub intrinsics: Intrinsics,
    pub camera_poses: Vec<RawCameraPose>,
}

impl PoseDocument {
    /// Document used in place of one that failed to load: default fov, no poses
    pub fn fallback() -> Self {
        Self {
            intrinsics: Intrinsics::default(),
            camera_poses: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Self = serde_json::from_str(json).map_err(IoError::from)?;
        Ok(document)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn pose_list(&self) -> Result<PoseList> {
        PoseList::load(&self.camera_poses)
    }
}

/// Field of view and validated poses ready for the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPoses {
    pub fov_deg: f32,
    pub poses: PoseList,
}

/// Read and validate the pose document, degrading to an empty tour on failure
pub fn load_poses_or_default<P: AsRef<Path>>(path: P) -> LoadedPoses {
    let path = path.as_ref();
    let loaded = PoseDocument::read(path).and_then(|document| {
        let poses = document.pose_list()?;
        Ok(LoadedPoses {
            fov_deg: document.intrinsics.fov_deg,
            poses,
        })
    });

    match loaded {
        Ok(loaded) => {
            info!("Camera poses loaded: {} total", loaded.poses.len());
            loaded
        }
        Err(e) => {
            error!("Could not load or parse pose data {}: {}", path.display(), e);
            let fallback = PoseDocument::fallback();
            LoadedPoses {
                fov_deg: fallback.intrinsics.fov_deg,
                poses: PoseList::empty(),
            }
        }
    }
}
