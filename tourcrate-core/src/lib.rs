//! Core data structures for tourcrate
//!
//! This crate holds everything that does not touch a window or a GPU:
//! - Points and point clouds (only their centroid matters here)
//! - Captured camera poses and their look-at orientations
//! - The transition controller that animates the camera between poses
//!   and cross-fades the matching photographs
//! - Navigation intents and the per-frame driver

pub mod point;
pub mod point_cloud;
pub mod traits;
pub mod error;
pub mod pose;
pub mod camera;
pub mod layers;
pub mod transition;
pub mod navigation;
pub mod render_loop;

pub use point::*;
pub use point_cloud::*;
pub use traits::*;
pub use error::*;
pub use pose::*;
pub use camera::*;
pub use layers::*;
pub use transition::*;
pub use navigation::*;
pub use render_loop::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4, UnitQuaternion};
