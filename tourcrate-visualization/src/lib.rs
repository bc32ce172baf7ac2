//! Windowed photo tour viewer
//!
//! Glues the tour controller to a window:
//! - `ViewerConfig` with TOML loading and validation
//! - startup loading of poses and the point cloud into a [`Tour`]
//! - keyboard and click input mapped to navigation intents
//! - the winit event loop driving one controller tick per redraw

pub mod config;
pub mod input;
pub mod photos;
pub mod tour;
pub mod viewer;

pub use config::ViewerConfig;
pub use input::{intent_for_click, intent_for_key, intent_for_key_press, Intent};
pub use photos::{PhotoLoader, PhotoSlots};
pub use tour::Tour;
pub use viewer::{apply_intent, window_title, TourViewer, WindowSurface};
