//! # tourcrate GPU
//!
//! wgpu rendering for tours: the captured point cloud as a backdrop, with the
//! primary and secondary photographs blended on top according to their layer
//! opacities.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tourcrate_gpu::{RenderConfig, SceneRenderer};
//! use winit::{event_loop::EventLoop, window::WindowBuilder};
//!
//! fn example() -> tourcrate_core::Result<()> {
//!     let event_loop = EventLoop::new().unwrap();
//!     let window = Arc::new(WindowBuilder::new().build(&event_loop).unwrap());
//!     let mut renderer = pollster::block_on(SceneRenderer::new(window, RenderConfig::default()))?;
//!     renderer.render([1.0, 0.0])?;
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod renderer;
pub mod image_layers;

// Re-export commonly used items
pub use device::GpuContext;
pub use renderer::{SceneRenderer, PointVertex, RenderConfig, point_cloud_to_vertices};
pub use image_layers::{ImageLayerPass, LayerSlot, contain_scale};
