//! Windowed tour viewer
//!
//! Owns the winit event loop. Input is turned into navigation intents for the
//! [`FrameDriver`]; every redraw ticks the driver once and presents the
//! resulting frame through [`WindowSurface`].

use std::sync::Arc;

use tourcrate_core::{
    Error, FrameDriver, FrameSnapshot, Projection, RequestOutcome, Result, ViewerSurface,
};
use tourcrate_gpu::{point_cloud_to_vertices, SceneRenderer};
use tourcrate_io::ImageCatalog;
use tracing::{debug, error, info};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{CursorIcon, Window, WindowBuilder},
};

use crate::config::ViewerConfig;
use crate::input::{intent_for_click, intent_for_key_press, Intent};
use crate::photos::PhotoLoader;
use crate::tour::Tour;

/// Window title showing the 1-based position in the tour
pub fn window_title(counter: (usize, usize)) -> String {
    format!("tourcrate - {} / {}", counter.0, counter.1)
}

/// Apply an intent to the driver. Returns true when the viewer should close.
pub fn apply_intent(driver: &mut FrameDriver, intent: Intent) -> bool {
    match intent {
        Intent::Navigate(direction) => {
            let outcome = driver.advance(direction);
            if !matches!(outcome, RequestOutcome::Started { .. }) {
                debug!("{:?} request ignored: {:?}", direction, outcome);
            }
            false
        }
        Intent::Close => true,
    }
}

/// Presents frames to a window: photo layers, camera, title and cursor
pub struct WindowSurface {
    window: Arc<Window>,
    renderer: SceneRenderer,
    projection: Projection,
    photos: PhotoLoader,
    shown_counter: Option<(usize, usize)>,
    shown_busy: Option<bool>,
}

impl WindowSurface {
    pub fn new(window: Arc<Window>, renderer: SceneRenderer, projection: Projection, photos: PhotoLoader) -> Self {
        Self {
            window,
            renderer,
            projection,
            photos,
            shown_counter: None,
            shown_busy: None,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Minimised windows report a zero size and are skipped
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.renderer.resize(size);
        self.projection.set_viewport(size.width, size.height);
    }
}

impl ViewerSurface for WindowSurface {
    fn present(&mut self, frame: &FrameSnapshot<'_>) -> Result<()> {
        self.photos.sync(&mut self.renderer, frame.layers);

        self.renderer.update_camera(
            frame.camera.view_matrix(),
            self.projection.projection_matrix(),
            frame.camera.position.coords,
        );

        if self.shown_counter != Some(frame.counter) {
            self.window.set_title(&window_title(frame.counter));
            self.shown_counter = Some(frame.counter);
        }

        if self.shown_busy != Some(frame.busy) {
            let icon = if frame.busy { CursorIcon::Wait } else { CursorIcon::Default };
            self.window.set_cursor_icon(icon);
            self.shown_busy = Some(frame.busy);
        }

        self.renderer.render([frame.layers.primary.opacity, frame.layers.secondary.opacity])
    }
}

/// Interactive viewer for a loaded tour
pub struct TourViewer {
    config: ViewerConfig,
    tour: Tour,
}

impl TourViewer {
    pub fn new(config: ViewerConfig, tour: Tour) -> Self {
        Self { config, tour }
    }

    /// Open the window and run until it is closed
    pub fn run(self) -> Result<()> {
        let TourViewer { config, tour } = self;
        let Tour { fov_deg, cloud, mut driver } = tour;

        let event_loop = EventLoop::new()
            .map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(window_title(driver.controller().counter()))
                .with_inner_size(LogicalSize::new(config.window_width as f64, config.window_height as f64))
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let mut renderer = pollster::block_on(SceneRenderer::new(window.clone(), config.render_config()))?;
        renderer.set_point_cloud(&point_cloud_to_vertices(&cloud, config.point_color));

        let size = window.inner_size();
        let mut projection = Projection::new(fov_deg, 1.0, config.near, config.far);
        projection.set_viewport(size.width, size.height);

        let photos = PhotoLoader::new(ImageCatalog::new(&config.image_dir), renderer.max_texture_dimension());
        let mut surface = WindowSurface::new(window.clone(), renderer, projection, photos);

        info!("Viewer ready: {} points, {} poses", cloud.len(), driver.controller().store().len());
        window.request_redraw();

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Poll);

                let Event::WindowEvent { event, .. } = event else {
                    return;
                };

                match event {
                    WindowEvent::CloseRequested => target.exit(),
                    WindowEvent::Resized(new_size) => surface.resize(new_size),
                    WindowEvent::MouseInput { state, button, .. } => {
                        if let Some(intent) = intent_for_click(button, state) {
                            if apply_intent(&mut driver, intent) {
                                target.exit();
                            }
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if let Some(intent) = intent_for_key_press(&event.logical_key, event.state) {
                            if apply_intent(&mut driver, intent) {
                                target.exit();
                            }
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(e) = driver.tick(&mut surface) {
                            error!("Render error: {}", e);
                        }
                        surface.window().request_redraw();
                    }
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourcrate_core::{
        Direction, PoseList, PoseStore, Point3f, RawCameraPose, TransitionController,
    };

    struct NullSurface;

    impl ViewerSurface for NullSurface {
        fn present(&mut self, _frame: &FrameSnapshot<'_>) -> Result<()> {
            Ok(())
        }
    }

    fn driver(count: usize) -> FrameDriver {
        let raw: Vec<RawCameraPose> = (0..count)
            .map(|i| RawCameraPose::new(format!("{}.jpg", i), [i as f32, 0.0, 5.0]))
            .collect();
        let store = PoseStore::new(PoseList::load(&raw).unwrap(), Point3f::origin());
        FrameDriver::new(TransitionController::new(store, 3))
    }

    #[test]
    fn test_window_title() {
        assert_eq!(window_title((2, 7)), "tourcrate - 2 / 7");
        assert_eq!(window_title((0, 0)), "tourcrate - 0 / 0");
    }

    #[test]
    fn test_navigate_intent_starts_transition() {
        let mut driver = driver(3);
        assert!(!apply_intent(&mut driver, Intent::Navigate(Direction::Previous)));
        assert!(driver.controller().is_transitioning());
        assert_eq!(
            driver.controller().state().transition.map(|t| t.target_index),
            Some(2)
        );
    }

    #[test]
    fn test_held_key_steps_again_after_completion() {
        let mut driver = driver(3);
        let next = Intent::Navigate(Direction::Next);

        apply_intent(&mut driver, next);
        // Repeats while moving are dropped
        apply_intent(&mut driver, next);
        assert_eq!(
            driver.controller().state().transition.map(|t| t.target_index),
            Some(1)
        );

        while driver.controller().is_transitioning() {
            driver.tick(&mut NullSurface).unwrap();
        }
        assert_eq!(driver.controller().current_index(), 1);

        apply_intent(&mut driver, next);
        assert_eq!(
            driver.controller().state().transition.map(|t| t.target_index),
            Some(2)
        );
    }

    #[test]
    fn test_close_intent() {
        let mut driver = driver(3);
        assert!(apply_intent(&mut driver, Intent::Close));
        assert!(!driver.controller().is_transitioning());
    }

    #[test]
    fn test_navigate_without_poses_is_harmless() {
        let mut driver = driver(0);
        assert!(!apply_intent(&mut driver, Intent::Navigate(Direction::Next)));
        assert_eq!(driver.controller().counter(), (0, 0));
    }
}
