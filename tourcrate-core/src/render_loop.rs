//! Per-frame driver
//!
//! The host schedules [`FrameDriver::tick`] once per display refresh. Each
//! tick advances an in-flight transition and then hands the resulting frame
//! to the rendering collaborator.

use crate::camera::CameraState;
use crate::error::Result;
use crate::layers::ImageLayers;
use crate::navigation::Direction;
use crate::transition::{RequestOutcome, TickOutcome, TransitionController};

/// Everything the rendering collaborator needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub camera: &'a CameraState,
    pub layers: &'a ImageLayers,
    pub busy: bool,
    /// 1-based current position and total pose count
    pub counter: (usize, usize),
}

/// External collaborator that draws frames
pub trait ViewerSurface {
    fn present(&mut self, frame: &FrameSnapshot<'_>) -> Result<()>;
}

/// Owns the controller and advances it once per rendered frame
#[derive(Debug)]
pub struct FrameDriver {
    controller: TransitionController,
    frames_rendered: u64,
}

impl FrameDriver {
    pub fn new(controller: TransitionController) -> Self {
        Self {
            controller,
            frames_rendered: 0,
        }
    }

    pub fn controller(&self) -> &TransitionController {
        &self.controller
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn advance(&mut self, direction: Direction) -> RequestOutcome {
        self.controller.advance(direction)
    }

    pub fn jump_to(&mut self, index: usize) -> RequestOutcome {
        self.controller.jump_to(index)
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            camera: self.controller.camera(),
            layers: self.controller.layers(),
            busy: self.controller.is_busy(),
            counter: self.controller.counter(),
        }
    }

    /// Run one frame: advance any transition, then draw unconditionally
    pub fn tick<S: ViewerSurface + ?Sized>(&mut self, surface: &mut S) -> Result<TickOutcome> {
        let outcome = if self.controller.is_transitioning() {
            self.controller.tick()
        } else {
            TickOutcome::Idle
        };

        self.frames_rendered += 1;
        surface.present(&self.snapshot())?;
        Ok(outcome)
    }
}
