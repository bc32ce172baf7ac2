//! Camera transition controller
//!
//! Two-state machine (idle / transitioning) that moves the camera from the
//! settled pose to a target pose over a fixed number of rendered frames while
//! cross-fading the matching photographs.
//!
//! Duration is counted in frames, not wall-clock time: at 60 Hz the default
//! 90 frames take 1.5 s, on a 120 Hz display they take 0.75 s.

use tracing::{debug, info, warn};

use crate::camera::CameraState;
use crate::layers::ImageLayers;
use crate::pose::PoseStore;

/// Frames a transition takes unless configured otherwise
pub const DEFAULT_TRANSITION_FRAMES: u32 = 90;

/// An in-flight transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub source_index: usize,
    pub target_index: usize,
    frames_elapsed: u32,
    duration_frames: u32,
}

impl Transition {
    fn new(source_index: usize, target_index: usize, duration_frames: u32) -> Self {
        Self {
            source_index,
            target_index,
            frames_elapsed: 0,
            duration_frames,
        }
    }

    /// Fraction of the transition completed, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.frames_elapsed >= self.duration_frames {
            1.0
        } else {
            self.frames_elapsed as f32 / self.duration_frames as f32
        }
    }

    pub fn frames_elapsed(&self) -> u32 {
        self.frames_elapsed
    }
}

/// Settled index plus the single optional in-flight transition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerState {
    pub current_index: usize,
    pub transition: Option<Transition>,
}

impl ViewerState {
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }
}

/// Result of asking the controller to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A transition toward the index was started
    Started { target_index: usize },
    /// A transition is already running; the request was dropped
    Busy,
    /// The target is the settled pose
    AlreadyThere,
    /// The target is not a valid pose index
    OutOfBounds { target_index: usize },
    /// There are no poses to navigate
    NoPoses,
}

impl RequestOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, RequestOutcome::Started { .. })
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Nothing in flight
    Idle,
    /// Camera and layers were moved to an intermediate state
    InProgress { progress: f32 },
    /// The transition finished and the viewer settled on `index`
    Completed { index: usize },
}

/// Drives camera pose and photograph layers between viewpoints
#[derive(Debug)]
pub struct TransitionController {
    store: PoseStore,
    state: ViewerState,
    camera: CameraState,
    layers: ImageLayers,
    busy: bool,
    duration_frames: u32,
}

impl TransitionController {
    /// Create a controller settled on the first pose.
    ///
    /// A zero frame count is treated as a single frame.
    pub fn new(store: PoseStore, duration_frames: u32) -> Self {
        let mut controller = Self {
            store,
            state: ViewerState::default(),
            camera: CameraState::default(),
            layers: ImageLayers::default(),
            busy: false,
            duration_frames: duration_frames.max(1),
        };

        if let Some(label) = controller.settle(0) {
            info!("Initial view: {}", label);
        } else {
            warn!("No camera poses available; viewer has nothing to navigate");
        }

        controller
    }

    pub fn store(&self) -> &PoseStore {
        &self.store
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn layers(&self) -> &ImageLayers {
        &self.layers
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn duration_frames(&self) -> u32 {
        self.duration_frames
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    /// Whether the busy affordance should be shown
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Progress of the in-flight transition, if any
    pub fn progress(&self) -> Option<f32> {
        self.state.transition.map(|t| t.progress())
    }

    /// 1-based position and total count for display; `(0, 0)` without poses
    pub fn counter(&self) -> (usize, usize) {
        if self.store.is_empty() {
            (0, 0)
        } else {
            (self.state.current_index + 1, self.store.len())
        }
    }

    /// Start moving toward `target_index`.
    ///
    /// Requests made while a transition is running, or that target the
    /// settled pose, are dropped silently. Out-of-range targets are dropped
    /// with a warning.
    pub fn request_transition(&mut self, target_index: usize) -> RequestOutcome {
        if self.state.is_transitioning() {
            return RequestOutcome::Busy;
        }
        if target_index == self.state.current_index {
            return RequestOutcome::AlreadyThere;
        }
        let Some(target) = self.store.pose(target_index) else {
            warn!(
                "Target camera index {} out of bounds ({} poses)",
                target_index,
                self.store.len()
            );
            return RequestOutcome::OutOfBounds { target_index };
        };

        let source_index = self.state.current_index;
        self.layers.stage(&target.label);
        self.state.transition = Some(Transition::new(
            source_index,
            target_index,
            self.duration_frames,
        ));
        self.busy = true;

        info!(
            "Starting transition from camera {} to camera {}",
            source_index + 1,
            target_index + 1
        );

        RequestOutcome::Started { target_index }
    }

    /// Advance the in-flight transition by one frame
    pub fn tick(&mut self) -> TickOutcome {
        let Some(transition) = self.state.transition.as_mut() else {
            return TickOutcome::Idle;
        };

        transition.frames_elapsed += 1;
        let transition = *transition;
        let progress = transition.progress();

        if progress >= 1.0 {
            self.state.transition = None;
            self.state.current_index = transition.target_index;
            self.settle(transition.target_index);
            self.busy = false;

            info!("Transition complete to camera {}", transition.target_index + 1);
            return TickOutcome::Completed {
                index: transition.target_index,
            };
        }

        match (
            CameraState::at_pose(&self.store, transition.source_index),
            CameraState::at_pose(&self.store, transition.target_index),
        ) {
            (Some(source), Some(target)) => {
                self.camera = CameraState::interpolate(&source, &target, progress);
            }
            _ => debug!("Transition endpoints missing from pose store"),
        }
        self.layers.cross_fade(progress);

        TickOutcome::InProgress { progress }
    }

    /// Snap camera and layers onto pose `index`; returns its label
    fn settle(&mut self, index: usize) -> Option<String> {
        let camera = CameraState::at_pose(&self.store, index)?;
        let label = self.store.pose(index)?.label.clone();

        self.camera = camera;
        self.layers.settle(&label);
        Some(label)
    }
}
