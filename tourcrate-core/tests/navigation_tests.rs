//! Navigation and render-loop behaviour across whole transitions

use approx::assert_relative_eq;
use tourcrate_core::{
    Direction, FrameDriver, FrameSnapshot, Point3f, PoseList, PoseStore, RawCameraPose,
    RequestOutcome, Result, TickOutcome, TransitionController, ViewerSurface,
    DEFAULT_TRANSITION_FRAMES,
};

/// Records what each presented frame looked like
#[derive(Default)]
struct RecordingSurface {
    frames: Vec<RecordedFrame>,
}

#[derive(Debug, Clone)]
struct RecordedFrame {
    position: Point3f,
    primary: (Option<String>, f32),
    secondary: (Option<String>, f32),
    busy: bool,
    counter: (usize, usize),
}

impl ViewerSurface for RecordingSurface {
    fn present(&mut self, frame: &FrameSnapshot<'_>) -> Result<()> {
        self.frames.push(RecordedFrame {
            position: frame.camera.position,
            primary: (frame.layers.primary.label.clone(), frame.layers.primary.opacity),
            secondary: (frame.layers.secondary.label.clone(), frame.layers.secondary.opacity),
            busy: frame.busy,
            counter: frame.counter,
        });
        Ok(())
    }
}

fn three_poses() -> PoseStore {
    let list = PoseList::load(&[
        RawCameraPose::new("a.jpg", [0.0, 0.0, 5.0]),
        RawCameraPose::new("b.jpg", [5.0, 0.0, 0.0]),
        RawCameraPose::new("c.jpg", [0.0, 1.0, -5.0]),
    ])
    .unwrap();
    PoseStore::new(list, Point3f::origin())
}

fn driver(frames: u32) -> FrameDriver {
    FrameDriver::new(TransitionController::new(three_poses(), frames))
}

fn run_to_idle(driver: &mut FrameDriver, surface: &mut RecordingSurface) -> usize {
    let mut ticks = 0;
    while driver.controller().is_transitioning() {
        driver.tick(surface).unwrap();
        ticks += 1;
    }
    ticks
}

#[test]
fn test_next_from_first_pose_scenario() {
    let mut driver = driver(DEFAULT_TRANSITION_FRAMES);
    let mut surface = RecordingSurface::default();

    assert_eq!(
        driver.advance(Direction::Next),
        RequestOutcome::Started { target_index: 1 }
    );
    let transition = driver.controller().state().transition.unwrap();
    assert_eq!(transition.target_index, 1);
    assert_eq!(
        driver.controller().layers().secondary.label.as_deref(),
        Some("b.jpg")
    );

    for tick in 1..=90 {
        let outcome = driver.tick(&mut surface).unwrap();
        if tick < 90 {
            assert!(matches!(outcome, TickOutcome::InProgress { .. }));
        } else {
            assert_eq!(outcome, TickOutcome::Completed { index: 1 });
        }
    }

    let controller = driver.controller();
    assert_eq!(controller.current_index(), 1);
    assert!(!controller.is_transitioning());
    assert_eq!(controller.layers().primary.label.as_deref(), Some("b.jpg"));
    assert_eq!(controller.layers().primary.opacity, 1.0);
    assert_eq!(controller.layers().secondary.opacity, 0.0);
    assert_eq!(controller.camera().position, Point3f::new(5.0, 0.0, 0.0));
    assert_eq!(surface.frames.len(), 90);
}

#[test]
fn test_wraparound_in_both_directions() {
    let mut driver = driver(3);
    let mut surface = RecordingSurface::default();

    assert_eq!(
        driver.advance(Direction::Previous),
        RequestOutcome::Started { target_index: 2 }
    );
    run_to_idle(&mut driver, &mut surface);
    assert_eq!(driver.controller().current_index(), 2);

    assert_eq!(
        driver.advance(Direction::Next),
        RequestOutcome::Started { target_index: 0 }
    );
    run_to_idle(&mut driver, &mut surface);
    assert_eq!(driver.controller().current_index(), 0);
}

#[test]
fn test_previous_then_next_returns_home() {
    for start in 0..3 {
        let mut driver = driver(4);
        let mut surface = RecordingSurface::default();
        if start != 0 {
            driver.jump_to(start);
            run_to_idle(&mut driver, &mut surface);
        }
        assert_eq!(driver.controller().current_index(), start);

        driver.advance(Direction::Previous);
        run_to_idle(&mut driver, &mut surface);
        driver.advance(Direction::Next);
        run_to_idle(&mut driver, &mut surface);

        assert_eq!(driver.controller().current_index(), start);
    }
}

#[test]
fn test_rapid_input_only_first_request_counts() {
    let mut driver = driver(6);
    let mut surface = RecordingSurface::default();

    assert!(driver.advance(Direction::Next).is_started());
    driver.tick(&mut surface).unwrap();
    assert_eq!(driver.advance(Direction::Next), RequestOutcome::Busy);
    assert_eq!(driver.advance(Direction::Previous), RequestOutcome::Busy);
    assert_eq!(driver.jump_to(2), RequestOutcome::Busy);

    let ticks = run_to_idle(&mut driver, &mut surface);
    assert_eq!(ticks, 5);
    assert_eq!(driver.controller().current_index(), 1);
}

#[test]
fn test_frames_cross_fade_and_report_busy() {
    let mut driver = driver(10);
    let mut surface = RecordingSurface::default();

    driver.tick(&mut surface).unwrap();
    driver.advance(Direction::Next);
    run_to_idle(&mut driver, &mut surface);
    driver.tick(&mut surface).unwrap();

    let idle_before = &surface.frames[0];
    assert!(!idle_before.busy);
    assert_eq!(idle_before.counter, (1, 3));
    assert_eq!(idle_before.position, Point3f::new(0.0, 0.0, 5.0));

    let moving = &surface.frames[1..10];
    let mut last = 0.0;
    for frame in moving {
        assert!(frame.busy);
        assert_eq!(frame.primary.0.as_deref(), Some("a.jpg"));
        assert_eq!(frame.secondary.0.as_deref(), Some("b.jpg"));
        assert_relative_eq!(frame.primary.1 + frame.secondary.1, 1.0, epsilon = 1e-6);
        assert!(frame.secondary.1 > last);
        last = frame.secondary.1;
    }

    let settled = surface.frames.last().unwrap();
    assert!(!settled.busy);
    assert_eq!(settled.counter, (2, 3));
    assert_eq!(settled.primary, (Some("b.jpg".to_string()), 1.0));
    assert_eq!(settled.secondary.1, 0.0);
}

#[test]
fn test_idle_frames_are_still_presented() {
    let mut driver = driver(10);
    let mut surface = RecordingSurface::default();
    for _ in 0..5 {
        assert_eq!(driver.tick(&mut surface).unwrap(), TickOutcome::Idle);
    }
    assert_eq!(surface.frames.len(), 5);
    assert_eq!(driver.frames_rendered(), 5);
}

#[test]
fn test_jump_to_out_of_bounds() {
    let mut driver = driver(10);
    assert_eq!(
        driver.jump_to(7),
        RequestOutcome::OutOfBounds { target_index: 7 }
    );
    assert_eq!(driver.jump_to(0), RequestOutcome::AlreadyThere);
    assert!(!driver.controller().is_transitioning());
}

#[test]
fn test_single_pose_never_moves() {
    let list = PoseList::load(&[RawCameraPose::new("only.jpg", [1.0, 2.0, 3.0])]).unwrap();
    let mut controller = TransitionController::new(PoseStore::new(list, Point3f::origin()), 10);

    assert_eq!(controller.advance(Direction::Next), RequestOutcome::AlreadyThere);
    assert_eq!(controller.advance(Direction::Previous), RequestOutcome::AlreadyThere);
    assert_eq!(controller.counter(), (1, 1));
}

#[test]
fn test_empty_pose_list_is_inert() {
    let mut driver = FrameDriver::new(TransitionController::new(
        PoseStore::new(PoseList::empty(), Point3f::origin()),
        DEFAULT_TRANSITION_FRAMES,
    ));
    let mut surface = RecordingSurface::default();

    assert_eq!(driver.advance(Direction::Next), RequestOutcome::NoPoses);
    assert_eq!(driver.advance(Direction::Previous), RequestOutcome::NoPoses);
    assert_eq!(driver.jump_to(0), RequestOutcome::NoPoses);
    assert_eq!(driver.tick(&mut surface).unwrap(), TickOutcome::Idle);

    let frame = &surface.frames[0];
    assert_eq!(frame.counter, (0, 0));
    assert_eq!(frame.primary.0, None);
    assert!(!frame.busy);
}
