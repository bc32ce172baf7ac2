//! Navigation policy: turns user intents into transition requests

use tracing::debug;

use crate::transition::{RequestOutcome, TransitionController};

/// Step direction through the pose sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Index reached by stepping from `current` in `direction`, wrapping at both ends.
///
/// Returns `None` when there are no poses.
pub fn step_index(current: usize, len: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current % len;
    Some(match direction {
        Direction::Next => (current + 1) % len,
        Direction::Previous => (current + len - 1) % len,
    })
}

impl TransitionController {
    /// Step to the neighbouring pose. Dropped while a transition is in flight.
    pub fn advance(&mut self, direction: Direction) -> RequestOutcome {
        let Some(target) = step_index(self.current_index(), self.store().len(), direction) else {
            debug!("Ignoring {:?}: no camera poses loaded", direction);
            return RequestOutcome::NoPoses;
        };
        if self.is_transitioning() {
            return RequestOutcome::Busy;
        }
        self.request_transition(target)
    }

    pub fn navigate_previous(&mut self) -> RequestOutcome {
        self.advance(Direction::Previous)
    }

    pub fn navigate_next(&mut self) -> RequestOutcome {
        self.advance(Direction::Next)
    }

    /// Jump straight to the pose at `index`
    pub fn jump_to(&mut self, index: usize) -> RequestOutcome {
        if self.store().is_empty() {
            return RequestOutcome::NoPoses;
        }
        self.request_transition(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_index_wraps() {
        assert_eq!(step_index(2, 3, Direction::Next), Some(0));
        assert_eq!(step_index(0, 3, Direction::Previous), Some(2));
        assert_eq!(step_index(1, 3, Direction::Next), Some(2));
        assert_eq!(step_index(1, 3, Direction::Previous), Some(0));
        assert_eq!(step_index(0, 1, Direction::Next), Some(0));
        assert_eq!(step_index(0, 0, Direction::Next), None);
    }
}
