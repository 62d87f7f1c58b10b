//! Edge detection for level-triggered inputs
//!
//! SDL reports controller buttons and axes as levels (held/not held, current
//! deflection). Menu navigation wants one event per press, so each monitored
//! signal keeps an [`EdgeState`] that remembers whether it was active last
//! frame and fires only on the inactive→active transition.

/// Persistent per-signal state for edge detection.
///
/// One `EdgeState` tracks exactly one signal. Sharing a state between two
/// signals (or polling the same state twice in a frame) swallows presses.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeState {
    was_active: bool,
}

impl EdgeState {
    /// Returns true only on the frame `level` goes from false to true.
    ///
    /// While `level` stays true this keeps returning false, and the state
    /// re-arms the frame `level` drops back to false.
    pub fn just_pressed(&mut self, level: bool) -> bool {
        if level && !self.was_active {
            self.was_active = true;
            return true;
        }
        if !level {
            self.was_active = false;
        }
        false
    }

    /// Edge detection over an analog axis used as a digital direction.
    ///
    /// The level is `|axis| > threshold`; a sustained deflection counts as
    /// one press until the stick returns inside the threshold.
    pub fn just_pressed_analog(&mut self, axis: f32, threshold: f32) -> bool {
        self.just_pressed(axis.abs() > threshold)
    }
}

/// Edge trackers for every controller signal the session watches.
///
/// Owned in one place (the session) so each physical button has a single
/// tracker regardless of which component consumes the press.
#[derive(Debug, Default)]
pub struct PadEdges {
    pub dpad_up: EdgeState,
    pub dpad_down: EdgeState,
    pub dpad_left: EdgeState,
    pub dpad_right: EdgeState,
    pub a: EdgeState,
    pub b: EdgeState,
    pub start: EdgeState,
    pub back: EdgeState,
    pub analog_up: EdgeState,
    pub analog_down: EdgeState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_while_held() {
        let mut state = EdgeState::default();
        assert!(state.just_pressed(true));
        for _ in 0..10 {
            assert!(!state.just_pressed(true));
        }
    }

    #[test]
    fn test_rearms_after_release() {
        let mut state = EdgeState::default();
        assert!(state.just_pressed(true));
        assert!(!state.just_pressed(false));
        assert!(state.just_pressed(true));
    }

    #[test]
    fn test_inactive_signal_never_fires() {
        let mut state = EdgeState::default();
        for _ in 0..5 {
            assert!(!state.just_pressed(false));
        }
    }

    #[test]
    fn test_analog_threshold() {
        let mut state = EdgeState::default();
        assert!(!state.just_pressed_analog(0.3, 0.5));
        assert!(state.just_pressed_analog(0.7, 0.5));
        // Held past the threshold: no repeat.
        assert!(!state.just_pressed_analog(0.9, 0.5));
        // Back inside the threshold re-arms.
        assert!(!state.just_pressed_analog(0.1, 0.5));
        assert!(state.just_pressed_analog(-0.8, 0.5));
    }
}
