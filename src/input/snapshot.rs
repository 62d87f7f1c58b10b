//! Per-frame raw input data
//!
//! The platform layer assembles one [`InputSnapshot`] per frame: just-pressed
//! keys and clicks come from the SDL event stream, held keys and controller
//! levels from polled state. Everything downstream (arbiter, navigator,
//! session) reads this plain struct, so the core never touches SDL directly.

/// Full analog deflection of an SDL controller axis.
pub const AXIS_MAX: f32 = 32767.0;

/// Stick magnitude below which gameplay movement input is treated as zero.
pub const STICK_DEADZONE: i16 = 8000;

/// Normalized stick threshold for discrete menu navigation.
pub const NAV_STICK_THRESHOLD: f32 = 0.5;

/// Keyboard and pointer input for one frame.
#[derive(Debug, Default, Clone)]
pub struct InputSnapshot {
    // Just-pressed this frame (from key-down / button-down events).
    pub nav_up: bool,
    pub nav_down: bool,
    pub nav_left: bool,
    pub nav_right: bool,
    pub confirm: bool,
    pub escape: bool,
    pub menu_key: bool,
    pub debug_key: bool,
    /// Any keyboard key went down this frame (ignoring repeats).
    pub any_key: bool,
    pub left_click: bool,
    /// Any mouse button went down this frame.
    pub any_click: bool,

    // Pointer state.
    pub mouse_pos: (f32, f32),
    pub mouse_delta: (f32, f32),

    // Held movement keys (levels, for gameplay).
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,

    /// Present while a controller is connected.
    pub pad: Option<PadSnapshot>,
}

/// Controller state for one frame: button levels plus raw axis values.
#[derive(Debug, Default, Clone, Copy)]
pub struct PadSnapshot {
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub a: bool,
    pub b: bool,
    pub start: bool,
    pub back: bool,
    /// Left stick, signed 16-bit as SDL reports it.
    pub left_x: i16,
    pub left_y: i16,
    /// An axis-motion or button-down event arrived this frame.
    pub activity: bool,
}

impl InputSnapshot {
    /// The pointer produced a nonzero movement delta this frame.
    pub fn mouse_moved(&self) -> bool {
        self.mouse_delta.0 != 0.0 || self.mouse_delta.1 != 0.0
    }

    /// Any pointer or keyboard activity that claims the input mode.
    pub fn pointer_keyboard_activity(&self) -> bool {
        self.any_click || self.any_key || self.mouse_moved()
    }
}

impl PadSnapshot {
    /// Left stick Y normalized to [-1, 1].
    pub fn left_y_norm(&self) -> f32 {
        f32::from(self.left_y) / AXIS_MAX
    }
}
