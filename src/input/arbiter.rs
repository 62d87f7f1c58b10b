//! Input mode arbitration
//!
//! Exactly one input mode is active per frame. The arbiter scans the frame's
//! raw activity and picks it: controller events propose [`InputMode::Controller`],
//! pointer/keyboard activity proposes [`InputMode::PointerKeyboard`] and is
//! checked second, so it wins when both fire in the same frame. With no
//! activity at all the previous mode holds.
//!
//! Cursor visibility follows the mode, with one wrinkle: inside
//! pointer/keyboard mode the user may navigate menus with the keyboard alone.
//! The `discrete_nav` flag tracks that, hiding the cursor until the mouse
//! moves again, so switching between mouse and keyboard never leaves a stale
//! cursor or a stale highlight on screen.

use crate::input::snapshot::InputSnapshot;

/// Which device currently drives the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    PointerKeyboard,
    Controller,
}

/// Per-frame input mode decision plus cursor/discrete-navigation state.
#[derive(Debug)]
pub struct InputArbiter {
    mode: InputMode,
    discrete_nav: bool,
    cursor_visible: bool,
}

impl InputArbiter {
    /// Starts in the given mode (restored from the save record).
    pub fn new(mode: InputMode) -> Self {
        InputArbiter {
            mode,
            discrete_nav: false,
            cursor_visible: mode == InputMode::PointerKeyboard,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Discrete (keyboard/controller) navigation owns the menu highlight.
    pub fn discrete_nav(&self) -> bool {
        self.discrete_nav
    }

    /// Called by the navigator when an up/down/confirm press is seen.
    pub fn mark_discrete_nav(&mut self) {
        self.discrete_nav = true;
    }

    /// Called by the navigator when a mouse click lands; the pointer takes
    /// back ownership of the hover model.
    pub fn pointer_reclaimed(&mut self) {
        self.discrete_nav = false;
    }

    /// Picks the mode for this frame and returns the cursor visibility the
    /// platform should apply.
    pub fn update(&mut self, snap: &InputSnapshot) -> bool {
        let previous = self.mode;

        if snap.pad.is_some_and(|p| p.activity) {
            self.mode = InputMode::Controller;
        }
        // Checked second: pointer/keyboard wins a tie.
        if snap.pointer_keyboard_activity() {
            self.mode = InputMode::PointerKeyboard;
        }

        if previous != self.mode {
            match self.mode {
                InputMode::Controller => self.cursor_visible = false,
                InputMode::PointerKeyboard => {
                    self.cursor_visible = true;
                    self.discrete_nav = false;
                }
            }
        }

        // Within pointer/keyboard mode the mouse and the keyboard trade the
        // cursor back and forth without a mode change.
        if self.mode == InputMode::PointerKeyboard {
            if snap.mouse_moved() {
                self.cursor_visible = true;
                self.discrete_nav = false;
            } else if self.discrete_nav {
                self.cursor_visible = false;
            }
        }

        self.cursor_visible
    }
}
