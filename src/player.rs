use crate::input::snapshot::{InputSnapshot, AXIS_MAX, STICK_DEADZONE};
use crate::input::InputMode;

/// Player square edge as a fraction of window width.
pub const PLAYER_SIZE_PCT: f32 = 0.03;

/// Movement speed as a fraction of the smaller window dimension, per second.
const BASE_SPEED_PCT: f32 = 0.5;

const DIAGONAL_FACTOR: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// The controllable square, positioned in window pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Player {
    pub x: f32,
    pub y: f32,
}

impl Player {
    pub fn new() -> Self {
        Player::default()
    }

    /// Edge length in pixels for the given window width.
    pub fn size(window_w: u32) -> f32 {
        window_w as f32 * PLAYER_SIZE_PCT
    }

    /// Places the player from saved relative coordinates, clamped so the
    /// square stays fully on-screen.
    pub fn place_from_relative(&mut self, rel: (f32, f32), window_w: u32, window_h: u32) {
        let w = window_w as f32;
        let h = window_h as f32;
        let size = Self::size(window_w);
        self.x = (rel.0 * w).clamp(0.0, w - size);
        self.y = (rel.1 * h).clamp(0.0, h - size);
    }

    /// Current position as a fraction of the window, for persistence.
    pub fn to_relative(&self, window_w: u32, window_h: u32) -> (f32, f32) {
        (
            (self.x / window_w as f32).clamp(0.0, 1.0),
            (self.y / window_h as f32).clamp(0.0, 1.0),
        )
    }

    /// Integrates one frame of movement and clamps to the window.
    pub fn update(
        &mut self,
        snap: &InputSnapshot,
        mode: InputMode,
        dt: f32,
        window_w: u32,
        window_h: u32,
    ) {
        let (mx, my) = movement_vector(snap, mode);

        let w = window_w as f32;
        let h = window_h as f32;
        let speed = w.min(h) * BASE_SPEED_PCT;

        self.x += mx * speed * dt;
        self.y += my * speed * dt;

        let size = Self::size(window_w);
        self.x = self.x.clamp(0.0, w - size);
        self.y = self.y.clamp(0.0, h - size);
    }
}

/// Movement vector for the active input mode, diagonal-normalized so moving
/// at an angle is no faster than along an axis.
fn movement_vector(snap: &InputSnapshot, mode: InputMode) -> (f32, f32) {
    let mut mx = 0.0;
    let mut my = 0.0;

    match mode {
        InputMode::PointerKeyboard => {
            if snap.move_up {
                my -= 1.0;
            }
            if snap.move_down {
                my += 1.0;
            }
            if snap.move_left {
                mx -= 1.0;
            }
            if snap.move_right {
                mx += 1.0;
            }
        }
        InputMode::Controller => {
            if let Some(pad) = snap.pad {
                if pad.left_x.unsigned_abs() > STICK_DEADZONE as u16 {
                    mx = f32::from(pad.left_x) / AXIS_MAX;
                }
                if pad.left_y.unsigned_abs() > STICK_DEADZONE as u16 {
                    my = f32::from(pad.left_y) / AXIS_MAX;
                }
            }
        }
    }

    if mx != 0.0 && my != 0.0 {
        mx *= DIAGONAL_FACTOR;
        my *= DIAGONAL_FACTOR;
    }
    (mx, my)
}
