//! The persisted settings+position record
//!
//! A fixed-layout little-endian binary record, 18 bytes: relative player X
//! and Y as f32, fullscreen as one byte, target frame rate as i32, input
//! mode as one byte, volume as f32. The whole record is rewritten on every
//! save trigger; a missing or short file falls back to [`SaveRecord::default`].

use crate::input::InputMode;

/// Encoded size of a [`SaveRecord`] on disk.
pub const RECORD_LEN: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaveRecord {
    /// Player position as a fraction of window width/height, each in [0, 1].
    pub player_pos: (f32, f32),
    pub fullscreen: bool,
    pub target_fps: i32,
    pub input_mode: InputMode,
    /// Master volume in [0, 1].
    pub volume: f32,
}

impl Default for SaveRecord {
    fn default() -> Self {
        SaveRecord {
            player_pos: (0.1, 0.1),
            fullscreen: true,
            target_fps: 120,
            input_mode: InputMode::PointerKeyboard,
            volume: 0.5,
        }
    }
}

impl SaveRecord {
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut buf = [0u8; RECORD_LEN];
        buf[0..4].copy_from_slice(&self.player_pos.0.to_le_bytes());
        buf[4..8].copy_from_slice(&self.player_pos.1.to_le_bytes());
        buf[8] = u8::from(self.fullscreen);
        buf[9..13].copy_from_slice(&self.target_fps.to_le_bytes());
        buf[13] = match self.input_mode {
            InputMode::PointerKeyboard => 0,
            InputMode::Controller => 1,
        };
        buf[14..18].copy_from_slice(&self.volume.to_le_bytes());
        buf
    }

    /// Decodes a record, returning `None` for short or malformed data so the
    /// caller can fall back to defaults.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < RECORD_LEN {
            return None;
        }
        let f32_at =
            |i: usize| f32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);

        let input_mode = match bytes[13] {
            0 => InputMode::PointerKeyboard,
            1 => InputMode::Controller,
            _ => return None,
        };
        let x = f32_at(0);
        let y = f32_at(4);
        let volume = f32_at(14);
        if !x.is_finite() || !y.is_finite() || !volume.is_finite() {
            return None;
        }

        Some(SaveRecord {
            player_pos: (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)),
            fullscreen: bytes[8] != 0,
            target_fps: i32::from_le_bytes([bytes[9], bytes[10], bytes[11], bytes[12]]),
            input_mode,
            volume: volume.clamp(0.0, 1.0),
        })
    }
}
