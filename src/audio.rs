//! Feedback click playback
//!
//! A tiny synthesized click (short square-wave burst) played on saves and
//! volume steps, so volume changes are audible without shipping any sound
//! asset. Master volume is applied inside the callback; mutation goes through
//! `AudioDevice::lock`, which pauses the audio thread for the duration.

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};
use sdl2::AudioSubsystem;

const CLICK_FREQ_HZ: f32 = 880.0;
const CLICK_SECONDS: f32 = 0.05;
const CLICK_GAIN: f32 = 0.25;

pub struct ClickTone {
    phase: f32,
    phase_step: f32,
    remaining: usize,
    burst_len: usize,
    volume: f32,
}

impl AudioCallback for ClickTone {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            if self.remaining > 0 {
                self.remaining -= 1;
                self.phase = (self.phase + self.phase_step) % 1.0;
                let square = if self.phase < 0.5 { 1.0 } else { -1.0 };
                *sample = square * CLICK_GAIN * self.volume;
            } else {
                *sample = 0.0;
            }
        }
    }
}

/// Owns the playback device; dropped exactly once at shutdown.
pub struct AudioOutput {
    device: AudioDevice<ClickTone>,
}

impl AudioOutput {
    pub fn open(audio: &AudioSubsystem, volume: f32) -> Result<Self, String> {
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: Some(256),
        };

        let device = audio.open_playback(None, &desired, |spec| {
            let freq = spec.freq as f32;
            ClickTone {
                phase: 0.0,
                phase_step: CLICK_FREQ_HZ / freq,
                remaining: 0,
                burst_len: (freq * CLICK_SECONDS) as usize,
                volume,
            }
        })?;
        device.resume();

        Ok(AudioOutput { device })
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.device.lock().volume = volume.clamp(0.0, 1.0);
    }

    pub fn play_click(&mut self) {
        let mut tone = self.device.lock();
        tone.phase = 0.0;
        tone.remaining = tone.burst_len;
    }
}
