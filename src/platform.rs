//! Platform seam: window, cursor, audio commands and raw input collection
//!
//! The session talks to the window system through the [`Platform`] trait, so
//! the state machine stays free of SDL types and testable against a stub.
//! [`SdlPlatform`] is the real implementation: it owns the canvas, the
//! controller handle, and the audio device, and assembles one
//! [`InputSnapshot`] per frame from the SDL event stream plus polled state.

use sdl2::controller::{Axis, Button, GameController};
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::mouse::{MouseButton, MouseUtil};
use sdl2::render::Canvas;
use sdl2::video::{FullscreenType, Window};
use sdl2::{EventPump, GameControllerSubsystem, VideoSubsystem};

use log::{info, warn};

use crate::audio::AudioOutput;
use crate::input::snapshot::{InputSnapshot, PadSnapshot};

/// Window size used when leaving fullscreen.
pub const WINDOWED_SIZE: (u32, u32) = (1280, 720);

/// Queries and commands the core issues to the window system.
pub trait Platform {
    fn window_size(&self) -> (u32, u32);
    fn monitor_size(&self) -> (u32, u32);
    fn set_window_size(&mut self, w: u32, h: u32);
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn set_cursor_visible(&mut self, visible: bool);
    fn set_master_volume(&mut self, volume: f32);
    fn play_feedback_click(&mut self);
}

/// Raw input and loop-control signals collected for one frame.
pub struct FrameInput {
    pub snapshot: InputSnapshot,
    pub quit: bool,
}

pub struct SdlPlatform {
    canvas: Canvas<Window>,
    video: VideoSubsystem,
    mouse: MouseUtil,
    audio: Option<AudioOutput>,
    controller: Option<GameController>,
    cursor_visible: bool,
}

impl SdlPlatform {
    pub fn new(
        canvas: Canvas<Window>,
        video: VideoSubsystem,
        mouse: MouseUtil,
        audio: Option<AudioOutput>,
        controller: Option<GameController>,
    ) -> Self {
        SdlPlatform {
            canvas,
            video,
            mouse,
            audio,
            controller,
            cursor_visible: true,
        }
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<Window> {
        &mut self.canvas
    }

    /// Drains the event queue and merges it with polled state into the
    /// frame's snapshot.
    pub fn collect_input(&mut self, event_pump: &mut EventPump) -> FrameInput {
        let mut snap = InputSnapshot::default();
        let mut quit = false;
        let mut pad_activity = false;

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => quit = true,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    snap.any_key = true;
                    match key {
                        Keycode::Up | Keycode::W => snap.nav_up = true,
                        Keycode::Down | Keycode::S => snap.nav_down = true,
                        Keycode::Left | Keycode::A => snap.nav_left = true,
                        Keycode::Right | Keycode::D => snap.nav_right = true,
                        Keycode::Return | Keycode::Space => snap.confirm = true,
                        Keycode::Escape => snap.escape = true,
                        Keycode::M => snap.menu_key = true,
                        Keycode::F1 => snap.debug_key = true,
                        _ => {}
                    }
                }
                Event::MouseButtonDown { mouse_btn, .. } => {
                    snap.any_click = true;
                    if mouse_btn == MouseButton::Left {
                        snap.left_click = true;
                    }
                }
                Event::MouseMotion { xrel, yrel, .. } => {
                    snap.mouse_delta.0 += xrel as f32;
                    snap.mouse_delta.1 += yrel as f32;
                }
                Event::ControllerAxisMotion { .. } | Event::ControllerButtonDown { .. } => {
                    pad_activity = true;
                }
                _ => {}
            }
        }

        let mouse_state = event_pump.mouse_state();
        snap.mouse_pos = (mouse_state.x() as f32, mouse_state.y() as f32);

        let keyboard = event_pump.keyboard_state();
        snap.move_up = keyboard.is_scancode_pressed(Scancode::W)
            || keyboard.is_scancode_pressed(Scancode::Up);
        snap.move_down = keyboard.is_scancode_pressed(Scancode::S)
            || keyboard.is_scancode_pressed(Scancode::Down);
        snap.move_left = keyboard.is_scancode_pressed(Scancode::A)
            || keyboard.is_scancode_pressed(Scancode::Left);
        snap.move_right = keyboard.is_scancode_pressed(Scancode::D)
            || keyboard.is_scancode_pressed(Scancode::Right);

        if let Some(pad) = &self.controller {
            snap.pad = Some(PadSnapshot {
                dpad_up: pad.button(Button::DPadUp),
                dpad_down: pad.button(Button::DPadDown),
                dpad_left: pad.button(Button::DPadLeft),
                dpad_right: pad.button(Button::DPadRight),
                a: pad.button(Button::A),
                b: pad.button(Button::B),
                start: pad.button(Button::Start),
                back: pad.button(Button::Back),
                left_x: pad.axis(Axis::LeftX),
                left_y: pad.axis(Axis::LeftY),
                activity: pad_activity,
            });
        }

        FrameInput {
            snapshot: snap,
            quit,
        }
    }
}

impl Platform for SdlPlatform {
    fn window_size(&self) -> (u32, u32) {
        self.canvas.window().size()
    }

    fn monitor_size(&self) -> (u32, u32) {
        match self.video.desktop_display_mode(0) {
            Ok(mode) => (mode.w as u32, mode.h as u32),
            Err(e) => {
                warn!("could not query monitor size ({}), using window size", e);
                self.window_size()
            }
        }
    }

    fn set_window_size(&mut self, w: u32, h: u32) {
        if let Err(e) = self.canvas.window_mut().set_size(w, h) {
            warn!("window resize to {}x{} failed: {}", w, h, e);
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        let mode = if fullscreen {
            FullscreenType::Desktop
        } else {
            FullscreenType::Off
        };
        if let Err(e) = self.canvas.window_mut().set_fullscreen(mode) {
            warn!("fullscreen change failed: {}", e);
            return;
        }
        if fullscreen {
            let (mw, mh) = self.monitor_size();
            self.set_window_size(mw, mh);
        } else {
            self.set_window_size(WINDOWED_SIZE.0, WINDOWED_SIZE.1);
        }
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if self.cursor_visible != visible {
            self.mouse.show_cursor(visible);
            self.cursor_visible = visible;
        }
    }

    fn set_master_volume(&mut self, volume: f32) {
        if let Some(audio) = &mut self.audio {
            audio.set_volume(volume);
        }
    }

    fn play_feedback_click(&mut self) {
        if let Some(audio) = &mut self.audio {
            audio.play_click();
        }
    }
}

/// Opens the first recognized game controller, if any.
///
/// The returned handle is dropped with the platform, releasing the device
/// exactly once on any exit path.
pub fn open_first_controller(subsystem: &GameControllerSubsystem) -> Option<GameController> {
    let count = match subsystem.num_joysticks() {
        Ok(n) => n,
        Err(e) => {
            warn!("joystick enumeration failed: {}", e);
            return None;
        }
    };

    for id in 0..count {
        if !subsystem.is_game_controller(id) {
            continue;
        }
        match subsystem.open(id) {
            Ok(controller) => {
                info!("controller connected: {}", controller.name());
                return Some(controller);
            }
            Err(e) => warn!("failed to open controller {}: {}", id, e),
        }
    }
    None
}
