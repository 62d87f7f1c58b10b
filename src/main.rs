use std::time::{Duration, Instant};

use log::{info, warn};

mod audio;
mod input;
mod menu;
mod platform;
mod player;
mod render;
mod save;
mod session;
mod text;

use audio::AudioOutput;
use platform::{open_first_controller, Platform, SdlPlatform, WINDOWED_SIZE};
use save::SaveStore;
use session::Session;

fn main() -> Result<(), String> {
    env_logger::init();

    let store = SaveStore::new(SaveStore::default_path());
    let record = store.load_or_default();

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let controller_subsystem = sdl_context.game_controller()?;
    let audio_subsystem = sdl_context.audio()?;

    let (win_w, win_h) = if record.fullscreen {
        match video_subsystem.desktop_display_mode(0) {
            Ok(mode) => (mode.w as u32, mode.h as u32),
            Err(e) => {
                warn!("monitor size unavailable ({}), starting windowed", e);
                WINDOWED_SIZE
            }
        }
    } else {
        WINDOWED_SIZE
    };

    let mut window_builder = video_subsystem.window("2D Game Template", win_w, win_h);
    window_builder.position_centered();
    if record.fullscreen {
        window_builder.fullscreen_desktop();
    } else {
        window_builder.resizable();
    }
    let window = window_builder.build().map_err(|e| e.to_string())?;
    let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

    // A missing audio device is not fatal; the click is simply muted.
    let audio = match AudioOutput::open(&audio_subsystem, record.volume) {
        Ok(output) => Some(output),
        Err(e) => {
            warn!("audio unavailable: {}", e);
            None
        }
    };
    let controller = open_first_controller(&controller_subsystem);

    let mut event_pump = sdl_context.event_pump()?;
    let mut platform = SdlPlatform::new(
        canvas,
        video_subsystem,
        sdl_context.mouse(),
        audio,
        controller,
    );

    let window_size = platform.window_size();
    let mut session = Session::new(record, store, window_size);
    info!(
        "starting at {}x{}, target {} fps",
        window_size.0,
        window_size.1,
        session.target_fps()
    );

    let mut last_frame = Instant::now();
    loop {
        let frame = platform.collect_input(&mut event_pump);
        if frame.quit {
            break;
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32().min(0.25);
        last_frame = now;

        session.update(&mut platform, &frame.snapshot, dt);
        if session.should_exit() {
            break;
        }

        render::draw_frame(platform.canvas_mut(), &session, &frame.snapshot)?;
        platform.canvas_mut().present();

        let target = Duration::from_secs_f32(1.0 / session.target_fps().max(1) as f32);
        let elapsed = last_frame.elapsed();
        if elapsed < target {
            std::thread::sleep(target - elapsed);
        }
    }

    // Window-close and Exit both flush the record on the way out.
    session.flush(&mut platform);
    info!("shutting down");
    Ok(())
}
