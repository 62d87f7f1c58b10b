//! Application state machine
//!
//! The [`Session`] owns every piece of mutable state for the process: the
//! current [`AppState`], the in-memory save record, the player, the menus,
//! and the input arbitration state. One `update` call per frame reads the
//! input snapshot and drives transitions; side effects (persist, window-mode
//! change, cursor visibility, audio) go through the [`Platform`] trait.

use log::warn;

use crate::input::edge::PadEdges;
use crate::input::snapshot::InputSnapshot;
use crate::input::{InputArbiter, InputMode};
use crate::menu::{Menu, MenuAction, MenuNavigator, MenuSet};
use crate::platform::Platform;
use crate::player::Player;
use crate::save::{SaveRecord, SaveStore};

/// How long the "Game Saved!" confirmation stays up.
pub const SAVE_POPUP_SECONDS: f32 = 2.0;

/// Frames of window-size reassertion after entering fullscreen, giving the
/// window manager time to settle.
const SETTLE_FRAMES: u32 = 10;

const VOLUME_STEP: f32 = 0.05;

/// The four top-level states. Exactly one is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Playing,
    Settings,
    Paused,
}

pub struct Session {
    state: AppState,
    record: SaveRecord,
    store: SaveStore,
    player: Player,
    menus: MenuSet,
    arbiter: InputArbiter,
    navigator: MenuNavigator,
    pad: PadEdges,
    save_popup: f32,
    settle_frames: u32,
    should_exit: bool,
    show_debug: bool,
    last_window: (u32, u32),
    force_layout: bool,
}

impl Session {
    pub fn new(record: SaveRecord, store: SaveStore, window: (u32, u32)) -> Self {
        let mut player = Player::new();
        player.place_from_relative(record.player_pos, window.0, window.1);

        Session {
            state: AppState::Menu,
            arbiter: InputArbiter::new(record.input_mode),
            record,
            store,
            player,
            menus: MenuSet::new(window.0, window.1),
            navigator: MenuNavigator::new(),
            pad: PadEdges::default(),
            save_popup: 0.0,
            settle_frames: 0,
            should_exit: false,
            show_debug: false,
            last_window: window,
            force_layout: false,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn input_mode(&self) -> InputMode {
        self.arbiter.mode()
    }

    pub fn volume(&self) -> f32 {
        self.record.volume
    }

    pub fn target_fps(&self) -> i32 {
        self.record.target_fps
    }

    pub fn debug_overlay(&self) -> bool {
        self.show_debug
    }

    /// Remaining popup time as a fraction of its full duration, for the
    /// fade-out.
    pub fn save_popup_alpha(&self) -> f32 {
        (self.save_popup / SAVE_POPUP_SECONDS).clamp(0.0, 1.0)
    }

    /// The menu displayed by the current state, if any.
    pub fn active_menu(&self) -> Option<&Menu> {
        match self.state {
            AppState::Menu => Some(&self.menus.main),
            AppState::Settings => Some(&self.menus.settings),
            AppState::Paused => Some(&self.menus.pause),
            AppState::Playing => None,
        }
    }

    /// Runs one frame of the state machine.
    pub fn update(&mut self, platform: &mut dyn Platform, snap: &InputSnapshot, dt: f32) {
        // Fullscreen settle transition: reassert the monitor resolution for a
        // counted number of frames after entering fullscreen.
        if self.settle_frames > 0 {
            self.settle_frames -= 1;
            if self.record.fullscreen {
                let (mw, mh) = platform.monitor_size();
                platform.set_window_size(mw, mh);
            }
        }

        let cursor_visible = self.arbiter.update(snap);
        platform.set_cursor_visible(cursor_visible);

        if snap.debug_key {
            self.show_debug = !self.show_debug;
        }
        if self.save_popup > 0.0 {
            self.save_popup = (self.save_popup - dt).max(0.0);
        }

        match self.state {
            AppState::Menu => self.update_main_menu(platform, snap),
            AppState::Playing => self.update_playing(platform, snap, dt),
            AppState::Settings => self.update_settings(platform, snap),
            AppState::Paused => self.update_paused(platform, snap),
        }
    }

    /// Rebuilds menu bounds when the window size changed or a recalculation
    /// was forced. Runs before input in every menu-bearing state.
    fn ensure_layout(&mut self, platform: &dyn Platform) {
        let window = platform.window_size();
        if self.force_layout || window != self.last_window {
            self.menus.rebuild(window.0, window.1);
            self.last_window = window;
            self.force_layout = false;
        }
    }

    fn update_main_menu(&mut self, platform: &mut dyn Platform, snap: &InputSnapshot) {
        self.ensure_layout(platform);

        let action =
            self.navigator
                .update(&mut self.menus.main, snap, &mut self.arbiter, &mut self.pad);
        match action {
            Some(MenuAction::StartGame) => {
                let (w, h) = platform.window_size();
                self.player.place_from_relative(self.record.player_pos, w, h);
                self.state = AppState::Playing;
            }
            Some(MenuAction::OpenSettings) => self.state = AppState::Settings,
            Some(MenuAction::SaveGame) => self.persist(platform),
            Some(MenuAction::Exit) => {
                self.persist(platform);
                self.should_exit = true;
            }
            _ => {}
        }
    }

    fn update_settings(&mut self, platform: &mut dyn Platform, snap: &InputSnapshot) {
        self.ensure_layout(platform);

        let back_level = snap.pad.is_some_and(|p| p.back);
        let b_level = snap.pad.is_some_and(|p| p.b);
        let back = self.pad.back.just_pressed(back_level);
        let b = self.pad.b.just_pressed(b_level);
        if snap.escape || back || b {
            self.persist(platform);
            self.state = AppState::Menu;
            return;
        }

        let action = self.navigator.update(
            &mut self.menus.settings,
            snap,
            &mut self.arbiter,
            &mut self.pad,
        );
        match action {
            Some(MenuAction::AdjustVolume(steps)) if steps != 0 => {
                self.adjust_volume(platform, steps);
            }
            Some(MenuAction::ToggleFullscreen) => self.toggle_fullscreen(platform),
            Some(MenuAction::BackToMenu) => {
                self.persist(platform);
                self.state = AppState::Menu;
            }
            _ => {}
        }
    }

    fn update_playing(&mut self, platform: &mut dyn Platform, snap: &InputSnapshot, dt: f32) {
        let start_level = snap.pad.is_some_and(|p| p.start);
        if snap.escape || self.pad.start.just_pressed(start_level) {
            self.state = AppState::Paused;
            return;
        }

        let (w, h) = platform.window_size();
        self.player.update(snap, self.arbiter.mode(), dt, w, h);
    }

    fn update_paused(&mut self, platform: &mut dyn Platform, snap: &InputSnapshot) {
        self.ensure_layout(platform);

        let start_level = snap.pad.is_some_and(|p| p.start);
        let b_level = snap.pad.is_some_and(|p| p.b);
        let back_level = snap.pad.is_some_and(|p| p.back);

        if snap.escape
            || self.pad.start.just_pressed(start_level)
            || self.pad.b.just_pressed(b_level)
        {
            self.state = AppState::Playing;
            return;
        }
        if snap.menu_key || self.pad.back.just_pressed(back_level) {
            self.persist(platform);
            self.state = AppState::Menu;
            return;
        }

        let action =
            self.navigator
                .update(&mut self.menus.pause, snap, &mut self.arbiter, &mut self.pad);
        match action {
            Some(MenuAction::Resume) => self.state = AppState::Playing,
            Some(MenuAction::SaveGame) => self.persist(platform),
            Some(MenuAction::MainMenu) => {
                self.persist(platform);
                self.state = AppState::Menu;
            }
            _ => {}
        }
    }

    /// Final flush on the way out, for both the Exit action and an external
    /// window-close.
    pub fn flush(&mut self, platform: &mut dyn Platform) {
        self.persist(platform);
    }

    /// Flushes the full record to disk. On success the confirmation popup is
    /// armed; on failure the error is logged and in-memory state is left
    /// untouched.
    fn persist(&mut self, platform: &mut dyn Platform) {
        let (w, h) = platform.window_size();
        self.record.player_pos = self.player.to_relative(w, h);
        self.record.input_mode = self.arbiter.mode();

        match self.store.save(&self.record) {
            Ok(()) => {
                self.save_popup = SAVE_POPUP_SECONDS;
                platform.play_feedback_click();
            }
            Err(e) => warn!("failed to save game: {}", e),
        }
    }

    fn adjust_volume(&mut self, platform: &mut dyn Platform, steps: i8) {
        self.record.volume = step_volume(self.record.volume, steps);
        platform.set_master_volume(self.record.volume);
        platform.play_feedback_click();
        self.persist(platform);
    }

    fn toggle_fullscreen(&mut self, platform: &mut dyn Platform) {
        self.record.fullscreen = !self.record.fullscreen;
        platform.set_fullscreen(self.record.fullscreen);
        if self.record.fullscreen {
            self.settle_frames = SETTLE_FRAMES;
        }

        // The window just changed size: recompute the player's pixel position
        // and rebuild menu bounds before the next input pass.
        let (w, h) = platform.window_size();
        self.player.place_from_relative(self.record.player_pos, w, h);
        self.force_layout = true;
    }
}

/// One volume notch: ±0.05 per step, clamped to [0, 1] and snapped to the
/// nearest 1/20 so repeated adjustment never drifts.
pub fn step_volume(volume: f32, steps: i8) -> f32 {
    let stepped = (volume + f32::from(steps) * VOLUME_STEP).clamp(0.0, 1.0);
    (stepped * 20.0).round() / 20.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::snapshot::PadSnapshot;
    use std::path::PathBuf;

    struct TestPlatform {
        window: (u32, u32),
        monitor: (u32, u32),
        fullscreen: bool,
        cursor_visible: bool,
        master_volume: f32,
        clicks: u32,
        resize_calls: u32,
    }

    impl TestPlatform {
        fn new() -> Self {
            TestPlatform {
                window: (1280, 720),
                monitor: (1920, 1080),
                fullscreen: false,
                cursor_visible: true,
                master_volume: 0.5,
                clicks: 0,
                resize_calls: 0,
            }
        }
    }

    impl Platform for TestPlatform {
        fn window_size(&self) -> (u32, u32) {
            self.window
        }
        fn monitor_size(&self) -> (u32, u32) {
            self.monitor
        }
        fn set_window_size(&mut self, w: u32, h: u32) {
            self.window = (w, h);
            self.resize_calls += 1;
        }
        fn set_fullscreen(&mut self, fullscreen: bool) {
            self.fullscreen = fullscreen;
            self.window = if fullscreen {
                self.monitor
            } else {
                (1280, 720)
            };
        }
        fn set_cursor_visible(&mut self, visible: bool) {
            self.cursor_visible = visible;
        }
        fn set_master_volume(&mut self, volume: f32) {
            self.master_volume = volume;
        }
        fn play_feedback_click(&mut self) {
            self.clicks += 1;
        }
    }

    fn scratch_store(name: &str) -> (SaveStore, PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "template2d-session-{}-{}",
            std::process::id(),
            name
        ));
        (SaveStore::new(&path), path)
    }

    fn session(name: &str) -> Session {
        let (store, _) = scratch_store(name);
        Session::new(SaveRecord::default(), store, (1280, 720))
    }

    fn confirm() -> InputSnapshot {
        InputSnapshot {
            confirm: true,
            any_key: true,
            ..InputSnapshot::default()
        }
    }

    fn escape() -> InputSnapshot {
        InputSnapshot {
            escape: true,
            any_key: true,
            ..InputSnapshot::default()
        }
    }

    fn nav_down() -> InputSnapshot {
        InputSnapshot {
            nav_down: true,
            any_key: true,
            ..InputSnapshot::default()
        }
    }

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_start_game_places_player_and_transitions() {
        let mut platform = TestPlatform::new();
        let mut session = session("start");

        // First item of the main menu is Start Game; confirm activates it.
        session.update(&mut platform, &confirm(), DT);
        assert_eq!(session.state(), AppState::Playing);

        let expected_x = 0.1 * 1280.0;
        let expected_y = 0.1 * 720.0;
        assert!((session.player().x - expected_x).abs() < 1e-3);
        assert!((session.player().y - expected_y).abs() < 1e-3);
    }

    #[test]
    fn test_pause_resume_round_trip_keeps_position() {
        let mut platform = TestPlatform::new();
        let mut session = session("pause");

        session.update(&mut platform, &confirm(), DT);
        assert_eq!(session.state(), AppState::Playing);
        let (x, y) = (session.player().x, session.player().y);

        session.update(&mut platform, &escape(), DT);
        assert_eq!(session.state(), AppState::Paused);
        session.update(&mut platform, &escape(), DT);
        assert_eq!(session.state(), AppState::Playing);

        assert_eq!(session.player().x, x);
        assert_eq!(session.player().y, y);
    }

    #[test]
    fn test_controller_start_button_pauses() {
        let mut platform = TestPlatform::new();
        let mut session = session("padpause");
        session.update(&mut platform, &confirm(), DT);

        let start = InputSnapshot {
            pad: Some(PadSnapshot {
                start: true,
                activity: true,
                ..PadSnapshot::default()
            }),
            ..InputSnapshot::default()
        };
        session.update(&mut platform, &start, DT);
        assert_eq!(session.state(), AppState::Paused);

        // Held Start does not immediately resume.
        session.update(&mut platform, &start, DT);
        assert_eq!(session.state(), AppState::Paused);
    }

    #[test]
    fn test_exit_persists_and_sets_flag() {
        let mut platform = TestPlatform::new();
        let (store, path) = scratch_store("exit");
        let mut session = Session::new(SaveRecord::default(), store, (1280, 720));

        // Navigate down to Exit (index 3) and confirm.
        for _ in 0..3 {
            session.update(&mut platform, &nav_down(), DT);
        }
        session.update(&mut platform, &confirm(), DT);

        assert!(session.should_exit());
        assert!(path.exists());
        assert!(session.save_popup_alpha() > 0.9);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_settings_escape_saves_and_returns() {
        let mut platform = TestPlatform::new();
        let (store, path) = scratch_store("settings-escape");
        let mut session = Session::new(SaveRecord::default(), store, (1280, 720));

        session.update(&mut platform, &nav_down(), DT);
        session.update(&mut platform, &confirm(), DT);
        assert_eq!(session.state(), AppState::Settings);

        session.update(&mut platform, &escape(), DT);
        assert_eq!(session.state(), AppState::Menu);
        assert!(path.exists());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_volume_steps_apply_and_persist() {
        let mut platform = TestPlatform::new();
        let (store, path) = scratch_store("volume");
        let mut session = Session::new(SaveRecord::default(), store, (1280, 720));

        // Into settings. The discrete cursor carries over from the main menu
        // (index 1), so step up once to reach the Volume row.
        session.update(&mut platform, &nav_down(), DT);
        session.update(&mut platform, &confirm(), DT);
        assert_eq!(session.state(), AppState::Settings);
        let up = InputSnapshot {
            nav_up: true,
            any_key: true,
            ..InputSnapshot::default()
        };
        session.update(&mut platform, &up, DT);

        let right = InputSnapshot {
            nav_right: true,
            any_key: true,
            ..InputSnapshot::default()
        };
        session.update(&mut platform, &right, DT);

        assert!((session.volume() - 0.55).abs() < 1e-6);
        assert!((platform.master_volume - 0.55).abs() < 1e-6);
        assert!(platform.clicks >= 1);
        assert!(path.exists());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_fullscreen_toggle_starts_settle_countdown() {
        let mut platform = TestPlatform::new();
        let mut session = session("fullscreen");

        session.update(&mut platform, &nav_down(), DT);
        session.update(&mut platform, &confirm(), DT);
        assert_eq!(session.state(), AppState::Settings);

        // The carried-over cursor already rests on Toggle Fullscreen
        // (index 1). The default record is fullscreen=true, so the first
        // toggle goes to windowed.
        session.update(&mut platform, &confirm(), DT);
        assert!(!platform.fullscreen);
        assert_eq!(platform.window, (1280, 720));

        // Toggle back on: settle countdown reasserts the monitor size.
        session.update(&mut platform, &confirm(), DT);
        assert!(platform.fullscreen);
        let resizes_before = platform.resize_calls;
        for _ in 0..SETTLE_FRAMES {
            session.update(&mut platform, &InputSnapshot::default(), DT);
        }
        assert_eq!(platform.resize_calls, resizes_before + SETTLE_FRAMES);
        assert_eq!(platform.window, (1920, 1080));

        // Countdown expired: no further reassertion.
        session.update(&mut platform, &InputSnapshot::default(), DT);
        assert_eq!(platform.resize_calls, resizes_before + SETTLE_FRAMES);
    }

    #[test]
    fn test_resize_rebuilds_menu_bounds() {
        let mut platform = TestPlatform::new();
        let mut session = session("resize");

        session.update(&mut platform, &InputSnapshot::default(), DT);
        let before = session.active_menu().unwrap().items()[0].bounds;

        platform.window = (1920, 1080);
        session.update(&mut platform, &InputSnapshot::default(), DT);
        let after = session.active_menu().unwrap().items()[0].bounds;
        assert!(before != after);
    }

    #[test]
    fn test_save_popup_fades_out() {
        let mut platform = TestPlatform::new();
        let mut session = session("popup");

        // Down twice to Save Game (index 2) and confirm.
        session.update(&mut platform, &nav_down(), DT);
        session.update(&mut platform, &nav_down(), DT);
        session.update(&mut platform, &confirm(), DT);
        assert_eq!(session.state(), AppState::Menu);
        let alpha = session.save_popup_alpha();
        assert!(alpha > 0.9);

        for _ in 0..150 {
            session.update(&mut platform, &InputSnapshot::default(), DT);
        }
        assert_eq!(session.save_popup_alpha(), 0.0);

        let (_, path) = scratch_store("popup");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_paused_menu_key_returns_to_main_menu() {
        let mut platform = TestPlatform::new();
        let (store, path) = scratch_store("mainmenu");
        let mut session = Session::new(SaveRecord::default(), store, (1280, 720));

        session.update(&mut platform, &confirm(), DT);
        session.update(&mut platform, &escape(), DT);
        assert_eq!(session.state(), AppState::Paused);

        let m = InputSnapshot {
            menu_key: true,
            any_key: true,
            ..InputSnapshot::default()
        };
        session.update(&mut platform, &m, DT);
        assert_eq!(session.state(), AppState::Menu);
        assert!(path.exists());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_step_volume_clamps_and_snaps() {
        let mut volume = 1.0;
        for _ in 0..30 {
            volume = step_volume(volume, -1);
            assert!(volume >= 0.0);
            let snapped = (volume * 20.0).round() / 20.0;
            assert!((volume - snapped).abs() < 1e-6);
        }
        assert_eq!(volume, 0.0);

        assert!((step_volume(0.98, 1) - 1.0).abs() < 1e-6);
        assert!((step_volume(0.5, 1) - 0.55).abs() < 1e-6);
    }
}
