//! Percentage-of-window menu layout
//!
//! Bounds are absolute pixels recomputed from relative rules so the menus
//! scale with any window or monitor size: buttons are 20% of the window
//! width, 6% of its height, spaced by 2% of its height, in a column centered
//! on both axes.

use crate::menu::model::{Bounds, Menu, MenuAction, MenuItem};

const BUTTON_WIDTH_PCT: f32 = 0.2;
const BUTTON_HEIGHT_PCT: f32 = 0.06;
const SPACING_PCT: f32 = 0.02;

/// Volume minus/plus buttons: square, 70% of the row height, inset from the
/// row ends.
const VOLUME_BUTTON_PCT: f32 = 0.7;
const VOLUME_BUTTON_INSET: f32 = 8.0;

/// The three menus of the application, rebuilt together on window resize.
#[derive(Debug, Default)]
pub struct MenuSet {
    pub main: Menu,
    pub settings: Menu,
    pub pause: Menu,
}

impl MenuSet {
    pub fn new(window_w: u32, window_h: u32) -> Self {
        let mut set = MenuSet::default();
        set.rebuild(window_w, window_h);
        set
    }

    /// Recomputes every item's bounds for the given window size.
    pub fn rebuild(&mut self, window_w: u32, window_h: u32) {
        let w = window_w as f32;
        let h = window_h as f32;
        self.main = build_menu(
            w,
            h,
            &[
                ("Start Game", MenuAction::StartGame),
                ("Settings", MenuAction::OpenSettings),
                ("Save Game", MenuAction::SaveGame),
                ("Exit", MenuAction::Exit),
            ],
        );
        self.settings = build_menu(
            w,
            h,
            &[
                ("Volume", MenuAction::AdjustVolume(0)),
                ("Toggle Fullscreen", MenuAction::ToggleFullscreen),
                ("Back to Menu", MenuAction::BackToMenu),
            ],
        );
        self.pause = build_menu(
            w,
            h,
            &[
                ("Resume", MenuAction::Resume),
                ("Save Game", MenuAction::SaveGame),
                ("Main Menu", MenuAction::MainMenu),
            ],
        );
    }
}

fn build_menu(w: f32, h: f32, entries: &[(&'static str, MenuAction)]) -> Menu {
    let button_w = w * BUTTON_WIDTH_PCT;
    let button_h = h * BUTTON_HEIGHT_PCT;
    let spacing = h * SPACING_PCT;

    let count = entries.len() as f32;
    let total_h = count * button_h + (count - 1.0) * spacing;
    let start_y = h / 2.0 - total_h / 2.0;
    let x = w / 2.0 - button_w / 2.0;

    let items = entries
        .iter()
        .enumerate()
        .map(|(i, (label, action))| {
            let y = start_y + i as f32 * (button_h + spacing);
            MenuItem::new(label, *action, Bounds::new(x, y, button_w, button_h))
        })
        .collect();

    Menu::new(items)
}

/// Hit-boxes of the volume row's minus and plus buttons.
pub fn volume_button_boxes(row: &Bounds) -> (Bounds, Bounds) {
    let size = row.h * VOLUME_BUTTON_PCT;
    let y = row.y + row.h / 2.0 - size / 2.0;
    let minus = Bounds::new(row.x + VOLUME_BUTTON_INSET, y, size, size);
    let plus = Bounds::new(row.x + row.w - size - VOLUME_BUTTON_INSET, y, size, size);
    (minus, plus)
}
