//! Menu data model
//!
//! Menu items carry a tagged [`MenuAction`] attached at construction time, so
//! activation dispatch is a match over a closed set rather than a string
//! compare on the label. Bounds are stored in absolute pixels (derived from
//! percentage-of-window rules in [`crate::menu::layout`]) and are rebuilt
//! whenever the window size changes.

/// Screen-space rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Bounds { x, y, w, h }
    }

    /// Point-in-rectangle test against a pointer position.
    pub fn contains(&self, point: (f32, f32)) -> bool {
        point.0 >= self.x
            && point.0 < self.x + self.w
            && point.1 >= self.y
            && point.1 < self.y + self.h
    }
}

/// Everything a menu item can do, fixed at construction.
///
/// `AdjustVolume` doubles as the tag of the live volume row (carrying 0) and
/// as the event emitted by its minus/plus sub-controls (carrying -1 / +1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    OpenSettings,
    SaveGame,
    Exit,
    ToggleFullscreen,
    BackToMenu,
    Resume,
    MainMenu,
    AdjustVolume(i8),
}

/// One selectable row of a menu.
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
    pub bounds: Bounds,
    /// Pointer rests on this item (pointer/keyboard mode only).
    pub hovered: bool,
    /// Discrete-navigation highlight (keyboard or controller).
    pub selected: bool,
}

impl MenuItem {
    pub fn new(label: &'static str, action: MenuAction, bounds: Bounds) -> Self {
        MenuItem {
            label,
            action,
            bounds,
            hovered: false,
            selected: false,
        }
    }

    /// True for the live volume-control row.
    pub fn is_volume_control(&self) -> bool {
        matches!(self.action, MenuAction::AdjustVolume(_))
    }
}

/// An ordered list of menu items.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Menu { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [MenuItem] {
        &mut self.items
    }

    /// Clears hover and selection before a navigation pass. Stale flags must
    /// never leak across frames or across a menu swap.
    pub fn clear_frame_flags(&mut self) {
        for item in &mut self.items {
            item.hovered = false;
            item.selected = false;
        }
    }

    /// Clears hover only; used when discrete navigation takes over mid-pass.
    pub fn clear_hover(&mut self) {
        for item in &mut self.items {
            item.hovered = false;
        }
    }
}
