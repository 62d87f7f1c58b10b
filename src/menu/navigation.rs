//! Menu navigation engine
//!
//! One pass per frame over the active menu: recompute hover/selection flags
//! from scratch and emit at most one [`MenuAction`]. Pointer hover and
//! discrete (keyboard/controller) navigation are mutually exclusive within a
//! frame; mixing them would leave two highlights on screen.
//!
//! Tie-break: when a mouse click and a confirm key fire in the same frame,
//! the click wins. The hover/click pass is evaluated against the discrete
//! flag as it stood at the top of the frame, and only afterwards are freshly
//! pressed discrete keys folded in (which then also suppresses hover for the
//! rest of the pass).

use crate::input::edge::PadEdges;
use crate::input::snapshot::{InputSnapshot, PadSnapshot, NAV_STICK_THRESHOLD};
use crate::input::{InputArbiter, InputMode};
use crate::menu::layout::volume_button_boxes;
use crate::menu::model::{Menu, MenuAction};

/// Discrete-navigation cursor shared by every menu.
///
/// The index survives menu swaps (as in holding a selection while bouncing
/// between pause and settings) and is re-wrapped into range at the start of
/// each pass, so it is always valid for the menu being displayed.
#[derive(Debug, Default)]
pub struct MenuNavigator {
    selection: usize,
}

impl MenuNavigator {
    pub fn new() -> Self {
        MenuNavigator::default()
    }

    /// Runs the navigation pass for this frame.
    ///
    /// Mutates the menu's hover/selection flags and the arbiter's
    /// discrete-navigation flag; returns the activated action, if any.
    pub fn update(
        &mut self,
        menu: &mut Menu,
        snap: &InputSnapshot,
        arbiter: &mut InputArbiter,
        pad: &mut PadEdges,
    ) -> Option<MenuAction> {
        menu.clear_frame_flags();
        if menu.is_empty() {
            return None;
        }
        self.selection %= menu.len();

        match arbiter.mode() {
            InputMode::PointerKeyboard => self.pointer_keyboard_pass(menu, snap, arbiter),
            InputMode::Controller => match snap.pad {
                Some(pad_snap) => self.controller_pass(menu, snap, &pad_snap, arbiter, pad),
                None => None,
            },
        }
    }

    fn pointer_keyboard_pass(
        &mut self,
        menu: &mut Menu,
        snap: &InputSnapshot,
        arbiter: &mut InputArbiter,
    ) -> Option<MenuAction> {
        let discrete_pressed = snap.nav_up || snap.nav_down || snap.confirm;

        // Hover and clicks, unless discrete navigation already owned the
        // highlight coming into this frame.
        if !arbiter.discrete_nav() {
            let mut clicked = None;
            for i in 0..menu.len() {
                let item = &mut menu.items_mut()[i];
                item.hovered = item.bounds.contains(snap.mouse_pos);

                if clicked.is_none() && snap.left_click {
                    if item.is_volume_control() {
                        let (minus, plus) = volume_button_boxes(&item.bounds);
                        if minus.contains(snap.mouse_pos) {
                            clicked = Some(MenuAction::AdjustVolume(-1));
                        } else if plus.contains(snap.mouse_pos) {
                            clicked = Some(MenuAction::AdjustVolume(1));
                        }
                    }
                    if clicked.is_none() && item.hovered {
                        clicked = Some(item.action);
                    }
                }
            }
            if let Some(action) = clicked {
                arbiter.pointer_reclaimed();
                return Some(action);
            }
        }

        if discrete_pressed {
            arbiter.mark_discrete_nav();
            // Discrete navigation suppresses hover for the rest of the pass.
            menu.clear_hover();
        }

        // Left/right adjust volume whenever the selection rests on the
        // volume row, independent of the discrete highlight.
        let mut volume_step: i8 = 0;
        if menu.items()[self.selection].is_volume_control() {
            if snap.nav_left {
                volume_step -= 1;
            }
            if snap.nav_right {
                volume_step += 1;
            }
        }

        if arbiter.discrete_nav() {
            let len = menu.len();
            if snap.nav_down {
                self.selection = (self.selection + 1) % len;
            }
            if snap.nav_up {
                self.selection = (self.selection + len - 1) % len;
            }
            menu.items_mut()[self.selection].selected = true;

            if snap.confirm {
                return Some(menu.items()[self.selection].action);
            }
        }

        if volume_step != 0 {
            return Some(MenuAction::AdjustVolume(volume_step));
        }
        None
    }

    fn controller_pass(
        &mut self,
        menu: &mut Menu,
        snap: &InputSnapshot,
        pad_snap: &PadSnapshot,
        arbiter: &mut InputArbiter,
        pad: &mut PadEdges,
    ) -> Option<MenuAction> {
        arbiter.mark_discrete_nav();

        // Poll every edge each frame; short-circuiting would leave stale
        // trackers behind.
        let dpad_up = pad.dpad_up.just_pressed(pad_snap.dpad_up);
        let dpad_down = pad.dpad_down.just_pressed(pad_snap.dpad_down);
        // Each direction sees only its own half of the axis, so a push down
        // can never fire the up tracker.
        let stick_up = pad
            .analog_up
            .just_pressed_analog((-pad_snap.left_y_norm()).max(0.0), NAV_STICK_THRESHOLD);
        let stick_down = pad
            .analog_down
            .just_pressed_analog(pad_snap.left_y_norm().max(0.0), NAV_STICK_THRESHOLD);
        let confirm = pad.a.just_pressed(pad_snap.a) || snap.confirm;

        let len = menu.len();
        if dpad_up || snap.nav_up || stick_up {
            self.selection = (self.selection + len - 1) % len;
        }
        if dpad_down || snap.nav_down || stick_down {
            self.selection = (self.selection + 1) % len;
        }
        menu.items_mut()[self.selection].selected = true;

        if confirm {
            return Some(menu.items()[self.selection].action);
        }

        if menu.items()[self.selection].is_volume_control() {
            let minus = pad.dpad_left.just_pressed(pad_snap.dpad_left);
            let plus = pad.dpad_right.just_pressed(pad_snap.dpad_right);
            if minus {
                return Some(MenuAction::AdjustVolume(-1));
            }
            if plus {
                return Some(MenuAction::AdjustVolume(1));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::layout::MenuSet;

    fn fixture() -> (MenuSet, MenuNavigator, InputArbiter, PadEdges) {
        (
            MenuSet::new(1280, 720),
            MenuNavigator::new(),
            InputArbiter::new(InputMode::PointerKeyboard),
            PadEdges::default(),
        )
    }

    fn controller_fixture() -> (MenuSet, MenuNavigator, InputArbiter, PadEdges) {
        (
            MenuSet::new(1280, 720),
            MenuNavigator::new(),
            InputArbiter::new(InputMode::Controller),
            PadEdges::default(),
        )
    }

    fn assert_flags_consistent(menu: &Menu) {
        let hovered = menu.items().iter().filter(|i| i.hovered).count();
        let selected = menu.items().iter().filter(|i| i.selected).count();
        assert!(hovered <= 1);
        assert!(selected <= 1);
        if selected == 1 {
            assert_eq!(hovered, 0);
        }
    }

    #[test]
    fn test_selection_wraps_both_directions() {
        let (mut set, mut nav, mut arbiter, mut pad) = fixture();
        let len = set.main.len();

        let down = InputSnapshot {
            nav_down: true,
            any_key: true,
            ..InputSnapshot::default()
        };
        let start = nav.selection;
        for _ in 0..len {
            assert!(nav.update(&mut set.main, &down, &mut arbiter, &mut pad).is_none());
        }
        assert_eq!(nav.selection, start);

        let up = InputSnapshot {
            nav_up: true,
            any_key: true,
            ..InputSnapshot::default()
        };
        nav.update(&mut set.main, &up, &mut arbiter, &mut pad);
        assert_eq!(nav.selection, len - 1);
    }

    #[test]
    fn test_hover_follows_pointer() {
        let (mut set, mut nav, mut arbiter, mut pad) = fixture();
        let target = set.main.items()[2].bounds;
        let snap = InputSnapshot {
            mouse_pos: (target.x + 1.0, target.y + 1.0),
            mouse_delta: (1.0, 0.0),
            ..InputSnapshot::default()
        };

        nav.update(&mut set.main, &snap, &mut arbiter, &mut pad);
        assert!(set.main.items()[2].hovered);
        assert_flags_consistent(&set.main);
    }

    #[test]
    fn test_click_activates_hovered_item() {
        let (mut set, mut nav, mut arbiter, mut pad) = fixture();
        let target = set.main.items()[0].bounds;
        let snap = InputSnapshot {
            mouse_pos: (target.x + 2.0, target.y + 2.0),
            left_click: true,
            any_click: true,
            ..InputSnapshot::default()
        };

        let action = nav.update(&mut set.main, &snap, &mut arbiter, &mut pad);
        assert_eq!(action, Some(MenuAction::StartGame));
    }

    #[test]
    fn test_click_beats_confirm_in_same_frame() {
        let (mut set, mut nav, mut arbiter, mut pad) = fixture();
        // Selection sits on Exit; pointer sits on Start Game; both fire.
        nav.selection = 3;
        let target = set.main.items()[0].bounds;
        let snap = InputSnapshot {
            mouse_pos: (target.x + 2.0, target.y + 2.0),
            left_click: true,
            any_click: true,
            confirm: true,
            any_key: true,
            ..InputSnapshot::default()
        };

        let action = nav.update(&mut set.main, &snap, &mut arbiter, &mut pad);
        assert_eq!(action, Some(MenuAction::StartGame));
        // The click reclaimed the pointer: no discrete highlight left armed.
        assert!(!arbiter.discrete_nav());
    }

    #[test]
    fn test_discrete_keys_suppress_hover() {
        let (mut set, mut nav, mut arbiter, mut pad) = fixture();
        let target = set.main.items()[1].bounds;
        let snap = InputSnapshot {
            mouse_pos: (target.x + 2.0, target.y + 2.0),
            nav_down: true,
            any_key: true,
            ..InputSnapshot::default()
        };

        nav.update(&mut set.main, &snap, &mut arbiter, &mut pad);
        assert!(arbiter.discrete_nav());
        assert!(set.main.items().iter().all(|i| !i.hovered));
        assert_flags_consistent(&set.main);
    }

    #[test]
    fn test_confirm_activates_selected_item() {
        let (mut set, mut nav, mut arbiter, mut pad) = fixture();
        arbiter.mark_discrete_nav();
        let snap = InputSnapshot {
            confirm: true,
            any_key: true,
            ..InputSnapshot::default()
        };

        let action = nav.update(&mut set.main, &snap, &mut arbiter, &mut pad);
        assert_eq!(action, Some(MenuAction::StartGame));
    }

    #[test]
    fn test_stale_selection_rewrapped_on_smaller_menu() {
        let (mut set, mut nav, mut arbiter, mut pad) = fixture();
        arbiter.mark_discrete_nav();
        nav.selection = 3; // valid for main (4 items), stale for pause (3)

        let snap = InputSnapshot {
            confirm: true,
            any_key: true,
            ..InputSnapshot::default()
        };
        let action = nav.update(&mut set.pause, &snap, &mut arbiter, &mut pad);
        assert_eq!(action, Some(MenuAction::Resume));
    }

    #[test]
    fn test_volume_keyboard_steps() {
        let (mut set, mut nav, mut arbiter, mut pad) = fixture();
        // Selection starts on the Volume row of the settings menu.
        let snap = InputSnapshot {
            nav_left: true,
            any_key: true,
            ..InputSnapshot::default()
        };
        let action = nav.update(&mut set.settings, &snap, &mut arbiter, &mut pad);
        assert_eq!(action, Some(MenuAction::AdjustVolume(-1)));

        let snap = InputSnapshot {
            nav_right: true,
            any_key: true,
            ..InputSnapshot::default()
        };
        let action = nav.update(&mut set.settings, &snap, &mut arbiter, &mut pad);
        assert_eq!(action, Some(MenuAction::AdjustVolume(1)));
    }

    #[test]
    fn test_volume_minus_button_click() {
        let (mut set, mut nav, mut arbiter, mut pad) = fixture();
        let row = set.settings.items()[0].bounds;
        let (minus, _) = volume_button_boxes(&row);
        let snap = InputSnapshot {
            mouse_pos: (minus.x + 1.0, minus.y + 1.0),
            left_click: true,
            any_click: true,
            ..InputSnapshot::default()
        };

        let action = nav.update(&mut set.settings, &snap, &mut arbiter, &mut pad);
        assert_eq!(action, Some(MenuAction::AdjustVolume(-1)));
    }

    #[test]
    fn test_controller_dpad_navigation_and_confirm() {
        let (mut set, mut nav, mut arbiter, mut pad) = controller_fixture();

        let down = InputSnapshot {
            pad: Some(PadSnapshot {
                dpad_down: true,
                ..PadSnapshot::default()
            }),
            ..InputSnapshot::default()
        };
        nav.update(&mut set.main, &down, &mut arbiter, &mut pad);
        assert_eq!(nav.selection, 1);
        assert!(set.main.items()[1].selected);
        assert_flags_consistent(&set.main);

        // Held d-pad does not repeat.
        nav.update(&mut set.main, &down, &mut arbiter, &mut pad);
        assert_eq!(nav.selection, 1);

        let a = InputSnapshot {
            pad: Some(PadSnapshot {
                a: true,
                ..PadSnapshot::default()
            }),
            ..InputSnapshot::default()
        };
        let action = nav.update(&mut set.main, &a, &mut arbiter, &mut pad);
        assert_eq!(action, Some(MenuAction::OpenSettings));
    }

    #[test]
    fn test_controller_stick_navigates_one_notch_per_push() {
        let (mut set, mut nav, mut arbiter, mut pad) = controller_fixture();
        let pushed = InputSnapshot {
            pad: Some(PadSnapshot {
                left_y: 30000,
                activity: true,
                ..PadSnapshot::default()
            }),
            ..InputSnapshot::default()
        };

        nav.update(&mut set.main, &pushed, &mut arbiter, &mut pad);
        assert_eq!(nav.selection, 1);
        // Stick held past the threshold: still one notch.
        nav.update(&mut set.main, &pushed, &mut arbiter, &mut pad);
        assert_eq!(nav.selection, 1);

        let released = InputSnapshot {
            pad: Some(PadSnapshot::default()),
            ..InputSnapshot::default()
        };
        nav.update(&mut set.main, &released, &mut arbiter, &mut pad);
        nav.update(&mut set.main, &pushed, &mut arbiter, &mut pad);
        assert_eq!(nav.selection, 2);
    }

    #[test]
    fn test_controller_mode_suppresses_hover() {
        let (mut set, mut nav, mut arbiter, mut pad) = controller_fixture();
        let target = set.main.items()[0].bounds;
        let snap = InputSnapshot {
            mouse_pos: (target.x + 1.0, target.y + 1.0),
            pad: Some(PadSnapshot::default()),
            ..InputSnapshot::default()
        };

        nav.update(&mut set.main, &snap, &mut arbiter, &mut pad);
        assert!(set.main.items().iter().all(|i| !i.hovered));
        assert_flags_consistent(&set.main);
    }

    #[test]
    fn test_controller_volume_dpad_steps() {
        let (mut set, mut nav, mut arbiter, mut pad) = controller_fixture();
        let left = InputSnapshot {
            pad: Some(PadSnapshot {
                dpad_left: true,
                ..PadSnapshot::default()
            }),
            ..InputSnapshot::default()
        };
        let action = nav.update(&mut set.settings, &left, &mut arbiter, &mut pad);
        assert_eq!(action, Some(MenuAction::AdjustVolume(-1)));
    }
}
