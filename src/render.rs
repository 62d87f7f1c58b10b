//! Frame rendering
//!
//! Everything is drawn with canvas primitives and the procedural bitmap font,
//! sized relative to the current window so the UI scales with any resolution.
//! Rendering reads the session; it never mutates game state.

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

use crate::input::snapshot::InputSnapshot;
use crate::input::InputMode;
use crate::menu::{volume_button_boxes, Bounds, Menu};
use crate::player::Player;
use crate::session::{AppState, Session};
use crate::text::{draw_text, text_width};

const BACKGROUND: Color = Color::RGB(30, 30, 46);
const BUTTON: Color = Color::RGB(70, 70, 90);
const BUTTON_ACTIVE: Color = Color::RGB(0, 121, 241);
const OUTLINE: Color = Color::RGB(0, 0, 0);
const TITLE: Color = Color::RGB(205, 205, 220);
const LABEL: Color = Color::RGB(255, 255, 255);
const MUTED: Color = Color::RGB(130, 130, 140);
const VOLUME_BUTTON: Color = Color::RGB(110, 110, 120);
const PLAYER_FILL: Color = Color::RGB(0, 121, 241);
const PLAYER_OUTLINE: Color = Color::RGB(0, 60, 130);
const POPUP: Color = Color::RGB(80, 220, 100);

/// Draws one complete frame for the current state. The caller presents.
pub fn draw_frame(
    canvas: &mut Canvas<Window>,
    session: &Session,
    snap: &InputSnapshot,
) -> Result<(), String> {
    canvas.set_draw_color(BACKGROUND);
    canvas.clear();

    match session.state() {
        AppState::Menu => {
            if let Some(menu) = session.active_menu() {
                draw_menu(canvas, session, menu, "2D Game Template")?;
            }
        }
        AppState::Settings => {
            if let Some(menu) = session.active_menu() {
                draw_menu(canvas, session, menu, "Settings")?;
            }
        }
        AppState::Playing => draw_game(canvas, session)?,
        AppState::Paused => {
            draw_game(canvas, session)?;
            draw_pause_overlay(canvas, session)?;
        }
    }

    draw_save_popup(canvas, session)?;
    if session.debug_overlay() {
        draw_debug_overlay(canvas, snap)?;
    }

    Ok(())
}

/// Font scale whose glyphs come closest to the requested pixel height.
fn scale_for(px_height: f32) -> u32 {
    ((px_height / 7.0) as u32).max(1)
}

fn to_rect(b: &Bounds) -> Rect {
    Rect::new(b.x as i32, b.y as i32, b.w.max(1.0) as u32, b.h.max(1.0) as u32)
}

fn fill(canvas: &mut Canvas<Window>, b: &Bounds, color: Color) -> Result<(), String> {
    canvas.set_draw_color(color);
    canvas.fill_rect(to_rect(b))
}

/// Two nested 1-px rectangles for a 2-px border.
fn outline(canvas: &mut Canvas<Window>, b: &Bounds, color: Color) -> Result<(), String> {
    canvas.set_draw_color(color);
    let r = to_rect(b);
    canvas.draw_rect(r)?;
    if r.width() > 4 && r.height() > 4 {
        canvas.draw_rect(Rect::new(
            r.x() + 1,
            r.y() + 1,
            r.width() - 2,
            r.height() - 2,
        ))?;
    }
    Ok(())
}

fn draw_text_centered(
    canvas: &mut Canvas<Window>,
    text: &str,
    b: &Bounds,
    color: Color,
    scale: u32,
) -> Result<(), String> {
    let x = b.x + b.w / 2.0 - text_width(text, scale) as f32 / 2.0;
    let y = b.y + b.h / 2.0 - (7 * scale) as f32 / 2.0;
    draw_text(canvas, text, x as i32, y as i32, color, scale)
}

fn draw_menu(
    canvas: &mut Canvas<Window>,
    session: &Session,
    menu: &Menu,
    title: &str,
) -> Result<(), String> {
    let (w, h) = canvas.window().size();
    let (w, h) = (w as f32, h as f32);

    let title_scale = scale_for(h * 0.05);
    draw_text(
        canvas,
        title,
        (w / 2.0 - text_width(title, title_scale) as f32 / 2.0) as i32,
        (h * 0.1) as i32,
        TITLE,
        title_scale,
    )?;

    for item in menu.items() {
        let color = if item.hovered || item.selected {
            BUTTON_ACTIVE
        } else {
            BUTTON
        };
        fill(canvas, &item.bounds, color)?;
        outline(canvas, &item.bounds, OUTLINE)?;

        let label_scale = scale_for(item.bounds.h * 0.5);
        if item.is_volume_control() {
            let percent = (session.volume() * 100.0).round() as i32;
            let label = format!("Volume: {}%", percent);
            draw_text_centered(canvas, &label, &item.bounds, LABEL, label_scale)?;

            let (minus, plus) = volume_button_boxes(&item.bounds);
            for (b, sign) in [(&minus, "-"), (&plus, "+")] {
                fill(canvas, b, VOLUME_BUTTON)?;
                outline(canvas, b, OUTLINE)?;
                draw_text_centered(canvas, sign, b, LABEL, scale_for(b.h * 0.6))?;
            }
        } else {
            draw_text_centered(canvas, item.label, &item.bounds, LABEL, label_scale)?;
        }
    }

    // Footer: navigation hint bottom-left, active input mode bottom-right.
    let info_scale = scale_for(h * 0.02);
    let info_y = (h - (7 * info_scale) as f32 - 10.0) as i32;
    let hint = match session.input_mode() {
        InputMode::PointerKeyboard => "Use mouse to navigate",
        InputMode::Controller => "Use controller D-pad to navigate, A to select",
    };
    draw_text(canvas, hint, 10, info_y, MUTED, info_scale)?;

    let mode_text = input_mode_text(session.input_mode());
    let mode_x = (w - text_width(mode_text, info_scale) as f32 - 10.0) as i32;
    draw_text(canvas, mode_text, mode_x, info_y, MUTED, info_scale)?;

    Ok(())
}

fn draw_game(canvas: &mut Canvas<Window>, session: &Session) -> Result<(), String> {
    let (w, h) = canvas.window().size();
    let player = session.player();
    let size = Player::size(w);

    let body = Bounds::new(player.x, player.y, size, size);
    fill(canvas, &body, PLAYER_FILL)?;
    outline(canvas, &body, PLAYER_OUTLINE)?;

    let hf = h as f32;
    let margin = (w as f32 * 0.01) as i32;
    let line = (hf * 0.03) as i32;
    let title_scale = scale_for(hf * 0.04);
    let sub_scale = scale_for(hf * 0.025);
    let info_scale = scale_for(hf * 0.02);

    draw_text(canvas, "Game Running", margin, margin, TITLE, title_scale)?;

    let (controls, pause) = match session.input_mode() {
        InputMode::PointerKeyboard => ("WASD/Arrow Keys: Move", "ESC: Pause"),
        InputMode::Controller => ("Left Stick: Move", "Start Button: Pause"),
    };
    draw_text(canvas, controls, margin, margin + line, MUTED, sub_scale)?;
    draw_text(canvas, pause, margin, margin + line * 2, MUTED, sub_scale)?;

    let pos_text = format!("Player: ({}, {})", player.x as i32, player.y as i32);
    draw_text(canvas, &pos_text, margin, margin + line * 3, MUTED, info_scale)?;

    let mode_text = input_mode_text(session.input_mode());
    let mode_x = w as i32 - text_width(mode_text, info_scale) as i32 - margin;
    draw_text(canvas, mode_text, mode_x, margin, MUTED, info_scale)?;

    Ok(())
}

fn draw_pause_overlay(canvas: &mut Canvas<Window>, session: &Session) -> Result<(), String> {
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::RGBA(0, 0, 0, 128));
    canvas.fill_rect(None)?;
    canvas.set_blend_mode(BlendMode::None);

    if let Some(menu) = session.active_menu() {
        draw_menu(canvas, session, menu, "PAUSED")?;
    }
    Ok(())
}

fn draw_save_popup(canvas: &mut Canvas<Window>, session: &Session) -> Result<(), String> {
    let alpha = session.save_popup_alpha();
    if alpha <= 0.0 {
        return Ok(());
    }

    let (w, h) = canvas.window().size();
    let scale = scale_for(h as f32 * 0.025);
    let text = "Game Saved!";
    let x = w as i32 - text_width(text, scale) as i32 - 30;

    canvas.set_blend_mode(BlendMode::Blend);
    let color = Color::RGBA(POPUP.r, POPUP.g, POPUP.b, (alpha * 255.0) as u8);
    draw_text(canvas, text, x, 30, color, scale)?;
    canvas.set_blend_mode(BlendMode::None);
    Ok(())
}

fn draw_debug_overlay(canvas: &mut Canvas<Window>, snap: &InputSnapshot) -> Result<(), String> {
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::RGBA(0, 0, 0, 180));
    canvas.fill_rect(Rect::new(20, 20, 620, 140))?;
    canvas.set_blend_mode(BlendMode::None);

    let mut y = 32;
    draw_text(
        canvas,
        "[Input Debug - F1 to hide]",
        30,
        y,
        Color::RGB(240, 220, 90),
        2,
    )?;
    y += 26;

    match snap.pad {
        Some(pad) => {
            draw_text(canvas, "Controller: Connected", 30, y, POPUP, 2)?;
            y += 22;
            let stick = format!("Left Stick: ({}, {})", pad.left_x, pad.left_y);
            draw_text(canvas, &stick, 50, y, MUTED, 2)?;
            y += 22;
            let yes_no = |b: bool| if b { "YES" } else { "NO" };
            let buttons = format!(
                "Buttons - A: {}, B: {}, Start: {}",
                yes_no(pad.a),
                yes_no(pad.b),
                yes_no(pad.start)
            );
            draw_text(canvas, &buttons, 50, y, MUTED, 2)?;
        }
        None => {
            draw_text(
                canvas,
                "Controller: Not connected",
                30,
                y,
                Color::RGB(220, 90, 90),
                2,
            )?;
        }
    }
    Ok(())
}

fn input_mode_text(mode: InputMode) -> &'static str {
    match mode {
        InputMode::PointerKeyboard => "Input: Keyboard/Mouse",
        InputMode::Controller => "Input: Controller",
    }
}
