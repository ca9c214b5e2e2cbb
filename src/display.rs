//! Terminal renderer for game snapshots.
//!
//! Draws a `GameState` plus the bodies that left it since the last frame.
//! Nothing here touches game rules.  The playfield is square in game units
//! and is stretched to whatever the terminal offers.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::entities::{Body, Category, GameState, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_LIVES: Color = Color::Red;
const C_SHIP: Color = Color::White;
const C_ALIEN_BASIC: Color = Color::Green;
const C_ALIEN_SHOOTER: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_EXPLOSION: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Maps game coordinates onto terminal cells inside the border.
struct Viewport {
    canvas: f64,
    width: u16,
    height: u16,
}

impl Viewport {
    /// `None` when the point falls outside the drawable area.
    fn cell(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if !(0.0..=self.canvas).contains(&x) || !(0.0..=self.canvas).contains(&y) {
            return None;
        }
        let inner_w = self.width.saturating_sub(3) as f64;
        let inner_h = self.height.saturating_sub(5) as f64;
        let col = 1 + (x / self.canvas * inner_w).round() as u16;
        let row = 2 + (y / self.canvas * inner_h).round() as u16;
        Some((col, row))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `exits` are bodies removed since the last
/// frame; destroyed aliens flash once where they died.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    exits: &[Body],
    canvas: f64,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport { canvas, width, height };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, width, height)?;
    draw_hud(out, state, width)?;

    for shield in &state.shields {
        draw_body(out, &view, shield)?;
    }
    for alien in &state.aliens {
        draw_body(out, &view, alien)?;
    }
    for bullet in &state.bullets {
        draw_body(out, &view, bullet)?;
    }
    for gone in exits.iter().filter(|b| b.category.is_alien()) {
        draw_explosion(out, &view, gone)?;
    }

    if state.status == GameStatus::Playing {
        draw_body(out, &view, &state.ship)?;
    }
    draw_controls_hint(out, height)?;

    match state.status {
        GameStatus::Loss => draw_banner(out, state, width, height, "GAME  OVER", Color::Red)?,
        GameStatus::Win => draw_banner(out, state, width, height, "YOU'VE  WON", Color::White)?,
        GameStatus::Playing => {}
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // top bar on row 1, bottom bar on row h-2
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>8}", state.score)))?;

    let level_str = if state.endless {
        format!("[ ENDLESS {} ]", state.level)
    } else {
        format!("[ LEVEL {} ]", state.level)
    };
    let lx = (width / 2).saturating_sub(level_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    let lives_str = format!("Lives:{}", "♥".repeat(state.ship.lives as usize));
    let rx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Bodies ────────────────────────────────────────────────────────────────────

fn draw_body<W: Write>(out: &mut W, view: &Viewport, body: &Body) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(body.x, body.y) else {
        return Ok(());
    };
    let (glyph, color) = match body.category {
        Category::Ship => ("▲", C_SHIP),
        Category::PlayerBullet => ("║", C_BULLET_PLAYER),
        Category::EnemyBullet => ("↓", C_BULLET_ENEMY),
        Category::Basic => ("«▼»", C_ALIEN_BASIC),
        Category::Shooter => ("(◎)", C_ALIEN_SHOOTER),
        // armour fades as it takes hits
        Category::Tank => ("[█]", tank_colour(body.lives)),
        Category::Shield => ("█", shield_colour(body.lives)),
    };
    let width = glyph.chars().count() as u16;
    out.queue(cursor::MoveTo(col.saturating_sub(width / 2).max(1), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

fn draw_explosion<W: Write>(out: &mut W, view: &Viewport, body: &Body) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(body.x, body.y) {
        out.queue(cursor::MoveTo(col.max(1), row))?;
        out.queue(style::SetForegroundColor(C_EXPLOSION))?;
        out.queue(Print("✶"))?;
    }
    Ok(())
}

fn tank_colour(lives: u32) -> Color {
    let l = lives.min(2) as u8;
    Color::Rgb {
        r: 150 + l * 35,
        g: 50 + l * 70,
        b: 10 + l * 10,
    }
}

fn shield_colour(lives: u32) -> Color {
    let l = lives.min(3) as u8;
    Color::Rgb {
        r: 95 + l * 20,
        g: 158 + l * 20,
        b: 160 + l * 20,
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   SPACE : Shoot   P : Campaign   E : Endless   Q : Quit",
    ))?;
    Ok(())
}

// ── Win / loss overlay ────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
    title: &str,
    colour: Color,
) -> std::io::Result<()> {
    let lines = [
        "╔════════════════════╗".to_string(),
        format!("║{:^20}║", title),
        "╚════════════════════╝".to_string(),
    ];
    let score_line = format!("Final Score: {:>8}", state.score);
    let hint = "P - Campaign  E - Endless  Q - Quit";

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(3);

    out.queue(style::SetForegroundColor(colour))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }

    let score_row = start_row + lines.len() as u16;
    out.queue(cursor::MoveTo(
        cx.saturating_sub(score_line.chars().count() as u16 / 2),
        score_row,
    ))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    out.queue(cursor::MoveTo(
        cx.saturating_sub(hint.chars().count() as u16 / 2),
        score_row + 1,
    ))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
