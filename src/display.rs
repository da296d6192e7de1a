//! Rendering layer.  All terminal I/O lives here.
//!
//! Receives a [`RenderFrame`] and translates it into terminal commands.
//! The viewport is scaled onto the terminal grid: row 0 is the HUD, the
//! last row the controls hint, everything in between is the world view.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use jumper::camera::Camera;
use jumper::config::GameConfig;
use jumper::entities::Owner;
use jumper::geometry::{Rect, Vec2};
use jumper::render::{Overlay, RenderFrame};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLATFORM: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_FIREBALL_PLAYER: Color = Color::Cyan;
const C_FIREBALL_ENEMY: Color = Color::DarkYellow;
const C_COIN: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_COINS: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_MESSAGE: Color = Color::Red;

/// Overlays at or above this alpha hide the world entirely.
const OPAQUE: u8 = u8::MAX;
/// Overlay text appears once the fade is half way in.
const TEXT_ALPHA: u8 = 128;

/// Maps world coordinates to terminal cells.
struct Grid {
    cols: u16,
    rows: u16,
    /// World units per cell.
    sx: f32,
    sy: f32,
    camera: Camera,
}

impl Grid {
    fn new(cols: u16, rows: u16, camera: Camera, config: &GameConfig) -> Self {
        let play_rows = rows.saturating_sub(2).max(1);
        Self {
            cols,
            rows,
            sx: config.viewport_width / cols.max(1) as f32,
            sy: config.viewport_height / play_rows as f32,
            camera,
        }
    }

    /// Cell for a world point, if it is on screen.
    fn cell(&self, world: Vec2) -> Option<(u16, u16)> {
        self.screen_cell(self.camera.to_screen(world))
    }

    /// Cell for a point already relative to the viewport.
    fn screen_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let col = (p.x / self.sx).floor() as i32;
        let row = 1 + (p.y / self.sy).floor() as i32;
        if col < 0 || col >= self.cols as i32 || row < 1 || row >= self.rows as i32 - 1 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn width_in_cells(&self, width: f32) -> u16 {
        (width / self.sx).ceil().max(1.0) as u16
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    frame: &RenderFrame,
    config: &GameConfig,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let grid = Grid::new(cols, rows, frame.camera, config);

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let hidden = matches!(frame.overlay, Some(Overlay { alpha, .. }) if alpha >= OPAQUE);
    if !hidden {
        draw_world(out, frame, &grid, config)?;
    }

    draw_hud(out, frame)?;
    draw_controls_hint(out, rows)?;

    if let Some(overlay) = &frame.overlay {
        draw_overlay(out, overlay, cols, rows)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── World ─────────────────────────────────────────────────────────────────────

fn draw_world<W: Write>(
    out: &mut W,
    frame: &RenderFrame,
    grid: &Grid,
    config: &GameConfig,
) -> std::io::Result<()> {
    for plat in &frame.platforms {
        draw_platform(out, plat, grid)?;
    }

    out.queue(style::SetForegroundColor(C_COIN))?;
    for coin in frame.coins.iter().filter(|c| !c.collected) {
        let half = config.coin_size / 2.0;
        put(out, grid, Vec2::new(coin.pos.x + half, coin.pos.y + half), "o")?;
    }

    out.queue(style::SetForegroundColor(C_ENEMY))?;
    for enemy in &frame.enemies {
        let half = config.enemy_size / 2.0;
        let glyph = if enemy.facing_right { "M>" } else { "<M" };
        put(out, grid, Vec2::new(enemy.pos.x + half, enemy.pos.y + half), glyph)?;
    }

    for fb in &frame.fireballs {
        let color = match fb.owner {
            Owner::Player => C_FIREBALL_PLAYER,
            Owner::Enemy => C_FIREBALL_ENEMY,
        };
        out.queue(style::SetForegroundColor(color))?;
        put(out, grid, fb.pos, "*")?;
    }

    // Walk cycle: alternate the body glyph on odd frames.
    let p = &frame.player;
    let half = config.player_size / 2.0;
    let glyph = match (p.facing_right, p.frame % 2) {
        (true, 0) => "@>",
        (true, _) => "a>",
        (false, 0) => "<@",
        (false, _) => "<a",
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    put(out, grid, Vec2::new(p.pos.x + half, p.pos.y + half), glyph)?;

    Ok(())
}

fn draw_platform<W: Write>(out: &mut W, plat: &Rect, grid: &Grid) -> std::io::Result<()> {
    let plat = grid.camera.rect_to_screen(plat);
    // Clip the left edge to the screen so wide platforms still show.
    let left = plat.left().max(0.0);
    let Some((col, row)) = grid.screen_cell(Vec2::new(left, plat.top())) else {
        return Ok(());
    };
    let cells = grid
        .width_in_cells(plat.right() - left)
        .min(grid.cols.saturating_sub(col));

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_PLATFORM))?;
    out.queue(Print("█".repeat(cells as usize)))?;
    Ok(())
}

fn put<W: Write>(out: &mut W, grid: &Grid, at: Vec2, glyph: &str) -> std::io::Result<()> {
    if let Some((col, row)) = grid.cell(at) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, frame: &RenderFrame) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(format!("Lives: {}", frame.hud.lives)))?;

    out.queue(style::SetForegroundColor(C_HUD_COINS))?;
    out.queue(Print(format!("   Coins: {}", frame.hud.coins)))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Jump   F : Fire   Q : Quit"))?;
    Ok(())
}

// ── Transition overlay ────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(
    out: &mut W,
    overlay: &Overlay,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    if overlay.alpha < TEXT_ALPHA {
        return Ok(());
    }
    let cx = cols / 2;
    let cy = rows / 2;

    if let Some(message) = overlay.message {
        let text = message.text();
        out.queue(cursor::MoveTo(
            cx.saturating_sub(text.chars().count() as u16 / 2),
            cy.saturating_sub(1),
        ))?;
        out.queue(style::SetForegroundColor(C_MESSAGE))?;
        out.queue(Print(text))?;
    }

    if overlay.restart_prompt {
        let hint = "Press R to Restart";
        out.queue(cursor::MoveTo(
            cx.saturating_sub(hint.chars().count() as u16 / 2),
            cy + 1,
        ))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(hint))?;
    }
    Ok(())
}
