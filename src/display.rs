//! Rendering layer — all terminal output lives here.
//!
//! The world is measured in pixels; the terminal is a raster of character
//! cells, each covering `CELL_WIDTH` × `CELL_HEIGHT` pixels.  Every entity is
//! drawn as the solid block of cells its rectangle touches.  No game logic is
//! performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, Rect};

pub const CELL_WIDTH: i32 = 10;
pub const CELL_HEIGHT: i32 = 20;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Black;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Yellow;
const C_TEXT: Color = Color::White;

const BLOCK: char = '█';

/// Terminal cells a rectangle covers, already clipped to the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

/// Playfield size in cells (80 × 30 for an 800 × 600 world).
pub fn playfield_size(config: &GameConfig) -> (u16, u16) {
    let cols = (config.screen_width + CELL_WIDTH - 1) / CELL_WIDTH;
    let rows = (config.screen_height + CELL_HEIGHT - 1) / CELL_HEIGHT;
    (cols.max(1) as u16, rows.max(1) as u16)
}

/// Map a world rectangle to the cells it touches, or `None` when it lies
/// entirely outside the playfield.
pub fn cell_span(rect: &Rect, cols: u16, rows: u16) -> Option<CellSpan> {
    if rect.w <= 0 || rect.h <= 0 {
        return None;
    }
    let (cols, rows) = (cols as i32, rows as i32);
    let c0 = rect.left().div_euclid(CELL_WIDTH).max(0);
    let c1 = (rect.right() - 1).div_euclid(CELL_WIDTH).min(cols - 1);
    let r0 = rect.top().div_euclid(CELL_HEIGHT).max(0);
    let r1 = (rect.bottom() - 1).div_euclid(CELL_HEIGHT).min(rows - 1);
    if c0 > c1 || r0 > r1 {
        return None;
    }
    Some(CellSpan {
        col: c0 as u16,
        row: r0 as u16,
        width: (c1 - c0 + 1) as u16,
        height: (r1 - r0 + 1) as u16,
    })
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: the playfield while running, the summary
/// screen once the game is over.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(style::SetBackgroundColor(C_BACKGROUND))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.status {
        GameStatus::Running => draw_playfield(out, state)?,
        GameStatus::GameOver => draw_game_over(out, state)?,
    }

    out.queue(style::ResetColor)?;
    let (_, rows) = playfield_size(&state.config);
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Playfield ─────────────────────────────────────────────────────────────────

fn draw_playfield<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (cols, rows) = playfield_size(&state.config);

    for enemy in &state.enemies {
        fill_rect(out, &enemy.rect, C_ENEMY, cols, rows)?;
    }
    for bullet in &state.bullets {
        fill_rect(out, &bullet.rect, C_BULLET, cols, rows)?;
    }
    fill_rect(out, &state.player.rect, C_PLAYER, cols, rows)?;

    // Score overlay sits on top of everything
    draw_centered(out, &format!("Score: {}", state.score), 0, cols)?;
    Ok(())
}

fn fill_rect<W: Write>(
    out: &mut W,
    rect: &Rect,
    color: Color,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let Some(span) = cell_span(rect, cols, rows) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(BLOCK).take(span.width as usize).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in span.row..span.row + span.height {
        out.queue(cursor::MoveTo(span.col, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Game-over summary ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (cols, rows) = playfield_size(&state.config);

    draw_centered(out, "GAME OVER", rows / 4, cols)?;
    draw_centered(out, &format!("Final Score: {}", state.score), rows / 2, cols)?;
    let stats = format!(
        "Enemies destroyed: {}   Shots fired: {}",
        state.enemies_destroyed, state.shots_fired
    );
    draw_centered(out, &stats, rows / 2 + 1, cols)?;
    draw_centered(out, "Press ESC to quit", rows * 3 / 4, cols)?;
    Ok(())
}

fn draw_centered<W: Write>(out: &mut W, text: &str, row: u16, cols: u16) -> std::io::Result<()> {
    let col = (cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_TEXT))?;
    out.queue(Print(text))?;
    Ok(())
}
