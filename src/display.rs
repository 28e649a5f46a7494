//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session. No game logic is performed; the 800×600 viewport is scaled onto
//! whatever grid the terminal offers and entities are drawn from their
//! rectangles and sprite ids.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use homeward::backdrop::{Scenery, SceneryKind};
use homeward::entities::{Facing, LevelKind, Rect, SpriteId, Tile, SCREEN_HEIGHT, SCREEN_WIDTH};
use homeward::game::Game;
use homeward::hud::{Heart, HealthHud, ScoreHud};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SKY_CLOUD: Color = Color::White;
const C_SKY_STAR: Color = Color::Yellow;
const C_HILL: Color = Color::DarkGreen;
const C_PEAK: Color = Color::Grey;
const C_GRASS: Color = Color::Green;
const C_STONE: Color = Color::Grey;
const C_CLIFF: Color = Color::DarkYellow;
const C_PLAYER: Color = Color::White;
const C_PLAYER_BLINK: Color = Color::DarkGrey;
const C_FLYER: Color = Color::Magenta;
const C_WALKER: Color = Color::Green;
const C_DEAD: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HEART: Color = Color::Red;
const C_HEART_HALF: Color = Color::DarkRed;
const C_HEART_EMPTY: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

/// Maps viewport pixels onto terminal cells. Row 0 is the HUD and the last
/// row holds the controls hint, so the play field sits in between.
struct Viewport {
    cols: u16,
    rows: u16,
    sx: f32,
    sy: f32,
}

impl Viewport {
    fn new(width: u16, height: u16) -> Self {
        let rows = height.saturating_sub(2).max(1);
        Self {
            cols: width,
            rows,
            sx: width as f32 / SCREEN_WIDTH,
            sy: rows as f32 / SCREEN_HEIGHT,
        }
    }

    /// Column / row span covered by `rect`, clipped to the play field.
    /// `None` when fully off screen.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = (rect.left() * self.sx).floor().max(0.0);
        let c1 = (rect.right() * self.sx).ceil().min(self.cols as f32);
        let r0 = (rect.top() * self.sy).floor().max(0.0);
        let r1 = (rect.bottom() * self.sy).ceil().min(self.rows as f32);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, c1 as u16, r0 as u16 + 1, r1 as u16 + 1))
    }

    fn point(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let col = (x * self.sx).floor();
        let row = (y * self.sy).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16 + 1))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame. `frame` drives the invincibility blink.
pub fn render<W: Write>(
    out: &mut W,
    game: &Game,
    health: &HealthHud,
    score: &ScoreHud,
    frame: u64,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let view = Viewport::new(width, height);
    let level = game.current_level();

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let offset = level.backdrop_offset();
    for item in &level.backdrop().items {
        draw_scenery(out, &view, item, offset)?;
    }
    for platform in level.platforms() {
        if platform.tile().is_visible() {
            draw_sprite(out, &view, &platform.rect, platform.sprite(), false)?;
        }
    }
    for enemy in level.enemies() {
        draw_sprite(out, &view, &enemy.rect, enemy.sprite(), false)?;
    }

    let blink = game.player.invincible && frame % 8 < 4;
    draw_sprite(out, &view, &game.player.rect, game.player.sprite(), blink)?;

    draw_hud(out, width, &level.name, health, score)?;
    draw_controls_hint(out, height)?;

    match level.kind {
        LevelKind::Menu => draw_banner(out, width, height, &["H O M E W A R D", "walk left to begin"], Color::Cyan)?,
        LevelKind::Victory => draw_banner(out, width, height, &["YOU  WIN!", "welcome home"], Color::Yellow)?,
        LevelKind::GameOver => {
            let score_line = format!("Final Score: {}", game.player.score);
            draw_banner(out, width, height, &["GAME  OVER", &score_line], Color::Red)?
        }
        LevelKind::Stage => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Backdrop ──────────────────────────────────────────────────────────────────

fn draw_scenery<W: Write>(
    out: &mut W,
    view: &Viewport,
    item: &Scenery,
    offset: f32,
) -> std::io::Result<()> {
    let Some((col, row)) = view.point(item.x + offset, item.y) else {
        return Ok(());
    };
    let (glyph, color) = match item.kind {
        SceneryKind::Cloud => ("☁", C_SKY_CLOUD),
        SceneryKind::Star => ("·", C_SKY_STAR),
        SceneryKind::Hill => ("◢◣", C_HILL),
        SceneryKind::Peak => ("/\\", C_PEAK),
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    sprite: SpriteId,
    dimmed: bool,
) -> std::io::Result<()> {
    let Some((c0, c1, r0, r1)) = view.cells(rect) else {
        return Ok(());
    };
    let w = (c1 - c0) as usize;

    match sprite {
        SpriteId::Block(tile) => {
            out.queue(style::SetForegroundColor(tile_color(tile)))?;
            for row in r0..r1 {
                out.queue(cursor::MoveTo(c0, row))?;
                out.queue(Print("█".repeat(w)))?;
            }
        }
        SpriteId::PlayerWalk { facing, frame } => {
            // Head / torso / legs, squeezed into however many rows we got:
            //   ◀O   or   O▶
            //   █
            //   /\   or   ||
            out.queue(style::SetForegroundColor(if dimmed { C_PLAYER_BLINK } else { C_PLAYER }))?;
            let head = match facing {
                Facing::Left => "◀O",
                Facing::Right => "O▶",
            };
            let legs = if frame % 2 == 0 { "/\\" } else { "||" };
            for row in r0..r1 {
                let glyph = if row == r0 {
                    head
                } else if row + 1 == r1 {
                    legs
                } else {
                    "██"
                };
                out.queue(cursor::MoveTo(c0, row))?;
                out.queue(Print(glyph))?;
            }
        }
        SpriteId::FlyerWings { frame, .. } => {
            out.queue(style::SetForegroundColor(C_FLYER))?;
            out.queue(cursor::MoveTo(c0, r0))?;
            out.queue(Print(if frame == 0 { "^o^" } else { "vov" }))?;
        }
        SpriteId::WalkerStep { facing, frame } => {
            out.queue(style::SetForegroundColor(C_WALKER))?;
            out.queue(cursor::MoveTo(c0, r1 - 1))?;
            let body = match (facing, frame) {
                (Facing::Left, 0) => "◖▆▄",
                (Facing::Left, _) => "◖▄▆",
                (Facing::Right, 0) => "▄▆◗",
                (Facing::Right, _) => "▆▄◗",
            };
            out.queue(Print(body))?;
        }
        SpriteId::FlyerDead | SpriteId::WalkerDead => {
            out.queue(style::SetForegroundColor(C_DEAD))?;
            out.queue(cursor::MoveTo(c0, r0))?;
            out.queue(Print("x_x"))?;
        }
    }
    Ok(())
}

fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::GrassLeft | Tile::GrassMiddle | Tile::GrassRight | Tile::GrassRound => C_GRASS,
        Tile::StonePlatformLeft | Tile::StonePlatformMiddle | Tile::StonePlatformRight => C_STONE,
        Tile::StoneCliffLeft | Tile::StoneCliffMiddle | Tile::StoneCliffRight => C_CLIFF,
        Tile::InvisibleWall => Color::Reset,
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    width: u16,
    level_name: &str,
    health: &HealthHud,
    score: &ScoreHud,
) -> std::io::Result<()> {
    // Hearts, left
    out.queue(cursor::MoveTo(1, 0))?;
    for heart in health.hearts() {
        let (glyph, color) = match heart {
            Heart::Full => ("♥", C_HEART),
            Heart::Half => ("♥", C_HEART_HALF),
            Heart::Empty => ("♡", C_HEART_EMPTY),
        };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!("{} ", glyph)))?;
    }

    // Level name, centre
    let lx = (width / 2).saturating_sub(level_name.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(level_name))?;

    // Score, right
    let digits: String = score.digits().iter().map(|d| char::from(b'0' + d)).collect();
    let score_text = format!("Score: {}", digits);
    let rx = width.saturating_sub(score_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_text))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   ↑ W SPACE : Jump   Shift+← → : Skip level   Q : Quit",
    ))?;
    Ok(())
}

// ── Banner overlay ────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    lines: &[&str],
    color: Color,
) -> std::io::Result<()> {
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let top = format!("╔{}╗", "═".repeat(inner));
    let bottom = format!("╚{}╝", "═".repeat(inner));

    let cx = width / 2;
    let start_row = (height / 3).saturating_sub(lines.len() as u16 / 2 + 1);
    let box_col = cx.saturating_sub(top.chars().count() as u16 / 2);

    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(box_col, start_row))?;
    out.queue(Print(&top))?;
    for (i, msg) in lines.iter().enumerate() {
        let row = start_row + 1 + i as u16;
        out.queue(cursor::MoveTo(box_col, row))?;
        out.queue(Print(format!("║{:^width$}║", msg, width = inner)))?;
    }
    out.queue(cursor::MoveTo(box_col, start_row + 1 + lines.len() as u16))?;
    out.queue(Print(&bottom))?;

    Ok(())
}
