/// Rendering layer — all terminal I/O lives here.
///
/// The simulation draws into a [`TerminalCanvas`] (a buffering
/// [`RenderSink`]); [`render`] then turns the buffered sprites plus the HUD
/// into terminal commands. Playfield pixels map to cells through the
/// configured cell size.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::compute::World;
use crate::entities::RenderSink;
use crate::math::BoundingBox;
use crate::sprites::{self, SpriteFrame};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HIGH: Color = Color::Cyan;
const C_HUD_LIVES: Color = Color::Red;
const C_HERO: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET_HERO: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

// ── Sprite art ────────────────────────────────────────────────────────────────

const HERO_ART: &[&str] = &[" /▲\\ ", "<=#=>"];
const ENEMY_ART: &[&str] = &["<▼>", "[_]"];
const HERO_BULLET_ART: &[&str] = &["║"];
const ENEMY_BULLET_ART: &[&str] = &["•"];
const EXPLOSION_ART: [&[&str]; 6] = [
    &["."],
    &["*"],
    &["(*)"],
    &["{*}", "/ \\"],
    &["\\*/", " . "],
    &[". ."],
];
const UNKNOWN_ART: &[&str] = &["?"];

#[derive(Clone, Copy, Debug)]
struct Glyph {
    rows: &'static [&'static str],
    color: Color,
}

fn explosion_glyph(frame: usize) -> Glyph {
    let color = if frame < 3 { Color::Yellow } else { Color::Red };
    Glyph {
        rows: EXPLOSION_ART[frame % EXPLOSION_ART.len()],
        color,
    }
}

/// Terminal stand-in for a sprite-sheet region.
fn glyph_for(region: &SpriteFrame) -> Glyph {
    let plain = |rows, color| Glyph { rows, color };
    match *region {
        r if r == sprites::HERO => plain(HERO_ART, C_HERO),
        r if r == sprites::ENEMY => plain(ENEMY_ART, C_ENEMY),
        r if r == sprites::HERO_BULLET => plain(HERO_BULLET_ART, C_BULLET_HERO),
        r if r == sprites::ENEMY_BULLET => plain(ENEMY_BULLET_ART, C_BULLET_ENEMY),
        r => sprites::HERO_EXPLOSION
            .iter()
            .chain(sprites::ENEMY_EXPLOSION.iter())
            .position(|frame| *frame == r)
            .map(|i| explosion_glyph(i % sprites::HERO_EXPLOSION.len()))
            .unwrap_or(plain(UNKNOWN_ART, Color::DarkGrey)),
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

/// Collects one frame's draw calls.
#[derive(Clone, Debug)]
pub struct TerminalCanvas {
    cell_width: f32,
    cell_height: f32,
    draws: Vec<(SpriteFrame, BoundingBox)>,
}

impl TerminalCanvas {
    pub fn new(cell_width: f32, cell_height: f32) -> Self {
        Self {
            cell_width,
            cell_height,
            draws: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.draws.clear();
    }

    pub fn draws(&self) -> &[(SpriteFrame, BoundingBox)] {
        &self.draws
    }

    /// Top-left cell (col, row) of `art` centred horizontally on `dest`,
    /// relative to the playfield's first row.
    fn cell_of(&self, dest: &BoundingBox, art_width: usize) -> (i32, i32) {
        let center_col = (dest.x + dest.width / 2.0) / self.cell_width;
        let col = center_col.floor() as i32 - (art_width as i32) / 2;
        let row = (dest.y / self.cell_height).floor() as i32;
        (col, row)
    }
}

impl RenderSink for TerminalCanvas {
    fn draw_sprite(&mut self, region: &SpriteFrame, dest: &BoundingBox) {
        self.draws.push((*region, *dest));
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: the sprites buffered in `canvas`, the HUD and
/// any overlay. `width` x `height` is the terminal size in cells.
pub fn render<W: Write>(
    out: &mut W,
    canvas: &TerminalCanvas,
    world: &World,
    paused: bool,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, world, width)?;
    for (region, dest) in canvas.draws() {
        draw_sprite(out, canvas, region, dest, width, height)?;
    }
    draw_controls_hint(out, height)?;

    if world.is_game_over() {
        draw_overlay(out, &game_over_lines(world), width, height)?;
    } else if paused {
        draw_overlay(out, &paused_lines(), width, height)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", world.score)))?;

    let high = format!("High: {:>8}", world.high_score);
    let hx = (width / 2).saturating_sub(high.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(hx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(&high))?;

    let hearts: String = "♥".repeat(world.hero.lives() as usize);
    let lives_text = format!("Lives: {}", hearts);
    let rx = width.saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    canvas: &TerminalCanvas,
    region: &SpriteFrame,
    dest: &BoundingBox,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let glyph = glyph_for(region);
    let art_width = glyph.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let (col, row) = canvas.cell_of(dest, art_width);
    // Playfield rows sit between the HUD row and the hint row.
    let last_row = i32::from(height) - 2;

    out.queue(style::SetForegroundColor(glyph.color))?;
    for (i, line) in glyph.rows.iter().enumerate() {
        let y = row + 1 + i as i32;
        if y < 1 || y > last_row {
            continue;
        }
        let x = col.max(0);
        if x >= i32::from(width) {
            continue;
        }
        // Clip on the right edge so wide art never wraps.
        let visible: String = line.chars().take((i32::from(width) - x) as usize).collect();
        out.queue(cursor::MoveTo(x as u16, y as u16))?;
        out.queue(Print(visible))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD/←↑→↓ : Move  SPACE : Shoot  E : Spawn  P : Pause  Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn game_over_lines(world: &World) -> Vec<(String, Color)> {
    vec![
        ("╔══════════════════╗".to_string(), Color::Red),
        ("║    GAME  OVER    ║".to_string(), Color::Red),
        ("╚══════════════════╝".to_string(), Color::Red),
        (format!("Final Score: {}", world.score), Color::Yellow),
        (format!("High Score: {}", world.high_score), Color::Cyan),
        ("Q - Quit".to_string(), Color::White),
    ]
}

fn paused_lines() -> Vec<(String, Color)> {
    vec![
        ("┌──────────────┐".to_string(), Color::White),
        ("│    PAUSED    │".to_string(), Color::White),
        ("└──────────────┘".to_string(), Color::White),
        ("P - Resume".to_string(), Color::DarkGrey),
    ]
}

fn draw_overlay<W: Write>(
    out: &mut W,
    lines: &[(String, Color)],
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(msg))?;
    }

    Ok(())
}
