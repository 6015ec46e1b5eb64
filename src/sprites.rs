/// Sprite-sheet source rectangles.
///
/// Coordinates are in sheet pixels; on-screen size is the sheet size times
/// `SPRITE_SCALE`.

use crate::tuning::SPRITE_SCALE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteFrame {
    pub sx: u16,
    pub sy: u16,
    pub swidth: u16,
    pub sheight: u16,
}

impl SpriteFrame {
    pub const fn new(sx: u16, sy: u16, swidth: u16, sheight: u16) -> Self {
        Self { sx, sy, swidth, sheight }
    }

    /// Rendered (width, height) in playfield pixels.
    pub fn scaled_size(&self) -> (f32, f32) {
        (
            self.swidth as f32 * SPRITE_SCALE,
            self.sheight as f32 * SPRITE_SCALE,
        )
    }
}

// ── Ships ─────────────────────────────────────────────────────────────────────

pub const HERO: SpriteFrame = SpriteFrame::new(4, 6, 27, 17);
pub const ENEMY: SpriteFrame = SpriteFrame::new(4, 199, 17, 17);

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const HERO_BULLET: SpriteFrame = SpriteFrame::new(91, 84, 4, 11);
pub const ENEMY_BULLET: SpriteFrame = SpriteFrame::new(74, 90, 6, 4);

// ── Explosions (played in order, one frame per dwell interval) ────────────────

pub const HERO_EXPLOSION: [SpriteFrame; 6] = [
    SpriteFrame::new(5, 104, 27, 23),
    SpriteFrame::new(35, 103, 32, 28),
    SpriteFrame::new(69, 100, 34, 32),
    SpriteFrame::new(105, 100, 32, 33),
    SpriteFrame::new(140, 101, 32, 31),
    SpriteFrame::new(175, 103, 31, 26),
];

pub const ENEMY_EXPLOSION: [SpriteFrame; 6] = [
    SpriteFrame::new(163, 80, 15, 13),
    SpriteFrame::new(180, 80, 15, 14),
    SpriteFrame::new(196, 78, 19, 17),
    SpriteFrame::new(215, 77, 20, 18),
    SpriteFrame::new(237, 78, 18, 17),
    SpriteFrame::new(256, 78, 18, 17),
];
