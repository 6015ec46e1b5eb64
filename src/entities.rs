/// Base entity: a sprite instance with position, velocity and a death state
/// machine. Hero, Enemy and Projectile all embed one.

use crate::math::{BoundingBox, Playfield, Vector2};
use crate::sprites::SpriteFrame;
use crate::tuning::EXPLOSION_FRAME_MS;

// ── Render sink ───────────────────────────────────────────────────────────────

/// Side-effecting draw target. The simulation calls it once per Alive or
/// Dying entity per tick and never reads anything back.
pub trait RenderSink {
    fn draw_sprite(&mut self, region: &SpriteFrame, dest: &BoundingBox);
}

/// Discards every draw call. Used for headless stepping.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw_sprite(&mut self, _region: &SpriteFrame, _dest: &BoundingBox) {}
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// `Alive → Dying { frame: 0 } → … → Dying { frame: N-1 } → Dead`.
///
/// `since` is the timestamp at which the current explosion frame started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeState {
    Alive,
    Dying { frame: usize, since: u64 },
    Dead,
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub position: Vector2,
    pub velocity: Vector2,
    width: f32,
    height: f32,
    sprite: SpriteFrame,
    state: LifeState,
}

impl Entity {
    /// Size is fixed here from the sprite frame and never changes afterwards.
    pub fn new(sprite: SpriteFrame, position: Vector2) -> Self {
        let (width, height) = sprite.scaled_size();
        Self {
            position,
            velocity: Vector2::ZERO,
            width,
            height,
            sprite,
            state: LifeState::Alive,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn state(&self) -> LifeState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state == LifeState::Alive
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.state, LifeState::Dying { .. })
    }

    pub fn is_dead(&self) -> bool {
        self.state == LifeState::Dead
    }

    /// Timestamp at which the current explosion frame began, if dying.
    pub fn death_timestamp(&self) -> Option<u64> {
        match self.state {
            LifeState::Dying { since, .. } => Some(since),
            _ => None,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Alive → Dying. Returns `false` (and changes nothing) when the entity is
    /// already Dying or Dead.
    pub fn die(&mut self, now: u64) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.state = LifeState::Dying { frame: 0, since: now };
        true
    }

    /// One tick of motion: draw at the current position, then move by
    /// velocity. Does nothing unless Alive.
    pub fn update(&mut self, sink: &mut impl RenderSink) {
        if !self.is_alive() {
            return;
        }
        sink.draw_sprite(&self.sprite, &self.bounding_box());
        self.position += self.velocity;
    }

    /// One tick of explosion playback over `frames`. Draws the current frame,
    /// advancing to the next once it has been shown for `EXPLOSION_FRAME_MS`;
    /// after the last frame the entity becomes Dead. No-op unless Dying.
    pub fn play_explosion(&mut self, frames: &[SpriteFrame], now: u64, sink: &mut impl RenderSink) {
        let LifeState::Dying { frame, since } = self.state else {
            return;
        };

        let Some(region) = frames.get(frame) else {
            self.state = LifeState::Dead;
            return;
        };

        sink.draw_sprite(region, &self.bounding_box());
        if now.saturating_sub(since) >= EXPLOSION_FRAME_MS {
            self.state = LifeState::Dying {
                frame: frame + 1,
                since: now,
            };
        }
    }

    /// Starts a fresh life at `position`. Only actors with a respawn path
    /// (the hero) reach this.
    pub(crate) fn revive(&mut self, position: Vector2) {
        self.state = LifeState::Alive;
        self.position = position;
        self.velocity = Vector2::ZERO;
    }

    pub fn is_colliding_with(&self, other: &Entity) -> bool {
        self.bounding_box().overlaps(&other.bounding_box())
    }

    /// Fully inside the playfield.
    pub fn is_in_bounds(&self, playfield: &Playfield) -> bool {
        playfield.contains(&self.bounding_box())
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A bullet. Pure inherited motion; ownership decides its pruning policy.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub body: Entity,
}

impl Projectile {
    pub fn new(sprite: SpriteFrame, position: Vector2, velocity: Vector2) -> Self {
        let mut body = Entity::new(sprite, position);
        body.velocity = velocity;
        Self { body }
    }

    pub fn update(&mut self, sink: &mut impl RenderSink) {
        self.body.update(sink);
    }

    pub fn position(&self) -> Vector2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vector2 {
        self.body.velocity
    }
}
