/// Actors: entities that shoot (`Gun`) and explode (`Exploder`).

use log::debug;

use crate::entities::{Entity, Projectile, RenderSink};
use crate::math::{Playfield, Vector2};
use crate::sprites::{self, SpriteFrame};
use crate::tuning::{
    AIM_EPSILON, ENEMY_PROJECTILE_SPEED, ENEMY_SHOT_COOLDOWN_MS, HERO_LIVES,
    HERO_PROJECTILE_SPEED, HERO_SHOT_COOLDOWN_MS, MAGAZINE_CAPACITY,
};

// ── Capabilities ──────────────────────────────────────────────────────────────

/// Owned projectiles plus the cool-down clock that rate-limits firing.
#[derive(Clone, Debug)]
pub struct Gun {
    pub projectiles: Vec<Projectile>,
    last_fired: Option<u64>,
    cooldown_ms: u64,
}

impl Gun {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            projectiles: Vec::new(),
            last_fired: None,
            cooldown_ms,
        }
    }

    pub fn last_fired(&self) -> Option<u64> {
        self.last_fired
    }

    /// Cool-down elapsed and room left in the magazine.
    pub fn is_ready(&self, now: u64) -> bool {
        let cooled = self
            .last_fired
            .map(|at| now.saturating_sub(at) >= self.cooldown_ms)
            .unwrap_or(true);
        cooled && self.projectiles.len() < MAGAZINE_CAPACITY
    }

    fn fire(&mut self, projectile: Projectile, now: u64) {
        self.projectiles.push(projectile);
        self.last_fired = Some(now);
    }

    /// Hands every owned projectile over to the caller.
    pub fn detach(&mut self) -> Vec<Projectile> {
        std::mem::take(&mut self.projectiles)
    }
}

pub trait Shooter {
    fn gun(&self) -> &Gun;
    fn gun_mut(&mut self) -> &mut Gun;

    fn projectiles(&self) -> &[Projectile] {
        &self.gun().projectiles
    }
}

pub trait Exploder {
    fn explosion_frames(&self) -> &'static [SpriteFrame];
}

// ── Hero ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Hero {
    pub body: Entity,
    pub gun: Gun,
    lives: u32,
    invincible: bool,
}

impl Hero {
    /// A fresh hero at the playfield center with a full set of lives.
    pub fn new(playfield: &Playfield) -> Self {
        Self {
            body: Entity::new(sprites::HERO, playfield.center()),
            gun: Gun::new(HERO_SHOT_COOLDOWN_MS),
            lives: HERO_LIVES,
            invincible: false,
        }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible
    }

    /// Fires one bullet straight up from the nose. Silently rate-limited.
    pub fn shoot(&mut self, now: u64) -> bool {
        if !self.body.is_alive() || !self.gun.is_ready(now) {
            return false;
        }
        let origin = Vector2::new(
            self.body.position.x + self.body.width() / 2.0,
            self.body.position.y,
        );
        let bullet = Projectile::new(
            sprites::HERO_BULLET,
            origin,
            Vector2::new(0.0, -HERO_PROJECTILE_SPEED),
        );
        self.gun.fire(bullet, now);
        true
    }

    /// Fully suppressed while invincible. Otherwise starts the explosion and
    /// spends a life; lives never drop below zero.
    pub fn die(&mut self, now: u64) -> bool {
        if self.invincible || !self.body.die(now) {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        true
    }

    /// New logical life at the playfield center, invincible until
    /// [`Hero::clear_invincibility`] is called.
    pub fn bring_back_to_life(&mut self, playfield: &Playfield) {
        self.body.revive(playfield.center());
        self.invincible = true;
    }

    pub fn clear_invincibility(&mut self) {
        self.invincible = false;
    }

    /// While Alive: moves the hero, then moves owned bullets and drops those
    /// that have passed the top edge. Otherwise plays the explosion and the
    /// bullets stay where they are.
    pub fn update(&mut self, now: u64, sink: &mut impl RenderSink) {
        if !self.body.is_alive() {
            let frames = self.explosion_frames();
            self.body.play_explosion(frames, now, sink);
            return;
        }

        self.body.update(sink);
        for bullet in self.gun.projectiles.iter_mut() {
            bullet.update(sink);
        }
        self.gun.projectiles.retain(|b| b.body.position.y >= 0.0);
    }
}

impl Shooter for Hero {
    fn gun(&self) -> &Gun {
        &self.gun
    }

    fn gun_mut(&mut self) -> &mut Gun {
        &mut self.gun
    }
}

impl Exploder for Hero {
    fn explosion_frames(&self) -> &'static [SpriteFrame] {
        &sprites::HERO_EXPLOSION
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Entity,
    pub gun: Gun,
}

impl Enemy {
    pub fn new(position: Vector2, velocity: Vector2) -> Self {
        let mut body = Entity::new(sprites::ENEMY, position);
        body.velocity = velocity;
        Self {
            body,
            gun: Gun::new(ENEMY_SHOT_COOLDOWN_MS),
        }
    }

    /// Fires one bullet from the enemy's horizontal center towards `target`.
    ///
    /// Skipped while this enemy is not Alive, while the target is Dead, and
    /// when the target sits on the enemy's position so no direction exists.
    /// A skipped shot leaves the cool-down clock untouched.
    pub fn shoot(&mut self, target: &Entity, now: u64) -> bool {
        if !self.body.is_alive() || target.is_dead() || !self.gun.is_ready(now) {
            return false;
        }

        let Some(direction) = (target.position - self.body.position).normal(AIM_EPSILON) else {
            debug!("enemy at {} has no aim direction, shot skipped", self.body.position);
            return false;
        };

        let origin = Vector2::new(
            self.body.position.x + self.body.width() / 2.0,
            self.body.position.y,
        );
        let bullet = Projectile::new(
            sprites::ENEMY_BULLET,
            origin,
            direction * ENEMY_PROJECTILE_SPEED,
        );
        self.gun.fire(bullet, now);
        true
    }

    /// While Alive: moves the enemy and its bullets. Otherwise plays the
    /// explosion and the bullets are frozen. Bullets are never pruned here.
    pub fn update(&mut self, now: u64, sink: &mut impl RenderSink) {
        if !self.body.is_alive() {
            let frames = self.explosion_frames();
            self.body.play_explosion(frames, now, sink);
            return;
        }

        self.body.update(sink);
        for bullet in self.gun.projectiles.iter_mut() {
            bullet.update(sink);
        }
    }
}

impl Shooter for Enemy {
    fn gun(&self) -> &Gun {
        &self.gun
    }

    fn gun_mut(&mut self) -> &mut Gun {
        &mut self.gun
    }
}

impl Exploder for Enemy {
    fn explosion_frames(&self) -> &'static [SpriteFrame] {
        &sprites::ENEMY_EXPLOSION
    }
}
