//! Gameplay constants. Times are milliseconds of the frame scheduler's clock,
//! speeds are pixels per tick.

use std::ops::RangeInclusive;

pub const SPRITE_SCALE: f32 = 2.5;

// ── Hero ──────────────────────────────────────────────────────────────────────

pub const PLAYER_SPEED: f32 = 7.0;
pub const HERO_LIVES: u32 = 3;
pub const HERO_SHOT_COOLDOWN_MS: u64 = 100;
pub const HERO_PROJECTILE_SPEED: f32 = 10.0;
/// Grace period after a respawn during which the hero cannot die.
pub const INVINCIBILITY_MS: u64 = 2000;
pub const RESPAWN_DELAY_MS: u64 = 2000;

// ── Enemy ─────────────────────────────────────────────────────────────────────

pub const ENEMY_SHOT_COOLDOWN_MS: u64 = 1000;
pub const ENEMY_PROJECTILE_SPEED: f32 = 10.0;
pub const ENEMY_FALL_SPEED: RangeInclusive<i32> = 5..=7;
pub const ENEMY_DRIFT: RangeInclusive<i32> = -5..=5;
/// Aim vectors shorter than this have no usable direction.
pub const AIM_EPSILON: f32 = 1e-3;

// ── Shared ────────────────────────────────────────────────────────────────────

pub const EXPLOSION_FRAME_MS: u64 = 200;
/// Upper bound on live projectiles a single actor may own.
pub const MAGAZINE_CAPACITY: usize = 64;
pub const KILL_SCORE: u32 = 100;

// ── Spawning ──────────────────────────────────────────────────────────────────

pub const MANUAL_SPAWN_INTERVAL_MS: u64 = 100;
pub const IDLE_SPAWN_INTERVAL_MS: RangeInclusive<u64> = 500..=2000;
pub const IDLE_SPAWN_CAP: usize = 2;
