/// World simulation: the hero, the enemies and the stray bullets, advanced by
/// one `update` call per rendered frame.
///
/// All randomness comes through the injected `rng` and all time through the
/// `now` timestamp, so a caller with a seeded RNG and a synthetic clock can
/// step the world deterministically.

use log::{debug, info};
use rand::Rng;

use crate::actors::{Enemy, Hero, Shooter};
use crate::entities::{Entity, Projectile, RenderSink};
use crate::input::InputSnapshot;
use crate::math::{Playfield, Vector2};
use crate::sprites;
use crate::tuning::{
    ENEMY_DRIFT, ENEMY_FALL_SPEED, IDLE_SPAWN_CAP, IDLE_SPAWN_INTERVAL_MS, INVINCIBILITY_MS,
    KILL_SCORE, MANUAL_SPAWN_INTERVAL_MS, PLAYER_SPEED, RESPAWN_DELAY_MS,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Observations made during one tick, in the order they happened.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldEvent {
    EnemySpawned { position: Vector2 },
    EnemyDestroyed { score: u32 },
    /// The hero lost a life; `lives` is what remains.
    HeroHit { lives: u32 },
    HeroRespawned,
    GameOver { score: u32 },
}

// ── Deferred actions ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PendingKind {
    Respawn,
    ClearInvincibility,
}

/// Fires on the first tick whose timestamp reaches `due`.
#[derive(Clone, Copy, Debug)]
struct PendingAction {
    due: u64,
    kind: PendingKind,
}

// ── World ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct World {
    pub playfield: Playfield,
    pub hero: Hero,
    pub enemies: Vec<Enemy>,
    /// Bullets whose enemy has been removed; they fly until out of bounds.
    pub strays: Vec<Projectile>,
    pub score: u32,
    /// Best score of this session.
    pub high_score: u32,
    pub status: GameStatus,
    last_spawn: u64,
    idle_spawn_after: u64,
    pending: Vec<PendingAction>,
    events: Vec<WorldEvent>,
}

impl World {
    /// Build the world at program start. `now` starts the spawn timers.
    pub fn new(playfield: Playfield, now: u64, rng: &mut impl Rng) -> Self {
        info!("world created, playfield {}x{}", playfield.width, playfield.height);
        Self {
            playfield,
            hero: Hero::new(&playfield),
            enemies: Vec::new(),
            strays: Vec::new(),
            score: 0,
            high_score: 0,
            status: GameStatus::Playing,
            last_spawn: now,
            idle_spawn_after: rng.gen_range(IDLE_SPAWN_INTERVAL_MS),
            pending: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// When the hero will be brought back, if a respawn is pending.
    pub fn pending_respawn(&self) -> Option<u64> {
        self.pending_due(PendingKind::Respawn)
    }

    /// When the hero's post-respawn grace period ends, if one is running.
    pub fn invincibility_ends_at(&self) -> Option<u64> {
        self.pending_due(PendingKind::ClearInvincibility)
    }

    fn pending_due(&self, kind: PendingKind) -> Option<u64> {
        self.pending
            .iter()
            .find(|action| action.kind == kind)
            .map(|action| action.due)
    }

    /// Events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Per-tick pass ─────────────────────────────────────────────────────────

    /// Advance the simulation by one tick.
    ///
    /// The order is fixed: due timers, hero, enemies, strays, input,
    /// collisions, spawning. Removals in the enemy pass happen before the
    /// collision pass sees the survivors.
    pub fn update(
        &mut self,
        now: u64,
        input: &InputSnapshot,
        rng: &mut impl Rng,
        sink: &mut impl RenderSink,
    ) -> Vec<WorldEvent> {
        self.run_pending_actions(now);
        self.hero.update(now, sink);
        self.update_enemies(now, sink);
        self.update_strays(sink);
        self.apply_input(input, now, rng);
        self.resolve_collisions(now);
        self.apply_spawning_policy(now, rng);
        self.take_events()
    }

    fn run_pending_actions(&mut self, now: u64) {
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|action| now >= action.due);
        self.pending = waiting;

        for action in due {
            match action.kind {
                PendingKind::Respawn => {
                    self.hero.bring_back_to_life(&self.playfield);
                    self.pending.push(PendingAction {
                        due: now + INVINCIBILITY_MS,
                        kind: PendingKind::ClearInvincibility,
                    });
                    info!("hero respawned, {} lives left", self.hero.lives());
                    self.events.push(WorldEvent::HeroRespawned);
                }
                PendingKind::ClearInvincibility => self.hero.clear_invincibility(),
            }
        }
    }

    /// Removes Dead and out-of-bounds enemies, handing their bullets to the
    /// stray pool; the rest move and take a shot at the hero.
    fn update_enemies(&mut self, now: u64, sink: &mut impl RenderSink) {
        let playfield = self.playfield;
        let mut kept = Vec::with_capacity(self.enemies.len());

        for mut enemy in std::mem::take(&mut self.enemies) {
            if enemy.body.is_dead() || !enemy.body.is_in_bounds(&playfield) {
                self.strays.extend(enemy.gun_mut().detach());
                continue;
            }
            enemy.update(now, sink);
            enemy.shoot(&self.hero.body, now);
            enemy.gun.projectiles.retain(|p| p.body.is_in_bounds(&playfield));
            kept.push(enemy);
        }

        self.enemies = kept;
    }

    fn update_strays(&mut self, sink: &mut impl RenderSink) {
        let playfield = self.playfield;
        self.strays.retain_mut(|bullet| {
            if !bullet.body.is_in_bounds(&playfield) {
                return false;
            }
            bullet.update(sink);
            true
        });
    }

    /// Held keys set the hero's velocity (left beats right, up beats down) and
    /// trigger firing and the manual spawn.
    pub fn apply_input(&mut self, input: &InputSnapshot, now: u64, rng: &mut impl Rng) {
        let hero = &mut self.hero.body;

        hero.velocity.x = if input.left && hero.position.x >= 0.0 {
            -PLAYER_SPEED
        } else if input.right && hero.position.x + hero.width() <= self.playfield.width {
            PLAYER_SPEED
        } else {
            0.0
        };

        hero.velocity.y = if input.up && hero.position.y >= 0.0 {
            -PLAYER_SPEED
        } else if input.down && hero.position.y + hero.height() <= self.playfield.height {
            PLAYER_SPEED
        } else {
            0.0
        };

        if input.fire {
            self.hero.shoot(now);
        }

        if input.spawn && now.saturating_sub(self.last_spawn) >= MANUAL_SPAWN_INTERVAL_MS {
            let x = self.playfield.width / 2.0;
            self.spawn_falling_enemy(x, now, rng);
        }
    }

    // ── Collisions ────────────────────────────────────────────────────────────

    /// Each enemy is resolved on its own against the hero's bullets and the
    /// hero against that enemy's bullets.
    ///
    /// Only the first overlapping bullet of each list is considered per enemy
    /// per tick. A hero bullet that hits an already-exploding enemy passes
    /// through and still uses up that check.
    pub fn resolve_collisions(&mut self, now: u64) {
        for enemy in self.enemies.iter_mut() {
            if let Some(index) = first_hit(&self.hero, &enemy.body) {
                if enemy.body.is_alive() {
                    self.hero.gun.projectiles.remove(index);
                    enemy.body.die(now);
                    self.score += KILL_SCORE;
                    if self.score > self.high_score {
                        self.high_score = self.score;
                    }
                    info!("enemy destroyed at {}, score {}", enemy.body.position, self.score);
                    self.events.push(WorldEvent::EnemyDestroyed { score: self.score });
                }
            }

            if !self.hero.body.is_alive() || self.hero.is_invincible() {
                continue;
            }
            let Some(index) = first_hit(&*enemy, &self.hero.body) else {
                continue;
            };

            enemy.gun.projectiles.remove(index);
            self.hero.die(now);
            let lives = self.hero.lives();
            info!("hero hit at {}, {} lives left", self.hero.body.position, lives);
            self.events.push(WorldEvent::HeroHit { lives });

            if lives == 0 {
                self.status = GameStatus::GameOver;
                info!("game over, final score {}", self.score);
                self.events.push(WorldEvent::GameOver { score: self.score });
            } else {
                self.pending.push(PendingAction {
                    due: now + RESPAWN_DELAY_MS,
                    kind: PendingKind::Respawn,
                });
            }
        }
    }

    // ── Spawning ──────────────────────────────────────────────────────────────

    /// Idle spawn: once the randomized interval since the last spawn has
    /// passed, and while fewer than `IDLE_SPAWN_CAP` enemies are on the field
    /// (exploding ones count), drop one in at a random column.
    pub fn apply_spawning_policy(&mut self, now: u64, rng: &mut impl Rng) {
        if now.saturating_sub(self.last_spawn) <= self.idle_spawn_after
            || self.enemies.len() >= IDLE_SPAWN_CAP
        {
            return;
        }
        let (enemy_width, _) = sprites::ENEMY.scaled_size();
        let max_x = (self.playfield.width - enemy_width).max(0.0) as i32;
        let x = rng.gen_range(0..=max_x) as f32;
        self.spawn_falling_enemy(x, now, rng);
    }

    fn spawn_falling_enemy(&mut self, x: f32, now: u64, rng: &mut impl Rng) {
        let velocity = Vector2::new(
            rng.gen_range(ENEMY_DRIFT) as f32,
            rng.gen_range(ENEMY_FALL_SPEED) as f32,
        );
        self.spawn_enemy(Vector2::new(x, 0.0), velocity);
        self.last_spawn = now;
        self.idle_spawn_after = rng.gen_range(IDLE_SPAWN_INTERVAL_MS);
    }

    /// Adds an enemy as-is. Spawn timers are not touched.
    pub fn spawn_enemy(&mut self, position: Vector2, velocity: Vector2) {
        debug!("enemy spawned at {position} moving {velocity}");
        self.enemies.push(Enemy::new(position, velocity));
        self.events.push(WorldEvent::EnemySpawned { position });
    }
}

/// Index of the first of `shooter`'s bullets overlapping `target`.
fn first_hit(shooter: &impl Shooter, target: &Entity) -> Option<usize> {
    shooter
        .projectiles()
        .iter()
        .position(|bullet| target.is_colliding_with(&bullet.body))
}
