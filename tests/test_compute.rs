use sky_ace::actors::Shooter;
use sky_ace::compute::*;
use sky_ace::entities::{NullSink, Projectile};
use sky_ace::input::InputSnapshot;
use sky_ace::math::{Playfield, Vector2};
use sky_ace::sprites;
use sky_ace::tuning::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_world(rng: &mut StdRng) -> World {
    World::new(Playfield::new(800.0, 600.0), 0, rng)
}

fn still_bullet(sprite: sprites::SpriteFrame, x: f32, y: f32) -> Projectile {
    Projectile::new(sprite, Vector2::new(x, y), Vector2::ZERO)
}

/// Spend hero lives until `lives` remain, leaving the hero alive and mortal.
fn set_hero_lives(world: &mut World, lives: u32) {
    let pf = world.playfield;
    while world.hero.lives() > lives {
        world.hero.die(0);
        world.hero.bring_back_to_life(&pf);
        world.hero.clear_invincibility();
    }
}

/// Place one still enemy bullet right on top of the hero.
fn bullet_on_hero(world: &mut World, enemy_index: usize) {
    let p = world.hero.body.position;
    world.enemies[enemy_index]
        .gun
        .projectiles
        .push(still_bullet(sprites::ENEMY_BULLET, p.x + 5.0, p.y + 5.0));
}

// ── World::new ────────────────────────────────────────────────────────────────

#[test]
fn new_world_is_empty_and_playing() {
    let mut rng = seeded_rng();
    let w = make_world(&mut rng);
    assert_eq!(w.hero.body.position, Vector2::new(400.0, 300.0));
    assert_eq!(w.hero.lives(), 3);
    assert!(w.enemies.is_empty());
    assert!(w.strays.is_empty());
    assert_eq!(w.score, 0);
    assert_eq!(w.high_score, 0);
    assert_eq!(w.status, GameStatus::Playing);
    assert_eq!(w.pending_respawn(), None);
}

// ── Collisions: hero bullets ↔ enemies ───────────────────────────────────────

#[test]
fn hero_bullet_kills_enemy_and_scores() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.spawn_enemy(Vector2::new(100.0, 0.0), Vector2::ZERO);
    w.spawn_enemy(Vector2::new(500.0, 0.0), Vector2::ZERO);
    w.hero.gun.projectiles.push(still_bullet(sprites::HERO_BULLET, 100.0, 0.0));

    let events = w.update(16, &InputSnapshot::idle(), &mut rng, &mut NullSink);

    assert!(w.enemies[0].body.is_dying());
    assert!(w.enemies[1].body.is_alive());
    assert_eq!(w.score, KILL_SCORE);
    assert_eq!(w.high_score, KILL_SCORE);
    assert!(w.hero.projectiles().is_empty());
    assert!(events.contains(&WorldEvent::EnemyDestroyed { score: KILL_SCORE }));
}

#[test]
fn only_first_overlapping_bullet_is_checked_per_tick() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.spawn_enemy(Vector2::new(100.0, 100.0), Vector2::ZERO);
    w.hero.gun.projectiles.push(still_bullet(sprites::HERO_BULLET, 110.0, 110.0));
    w.hero.gun.projectiles.push(still_bullet(sprites::HERO_BULLET, 115.0, 115.0));

    w.resolve_collisions(10);
    assert_eq!(w.hero.projectiles().len(), 1);
    assert_eq!(w.score, KILL_SCORE);

    // The enemy is exploding now: the remaining bullet passes through.
    w.resolve_collisions(20);
    assert_eq!(w.hero.projectiles().len(), 1);
    assert_eq!(w.score, KILL_SCORE);
}

#[test]
fn high_score_follows_score() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.high_score = 250;
    for x in [100.0, 300.0, 500.0] {
        w.spawn_enemy(Vector2::new(x, 50.0), Vector2::ZERO);
        w.hero.gun.projectiles.push(still_bullet(sprites::HERO_BULLET, x + 1.0, 51.0));
    }

    w.resolve_collisions(10);
    assert_eq!(w.score, 3 * KILL_SCORE);
    assert_eq!(w.high_score, 3 * KILL_SCORE);
}

#[test]
fn missing_bullet_leaves_enemy_alone() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.spawn_enemy(Vector2::new(100.0, 100.0), Vector2::ZERO);
    w.hero.gun.projectiles.push(still_bullet(sprites::HERO_BULLET, 300.0, 300.0));

    w.resolve_collisions(10);
    assert!(w.enemies[0].body.is_alive());
    assert_eq!(w.score, 0);
}

// ── Collisions: enemy bullets ↔ hero ─────────────────────────────────────────

#[test]
fn last_life_lost_means_game_over_without_respawn() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    set_hero_lives(&mut w, 1);
    w.spawn_enemy(Vector2::new(0.0, 0.0), Vector2::ZERO);
    bullet_on_hero(&mut w, 0);
    w.take_events();

    w.resolve_collisions(5000);

    assert_eq!(w.hero.lives(), 0);
    assert!(w.hero.body.is_dying());
    assert_eq!(w.status, GameStatus::GameOver);
    assert!(w.is_game_over());
    assert_eq!(w.pending_respawn(), None);
    assert!(w.enemies[0].projectiles().is_empty());
    assert_eq!(
        w.take_events(),
        vec![WorldEvent::HeroHit { lives: 0 }, WorldEvent::GameOver { score: 0 }]
    );
}

#[test]
fn hero_hit_schedules_respawn_then_grace_period() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.spawn_enemy(Vector2::new(0.0, 0.0), Vector2::ZERO);
    bullet_on_hero(&mut w, 0);
    let hit_at = 1000;

    w.resolve_collisions(hit_at);
    assert_eq!(w.hero.lives(), 2);
    assert_eq!(w.status, GameStatus::Playing);
    assert_eq!(w.pending_respawn(), Some(hit_at + RESPAWN_DELAY_MS));

    let idle = InputSnapshot::idle();
    w.update(hit_at + RESPAWN_DELAY_MS - 1, &idle, &mut rng, &mut NullSink);
    assert!(!w.hero.body.is_alive());

    let respawn_at = hit_at + RESPAWN_DELAY_MS;
    let events = w.update(respawn_at, &idle, &mut rng, &mut NullSink);
    assert!(events.contains(&WorldEvent::HeroRespawned));
    assert!(w.hero.body.is_alive());
    assert!(w.hero.is_invincible());
    assert_eq!(w.hero.body.position, w.playfield.center());
    assert_eq!(w.invincibility_ends_at(), Some(respawn_at + INVINCIBILITY_MS));

    w.update(respawn_at + INVINCIBILITY_MS, &idle, &mut rng, &mut NullSink);
    assert!(!w.hero.is_invincible());
    assert_eq!(w.invincibility_ends_at(), None);
}

#[test]
fn invincible_hero_lets_bullets_pass() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    let pf = w.playfield;
    w.hero.die(0);
    w.hero.bring_back_to_life(&pf);
    w.spawn_enemy(Vector2::new(0.0, 0.0), Vector2::ZERO);
    bullet_on_hero(&mut w, 0);

    w.resolve_collisions(100);

    assert_eq!(w.hero.lives(), 2);
    assert!(w.hero.body.is_alive());
    assert_eq!(w.enemies[0].projectiles().len(), 1);
}

#[test]
fn dying_hero_is_not_hit_again() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.spawn_enemy(Vector2::new(0.0, 0.0), Vector2::ZERO);
    w.spawn_enemy(Vector2::new(200.0, 0.0), Vector2::ZERO);
    bullet_on_hero(&mut w, 0);
    bullet_on_hero(&mut w, 1);

    w.resolve_collisions(100);

    assert_eq!(w.hero.lives(), 2);
    assert_eq!(w.enemies[1].projectiles().len(), 1);
}

// ── Enemy lifecycle & stray bullets ───────────────────────────────────────────

#[test]
fn enemy_leaving_playfield_releases_its_bullets() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.spawn_enemy(Vector2::new(-50.0, 100.0), Vector2::ZERO);
    w.enemies[0].gun.projectiles.push(Projectile::new(
        sprites::ENEMY_BULLET,
        Vector2::new(300.0, 570.0),
        Vector2::new(0.0, 10.0),
    ));
    w.enemies[0].gun.projectiles.push(Projectile::new(
        sprites::ENEMY_BULLET,
        Vector2::new(770.0, 100.0),
        Vector2::new(10.0, 0.0),
    ));

    let idle = InputSnapshot::idle();
    w.update(16, &idle, &mut rng, &mut NullSink);

    assert!(w.enemies.is_empty());
    assert_eq!(w.strays.len(), 2);
    assert_eq!(w.strays[0].position(), Vector2::new(300.0, 580.0));
    assert_eq!(w.strays[1].position(), Vector2::new(780.0, 100.0));

    for now in [32, 48, 64] {
        w.update(now, &idle, &mut rng, &mut NullSink);
    }
    assert!(w.strays.is_empty());
}

#[test]
fn dead_enemy_is_removed_after_its_explosion() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.spawn_enemy(Vector2::new(100.0, 100.0), Vector2::ZERO);
    w.enemies[0].body.die(0);

    let idle = InputSnapshot::idle();
    for step in 0..10 {
        w.update(step * EXPLOSION_FRAME_MS, &idle, &mut rng, &mut NullSink);
    }

    assert!(w.enemies.iter().all(|e| e.body.is_alive()));
}

#[test]
fn enemies_fire_at_the_hero_each_cooldown() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.spawn_enemy(Vector2::new(100.0, 100.0), Vector2::ZERO);

    let idle = InputSnapshot::idle();
    w.update(16, &idle, &mut rng, &mut NullSink);
    assert_eq!(w.enemies[0].projectiles().len(), 1);

    w.update(32, &idle, &mut rng, &mut NullSink);
    assert_eq!(w.enemies[0].projectiles().len(), 1);
}

#[test]
fn enemy_bullets_are_pruned_once_off_screen() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.spawn_enemy(Vector2::new(100.0, 100.0), Vector2::ZERO);
    w.enemies[0].gun.projectiles.push(Projectile::new(
        sprites::ENEMY_BULLET,
        Vector2::new(100.0, 595.0),
        Vector2::new(0.0, 10.0),
    ));
    // Fresh shot at the hero stays; the one leaving the bottom goes.
    w.update(16, &InputSnapshot::idle(), &mut rng, &mut NullSink);
    let bullets = w.enemies[0].projectiles();
    assert_eq!(bullets.len(), 1);
    assert!(bullets[0].position().y < 595.0);
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[test]
fn held_keys_set_hero_velocity() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);

    let right_down = InputSnapshot { right: true, down: true, ..InputSnapshot::idle() };
    w.apply_input(&right_down, 0, &mut rng);
    assert_eq!(w.hero.body.velocity, Vector2::new(PLAYER_SPEED, PLAYER_SPEED));

    let all = InputSnapshot { left: true, right: true, up: true, down: true, ..InputSnapshot::idle() };
    w.apply_input(&all, 0, &mut rng);
    assert_eq!(w.hero.body.velocity, Vector2::new(-PLAYER_SPEED, -PLAYER_SPEED));

    w.apply_input(&InputSnapshot::idle(), 0, &mut rng);
    assert_eq!(w.hero.body.velocity, Vector2::ZERO);
}

#[test]
fn hero_stops_past_the_edges() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.hero.body.position = Vector2::new(-1.0, 600.0);

    let push = InputSnapshot { left: true, down: true, ..InputSnapshot::idle() };
    w.apply_input(&push, 0, &mut rng);
    assert_eq!(w.hero.body.velocity, Vector2::ZERO);
}

#[test]
fn fire_key_shoots_with_cooldown() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    let fire = InputSnapshot { fire: true, ..InputSnapshot::idle() };

    w.apply_input(&fire, 0, &mut rng);
    w.apply_input(&fire, 50, &mut rng);
    assert_eq!(w.hero.projectiles().len(), 1);
    w.apply_input(&fire, 100, &mut rng);
    assert_eq!(w.hero.projectiles().len(), 2);
}

#[test]
fn spawn_key_drops_enemy_at_top_centre() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    let spawn = InputSnapshot { spawn: true, ..InputSnapshot::idle() };

    w.apply_input(&spawn, 50, &mut rng);
    assert!(w.enemies.is_empty());

    w.apply_input(&spawn, MANUAL_SPAWN_INTERVAL_MS, &mut rng);
    assert_eq!(w.enemies.len(), 1);
    let enemy = &w.enemies[0].body;
    assert_eq!(enemy.position, Vector2::new(400.0, 0.0));
    assert!(ENEMY_FALL_SPEED.contains(&(enemy.velocity.y as i32)));
    assert!(ENEMY_DRIFT.contains(&(enemy.velocity.x as i32)));

    w.apply_input(&spawn, MANUAL_SPAWN_INTERVAL_MS + 50, &mut rng);
    assert_eq!(w.enemies.len(), 1);
    w.apply_input(&spawn, 2 * MANUAL_SPAWN_INTERVAL_MS, &mut rng);
    assert_eq!(w.enemies.len(), 2);
}

// ── Spawning policy ───────────────────────────────────────────────────────────

#[test]
fn idle_spawning_respects_interval_and_cap() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    let max_wait = *IDLE_SPAWN_INTERVAL_MS.end();

    w.apply_spawning_policy(*IDLE_SPAWN_INTERVAL_MS.start(), &mut rng);
    assert!(w.enemies.is_empty());

    let first = max_wait + 1;
    w.apply_spawning_policy(first, &mut rng);
    assert_eq!(w.enemies.len(), 1);

    w.apply_spawning_policy(first + 1, &mut rng);
    assert_eq!(w.enemies.len(), 1);

    let second = first + max_wait + 1;
    w.apply_spawning_policy(second, &mut rng);
    assert_eq!(w.enemies.len(), 2);

    w.apply_spawning_policy(second + max_wait + 1, &mut rng);
    assert_eq!(w.enemies.len(), IDLE_SPAWN_CAP);

    let (enemy_width, _) = sprites::ENEMY.scaled_size();
    for enemy in &w.enemies {
        assert_eq!(enemy.body.position.y, 0.0);
        assert!(enemy.body.position.x >= 0.0);
        assert!(enemy.body.position.x + enemy_width <= 800.0);
        assert!(enemy.body.is_in_bounds(&w.playfield));
    }
}

#[test]
fn exploding_enemies_hold_their_spawn_slot() {
    let mut rng = seeded_rng();
    let mut w = make_world(&mut rng);
    w.spawn_enemy(Vector2::new(100.0, 100.0), Vector2::ZERO);
    w.spawn_enemy(Vector2::new(300.0, 100.0), Vector2::ZERO);
    w.enemies[0].body.die(0);

    w.apply_spawning_policy(10_000, &mut rng);
    assert_eq!(w.enemies.len(), IDLE_SPAWN_CAP);
}

#[test]
fn same_seed_same_spawns() {
    let run = || {
        let mut rng = seeded_rng();
        let mut w = make_world(&mut rng);
        w.apply_spawning_policy(5000, &mut rng);
        w.enemies[0].body.clone()
    };
    let a = run();
    let b = run();
    assert_eq!(a.position, b.position);
    assert_eq!(a.velocity, b.velocity);
}
