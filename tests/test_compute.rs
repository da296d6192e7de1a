use jumper::compute::*;
use jumper::config::GameConfig;
use jumper::entities::*;
use jumper::geometry::Rect;
use jumper::input::{InputState, Key};
use jumper::level::Level;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_world(config: &GameConfig) -> World {
    World {
        level: Level::standard(config).unwrap(),
        coins: Vec::new(),
    }
}

fn make_entities(config: &GameConfig) -> EntityManager {
    EntityManager::new(Player::new(config), Vec::new())
}

fn make_enemy(x: f32, y: f32, min_x: f32, max_x: f32, speed: f32) -> Enemy {
    Enemy {
        rect: Rect::new(x, y, 64.0, 64.0),
        speed,
        min_x,
        max_x,
        facing_right: speed > 0.0,
        frame: 0,
        frame_timer: 0,
        fire_timer: 1000,
        fireballs: Vec::new(),
    }
}

fn make_fireball(x: f32, y: f32, owner: Owner, lifetime: u32) -> Fireball {
    Fireball {
        rect: Rect::new(x, y, 16.0, 16.0),
        speed: 6.0,
        lifetime,
        owner,
    }
}

// ── spawn_level_entities ─────────────────────────────────────────────────────

#[test]
fn spawns_one_enemy_per_enemy_platform() {
    let config = GameConfig::default();
    let level = Level::standard(&config).unwrap();
    let enemies = spawn_level_entities(&level, &config, &mut seeded_rng());
    assert_eq!(enemies.len(), 4);

    for (enemy, plat) in enemies.iter().zip(level.platforms().iter().skip(1)) {
        assert_eq!(enemy.rect.bottom(), plat.top());
        assert_eq!(enemy.min_x, plat.left());
        assert_eq!(enemy.max_x, plat.right() - 64.0);
        assert_eq!(enemy.speed.abs(), 2.0);
        assert_eq!(enemy.facing_right, enemy.speed > 0.0);
        assert!((60..=180).contains(&enemy.fire_timer));
        assert!(enemy.fireballs.is_empty());
    }
}

#[test]
fn enemy_starts_mid_patrol() {
    let config = GameConfig::default();
    let level = Level::standard(&config).unwrap();
    let enemies = spawn_level_entities(&level, &config, &mut seeded_rng());
    // Platform 1 spans 800..1000; patrol 800..936, midpoint 868.
    assert_eq!(enemies[0].rect.x, 868.0);
}

#[test]
fn spawning_is_deterministic_for_a_seed() {
    let config = GameConfig::default();
    let level = Level::standard(&config).unwrap();
    let a = spawn_level_entities(&level, &config, &mut seeded_rng());
    let b = spawn_level_entities(&level, &config, &mut seeded_rng());
    assert_eq!(a, b);
}

// ── patrol ───────────────────────────────────────────────────────────────────

#[test]
fn patrol_bounces_at_max_bound() {
    let config = GameConfig::default();
    let mut e = make_enemy(298.0, 0.0, 100.0, 300.0, 2.0);

    patrol(&mut e, &config);
    assert!(e.rect.x >= e.max_x);
    assert_eq!(e.speed, -2.0);
    assert!(!e.facing_right);

    patrol(&mut e, &config);
    assert_eq!(e.rect.x, 298.0);
    assert_eq!(e.speed, -2.0);
}

#[test]
fn patrol_bounces_at_min_bound() {
    let config = GameConfig::default();
    let mut e = make_enemy(102.0, 0.0, 100.0, 300.0, -2.0);
    patrol(&mut e, &config);
    assert_eq!(e.rect.x, 100.0);
    assert_eq!(e.speed, 2.0);
    assert!(e.facing_right);
}

#[test]
fn patrol_stays_inside_world() {
    let config = GameConfig::default();
    let mut e = make_enemy(1940.0, 0.0, 0.0, 5000.0, 2.0);
    for _ in 0..10 {
        patrol(&mut e, &config);
        assert!(e.rect.right() <= config.world_width);
    }
}

// ── update_enemy ─────────────────────────────────────────────────────────────

#[test]
fn enemy_fires_when_timer_runs_out() {
    let config = GameConfig::default();
    let mut e = make_enemy(500.0, 200.0, 0.0, 1000.0, 2.0);
    e.fire_timer = 1;
    update_enemy(&mut e, &config, &mut seeded_rng());

    assert_eq!(e.fireballs.len(), 1);
    let fb = &e.fireballs[0];
    assert_eq!(fb.owner, Owner::Enemy);
    assert_eq!(fb.speed, 6.0);
    assert_eq!(fb.lifetime, 180);
    assert_eq!((fb.rect.x, fb.rect.y), (502.0 + 32.0, 232.0));
    assert!((120..=240).contains(&e.fire_timer));
}

#[test]
fn enemy_holds_fire_until_timer_expires() {
    let config = GameConfig::default();
    let mut e = make_enemy(500.0, 200.0, 0.0, 1000.0, -2.0);
    e.fire_timer = 3;
    let mut rng = seeded_rng();
    update_enemy(&mut e, &config, &mut rng);
    update_enemy(&mut e, &config, &mut rng);
    assert!(e.fireballs.is_empty());
    update_enemy(&mut e, &config, &mut rng);
    assert_eq!(e.fireballs.len(), 1);
    assert_eq!(e.fireballs[0].speed, -6.0);
}

#[test]
fn enemy_animation_cycles_every_six_ticks() {
    let config = GameConfig::default();
    let mut e = make_enemy(500.0, 200.0, 0.0, 1000.0, 2.0);
    let mut rng = seeded_rng();
    for _ in 0..5 {
        update_enemy(&mut e, &config, &mut rng);
    }
    assert_eq!(e.frame, 0);
    update_enemy(&mut e, &config, &mut rng);
    assert_eq!(e.frame, 1);
    for _ in 0..30 {
        update_enemy(&mut e, &config, &mut rng);
    }
    assert_eq!(e.frame, 0); // 36 ticks = 6 frames = full cycle
}

// ── update_fireballs ─────────────────────────────────────────────────────────

#[test]
fn fireball_removed_exactly_when_lifetime_hits_zero() {
    let mut fireballs = vec![make_fireball(0.0, 0.0, Owner::Player, 180)];
    for tick in 1..180 {
        update_fireballs(&mut fireballs);
        assert_eq!(fireballs.len(), 1, "removed early at tick {tick}");
        assert_eq!(fireballs[0].lifetime, 180 - tick);
    }
    assert_eq!(fireballs[0].rect.x, 179.0 * 6.0);
    update_fireballs(&mut fireballs);
    assert!(fireballs.is_empty());
}

#[test]
fn fireballs_ignore_platforms() {
    // Fireballs only move along x and never consult the level.
    let mut fireballs = vec![make_fireball(790.0, 4910.0, Owner::Enemy, 10)];
    update_fireballs(&mut fireballs);
    assert_eq!(fireballs[0].rect.x, 796.0);
    assert_eq!(fireballs[0].rect.y, 4910.0);
}

// ── Player input & update ────────────────────────────────────────────────────

#[test]
fn right_wins_when_both_directions_held() {
    let config = GameConfig::default();
    let mut p = Player::new(&config);
    p.facing_right = false;
    let input = InputState::new().with_held(Key::Left).with_held(Key::Right);
    handle_input(&mut p, &input, &config);
    assert_eq!(p.vel.x, 5.0);
    assert!(p.facing_right);
}

#[test]
fn releasing_keys_stops_horizontal_motion() {
    let config = GameConfig::default();
    let mut p = Player::new(&config);
    p.vel.x = -5.0;
    handle_input(&mut p, &InputState::new(), &config);
    assert_eq!(p.vel.x, 0.0);
}

#[test]
fn jump_requires_ground() {
    let config = GameConfig::default();
    let jump = InputState::new().with_held(Key::Jump);

    let mut p = Player::new(&config);
    p.on_ground = false;
    handle_input(&mut p, &jump, &config);
    assert_eq!(p.vel.y, 0.0);

    p.on_ground = true;
    handle_input(&mut p, &jump, &config);
    assert_eq!(p.vel.y, -15.0);
}

#[test]
fn fire_spawns_fireball_from_player_centre() {
    let config = GameConfig::default();
    let mut p = Player::new(&config);
    p.facing_right = false;
    let fb = handle_input(&mut p, &InputState::new().with_held(Key::Fire), &config)
        .expect("should fire");
    assert_eq!(fb.owner, Owner::Player);
    assert_eq!(fb.speed, -6.0);
    assert_eq!((fb.rect.x, fb.rect.y), (125.0, config.world_height - 125.0));
    assert_eq!(p.fire_cooldown, 20);
}

#[test]
fn fire_cooldown_limits_rate() {
    let config = GameConfig::default();
    let world = make_world(&config);
    let mut entities = make_entities(&config);
    let fire = InputState::new().with_held(Key::Fire);

    for _ in 0..20 {
        update_player(&mut entities, &world, &fire, &config);
    }
    assert_eq!(entities.player_fireballs.len(), 1);
    update_player(&mut entities, &world, &fire, &config);
    assert_eq!(entities.player_fireballs.len(), 2);
}

#[test]
fn walk_animation_advances_and_resets_when_idle() {
    let config = GameConfig::default();
    let world = make_world(&config);
    let mut entities = make_entities(&config);
    let right = InputState::new().with_held(Key::Right);

    for _ in 0..6 {
        update_player(&mut entities, &world, &right, &config);
    }
    assert_eq!(entities.player.frame, 1);

    update_player(&mut entities, &world, &InputState::new(), &config);
    assert_eq!(entities.player.frame, 0);
}

#[test]
fn player_lands_on_ground_from_spawn() {
    let config = GameConfig::default();
    let world = make_world(&config);
    let mut entities = make_entities(&config);
    for _ in 0..120 {
        update_player(&mut entities, &world, &InputState::new(), &config);
    }
    assert!(entities.player.on_ground);
    assert_eq!(entities.player.rect.bottom(), config.world_height - 40.0);
}

#[test]
fn update_advances_every_projectile_once() {
    let config = GameConfig::default();
    let world = make_world(&config);
    let mut entities = make_entities(&config);
    let mut enemy = make_enemy(1200.0, 0.0, 1100.0, 1300.0, 2.0);
    enemy.fireballs.push(make_fireball(50.0, 50.0, Owner::Enemy, 100));
    entities.enemies.push(enemy);
    entities
        .player_fireballs
        .push(make_fireball(10.0, 10.0, Owner::Player, 100));

    update(&mut entities, &world, &InputState::new(), &config, &mut seeded_rng());

    assert_eq!(entities.enemies[0].rect.x, 1202.0);
    assert_eq!(entities.enemies[0].fireballs[0].rect.x, 56.0);
    assert_eq!(entities.enemies[0].fireballs[0].lifetime, 99);
    assert_eq!(entities.player_fireballs[0].rect.x, 16.0);
    assert_eq!(entities.player_fireballs[0].lifetime, 99);
}

// ── respawn_player ───────────────────────────────────────────────────────────

#[test]
fn respawn_resets_player_and_regenerates_enemies() {
    let config = GameConfig::default();
    let level = Level::standard(&config).unwrap();
    let mut entities = make_entities(&config);
    let mut lone = make_enemy(10.0, 10.0, 0.0, 100.0, 2.0);
    lone.fireballs.push(make_fireball(0.0, 0.0, Owner::Enemy, 50));
    entities.enemies.push(lone);
    entities.player.rect.x = 1500.0;
    entities.player.rect.y = 5300.0;
    entities.player.vel.x = 5.0;
    entities.player.vel.y = 10.0;
    entities.player.lives = 2;
    entities.player.coin_count = 4;

    respawn_player(&mut entities, &level, &config, &mut seeded_rng());

    let p = &entities.player;
    assert_eq!(p.rect, Rect::new(100.0, config.world_height - 150.0, 50.0, 50.0));
    assert_eq!((p.vel.x, p.vel.y), (0.0, 0.0));
    assert_eq!(p.lives, 2);
    assert_eq!(p.coin_count, 4);
    assert_eq!(entities.enemies.len(), 4);
    assert_eq!(entities.enemy_fireball_count(), 0);
}

// ── Collisions ───────────────────────────────────────────────────────────────

#[test]
fn player_fireball_kills_only_the_enemy_it_hits() {
    let config = GameConfig::default();
    let mut world = make_world(&config);
    let mut entities = make_entities(&config);
    entities.enemies.push(make_enemy(1000.0, 1000.0, 0.0, 2000.0, 2.0));
    entities.enemies.push(make_enemy(1500.0, 1000.0, 0.0, 2000.0, 2.0));
    entities
        .player_fireballs
        .push(make_fireball(1010.0, 1010.0, Owner::Player, 100));
    entities
        .player_fireballs
        .push(make_fireball(300.0, 300.0, Owner::Player, 100));

    let hit = resolve_collisions(&mut entities, &mut world, &config);

    assert_eq!(hit, None);
    assert_eq!(entities.enemies.len(), 1);
    assert_eq!(entities.enemies[0].rect.x, 1500.0);
    assert_eq!(entities.player_fireballs.len(), 1);
    assert_eq!(entities.player_fireballs[0].rect.x, 300.0);
}

#[test]
fn two_fireballs_on_one_enemy_spend_only_one() {
    let mut entities = make_entities(&GameConfig::default());
    entities.enemies.push(make_enemy(1000.0, 1000.0, 0.0, 2000.0, 2.0));
    entities
        .player_fireballs
        .push(make_fireball(1000.0, 1000.0, Owner::Player, 100));
    entities
        .player_fireballs
        .push(make_fireball(1020.0, 1020.0, Owner::Player, 100));

    assert_eq!(kill_enemies(&mut entities), 1);
    assert!(entities.enemies.is_empty());
    assert_eq!(entities.player_fireballs.len(), 1);
    assert_eq!(entities.player_fireballs[0].rect.x, 1020.0);
}

#[test]
fn several_kills_in_one_tick() {
    let mut entities = make_entities(&GameConfig::default());
    entities.enemies.push(make_enemy(1000.0, 1000.0, 0.0, 2000.0, 2.0));
    entities.enemies.push(make_enemy(1500.0, 1000.0, 0.0, 2000.0, 2.0));
    entities
        .player_fireballs
        .push(make_fireball(1510.0, 1010.0, Owner::Player, 100));
    entities
        .player_fireballs
        .push(make_fireball(1010.0, 1010.0, Owner::Player, 100));

    assert_eq!(kill_enemies(&mut entities), 2);
    assert!(entities.enemies.is_empty());
    assert!(entities.player_fireballs.is_empty());
}

#[test]
fn touching_an_enemy_costs_a_life() {
    let config = GameConfig::default();
    let mut world = make_world(&config);
    let mut entities = make_entities(&config);
    let p = entities.player.rect;
    entities.enemies.push(make_enemy(p.x + 10.0, p.y, 0.0, 2000.0, 2.0));

    let hit = resolve_collisions(&mut entities, &mut world, &config);
    assert_eq!(hit, Some(Damage::Enemy));
    assert_eq!(entities.player.lives, 2);
}

#[test]
fn player_fireballs_still_land_on_the_tick_an_enemy_is_touched() {
    let config = GameConfig::default();
    let mut world = make_world(&config);
    let mut entities = make_entities(&config);
    let p = entities.player.rect;
    entities.enemies.push(make_enemy(p.x + 10.0, p.y, 0.0, 2000.0, 2.0));
    entities.enemies.push(make_enemy(1000.0, 1000.0, 0.0, 2000.0, 2.0));
    entities
        .player_fireballs
        .push(make_fireball(1010.0, 1010.0, Owner::Player, 100));

    let hit = resolve_collisions(&mut entities, &mut world, &config);

    assert_eq!(hit, Some(Damage::Enemy));
    assert_eq!(entities.player.lives, 2);
    assert_eq!(entities.enemies.len(), 1);
    assert_eq!(entities.enemies[0].rect.x, p.x + 10.0);
    assert!(entities.player_fireballs.is_empty());
}

#[test]
fn enemy_fireball_hit_consumes_it_and_ends_the_pass() {
    let config = GameConfig::default();
    let mut world = make_world(&config);
    let mut entities = make_entities(&config);
    let p = entities.player.rect;

    let mut shooter = make_enemy(1000.0, 1000.0, 0.0, 2000.0, 2.0);
    shooter
        .fireballs
        .push(make_fireball(p.x + 5.0, p.y + 5.0, Owner::Enemy, 100));
    shooter
        .fireballs
        .push(make_fireball(600.0, 600.0, Owner::Enemy, 100));
    entities.enemies.push(shooter);
    // Would kill the shooter if the pass continued.
    entities
        .player_fireballs
        .push(make_fireball(1010.0, 1010.0, Owner::Player, 100));

    let hit = resolve_collisions(&mut entities, &mut world, &config);

    assert_eq!(hit, Some(Damage::Fireball));
    assert_eq!(entities.player.lives, 2);
    assert_eq!(entities.enemies.len(), 1);
    assert_eq!(entities.enemies[0].fireballs.len(), 1);
    assert_eq!(entities.enemies[0].fireballs[0].rect.x, 600.0);
    assert_eq!(entities.player_fireballs.len(), 1);
}

#[test]
fn falling_past_kill_plane_costs_a_life() {
    let config = GameConfig::default();
    let mut world = make_world(&config);
    let mut entities = make_entities(&config);

    entities.player.rect.y = config.world_height + 200.0;
    assert_eq!(resolve_collisions(&mut entities, &mut world, &config), None);

    entities.player.rect.y = config.world_height + 201.0;
    assert_eq!(
        resolve_collisions(&mut entities, &mut world, &config),
        Some(Damage::KillPlane)
    );
    assert_eq!(entities.player.lives, 2);
}

#[test]
fn coins_are_collected_once() {
    let config = GameConfig::default();
    let mut world = make_world(&config);
    let mut entities = make_entities(&config);
    let p = entities.player.rect;
    world.coins.push(Coin::new(p.x + 10.0, p.y + 10.0, &config));
    world.coins.push(Coin::new(1500.0, 100.0, &config));

    resolve_collisions(&mut entities, &mut world, &config);
    resolve_collisions(&mut entities, &mut world, &config);

    assert_eq!(entities.player.coin_count, 1);
    assert!(world.coins[0].collected);
    assert!(!world.coins[1].collected);
}
