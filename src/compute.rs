//! Per-tick entity logic for the `Alive` phase.
//!
//! Every function mutates the entity collections it is handed and nothing
//! else.  All randomness comes through the injected `rng` so callers
//! control determinism (tests use a seeded `StdRng`).

use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Coin, Damage, Enemy, EntityManager, Fireball, Owner, Player, World};
use crate::input::{InputState, Key};
use crate::level::Level;
use crate::physics;

// ── Spawning ─────────────────────────────────────────────────────────────────

fn random_delay(range: (u32, u32), rng: &mut impl Rng) -> u32 {
    let (lo, hi) = range;
    rng.gen_range(lo..=hi.max(lo))
}

/// Build a fresh enemy set: one per enemy platform, each walking in a
/// random direction with a random first-shot delay.
pub fn spawn_level_entities(level: &Level, config: &GameConfig, rng: &mut impl Rng) -> Vec<Enemy> {
    let enemies: Vec<Enemy> = level
        .enemy_platforms()
        .map(|plat| {
            let speed = if rng.gen_bool(0.5) {
                config.enemy_speed
            } else {
                -config.enemy_speed
            };
            let fire_timer = random_delay(config.enemy_first_fire, rng);
            Enemy::on_platform(plat, speed, fire_timer, config)
        })
        .collect();

    debug!(count = enemies.len(), "spawned enemies");
    enemies
}

/// Start-of-session entity set.
pub fn init_entities(level: &Level, config: &GameConfig, rng: &mut impl Rng) -> EntityManager {
    EntityManager::new(Player::new(config), spawn_level_entities(level, config, rng))
}

/// Put the player back at the spawn point with a fresh enemy set.  Lives,
/// coins and facing are kept; player fireballs already in flight are too.
pub fn respawn_player(
    entities: &mut EntityManager,
    level: &Level,
    config: &GameConfig,
    rng: &mut impl Rng,
) {
    let cleared = entities.enemy_fireball_count();
    for enemy in &mut entities.enemies {
        enemy.fireballs.clear();
    }
    entities.enemies = spawn_level_entities(level, config, rng);

    let player = &mut entities.player;
    let (x, y) = config.spawn;
    player.rect.x = x;
    player.rect.y = y;
    player.vel.x = 0.0;
    player.vel.y = 0.0;
    debug!(lives = player.lives, cleared, "player respawned");
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Translate held keys into velocity and facing.  Returns the fireball
/// launched this tick, if any.
pub fn handle_input(player: &mut Player, input: &InputState, config: &GameConfig) -> Option<Fireball> {
    player.vel.x = 0.0;
    if input.is_held(Key::Left) {
        player.vel.x = -config.run_speed;
    }
    if input.is_held(Key::Right) {
        player.vel.x = config.run_speed;
    }
    if input.is_held(Key::Jump) && player.on_ground {
        player.vel.y = config.jump_velocity;
    }

    if player.vel.x > 0.0 {
        player.facing_right = true;
    } else if player.vel.x < 0.0 {
        player.facing_right = false;
    }

    if input.is_held(Key::Fire) && player.fire_cooldown == 0 {
        player.fire_cooldown = config.player_fire_cooldown;
        return Some(Fireball::launch(
            player.rect.center(),
            player.facing_right,
            Owner::Player,
            config,
        ));
    }
    None
}

fn animate_player(player: &mut Player, config: &GameConfig) {
    if player.vel.x != 0.0 {
        player.frame_timer += 1;
        if player.frame_timer >= config.anim_step {
            player.frame = (player.frame + 1) % config.player_walk_frames.max(1);
            player.frame_timer = 0;
        }
    } else {
        player.frame = 0;
    }
}

pub fn update_player(
    entities: &mut EntityManager,
    world: &World,
    input: &InputState,
    config: &GameConfig,
) {
    let player = &mut entities.player;
    if let Some(fireball) = handle_input(player, input, config) {
        entities.player_fireballs.push(fireball);
    }
    physics::step(player, world.platforms(), config);
    animate_player(player, config);
    player.fire_cooldown = player.fire_cooldown.saturating_sub(1);
}

// ── Enemies & projectiles ────────────────────────────────────────────────────

/// Walk back and forth between the patrol bounds.
pub fn patrol(enemy: &mut Enemy, config: &GameConfig) {
    enemy.rect.x += enemy.speed;
    if enemy.rect.x <= enemy.min_x || enemy.rect.x >= enemy.max_x {
        enemy.speed = -enemy.speed;
        enemy.facing_right = !enemy.facing_right;
    }
    let max_left = (config.world_width - enemy.rect.width).max(0.0);
    enemy.rect.x = enemy.rect.x.clamp(0.0, max_left);
}

/// Patrol, animate and, when the countdown runs out, fire.  The enemy's
/// existing fireballs are advanced separately by [`update_fireballs`].
pub fn update_enemy(enemy: &mut Enemy, config: &GameConfig, rng: &mut impl Rng) {
    patrol(enemy, config);

    enemy.frame_timer += 1;
    if enemy.frame_timer >= config.anim_step {
        enemy.frame = (enemy.frame + 1) % config.enemy_frames.max(1);
        enemy.frame_timer = 0;
    }

    enemy.fire_timer = enemy.fire_timer.saturating_sub(1);
    if enemy.fire_timer == 0 {
        enemy.fireballs.push(Fireball::launch(
            enemy.rect.center(),
            enemy.facing_right,
            Owner::Enemy,
            config,
        ));
        enemy.fire_timer = random_delay(config.enemy_refire, rng);
    }
}

/// Advance every fireball one tick and drop those that burned out.
pub fn update_fireballs(fireballs: &mut Vec<Fireball>) {
    for fb in fireballs.iter_mut() {
        fb.rect.x += fb.speed;
        fb.lifetime = fb.lifetime.saturating_sub(1);
    }
    fireballs.retain(|fb| !fb.is_expired());
}

/// The full update pass: player, enemies, enemy fireballs, player fireballs.
pub fn update(
    entities: &mut EntityManager,
    world: &World,
    input: &InputState,
    config: &GameConfig,
    rng: &mut impl Rng,
) {
    update_player(entities, world, input, config);
    for enemy in &mut entities.enemies {
        update_enemy(enemy, config, rng);
    }
    for enemy in &mut entities.enemies {
        update_fireballs(&mut enemy.fireballs);
    }
    update_fireballs(&mut entities.player_fireballs);
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Pick up every uncollected coin the player overlaps.  Returns how many.
pub fn collect_coins(player: &mut Player, coins: &mut [Coin]) -> u32 {
    let mut picked = 0;
    for coin in coins.iter_mut().filter(|c| !c.collected) {
        if player.rect.intersects(&coin.rect) {
            coin.collected = true;
            picked += 1;
        }
    }
    if picked > 0 {
        player.coin_count += picked;
        debug!(picked, total = player.coin_count, "coins collected");
    }
    picked
}

/// Find the first thing hurting the player this tick.  An enemy fireball
/// that lands is consumed.
fn find_player_damage(entities: &mut EntityManager, config: &GameConfig) -> Option<Damage> {
    let player_rect = entities.player.rect;

    if entities.enemies.iter().any(|e| player_rect.intersects(&e.rect)) {
        return Some(Damage::Enemy);
    }

    for enemy in &mut entities.enemies {
        if let Some(i) = enemy
            .fireballs
            .iter()
            .position(|fb| player_rect.intersects(&fb.rect))
        {
            enemy.fireballs.remove(i);
            return Some(Damage::Fireball);
        }
    }

    if player_rect.top() > config.kill_plane_y() {
        return Some(Damage::KillPlane);
    }
    None
}

/// Resolve player fireballs against enemies.  Each fireball kills at most
/// one enemy; several pairs may hit in the same tick.  Returns the kill count.
pub fn kill_enemies(entities: &mut EntityManager) -> usize {
    let mut killed_enemies: Vec<usize> = Vec::new();
    let mut used_fireballs: Vec<usize> = Vec::new();

    for (fi, fb) in entities.player_fireballs.iter().enumerate() {
        for (ei, enemy) in entities.enemies.iter().enumerate() {
            if !killed_enemies.contains(&ei) && fb.rect.intersects(&enemy.rect) {
                killed_enemies.push(ei);
                used_fireballs.push(fi);
                break;
            }
        }
    }

    if killed_enemies.is_empty() {
        return 0;
    }

    entities.enemies = std::mem::take(&mut entities.enemies)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !killed_enemies.contains(i))
        .map(|(_, e)| e)
        .collect();

    entities.player_fireballs = std::mem::take(&mut entities.player_fireballs)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !used_fireballs.contains(i))
        .map(|(_, fb)| fb)
        .collect();

    debug!(killed = killed_enemies.len(), remaining = entities.enemies.len(), "enemies killed");
    killed_enemies.len()
}

/// The cross-collision pass.  Coins are picked up first, then at most one
/// hit is taken (costing one life).  Player fireballs are resolved against
/// enemies afterwards unless an enemy fireball landed, which ends the pass.
pub fn resolve_collisions(
    entities: &mut EntityManager,
    world: &mut World,
    config: &GameConfig,
) -> Option<Damage> {
    collect_coins(&mut entities.player, &mut world.coins);

    let damage = find_player_damage(entities, config);
    if let Some(hit) = damage {
        entities.player.lives = entities.player.lives.saturating_sub(1);
        if hit == Damage::Fireball {
            return damage;
        }
    }

    kill_enemies(entities);
    damage
}
