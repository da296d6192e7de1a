//! Game entity types.  Mostly data: the per-tick behaviour lives in
//! `physics` and `compute`.

use crate::config::GameConfig;
use crate::geometry::{Rect, Vec2};
use crate::level::Level;

// ── Transition phases ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayMessage {
    YouDied,
    GameOver,
}

impl OverlayMessage {
    pub fn text(self) -> &'static str {
        match self {
            OverlayMessage::YouDied => "YOU DIED",
            OverlayMessage::GameOver => "GAME OVER",
        }
    }
}

/// Top-level simulation phase.  Only `Alive` advances the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Alive,
    /// Fading out after a lost life.  `elapsed` counts ticks spent here.
    Dying { message: OverlayMessage, elapsed: u32 },
    /// Waiting for an explicit restart.
    GameOver,
    /// Fading back in after the player was put back at the spawn point.
    Respawning { elapsed: u32 },
}

/// What cost the player a life this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Damage {
    Enemy,
    Fireball,
    KillPlane,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fireball {
    pub rect: Rect,
    /// Horizontal speed per tick; the sign is the direction.
    pub speed: f32,
    /// Ticks left before the fireball burns out.
    pub lifetime: u32,
    pub owner: Owner,
}

impl Fireball {
    /// Launches a fireball with its top-left corner at `origin`.
    pub fn launch(origin: Vec2, facing_right: bool, owner: Owner, config: &GameConfig) -> Self {
        let direction = if facing_right { 1.0 } else { -1.0 };
        Self {
            rect: Rect::new(
                origin.x,
                origin.y,
                config.fireball_size,
                config.fireball_size,
            ),
            speed: config.fireball_speed * direction,
            lifetime: config.fireball_lifetime,
            owner,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime == 0
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub lives: u32,
    pub coin_count: u32,
    pub on_ground: bool,
    pub facing_right: bool,
    pub frame: u32,
    pub frame_timer: u32,
    /// Ticks until the next shot is allowed.
    pub fire_cooldown: u32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let (x, y) = config.spawn;
        Self {
            rect: Rect::new(x, y, config.player_size, config.player_size),
            vel: Vec2::ZERO,
            lives: config.starting_lives,
            coin_count: 0,
            on_ground: false,
            facing_right: true,
            frame: 0,
            frame_timer: 0,
            fire_cooldown: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Horizontal speed per tick; the sign is the direction.
    pub speed: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub facing_right: bool,
    pub frame: u32,
    pub frame_timer: u32,
    /// Ticks until the next fireball.
    pub fire_timer: u32,
    pub fireballs: Vec<Fireball>,
}

impl Enemy {
    /// Places an enemy at the middle of `platform`, standing on its top,
    /// patrolling the platform's full width.
    pub fn on_platform(platform: &Rect, speed: f32, fire_timer: u32, config: &GameConfig) -> Self {
        let size = config.enemy_size;
        let min_x = platform.left();
        let max_x = platform.right() - size;
        Self {
            rect: Rect::new(
                ((min_x + max_x) / 2.0).floor(),
                platform.top() - size,
                size,
                size,
            ),
            speed,
            min_x,
            max_x,
            facing_right: speed > 0.0,
            frame: 0,
            frame_timer: 0,
            fire_timer,
            fireballs: Vec::new(),
        }
    }
}

// ── Pickups ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub rect: Rect,
    pub collected: bool,
}

impl Coin {
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        Self {
            rect: Rect::new(x, y, config.coin_size, config.coin_size),
            collected: false,
        }
    }
}

// ── Ownership roots ──────────────────────────────────────────────────────────

/// Static world content: platforms (through the level) and coins.
#[derive(Clone, Debug)]
pub struct World {
    pub level: Level,
    pub coins: Vec<Coin>,
}

impl World {
    pub fn platforms(&self) -> &[Rect] {
        self.level.platforms()
    }
}

/// Every moving thing.  Enemy fireballs are owned by the enemy that fired
/// them; player fireballs are owned here.
#[derive(Clone, Debug)]
pub struct EntityManager {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub player_fireballs: Vec<Fireball>,
}

impl EntityManager {
    pub fn new(player: Player, enemies: Vec<Enemy>) -> Self {
        Self {
            player,
            enemies,
            player_fireballs: Vec::new(),
        }
    }

    pub fn enemy_fireball_count(&self) -> usize {
        self.enemies.iter().map(|e| e.fireballs.len()).sum()
    }
}
