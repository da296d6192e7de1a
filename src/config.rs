//! Tuning constants for the simulation.
//!
//! Everything the core needs to know about sizes, speeds and timings lives
//! in [`GameConfig`].  The defaults reproduce the classic feel of the game;
//! tests build tweaked copies with struct-update syntax.

use std::time::Duration;

// ── World & viewport ─────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 2000.0;
pub const WORLD_HEIGHT: f32 = 5000.0;
pub const VIEWPORT_WIDTH: f32 = 1600.0;
pub const VIEWPORT_HEIGHT: f32 = 800.0;

/// Distance below the world floor at which a falling player is killed.
pub const KILL_MARGIN: f32 = 200.0;

pub const TICK_HZ: u32 = 60;

// ── Physics ──────────────────────────────────────────────────────────────────

pub const GRAVITY: f32 = 0.5;
pub const MAX_FALL_SPEED: f32 = 10.0;
pub const JUMP_VELOCITY: f32 = -15.0;
pub const RUN_SPEED: f32 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub kill_margin: f32,
    pub tick_hz: u32,

    // Physics
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub jump_velocity: f32,
    pub run_speed: f32,

    // Player
    pub starting_lives: u32,
    pub spawn: (f32, f32),
    pub player_size: f32,
    pub player_walk_frames: u32,
    pub player_fire_cooldown: u32,

    // Enemies
    pub enemy_size: f32,
    pub enemy_speed: f32,
    pub enemy_frames: u32,
    /// Inclusive range of ticks before an enemy's first shot.
    pub enemy_first_fire: (u32, u32),
    /// Inclusive range of ticks between subsequent shots.
    pub enemy_refire: (u32, u32),

    // Projectiles
    pub fireball_size: f32,
    pub fireball_speed: f32,
    pub fireball_lifetime: u32,

    // Coins
    pub coin_size: f32,
    pub coins_per_platform: (u32, u32),

    /// Ticks per animation frame, shared by player and enemies.
    pub anim_step: u32,

    // Transitions
    pub fade_ticks: u32,
    pub death_hold_ticks: u32,
}

impl GameConfig {
    /// Largest legal camera offset on each axis.
    pub fn camera_max(&self) -> (f32, f32) {
        (
            (self.world_width - self.viewport_width).max(0.0),
            (self.world_height - self.viewport_height).max(0.0),
        )
    }

    pub fn kill_plane_y(&self) -> f32 {
        self.world_height + self.kill_margin
    }

    /// Wall-clock length of one tick, used only for frame pacing.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz.max(1) as f64)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            kill_margin: KILL_MARGIN,
            tick_hz: TICK_HZ,

            gravity: GRAVITY,
            max_fall_speed: MAX_FALL_SPEED,
            jump_velocity: JUMP_VELOCITY,
            run_speed: RUN_SPEED,

            starting_lives: 3,
            spawn: (100.0, WORLD_HEIGHT - 150.0),
            player_size: 50.0,
            player_walk_frames: 4,
            player_fire_cooldown: 20,

            enemy_size: 64.0,
            enemy_speed: 2.0,
            enemy_frames: 6,
            enemy_first_fire: (60, 180),
            enemy_refire: (120, 240),

            fireball_size: 16.0,
            fireball_speed: 6.0,
            fireball_lifetime: 180,

            coin_size: 20.0,
            coins_per_platform: (1, 2),

            anim_step: 6,

            // 0..=255 in steps of 10 is 26 frames.
            fade_ticks: 26,
            death_hold_ticks: 30, // 500 ms
        }
    }
}
