//! Level data: the platform layout and which platforms host an enemy.

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::Coin;
use crate::geometry::Rect;

/// Horizontal inset of coins from a platform's edges.
const COIN_INSET_LEFT: f32 = 10.0;
const COIN_INSET_RIGHT: f32 = 30.0;
/// How far above the platform top a coin floats.
const COIN_HOVER: f32 = 25.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LevelError {
    #[error("enemy platform index {index} is out of range ({count} platforms)")]
    NoSuchPlatform { index: usize, count: usize },
    #[error("platform {index} is {width} wide, too narrow for a {enemy} wide enemy")]
    PlatformTooNarrow { index: usize, width: f32, enemy: f32 },
}

/// An ordered platform list (entry 0 is the ground) plus the platforms
/// that each get one enemy whenever the enemy set is regenerated.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    platforms: Vec<Rect>,
    enemy_platforms: Vec<usize>,
}

impl Level {
    pub fn new(
        platforms: Vec<Rect>,
        enemy_platforms: Vec<usize>,
        config: &GameConfig,
    ) -> Result<Self, LevelError> {
        for &index in &enemy_platforms {
            let plat = platforms.get(index).ok_or(LevelError::NoSuchPlatform {
                index,
                count: platforms.len(),
            })?;
            if plat.width < config.enemy_size {
                return Err(LevelError::PlatformTooNarrow {
                    index,
                    width: plat.width,
                    enemy: config.enemy_size,
                });
            }
        }
        Ok(Self {
            platforms,
            enemy_platforms,
        })
    }

    /// The stock layout: a ground strip and four stepped ledges rising to
    /// the right, with an enemy on every ledge.
    pub fn standard(config: &GameConfig) -> Result<Self, LevelError> {
        let h = config.world_height;
        let platforms = vec![
            Rect::new(0.0, h - 40.0, 700.0, 40.0), // ground
            Rect::new(800.0, h - 100.0, 200.0, 20.0),
            Rect::new(1100.0, h - 200.0, 200.0, 20.0),
            Rect::new(1400.0, h - 300.0, 200.0, 20.0),
            Rect::new(1700.0, h - 400.0, 200.0, 20.0),
        ];
        Self::new(platforms, vec![1, 2, 3, 4], config)
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    /// Platforms that host an enemy, in spawn order.
    pub fn enemy_platforms(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.enemy_platforms
            .iter()
            .filter_map(move |&i| self.platforms.get(i))
    }
}

/// Scatter coins over every platform except the ground.
pub fn place_coins(level: &Level, config: &GameConfig, rng: &mut impl Rng) -> Vec<Coin> {
    let (min_count, max_count) = config.coins_per_platform;
    let mut coins = Vec::new();

    for plat in level.platforms().iter().skip(1) {
        let count = rng.gen_range(min_count..=max_count.max(min_count));
        let lo = (plat.left() + COIN_INSET_LEFT) as i32;
        let hi = ((plat.right() - COIN_INSET_RIGHT) as i32).max(lo);
        for _ in 0..count {
            let x = rng.gen_range(lo..=hi) as f32;
            coins.push(Coin::new(x, plat.top() - COIN_HOVER, config));
        }
    }

    debug!(coins = coins.len(), "placed coins");
    coins
}
