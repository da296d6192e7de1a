//! The per-frame bundle handed to a renderer.
//!
//! Positions are in world coordinates; renderers subtract `camera` (see
//! [`Camera::to_screen`]) to get viewport coordinates.  Nothing here is
//! pixel-aware.

use crate::camera::Camera;
use crate::entities::{EntityManager, Fireball, OverlayMessage, Owner, World};
use crate::geometry::{Rect, Vec2};

#[derive(Clone, Debug, PartialEq)]
pub struct SpriteState {
    pub pos: Vec2,
    pub frame: u32,
    pub facing_right: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FireballSprite {
    pub pos: Vec2,
    pub owner: Owner,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CoinSprite {
    pub pos: Vec2,
    pub collected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    pub lives: u32,
    pub coins: u32,
}

/// Full-screen fade drawn over the world during transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlay {
    pub message: Option<OverlayMessage>,
    /// 0 = transparent, 255 = opaque black.
    pub alpha: u8,
    /// Show the "press R" hint.
    pub restart_prompt: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub player: SpriteState,
    pub enemies: Vec<SpriteState>,
    pub fireballs: Vec<FireballSprite>,
    pub coins: Vec<CoinSprite>,
    pub platforms: Vec<Rect>,
    pub camera: Camera,
    pub hud: Hud,
    pub overlay: Option<Overlay>,
}

fn fireball_sprite(fb: &Fireball) -> FireballSprite {
    FireballSprite {
        pos: Vec2::new(fb.rect.x, fb.rect.y),
        owner: fb.owner,
    }
}

impl RenderFrame {
    /// Snapshot everything a renderer needs for one frame.
    pub fn capture(
        entities: &EntityManager,
        world: &World,
        camera: Camera,
        overlay: Option<Overlay>,
    ) -> Self {
        let p = &entities.player;
        let player = SpriteState {
            pos: Vec2::new(p.rect.x, p.rect.y),
            frame: p.frame,
            facing_right: p.facing_right,
        };

        let enemies = entities
            .enemies
            .iter()
            .map(|e| SpriteState {
                pos: Vec2::new(e.rect.x, e.rect.y),
                frame: e.frame,
                facing_right: e.facing_right,
            })
            .collect();

        let fireballs = entities
            .enemies
            .iter()
            .flat_map(|e| e.fireballs.iter())
            .chain(entities.player_fireballs.iter())
            .map(fireball_sprite)
            .collect();

        let coins = world
            .coins
            .iter()
            .map(|c| CoinSprite {
                pos: Vec2::new(c.rect.x, c.rect.y),
                collected: c.collected,
            })
            .collect();

        Self {
            player,
            enemies,
            fireballs,
            coins,
            platforms: world.platforms().to_vec(),
            camera,
            hud: Hud {
                lives: p.lives,
                coins: p.coin_count,
            },
            overlay,
        }
    }
}
