use crate::config::GameConfig;
use crate::geometry::{Rect, Vec2};

/// Top-left corner of the viewport in world coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

impl Camera {
    /// Centre the viewport on `target`, then clamp so it never shows
    /// anything outside the world.
    pub fn follow(target: &Rect, config: &GameConfig) -> Self {
        let center = target.center();
        let (max_x, max_y) = config.camera_max();
        Self {
            x: (center.x - config.viewport_width / 2.0).clamp(0.0, max_x),
            y: (center.y - config.viewport_height / 2.0).clamp(0.0, max_y),
        }
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x - self.x, world.y - self.y)
    }

    pub fn rect_to_screen(&self, rect: &Rect) -> Rect {
        Rect::new(rect.x - self.x, rect.y - self.y, rect.width, rect.height)
    }
}
