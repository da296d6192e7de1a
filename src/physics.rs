//! Player physics: gravity plus axis-separated move-and-resolve against
//! static platforms.  Enemies and projectiles move kinematically and never
//! pass through here.

use crate::config::GameConfig;
use crate::entities::Player;
use crate::geometry::Rect;

pub fn apply_gravity(player: &mut Player, config: &GameConfig) {
    player.vel.y = (player.vel.y + config.gravity).min(config.max_fall_speed);
}

/// Move along x and push the leading edge out of every platform it now
/// overlaps.
pub fn move_horizontal(player: &mut Player, platforms: &[Rect]) {
    player.rect.x += player.vel.x;
    for plat in platforms {
        if player.rect.intersects(plat) {
            if player.vel.x > 0.0 {
                player.rect.set_right(plat.left());
            } else if player.vel.x < 0.0 {
                player.rect.set_left(plat.right());
            }
        }
    }
}

/// Move along y.  Landing on a platform zeroes the fall and grounds the
/// player; bumping a ceiling zeroes the rise.
pub fn move_vertical(player: &mut Player, platforms: &[Rect]) {
    player.rect.y += player.vel.y;
    player.on_ground = false;
    for plat in platforms {
        if player.rect.intersects(plat) {
            if player.vel.y > 0.0 {
                player.rect.set_bottom(plat.top());
                player.vel.y = 0.0;
                player.on_ground = true;
            } else if player.vel.y < 0.0 {
                player.rect.set_top(plat.bottom());
                player.vel.y = 0.0;
            }
        }
    }
}

/// Keep the player inside the world horizontally and below the ceiling.
/// There is no floor clamp: falling out of the bottom is how the kill
/// plane gets reached.
pub fn clamp_to_world(player: &mut Player, config: &GameConfig) {
    if player.rect.top() < 0.0 {
        player.rect.set_top(0.0);
    }
    if player.rect.left() < 0.0 {
        player.rect.set_left(0.0);
    }
    if player.rect.right() > config.world_width {
        player.rect.set_right(config.world_width);
    }
}

/// One full physics step: gravity, x pass, y pass, world clamp.
pub fn step(player: &mut Player, platforms: &[Rect], config: &GameConfig) {
    apply_gravity(player, config);
    move_horizontal(player, platforms);
    move_vertical(player, platforms);
    clamp_to_world(player, config);
}
