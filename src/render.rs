//! Frame building
//!
//! The core never draws; it emits a retained list of draw commands per frame
//! that the host's renderer consumes back-to-front. Objects with a sprite
//! handle render as images, everything else as solid rects.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::rect::Rect;
use crate::sim::state::World;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Opaque image handle issued by the host's asset loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub u32);

/// One draw request, already in simulation space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Rect { rect: Rect, color: Rgb },
    Sprite { rect: Rect, sprite: SpriteId },
}

/// All draw commands for one frame, back-to-front
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    fn push_object(&mut self, rect: Rect, color: Rgb, sprite: Option<SpriteId>) {
        match sprite {
            Some(sprite) => self.commands.push(DrawCommand::Sprite { rect, sprite }),
            // No asset supplied: degrade to a solid-color rect
            None => self.commands.push(DrawCommand::Rect { rect, color }),
        }
    }

    /// Red background bar plus a green bar scaled by remaining health,
    /// drawn just below the entity. Skipped at full health.
    fn push_health_bar(&mut self, rect: Rect, health: i32, max_health: i32) {
        if health >= max_health {
            return;
        }
        let bar = Rect::new(
            rect.x,
            rect.bottom() + HEALTH_BAR_GAP,
            rect.w,
            HEALTH_BAR_HEIGHT,
        );
        self.commands.push(DrawCommand::Rect {
            rect: bar,
            color: HEALTH_BAR_BG,
        });

        let fraction = (health.max(0) as f32 / max_health.max(1) as f32).clamp(0.0, 1.0);
        self.commands.push(DrawCommand::Rect {
            rect: Rect::new(bar.x, bar.y, bar.w * fraction, bar.h),
            color: HEALTH_BAR_FG,
        });
    }
}

/// Build the draw list for the current world state:
/// starfield, then particles, then ships with their health bars on top
pub fn build_frame(world: &World) -> Frame {
    let mut frame = Frame::default();

    for star in &world.stars {
        frame.push_object(star.rect(), star.color, star.sprite);
    }
    for spark in &world.bursts {
        let rect = Rect::from_center(spark.pos, spark.rendered_size());
        frame.push_object(rect, spark.color, spark.sprite);
    }
    for pickup in world.pickups.iter().filter(|p| !p.dead) {
        frame.push_object(pickup.rect(), pickup.color, pickup.sprite);
    }
    for shot in world.projectiles.iter().filter(|p| !p.dead) {
        frame.push_object(shot.rect(), shot.color, shot.sprite);
    }
    for ship in world.enemies.iter().chain(&world.players) {
        if ship.dead {
            continue;
        }
        frame.push_object(ship.rect(), ship.color, ship.sprite);
        frame.push_health_bar(ship.rect(), ship.health, ship.max_health);
    }

    frame
}
