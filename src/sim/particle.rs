//! Particle construction and cosmetic particle behavior
//!
//! Bursts and stars never collide; projectiles and pickups are built here
//! and resolved against entity groups in `tick`. All randomness pulls from
//! the world's seeded RNG.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{Category, Particle, ParticleKind, World};
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::render::Rgb;

/// Spawn a radial burst of `count` sparks at `center`.
///
/// `color: None` picks a random warm-palette color per spark (destruction,
/// detonation); `Some` paints every spark in one color (damage feedback in
/// the entity's color, heal feedback in the pickup's color).
pub fn spawn_burst(world: &mut World, center: Vec2, count: usize, color: Option<Rgb>) {
    for _ in 0..count {
        // Oldest sparks make room when the quality cap is hit
        if world.bursts.len() >= world.max_bursts {
            world.bursts.remove(0);
        }

        let speed = world.rng.random_range(BURST_SPEED_MIN..BURST_SPEED_MAX);
        let angle = world.rng.random_range(0.0..TAU);
        let side = world.rng.random_range(BURST_SIZE_MIN..=BURST_SIZE_MAX).round();
        let color = color.unwrap_or_else(|| {
            BURST_PALETTE[world.rng.random_range(0..BURST_PALETTE.len())]
        });

        let id = world.next_entity_id();
        world.bursts.push(Particle {
            id,
            kind: ParticleKind::Burst {
                life: BURST_LIFESPAN,
                lifespan: BURST_LIFESPAN,
                base_size: side,
            },
            pos: center,
            size: Vec2::splat(side),
            vel: polar_to_cartesian(speed, angle),
            color,
            sprite: None,
            dead: false,
        });
    }
}

/// Spawn a laser or rocket in flight toward `target`
pub fn spawn_projectile(
    world: &mut World,
    pos: Vec2,
    vel: Vec2,
    color: Rgb,
    damage: i32,
    target: Category,
    rocket: bool,
) {
    let id = world.next_entity_id();
    world.projectiles.push(Particle {
        id,
        kind: ParticleKind::Projectile {
            damage,
            target,
            rocket,
        },
        pos,
        size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        vel,
        color,
        sprite: None,
        dead: false,
    });
}

/// Spawn a health pickup drifting leftward
pub fn spawn_health_pickup(world: &mut World, pos: Vec2, vel: Vec2, amount: i32) {
    assert!(amount > 0, "pickup heal amount must be positive");
    let id = world.next_entity_id();
    world.pickups.push(Particle {
        id,
        kind: ParticleKind::Health { amount },
        pos,
        size: Vec2::splat(HEALTH_PICKUP_SIDE),
        vel,
        color: HEAL_COLOR,
        sprite: None,
        dead: false,
    });
}

/// Scatter the initial starfield across the viewport, one random leftward
/// speed per star for the parallax effect
pub fn seed_starfield(world: &mut World, count: usize) {
    for _ in 0..count {
        let pos = Vec2::new(
            world.rng.random_range(0.0..world.viewport.w),
            world.rng.random_range(0.0..world.viewport.h),
        );
        let side = world.rng.random_range(1..=5) as f32;
        let speed = world.rng.random_range(3.0..7.0);

        let id = world.next_entity_id();
        world.stars.push(Particle {
            id,
            kind: ParticleKind::Star,
            pos,
            size: Vec2::splat(side),
            vel: Vec2::new(-speed, 0.0),
            color: STAR_COLOR,
            sprite: None,
            dead: false,
        });
    }
}

/// Advance every burst one tick: move, jitter the velocity, shrink, decay.
/// Sparks die when their life runs out or they leave the visibility buffer.
pub fn update_bursts(world: &mut World) {
    let viewport = world.viewport;
    for spark in world.bursts.iter_mut() {
        let ParticleKind::Burst {
            ref mut life,
            lifespan,
            base_size,
        } = spark.kind
        else {
            continue;
        };

        spark.pos += spark.vel;
        // Biased random walk, not pure ballistic motion
        spark.vel += Vec2::new(
            world.rng.random_range(-BURST_JITTER..BURST_JITTER),
            world.rng.random_range(-BURST_JITTER..BURST_JITTER),
        );

        *life = life.saturating_sub(1);
        let side = base_size * *life as f32 / lifespan.max(1) as f32;
        spark.size = Vec2::splat(side.max(0.0));

        if *life == 0 || !spark.visible(&viewport) {
            spark.dead = true;
        }
    }
    world.bursts.retain(|p| !p.dead);
}

/// Advance the starfield: constant leftward drift, wrapping back to the
/// right edge instead of dying
pub fn update_stars(world: &mut World) {
    let viewport = world.viewport;
    for star in world.stars.iter_mut() {
        star.pos += star.vel;
        if !star.visible(&viewport) {
            // Left edge of the star lands on the viewport's right edge
            star.pos.x = viewport.right() + star.size.x / 2.0;
        }
    }
}
