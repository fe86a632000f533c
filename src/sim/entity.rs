//! Entity reactions and player control
//!
//! Damage, healing and destruction all run through the `World` so feedback
//! bursts and audio events land in the right queues. Destruction is one-way:
//! a `dead` entity ignores every further call until the end-of-tick sweep
//! removes it.

use glam::Vec2;

use super::particle::{spawn_burst, spawn_projectile};
use super::rect::Rect;
use super::state::{Category, Entity, EntityKind, GameEvent, World};
use crate::consts::*;

/// Rumble pulse sent alongside weapon fire
const FIRE_RUMBLE: GameEvent = GameEvent::Rumble {
    low: 0.3,
    high: 0.3,
    duration_ms: 100,
};

fn group_mut(world: &mut World, category: Category) -> &mut Vec<Entity> {
    match category {
        Category::Player => &mut world.players,
        Category::Enemy => &mut world.enemies,
    }
}

/// Subtract health, emit damage feedback, destroy on reaching zero.
///
/// The feedback burst (3 sparks in the entity's own color) and the damage
/// cue fire whether or not this hit is lethal. A lethal hit triggers exactly
/// one destruction; repeat calls on a dead entity are no-ops.
pub fn take_damage(world: &mut World, category: Category, idx: usize, amount: i32) {
    let entity = &group_mut(world, category)[idx];
    if entity.dead {
        return;
    }
    let (center, color) = (entity.pos, entity.color);

    spawn_burst(world, center, DAMAGE_BURST_COUNT, Some(color));
    world.events.push(GameEvent::EntityDamaged);

    let entity = &mut group_mut(world, category)[idx];
    entity.health -= amount;
    if entity.health <= 0 {
        entity.health = 0;
        destroy(world, category, idx);
    }
}

/// Add health, clamped to max. No-op on a dead entity.
pub fn heal(world: &mut World, category: Category, idx: usize, amount: i32) {
    let entity = &mut group_mut(world, category)[idx];
    if entity.dead {
        return;
    }
    entity.health = (entity.health + amount).min(entity.max_health);
    world.events.push(GameEvent::EntityHealed);
}

/// Flag the entity for removal with full destruction feedback: a 100-spark
/// warm-palette burst at its center plus the destruction cue. Idempotent.
pub fn destroy(world: &mut World, category: Category, idx: usize) {
    let entity = &mut group_mut(world, category)[idx];
    if entity.dead {
        return;
    }
    entity.dead = true;
    let center = entity.pos;

    spawn_burst(world, center, DESTROY_BURST_COUNT, None);
    world.events.push(GameEvent::EntityDestroyed);
}

/// Silent removal for an enemy that drifted off the left edge uncontested:
/// its damage lands on every live player, then it disappears with no burst.
pub fn apply_exit_penalty(world: &mut World, enemy_idx: usize) {
    let enemy = &mut world.enemies[enemy_idx];
    if enemy.dead {
        return;
    }
    enemy.dead = true;
    let EntityKind::Enemy { damage, .. } = enemy.kind else {
        return;
    };

    for player_idx in 0..world.players.len() {
        take_damage(world, Category::Player, player_idx, damage);
    }
}

/// One tick's directional input, already deadzone-filtered by the input
/// collaborator. Absent controller means zero axes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionalInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Analog stick, each component in [-1, 1], 0 inside the deadzone
    pub axis_x: f32,
    pub axis_y: f32,
}

/// Player movement physics: per-direction acceleration, per-axis friction
/// when idle, speed clamp, then a positional clamp to the viewport.
pub fn apply_player_movement(entity: &mut Entity, input: &DirectionalInput, viewport: &Rect) {
    let accel = PLAYER_ACCEL_FACTOR * entity.speed;

    if input.up {
        entity.vel.y -= accel;
    }
    if input.down {
        entity.vel.y += accel;
    }
    if input.left {
        entity.vel.x -= accel;
    }
    if input.right {
        entity.vel.x += accel;
    }
    // Analog contribution stacks additively with the keys
    entity.vel.x += input.axis_x * accel;
    entity.vel.y += input.axis_y * accel;

    // Friction per idle axis; the decay is asymptotic so snap tiny
    // remainders to zero
    if !input.up && !input.down && input.axis_y == 0.0 {
        entity.vel.y *= PLAYER_FRICTION;
        if entity.vel.y.abs() < VELOCITY_EPSILON {
            entity.vel.y = 0.0;
        }
    }
    if !input.left && !input.right && input.axis_x == 0.0 {
        entity.vel.x *= PLAYER_FRICTION;
        if entity.vel.x.abs() < VELOCITY_EPSILON {
            entity.vel.x = 0.0;
        }
    }

    entity.vel = entity.vel.clamp_length_max(entity.speed);
    entity.pos += entity.vel;

    // Keep the ship fully on screen. Positional only: velocity is untouched
    // so sliding along an edge still works.
    entity.pos = entity.rect().clamped_center_within(viewport);
}

/// Fire the primary weapon if its cooldown is open. Silent no-op otherwise.
pub fn fire_laser(world: &mut World, player_idx: usize) {
    let player = &mut world.players[player_idx];
    if player.dead {
        return;
    }
    let EntityKind::Player { ref mut laser, .. } = player.kind else {
        return;
    };
    if !laser.ready() {
        return;
    }
    laser.reset();

    let muzzle = Vec2::new(player.rect().right(), player.pos.y);
    let color = player.color;
    spawn_projectile(
        world,
        muzzle,
        Vec2::new(PROJECTILE_SPEED, 0.0),
        color,
        LASER_DAMAGE,
        Category::Enemy,
        false,
    );
    world.events.push(GameEvent::LaserFired);
    world.events.push(FIRE_RUMBLE);
}

/// Fire the secondary weapon if its cooldown is open. Silent no-op otherwise.
pub fn fire_rocket(world: &mut World, player_idx: usize) {
    let player = &mut world.players[player_idx];
    if player.dead {
        return;
    }
    let EntityKind::Player { ref mut rocket, .. } = player.kind else {
        return;
    };
    if !rocket.ready() {
        return;
    }
    rocket.reset();

    let muzzle = Vec2::new(player.rect().right(), player.pos.y);
    let color = player.color;
    spawn_projectile(
        world,
        muzzle,
        Vec2::new(PROJECTILE_SPEED, 0.0),
        color,
        ROCKET_DAMAGE,
        Category::Enemy,
        true,
    );
    world.events.push(GameEvent::RocketFired);
    world.events.push(FIRE_RUMBLE);
}
