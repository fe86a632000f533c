//! Interval spawners
//!
//! A spawner accumulates elapsed time and fires when its interval elapses.
//! A positive decay rate shortens the interval after each spawn, floored at
//! the configured minimum, which is the whole difficulty curve.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::particle::spawn_health_pickup;
use super::state::{Cooldown, Entity, EntityKind, World};
use crate::consts::*;
use crate::render::Rgb;

/// Periodic trigger with a linearly decaying interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds between spawns; never drops below `floor`
    pub interval: f32,
    /// Subtracted from the interval after each spawn (0 = constant interval)
    pub decay: f32,
    pub floor: f32,
    /// Seconds accumulated since the last spawn
    pub timer: f32,
}

impl Spawner {
    pub fn new(interval: f32, decay: f32, floor: f32) -> Self {
        assert!(interval > 0.0, "spawn interval must be positive");
        assert!(decay >= 0.0, "spawn decay must not be negative");
        assert!(
            floor > 0.0 && floor <= interval,
            "spawn floor must be in (0, interval]"
        );
        Self {
            interval,
            decay,
            floor,
            timer: 0.0,
        }
    }

    /// Accumulate `dt`; returns true when a spawn is due. At most one spawn
    /// fires per update, and the accumulator resets to zero on fire.
    pub fn update(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer < self.interval {
            return false;
        }
        self.timer = 0.0;
        if self.decay > 0.0 {
            self.interval = (self.interval - self.decay).max(self.floor);
        }
        true
    }
}

/// A preset of enemy stats chosen at spawn time
#[derive(Debug, Clone, Copy)]
pub struct EnemyArchetype {
    pub color: Rgb,
    pub speed: f32,
    pub health: i32,
    pub damage: i32,
}

/// Fast/fragile through slow/tanky
pub const ENEMY_ARCHETYPES: [EnemyArchetype; 3] = [
    EnemyArchetype {
        color: Rgb(239, 68, 68),
        speed: 7.0,
        health: 100,
        damage: 12,
    },
    EnemyArchetype {
        color: Rgb(251, 191, 36),
        speed: 5.0,
        health: 75,
        damage: 10,
    },
    EnemyArchetype {
        color: Rgb(34, 197, 94),
        speed: 3.0,
        health: 50,
        damage: 8,
    },
];

/// Vertical margin keeping spawns fully on screen
const ENEMY_SPAWN_MARGIN: f32 = 25.0;
const HEALTH_SPAWN_MARGIN: f32 = 10.0;

/// Spawn one enemy of a random archetype at the right edge
pub fn spawn_enemy(world: &mut World) {
    let archetype = ENEMY_ARCHETYPES[world.rng.random_range(0..ENEMY_ARCHETYPES.len())];
    let y = world
        .rng
        .random_range(ENEMY_SPAWN_MARGIN..world.viewport.h - ENEMY_SPAWN_MARGIN);
    let delay = world.roll_retaliation_delay();
    let mut retaliate = Cooldown::new(delay);
    retaliate.reset();

    let id = world.next_entity_id();
    world.enemies.push(Entity {
        id,
        kind: EntityKind::Enemy {
            damage: archetype.damage,
            retaliate,
        },
        pos: Vec2::new(world.viewport.right(), y),
        size: Vec2::splat(PLAYER_SIZE),
        vel: Vec2::new(-archetype.speed, 0.0),
        speed: archetype.speed,
        color: archetype.color,
        sprite: None,
        health: archetype.health,
        max_health: archetype.health,
        dead: false,
    });
}

/// Spawn one health pickup at the right edge with a random heal amount
pub fn spawn_health(world: &mut World) {
    let y = world
        .rng
        .random_range(HEALTH_SPAWN_MARGIN..world.viewport.h - HEALTH_SPAWN_MARGIN);
    let drift = world.rng.random_range(-7.0..-3.0);
    let amount = world.rng.random_range(HEALTH_PICKUP_MIN..=HEALTH_PICKUP_MAX);

    let pos = Vec2::new(world.viewport.right(), y);
    spawn_health_pickup(world, pos, Vec2::new(drift, 0.0), amount);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use proptest::prelude::*;

    #[test]
    fn test_fires_when_interval_elapses() {
        let mut spawner = Spawner::new(5.0, 0.0, 5.0);
        assert!(!spawner.update(2.0));
        assert!(!spawner.update(2.0));
        assert!(spawner.update(2.0));
        // Accumulator reset on fire
        assert!(!spawner.update(2.0));
    }

    #[test]
    fn test_decay_shortens_interval_to_floor() {
        let mut spawner = Spawner::new(5.0, 2.0, 1.0);
        assert!(spawner.update(5.0));
        assert_eq!(spawner.interval, 3.0);
        assert!(spawner.update(3.0));
        assert_eq!(spawner.interval, 1.0);
        // Clamped at the floor from here on
        assert!(spawner.update(1.0));
        assert_eq!(spawner.interval, 1.0);
    }

    #[test]
    fn test_zero_decay_means_constant_interval() {
        let mut spawner = Spawner::new(4.0, 0.0, 4.0);
        for _ in 0..20 {
            spawner.update(4.0);
        }
        assert_eq!(spawner.interval, 4.0);
    }

    #[test]
    #[should_panic]
    fn test_rejects_negative_interval() {
        let _ = Spawner::new(-1.0, 0.1, 1.0);
    }

    proptest! {
        #[test]
        fn prop_interval_never_below_floor(
            steps in proptest::collection::vec(0.0_f32..10.0, 1..200),
            interval in 1.0_f32..20.0,
            decay in 0.0_f32..5.0,
        ) {
            let floor = 0.5_f32;
            let mut spawner = Spawner::new(interval.max(floor), decay, floor);
            for dt in steps {
                spawner.update(dt);
                prop_assert!(spawner.interval >= spawner.floor);
            }
        }
    }

    #[test]
    fn test_spawn_enemy_uses_archetype_table() {
        let mut settings = Settings::default();
        settings.starfield = false;
        let mut world = World::new(3, &settings);

        for _ in 0..10 {
            spawn_enemy(&mut world);
        }
        for enemy in &world.enemies {
            let matched = ENEMY_ARCHETYPES.iter().any(|a| {
                a.health == enemy.max_health
                    && a.color == enemy.color
                    && enemy.vel.x == -a.speed
            });
            assert!(matched, "enemy does not match any archetype");
            assert!(enemy.pos.y >= ENEMY_SPAWN_MARGIN);
            assert!(enemy.pos.y <= world.viewport.h - ENEMY_SPAWN_MARGIN);
            assert_eq!(enemy.pos.x, world.viewport.right());
        }
    }

    #[test]
    fn test_spawn_health_randomizes_amount() {
        let mut settings = Settings::default();
        settings.starfield = false;
        let mut world = World::new(3, &settings);

        for _ in 0..10 {
            spawn_health(&mut world);
        }
        for pickup in &world.pickups {
            let crate::sim::state::ParticleKind::Health { amount } = pickup.kind else {
                panic!("expected health pickup");
            };
            assert!((HEALTH_PICKUP_MIN..=HEALTH_PICKUP_MAX).contains(&amount));
            assert!(pickup.vel.x <= -3.0 && pickup.vel.x >= -7.0);
        }
    }
}
