//! Fixed timestep simulation tick
//!
//! One call advances the whole world by one frame: player control, entity
//! and particle motion, collision resolution, spawners, then the removal
//! sweep. Objects flagged dead mid-tick are skipped by later phases and
//! swept only after everything has updated, so no update order within a
//! tick can observe a half-removed object.

use glam::Vec2;

use super::collision::hits_in_group;
use super::entity::{
    DirectionalInput, apply_exit_penalty, apply_player_movement, destroy, fire_laser, fire_rocket,
    heal, take_damage,
};
use super::particle::{spawn_burst, spawn_projectile, update_bursts, update_stars};
use super::spawner::{spawn_enemy, spawn_health};
use super::state::{Category, EntityKind, GameEvent, ParticleKind, World};
use crate::consts::*;

/// Input snapshot for a single tick, sampled by the host's input collaborator
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held directions plus deadzone-filtered analog axes
    pub movement: DirectionalInput,
    /// Fire the laser (edge-triggered by the host)
    pub fire_primary: bool,
    /// Fire the rocket (edge-triggered by the host)
    pub fire_secondary: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    world.time_ticks += 1;

    update_players(world, input, dt);
    advance_enemies(world, dt);
    advance_projectiles(world);
    advance_pickups(world);
    update_bursts(world);
    update_stars(world);

    resolve_enemy_contact(world);
    resolve_projectile_hits(world);
    resolve_pickup_collection(world);
    resolve_offscreen(world);

    run_spawners(world, dt);
    sweep(world);
    world.normalize_order();
}

/// Player movement, cooldown advancement and weapon firing
fn update_players(world: &mut World, input: &TickInput, dt: f32) {
    let viewport = world.viewport;
    for idx in 0..world.players.len() {
        let player = &mut world.players[idx];
        if player.dead {
            continue;
        }
        if let EntityKind::Player {
            ref mut laser,
            ref mut rocket,
        } = player.kind
        {
            laser.advance(dt);
            rocket.advance(dt);
        }
        apply_player_movement(player, &input.movement, &viewport);

        if input.fire_primary {
            fire_laser(world, idx);
        }
        if input.fire_secondary {
            fire_rocket(world, idx);
        }
    }
}

/// Constant leftward drift plus timed laser retaliation
fn advance_enemies(world: &mut World, dt: f32) {
    for idx in 0..world.enemies.len() {
        let enemy = &mut world.enemies[idx];
        if enemy.dead {
            continue;
        }
        enemy.pos += enemy.vel;

        let EntityKind::Enemy {
            damage,
            ref mut retaliate,
        } = enemy.kind
        else {
            continue;
        };
        retaliate.advance(dt);
        if !retaliate.ready() {
            continue;
        }

        let muzzle = Vec2::new(enemy.rect().x, enemy.pos.y);
        let color = enemy.color;
        spawn_projectile(
            world,
            muzzle,
            Vec2::new(-PROJECTILE_SPEED, 0.0),
            color,
            damage,
            Category::Player,
            false,
        );
        world.events.push(GameEvent::EnemyLaserFired);

        let delay = world.roll_retaliation_delay();
        if let EntityKind::Enemy {
            ref mut retaliate, ..
        } = world.enemies[idx].kind
        {
            retaliate.reset_with_period(delay);
        }
    }
}

/// Constant-velocity projectile motion; rockets leave a trailing burst
/// every tick whether or not they hit anything
fn advance_projectiles(world: &mut World) {
    for idx in 0..world.projectiles.len() {
        let shot = &mut world.projectiles[idx];
        if shot.dead {
            continue;
        }
        shot.pos += shot.vel;

        if let ParticleKind::Projectile { rocket: true, .. } = shot.kind {
            let tail = Vec2::new(shot.rect().x, shot.pos.y);
            spawn_burst(world, tail, ROCKET_TRAIL_COUNT, None);
        }
    }
}

fn advance_pickups(world: &mut World) {
    for pickup in world.pickups.iter_mut() {
        if !pickup.dead {
            pickup.pos += pickup.vel;
        }
    }
}

/// Ram damage: an enemy touching any player applies its damage to every
/// overlapped player and destroys itself
fn resolve_enemy_contact(world: &mut World) {
    for idx in 0..world.enemies.len() {
        let enemy = &world.enemies[idx];
        if enemy.dead {
            continue;
        }
        let EntityKind::Enemy { damage, .. } = enemy.kind else {
            continue;
        };
        let rect = enemy.rect();

        let hits = hits_in_group(&rect, &world.players);
        if hits.is_empty() {
            continue;
        }
        for player_idx in hits {
            take_damage(world, Category::Player, player_idx, damage);
        }
        destroy(world, Category::Enemy, idx);
    }
}

/// Projectiles damage every target they overlap this tick, then remove
/// themselves. Rockets also detonate.
fn resolve_projectile_hits(world: &mut World) {
    for idx in 0..world.projectiles.len() {
        let shot = &world.projectiles[idx];
        if shot.dead {
            continue;
        }
        let ParticleKind::Projectile {
            damage,
            target,
            rocket,
        } = shot.kind
        else {
            continue;
        };
        let rect = shot.rect();

        let group = match target {
            Category::Player => &world.players,
            Category::Enemy => &world.enemies,
        };
        let hits = hits_in_group(&rect, group);
        if hits.is_empty() {
            continue;
        }

        for target_idx in hits {
            take_damage(world, target, target_idx, damage);
        }
        if rocket {
            let tail = Vec2::new(rect.x, rect.center().y);
            spawn_burst(world, tail, ROCKET_DETONATION_COUNT, None);
        }
        world.projectiles[idx].dead = true;
    }
}

/// Pickups heal every overlapped player, burst in their own color, and go
fn resolve_pickup_collection(world: &mut World) {
    for idx in 0..world.pickups.len() {
        let pickup = &world.pickups[idx];
        if pickup.dead {
            continue;
        }
        let ParticleKind::Health { amount } = pickup.kind else {
            continue;
        };
        let rect = pickup.rect();
        let color = pickup.color;

        let hits = hits_in_group(&rect, &world.players);
        if hits.is_empty() {
            continue;
        }
        for player_idx in hits {
            heal(world, Category::Player, player_idx, amount);
        }
        spawn_burst(
            world,
            Vec2::new(rect.x, rect.center().y),
            HEAL_BURST_COUNT,
            Some(color),
        );
        world.pickups[idx].dead = true;
    }
}

/// Position-based removal: projectiles and pickups vanish silently outside
/// the visibility buffer; an enemy that escaped past the left edge charges
/// its damage to every live player on the way out
fn resolve_offscreen(world: &mut World) {
    let viewport = world.viewport;

    for shot in world.projectiles.iter_mut() {
        if !shot.dead && !shot.visible(&viewport) {
            shot.dead = true;
        }
    }
    for pickup in world.pickups.iter_mut() {
        if !pickup.dead && !pickup.visible(&viewport) {
            pickup.dead = true;
        }
    }

    for idx in 0..world.enemies.len() {
        let enemy = &world.enemies[idx];
        if enemy.dead {
            continue;
        }
        if !enemy.visible(&viewport) && enemy.rect().right() < viewport.x {
            apply_exit_penalty(world, idx);
        }
    }
}

fn run_spawners(world: &mut World, dt: f32) {
    if world.enemy_spawner.update(dt) {
        spawn_enemy(world);
    }
    if world.health_spawner.update(dt) {
        spawn_health(world);
    }
}

/// End-of-tick removal sweep. Bursts sweep themselves in `update_bursts`;
/// stars never die.
fn sweep(world: &mut World) {
    world.players.retain(|e| !e.dead);
    world.enemies.retain(|e| !e.dead);
    world.projectiles.retain(|p| !p.dead);
    world.pickups.retain(|p| !p.dead);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::spawner::ENEMY_ARCHETYPES;
    use crate::sim::state::{Cooldown, Entity};

    fn fresh_world() -> World {
        let mut settings = Settings::default();
        settings.starfield = false;
        let mut world = World::new(99, &settings);
        world.max_bursts = 100_000;
        world
    }

    fn push_enemy(world: &mut World, pos: Vec2, health: i32, damage: i32, delay: f32) -> u32 {
        let id = world.next_entity_id();
        let mut retaliate = Cooldown::new(delay);
        retaliate.reset();
        world.enemies.push(Entity {
            id,
            kind: EntityKind::Enemy { damage, retaliate },
            pos,
            size: Vec2::splat(50.0),
            vel: Vec2::ZERO,
            speed: 0.0,
            color: ENEMY_ARCHETYPES[0].color,
            sprite: None,
            health,
            max_health: health,
            dead: false,
        });
        id
    }

    #[test]
    fn test_enemy_exit_penalty_hits_all_players() {
        let mut world = fresh_world();
        world.spawn_player();
        // Parked far past the left visibility buffer
        push_enemy(&mut world, Vec2::new(-400.0, 500.0), 100, 10, 60.0);

        let bursts_before = world.bursts.len();
        tick(&mut world, &TickInput::default(), SIM_DT);

        assert_eq!(world.players[0].health, 90);
        assert_eq!(world.players[1].health, 90);
        assert!(world.enemies.is_empty());
        // Damage feedback sparks only (3 per player), no 100-spark
        // destruction burst
        assert_eq!(world.bursts.len(), bursts_before + 2 * DAMAGE_BURST_COUNT);
        assert!(!world.events.contains(&GameEvent::EntityDestroyed));
    }

    #[test]
    fn test_rocket_detonation_and_enemy_destruction() {
        let mut world = fresh_world();
        let player_pos = world.players[0].pos;
        push_enemy(&mut world, player_pos + Vec2::new(90.0, 0.0), 80, 10, 60.0);

        let input = TickInput {
            fire_secondary: true,
            ..Default::default()
        };
        tick(&mut world, &input, SIM_DT);

        // Rocket launched from the player's leading edge moves 25 and spans
        // 50 wide, overlapping the enemy 90 ahead on the same tick
        assert!(world.enemies.is_empty(), "enemy should be destroyed");
        assert!(world.projectiles.is_empty(), "rocket should be consumed");

        // Trail (5) + damage feedback (3) + detonation (1000) + enemy
        // destruction burst (100)
        let expected = ROCKET_TRAIL_COUNT
            + DAMAGE_BURST_COUNT
            + ROCKET_DETONATION_COUNT
            + DESTROY_BURST_COUNT;
        assert_eq!(world.bursts.len(), expected);
        assert!(world.events.contains(&GameEvent::RocketFired));
        assert!(world.events.contains(&GameEvent::EntityDestroyed));
    }

    #[test]
    fn test_laser_kills_over_multiple_hits() {
        let mut world = fresh_world();
        let player_pos = world.players[0].pos;
        push_enemy(&mut world, player_pos + Vec2::new(90.0, 0.0), 30, 10, 60.0);

        let input = TickInput {
            fire_primary: true,
            ..Default::default()
        };
        // 15 damage per laser: two hits kill a 30 hp enemy
        tick(&mut world, &input, SIM_DT);
        assert_eq!(world.enemies[0].health, 15);

        // The second laser waits out the 0.1 s cooldown before firing
        for _ in 0..10 {
            tick(&mut world, &input, SIM_DT);
            if world.enemies.is_empty() {
                break;
            }
        }
        assert!(world.enemies.is_empty());
    }

    #[test]
    fn test_enemy_ram_damages_and_self_destructs() {
        let mut world = fresh_world();
        let player_pos = world.players[0].pos;
        push_enemy(&mut world, player_pos, 100, 12, 60.0);

        tick(&mut world, &TickInput::default(), SIM_DT);

        assert_eq!(world.players[0].health, 88);
        assert!(world.enemies.is_empty());
        assert!(world.events.contains(&GameEvent::EntityDestroyed));
    }

    #[test]
    fn test_enemy_retaliation_targets_players() {
        let mut world = fresh_world();
        push_enemy(&mut world, Vec2::new(1500.0, 540.0), 100, 12, 0.5);

        // Half a second of ticks opens the retaliation gate
        for _ in 0..35 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }

        assert!(world.events.contains(&GameEvent::EnemyLaserFired));
        let shot = world
            .projectiles
            .iter()
            .find(|p| matches!(p.kind, ParticleKind::Projectile { .. }))
            .expect("enemy laser in flight");
        let ParticleKind::Projectile { damage, target, rocket } = shot.kind else {
            unreachable!()
        };
        assert_eq!(target, Category::Player);
        assert_eq!(damage, 12);
        assert!(!rocket);
        assert!(shot.vel.x < 0.0);
    }

    #[test]
    fn test_pickup_heals_and_bursts_in_own_color() {
        let mut world = fresh_world();
        world.players[0].health = 40;
        let player_pos = world.players[0].pos;
        crate::sim::particle::spawn_health_pickup(&mut world, player_pos, Vec2::ZERO, 50);

        tick(&mut world, &TickInput::default(), SIM_DT);

        assert_eq!(world.players[0].health, 90);
        assert!(world.pickups.is_empty());
        assert_eq!(world.bursts.len(), HEAL_BURST_COUNT);
        for spark in &world.bursts {
            assert_eq!(spark.color, HEAL_COLOR);
        }
        assert!(world.events.contains(&GameEvent::EntityHealed));
    }

    #[test]
    fn test_pickup_heal_clamps_at_max() {
        let mut world = fresh_world();
        world.players[0].health = 70;
        let player_pos = world.players[0].pos;
        crate::sim::particle::spawn_health_pickup(&mut world, player_pos, Vec2::ZERO, 75);

        tick(&mut world, &TickInput::default(), SIM_DT);
        assert_eq!(world.players[0].health, 100);
    }

    #[test]
    fn test_projectile_culled_offscreen_without_burst() {
        let mut world = fresh_world();
        crate::sim::particle::spawn_projectile(
            &mut world,
            Vec2::new(1900.0, 540.0),
            Vec2::new(PROJECTILE_SPEED, 0.0),
            crate::consts::PLAYER_COLOR,
            15,
            Category::Enemy,
            false,
        );

        for _ in 0..20 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        assert!(world.projectiles.is_empty());
        assert!(world.bursts.is_empty());
    }

    #[test]
    fn test_spawners_fire_and_decay_over_time() {
        let mut world = fresh_world();

        // 10 simulated seconds: the enemy spawner fires at 5 s and its
        // interval decays; the health spawner fires at 7.5 s
        let ticks = (10.0 / SIM_DT) as usize;
        for _ in 0..ticks {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }

        assert!(world.enemy_spawner.interval < 5.0, "interval should decay");
        assert_eq!(world.health_spawner.interval, 7.5, "zero decay is constant");
    }

    #[test]
    fn test_stars_survive_forever() {
        let settings = Settings::default();
        let mut world = World::new(5, &settings);
        let count = world.stars.len();

        for _ in 0..1000 {
            tick(&mut world, &TickInput::default(), SIM_DT);
        }
        assert_eq!(world.stars.len(), count);
    }

    #[test]
    fn test_same_seed_same_inputs_same_world() {
        let mut settings = Settings::default();
        settings.starfield = false;
        let mut a = World::new(1234, &settings);
        let mut b = World::new(1234, &settings);

        let input = TickInput {
            fire_primary: true,
            movement: DirectionalInput {
                up: true,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.players[0].pos, b.players[0].pos);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.health, eb.health);
        }
    }
}
