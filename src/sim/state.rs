//! World state and core simulation types
//!
//! The `World` owns every category group plus the seeded RNG, so a fresh
//! context per test gives fully deterministic runs. Nothing in here touches
//! globals.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawner::Spawner;
use crate::consts::*;
use crate::render::{Rgb, SpriteId};
use crate::settings::Settings;

/// Countdown gate for repeatable actions (weapon fire, retaliation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Seconds until the gate opens again
    pub remaining: f32,
    /// Seconds a reset closes the gate for
    pub period: f32,
}

impl Cooldown {
    pub fn new(period: f32) -> Self {
        assert!(period > 0.0, "cooldown period must be positive");
        Self {
            remaining: 0.0,
            period,
        }
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn reset(&mut self) {
        self.remaining = self.period;
    }

    /// Reset with a new period (enemy retaliation re-randomizes each shot)
    pub fn reset_with_period(&mut self, period: f32) {
        assert!(period > 0.0, "cooldown period must be positive");
        self.period = period;
        self.remaining = period;
    }

    pub fn advance(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }
}

/// Collision role. Membership decides what an object collides against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Player,
    Enemy,
}

/// Kind-specific entity state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EntityKind {
    Player {
        laser: Cooldown,
        rocket: Cooldown,
    },
    Enemy {
        /// Applied on ram contact and on the exit-screen penalty
        damage: i32,
        /// Retaliation gate, re-randomized to 1-3 s on every reset
        retaliate: Cooldown,
    },
}

impl EntityKind {
    pub fn category(&self) -> Category {
        match self {
            EntityKind::Player { .. } => Category::Player,
            EntityKind::Enemy { .. } => Category::Enemy,
        }
    }
}

/// A ship: the player or an enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Center of the bounding rect
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Top movement speed (units per tick)
    pub speed: f32,
    pub color: Rgb,
    /// Image handle from the asset collaborator; `None` renders a solid rect
    pub sprite: Option<SpriteId>,
    pub health: i32,
    pub max_health: i32,
    /// Pending removal. Set by destruction or an exit penalty, swept at the
    /// end of the tick; everything skips flagged members in between.
    pub dead: bool,
}

impl Entity {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    #[inline]
    pub fn alive(&self) -> bool {
        !self.dead
    }

    /// Buffered visibility test: the viewport grown by twice this entity's
    /// own size per axis must fully contain its rect. The margin keeps
    /// fast movers from being culled while still partially on screen.
    pub fn visible(&self, viewport: &Rect) -> bool {
        let buffer = viewport.inflate(self.size.x * 2.0, self.size.y * 2.0);
        buffer.contains(&self.rect())
    }
}

/// Kind-specific particle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Decaying spark from a damage/destruction/heal/detonation event
    Burst {
        /// Ticks remaining
        life: u32,
        lifespan: u32,
        /// Side length at full life; rendered side shrinks linearly with life
        base_size: f32,
    },
    /// Laser or rocket in flight
    Projectile {
        damage: i32,
        target: Category,
        /// Rockets trail bursts and detonate on hit
        rocket: bool,
    },
    /// Parallax background star; wraps instead of dying
    Star,
    /// Drifting pickup that heals on contact
    Health { amount: i32 },
}

/// A lightweight simulated object: no health, one collision hook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub kind: ParticleKind,
    /// Center of the bounding rect
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub color: Rgb,
    pub sprite: Option<SpriteId>,
    pub dead: bool,
}

impl Particle {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Same buffered containment test entities use
    pub fn visible(&self, viewport: &Rect) -> bool {
        let buffer = viewport.inflate(self.size.x * 2.0, self.size.y * 2.0);
        buffer.contains(&self.rect())
    }

    /// Current rendered side length for bursts (linear decay to zero)
    pub fn rendered_size(&self) -> Vec2 {
        match self.kind {
            ParticleKind::Burst {
                life,
                lifespan,
                base_size,
            } => {
                let side = (base_size * life as f32 / lifespan.max(1) as f32).max(0.0);
                Vec2::splat(side)
            }
            _ => self.size,
        }
    }
}

/// Feedback signals emitted during a tick, drained by the host each frame.
/// Fire-and-forget: dropping them loses nothing but polish.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LaserFired,
    RocketFired,
    EnemyLaserFired,
    EntityDamaged,
    EntityDestroyed,
    EntityHealed,
    Rumble {
        low: f32,
        high: f32,
        duration_ms: u32,
    },
}

/// RNG wrapper so seeds survive serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete simulation state (deterministic for a given seed + input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Visible play area
    pub viewport: Rect,
    /// Live burst cap, from the quality preset
    pub max_bursts: usize,
    /// Player ships (sorted by id for determinism)
    pub players: Vec<Entity>,
    /// Enemy ships (sorted by id)
    pub enemies: Vec<Entity>,
    /// Lasers and rockets in flight
    pub projectiles: Vec<Particle>,
    /// Health pickups drifting across the field
    pub pickups: Vec<Particle>,
    /// Decorative spark particles
    pub bursts: Vec<Particle>,
    /// Parallax starfield (never culled)
    pub stars: Vec<Particle>,
    pub enemy_spawner: Spawner,
    pub health_spawner: Spawner,
    /// Feedback queue for the host's audio/rumble collaborators
    pub events: Vec<GameEvent>,
    /// Seeded RNG; every random decision in the simulation pulls from here
    pub rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Create a world with one player, a seeded starfield and the default
    /// spawner tuning.
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let rng_state = RngState::new(seed);
        let mut world = Self {
            seed,
            rng: rng_state.to_rng(),
            rng_state,
            time_ticks: 0,
            viewport: Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            max_bursts: settings.quality.max_bursts(),
            players: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            bursts: Vec::new(),
            stars: Vec::new(),
            enemy_spawner: Spawner::new(5.0, 0.1, 1.0),
            health_spawner: Spawner::new(7.5, 0.0, 7.5),
            events: Vec::new(),
            next_id: 1,
        };

        world.spawn_player();
        if settings.starfield {
            super::particle::seed_starfield(&mut world, settings.star_count);
        }

        world
    }

    /// Allocate a new object ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn the player ship at its start position
    pub fn spawn_player(&mut self) {
        let id = self.next_entity_id();
        self.players.push(Entity {
            id,
            kind: EntityKind::Player {
                laser: Cooldown::new(LASER_COOLDOWN),
                rocket: Cooldown::new(ROCKET_COOLDOWN),
            },
            pos: Vec2::new(200.0, self.viewport.h / 2.0),
            size: Vec2::splat(PLAYER_SIZE),
            vel: Vec2::ZERO,
            speed: PLAYER_SPEED,
            color: PLAYER_COLOR,
            sprite: None,
            health: PLAYER_HEALTH,
            max_health: PLAYER_HEALTH,
            dead: false,
        });
    }

    /// Random retaliation delay for enemies, 1-3 seconds
    pub fn roll_retaliation_delay(&mut self) -> f32 {
        self.rng.random_range(1.0..3.0)
    }

    /// Ensure groups are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.players.sort_by_key(|e| e.id);
        self.enemies.sort_by_key(|e| e.id);
        self.projectiles.sort_by_key(|p| p.id);
        self.pickups.sort_by_key(|p| p.id);
    }

    /// Hand the tick's feedback events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// True once every player ship is gone
    pub fn game_over(&self) -> bool {
        self.players.iter().all(|p| p.dead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_ready_boundary() {
        // period=5, reset at t=0: not ready anywhere in [0, 5), ready at 5
        let mut cd = Cooldown::new(5.0);
        assert!(cd.ready());
        cd.reset();

        let mut elapsed = 0.0;
        while elapsed + 1.0 < 5.0 {
            cd.advance(1.0);
            elapsed += 1.0;
            assert!(!cd.ready(), "ready too early at t={elapsed}");
        }
        cd.advance(1.0);
        assert!(cd.ready());
    }

    #[test]
    fn test_cooldown_never_negative() {
        let mut cd = Cooldown::new(0.5);
        cd.reset();
        cd.advance(100.0);
        assert_eq!(cd.remaining, 0.0);
        // A later reset fully restores the period
        cd.reset();
        assert_eq!(cd.remaining, 0.5);
    }

    #[test]
    #[should_panic]
    fn test_cooldown_rejects_zero_period() {
        let _ = Cooldown::new(0.0);
    }

    #[test]
    fn test_world_new_is_deterministic() {
        let settings = Settings::default();
        let a = World::new(42, &settings);
        let b = World::new(42, &settings);
        assert_eq!(a.stars.len(), b.stars.len());
        for (sa, sb) in a.stars.iter().zip(&b.stars) {
            assert_eq!(sa.pos, sb.pos);
            assert_eq!(sa.vel, sb.vel);
        }
    }

    #[test]
    fn test_visibility_buffer() {
        let settings = Settings::default();
        let world = World::new(1, &settings);
        let mut player = world.players[0].clone();

        // On screen
        assert!(player.visible(&world.viewport));

        // Just past the left edge but within the 2x-size buffer
        player.pos = Vec2::new(-40.0, 500.0);
        assert!(player.visible(&world.viewport));

        // Far past the buffer
        player.pos = Vec2::new(-300.0, 500.0);
        assert!(!player.visible(&world.viewport));
    }
}
