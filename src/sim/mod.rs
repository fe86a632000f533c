//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by object ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod particle;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::hits_in_group;
pub use entity::{DirectionalInput, apply_player_movement, fire_laser, fire_rocket};
pub use rect::Rect;
pub use spawner::{ENEMY_ARCHETYPES, EnemyArchetype, Spawner};
pub use state::{
    Category, Cooldown, Entity, EntityKind, GameEvent, Particle, ParticleKind, RngState, World,
};
pub use tick::{TickInput, tick};
