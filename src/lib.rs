//! Nova Strike - a side-scrolling arcade shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, particles, collisions, spawners)
//! - `render`: Frame building (world state -> retained draw commands)
//! - `audio`: Audio command surface (named effects, music transport)
//! - `settings`: User preferences (volumes, quality, toggles)
//!
//! Window creation, the render-present call, the audio backend, raw input
//! polling and asset loading all live in the host application. This crate
//! only consumes their handles and snapshots.

pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;

pub use audio::{AudioMixer, SoundEffect};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use crate::render::Rgb;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Viewport dimensions (simulation space)
    pub const VIEWPORT_WIDTH: f32 = 1920.0;
    pub const VIEWPORT_HEIGHT: f32 = 1080.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_HEALTH: i32 = 100;
    /// Velocity gained per held direction per tick, as a fraction of speed
    pub const PLAYER_ACCEL_FACTOR: f32 = 0.05;
    /// Per-axis velocity retained each tick with no input on that axis
    pub const PLAYER_FRICTION: f32 = 0.95;
    /// Below this magnitude a decaying velocity component counts as stopped
    pub const VELOCITY_EPSILON: f32 = 1e-6;

    /// Weapon defaults
    pub const LASER_COOLDOWN: f32 = 0.1;
    pub const LASER_DAMAGE: i32 = 15;
    pub const ROCKET_COOLDOWN: f32 = 5.0;
    pub const ROCKET_DAMAGE: i32 = 100;
    pub const PROJECTILE_SPEED: f32 = 25.0;
    pub const PROJECTILE_WIDTH: f32 = 50.0;
    pub const PROJECTILE_HEIGHT: f32 = 5.0;

    /// Burst particle tuning
    pub const BURST_LIFESPAN: u32 = 100;
    pub const BURST_SPEED_MIN: f32 = 1.0;
    pub const BURST_SPEED_MAX: f32 = 5.0;
    pub const BURST_SIZE_MIN: f32 = 5.0;
    pub const BURST_SIZE_MAX: f32 = 10.0;
    /// Per-axis velocity jitter applied to bursts each tick
    pub const BURST_JITTER: f32 = 0.5;
    pub const DAMAGE_BURST_COUNT: usize = 3;
    pub const DESTROY_BURST_COUNT: usize = 100;
    pub const HEAL_BURST_COUNT: usize = 10;
    pub const ROCKET_TRAIL_COUNT: usize = 5;
    pub const ROCKET_DETONATION_COUNT: usize = 1000;

    /// Health pickup defaults
    pub const HEALTH_PICKUP_SIDE: f32 = 20.0;
    pub const HEALTH_PICKUP_MIN: i32 = 25;
    pub const HEALTH_PICKUP_MAX: i32 = 75;

    /// Health bar geometry (below the entity rect)
    pub const HEALTH_BAR_HEIGHT: f32 = 5.0;
    pub const HEALTH_BAR_GAP: f32 = 5.0;

    /// Palette
    pub const PLAYER_COLOR: Rgb = Rgb(59, 130, 246);
    pub const HEAL_COLOR: Rgb = Rgb(34, 197, 94);
    pub const STAR_COLOR: Rgb = Rgb(255, 255, 255);
    pub const HEALTH_BAR_BG: Rgb = Rgb(239, 68, 68);
    pub const HEALTH_BAR_FG: Rgb = Rgb(34, 197, 94);
    /// Warm amber/orange/red palette used for destruction bursts
    pub const BURST_PALETTE: [Rgb; 4] = [
        Rgb(251, 191, 36),
        Rgb(249, 115, 22),
        Rgb(239, 68, 68),
        Rgb(127, 29, 29),
    ];
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
