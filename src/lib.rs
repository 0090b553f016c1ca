//! Sandpit - falling-sand and circle-collision simulation cores
//!
//! Core modules:
//! - `grid`: Particle grid engine (falling-sand cellular automaton)
//! - `circles`: Circle collision engine (elastic N-body bouncing)
//! - `geom`: Shared vector/geometry helpers
//! - `settings`: Data-driven engine configuration
//!
//! Both engines are pure, single-threaded and tick-driven. Nothing here
//! renders or polls input; the caller owns the loop and reads state back
//! between ticks.

pub mod circles;
pub mod error;
pub mod geom;
pub mod grid;
pub mod rng;
pub mod settings;

pub use circles::{Circle, CircleWorld};
pub use error::{SettingsError, SpawnError};
pub use geom::Rgba;
pub use grid::{Brush, Material, ParticleGrid};
pub use settings::{GridPreset, GridSettings, Settings, WorldSettings};

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (one rendered frame at 60 Hz)
    pub const TICK_DT: f32 = 1.0 / 60.0;

    /// Default screen dimensions shared by both engines
    pub const SCREEN_WIDTH: u32 = 1392;
    pub const SCREEN_HEIGHT: u32 = 744;

    /// Grid defaults
    pub const CELL_SIZE: u32 = 4;
    /// Per-tick increase of a falling cell's velocity (cells/tick)
    pub const GRAVITY: f32 = 0.5;
    /// Fall speed cap (cells/tick)
    pub const MAX_VELOCITY: f32 = 10.0;
    /// Velocity multiplier after a successful diagonal slide
    pub const DIAGONAL_DAMPING: f32 = 0.7;
    /// Velocity multiplier when a cell cannot move at all
    pub const REST_DAMPING: f32 = 0.5;
    /// Below this a resting cell's velocity snaps to zero
    pub const REST_EPSILON: f32 = 0.1;

    /// Lifetime sentinel meaning "never decays"
    pub const NO_DECAY: i32 = -1;
    /// Fire burns this many ticks before turning into steam
    pub const FIRE_LIFETIME: i32 = 16;
    /// Ticks a fire cell spends next to wood before igniting it
    pub const FIRE_IGNITION_DELAY: i32 = 20;
    /// Fresh steam lifetime
    pub const STEAM_LIFETIME: i32 = 400;
    /// Lifetime granted to steam that survives its dissipation roll
    pub const STEAM_REFRESH_LIFETIME: i32 = 100;
    /// Chance that expired steam vanishes
    pub const STEAM_DISSIPATE_CHANCE: f64 = 0.75;

    /// Circle defaults
    pub const MAX_CIRCLES: usize = 1500;
    pub const INITIAL_CIRCLES: usize = 1000;
    pub const MASS_PER_RADIUS: f32 = 1.5;
    pub const MIN_CIRCLE_RADIUS: f32 = 10.0;
    pub const MAX_CIRCLE_RADIUS: f32 = 20.0;
    /// Random placement keeps centers this far from the screen edges
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Random velocity components fall in [-MAX_INITIAL_SPEED, MAX_INITIAL_SPEED]
    pub const MAX_INITIAL_SPEED: f32 = 2.0;
    /// Attempts per circle before random placement gives up
    pub const PLACEMENT_ATTEMPTS: u32 = 200;

    /// Sandbox damping: chance per tick and factor applied
    pub const DAMPING_CHANCE: f64 = 0.30;
    pub const DAMPING_FACTOR: f32 = 0.99;

    /// Cursor probe defaults
    pub const PROBE_RADIUS: f32 = 10.0;
    pub const PROBE_MASS: f32 = 50.0;
    /// Cursor velocity (px/s) is scaled down by this into px/tick
    pub const PROBE_VELOCITY_SCALE: f32 = 0.01;
}
