//! Particle grid engine
//!
//! A falling-sand cellular automaton over a fixed `width × height` grid:
//! - Single in-place sweep per tick, bottom row first
//! - Alternating scan direction per row
//! - Seeded RNG only
//! - No rendering dependencies

pub mod behavior;
pub mod brush;
pub mod cells;
pub mod engine;
pub mod material;

pub use behavior::{MaterialBehavior, UpdateContext, behavior_for};
pub use brush::Brush;
pub use cells::CellGrid;
pub use engine::ParticleGrid;
pub use material::{Cell, CellView, Material};
