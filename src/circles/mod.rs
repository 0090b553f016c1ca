//! Circle collision engine
//!
//! Elastic N-body circles in a walled screen:
//! - O(n²) pairwise response along the line of centers
//! - Separate position correction pass
//! - Fixed timestep, velocities in px/tick
//! - Seeded RNG only

pub mod collision;
pub mod probe;
pub mod state;
pub mod tick;

pub use collision::{Contact, bounce_off_walls, circle_contact, elastic_response, resolve_pair};
pub use probe::{CursorTracker, Probe};
pub use state::{CIRCLE_PALETTE, Circle, CircleView, CircleWorld};
pub use tick::{TickInput, tick};
