//! Circle world state
//!
//! All state that must be kept between ticks lives here.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::resolve_pair;
use super::probe::Probe;
use super::tick::{TickInput, tick};
use crate::error::{SettingsError, SpawnError};
use crate::geom::{self, Rgba};
use crate::rng::RngStreams;
use crate::settings::WorldSettings;

/// Earthy tones assigned to circles at spawn
pub const CIRCLE_PALETTE: [Rgba; 15] = [
    Rgba::opaque(139, 69, 19),
    Rgba::opaque(160, 82, 45),
    Rgba::opaque(85, 107, 47),
    Rgba::opaque(107, 142, 35),
    Rgba::opaque(34, 139, 34),
    Rgba::opaque(70, 130, 180),
    Rgba::opaque(30, 144, 255),
    Rgba::opaque(0, 191, 255),
    Rgba::opaque(176, 224, 230),
    Rgba::opaque(100, 149, 237),
    Rgba::opaque(112, 128, 144),
    Rgba::opaque(119, 136, 153),
    Rgba::opaque(210, 180, 140),
    Rgba::opaque(244, 164, 96),
    Rgba::opaque(205, 133, 63),
];

/// A rigid circular body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub pos: Vec2,
    /// px/tick
    pub vel: Vec2,
    pub mass: f32,
    pub radius: f32,
    pub color: Rgba,
}

impl Circle {
    pub fn momentum(&self) -> Vec2 {
        geom::momentum(self.mass, self.vel)
    }

    pub fn kinetic_energy(&self) -> f32 {
        geom::kinetic_energy(self.mass, self.vel)
    }
}

/// What the renderer needs to draw one circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleView {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

impl From<&Circle> for CircleView {
    fn from(c: &Circle) -> Self {
        Self {
            pos: c.pos,
            radius: c.radius,
            color: c.color,
        }
    }
}

fn pick_color(rng: &mut Pcg32) -> Rgba {
    CIRCLE_PALETTE[rng.random_range(0..CIRCLE_PALETTE.len())]
}

/// A bounded collection of circles inside a rectangular screen
#[derive(Debug, Clone)]
pub struct CircleWorld {
    pub(crate) circles: Vec<Circle>,
    pub(crate) settings: WorldSettings,
    pub(crate) rng: RngStreams,
    pub(crate) ticks: u64,
}

impl CircleWorld {
    /// Build a world and scatter `initial_circles` non-overlapping circles
    pub fn new(settings: WorldSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let target = settings.initial_circles.min(settings.max_circles);
        let mut world = Self {
            circles: Vec::with_capacity(target),
            rng: RngStreams::new(settings.seed),
            settings,
            ticks: 0,
        };

        for placed in 0..target {
            if !world.place_random() {
                log::debug!(
                    "Placement gave up after {} attempts; {} of {} circles placed",
                    crate::consts::PLACEMENT_ATTEMPTS,
                    placed,
                    target
                );
                break;
            }
        }

        log::info!(
            "Circle world {}x{}: {} circles (cap {}, damping {}, seed {})",
            world.settings.screen_width,
            world.settings.screen_height,
            world.circles.len(),
            world.settings.max_circles,
            if world.settings.damping.is_some() { "on" } else { "off" },
            world.settings.seed
        );
        Ok(world)
    }

    /// An empty, undamped world
    pub fn empty(screen_width: f32, screen_height: f32, seed: u64) -> Result<Self, SettingsError> {
        Self::new(WorldSettings {
            seed,
            ..WorldSettings::empty(screen_width, screen_height)
        })
    }

    fn random_radius(&mut self) -> f32 {
        let (lo, hi) = (self.settings.min_radius, self.settings.max_radius);
        if lo >= hi {
            lo
        } else {
            self.rng.physics.random_range(lo..=hi)
        }
    }

    fn random_velocity(&mut self) -> Vec2 {
        let s = self.settings.max_initial_speed;
        if s <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            self.rng.physics.random_range(-s..=s),
            self.rng.physics.random_range(-s..=s),
        )
    }

    /// Random coordinate along one axis, kept inside the margin when it fits
    fn random_coord(&mut self, extent: f32, radius: f32) -> f32 {
        let margin = self.settings.spawn_margin.max(radius);
        if extent - margin > margin {
            self.rng.physics.random_range(margin..extent - margin)
        } else {
            extent / 2.0
        }
    }

    /// Rejection placement of one random circle; false if no free spot was found
    fn place_random(&mut self) -> bool {
        let radius = self.random_radius();
        for _ in 0..crate::consts::PLACEMENT_ATTEMPTS {
            let pos = Vec2::new(
                self.random_coord(self.settings.screen_width, radius),
                self.random_coord(self.settings.screen_height, radius),
            );
            let blocked = self
                .circles
                .iter()
                .any(|c| geom::circles_overlap(c.pos, c.radius, pos, radius));
            if !blocked {
                let vel = self.random_velocity();
                let color = pick_color(&mut self.rng.cosmetic);
                self.push(pos, radius, vel, color);
                return true;
            }
        }
        false
    }

    fn push(&mut self, pos: Vec2, radius: f32, vel: Vec2, color: Rgba) -> usize {
        self.circles.push(Circle {
            pos,
            vel,
            mass: radius * self.settings.mass_per_radius,
            radius,
            color,
        });
        self.circles.len() - 1
    }

    /// Append a circle; fails without touching the world when at capacity
    /// or when `radius` is not a finite positive number
    pub fn spawn(&mut self, x: f32, y: f32, radius: f32, vel: Vec2) -> Result<usize, SpawnError> {
        if !(radius.is_finite() && radius > 0.0) {
            log::debug!("Spawn at ({}, {}) rejected: radius {}", x, y, radius);
            return Err(SpawnError::InvalidRadius { radius });
        }
        if self.circles.len() >= self.settings.max_circles {
            log::debug!(
                "Spawn at ({}, {}) rejected: {} circles at capacity",
                x,
                y,
                self.circles.len()
            );
            return Err(SpawnError::CapacityExceeded {
                capacity: self.settings.max_circles,
            });
        }
        let color = pick_color(&mut self.rng.cosmetic);
        Ok(self.push(Vec2::new(x, y), radius, vel, color))
    }

    /// Spawn with a random radius, velocity and color at a point
    pub fn spawn_random_at(&mut self, x: f32, y: f32) -> Result<usize, SpawnError> {
        let radius = self.random_radius();
        let vel = self.random_velocity();
        self.spawn(x, y, radius, vel)
    }

    pub fn count(&self) -> usize {
        self.circles.len()
    }

    pub fn capacity(&self) -> usize {
        self.settings.max_circles
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Position, radius and color of circle `index`
    pub fn at(&self, index: usize) -> Option<CircleView> {
        self.circles.get(index).map(CircleView::from)
    }

    pub fn circle(&self, index: usize) -> Option<&Circle> {
        self.circles.get(index)
    }

    pub fn circle_mut(&mut self, index: usize) -> Option<&mut Circle> {
        self.circles.get_mut(index)
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Σ m·v over all circles
    pub fn total_momentum(&self) -> Vec2 {
        self.circles.iter().map(Circle::momentum).sum()
    }

    /// Σ ½·m·|v|² over all circles
    pub fn kinetic_energy(&self) -> f32 {
        self.circles.iter().map(Circle::kinetic_energy).sum()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn reseed(&mut self, seed: u64) {
        self.settings.seed = seed;
        self.rng = RngStreams::new(seed);
    }

    /// Advance one tick with no cursor input
    pub fn tick(&mut self) {
        tick(self, &TickInput::default());
    }

    /// Advance one tick with the given input
    pub fn tick_with(&mut self, input: &TickInput) {
        tick(self, input);
    }

    /// Collide a transient probe with every circle once, then drop it.
    ///
    /// Returns how many circles it hit.
    pub fn apply_probe(&mut self, probe: &Probe) -> usize {
        let mut body = probe.as_circle();
        let mut hits = 0;
        // The body keeps its deflected velocity from one hit to the next
        for circle in &mut self.circles {
            if resolve_pair(&mut body, circle) {
                hits += 1;
            }
        }
        hits
    }
}
