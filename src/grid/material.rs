//! Materials and cells
//!
//! A cell is a plain value. Moving a particle copies the cell into its
//! destination and clears the source; nothing holds references between cells.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::geom::Rgba;

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Material {
    #[default]
    Empty,
    Sand,
    Water,
    Wood,
    Fire,
    Steam,
}

const SAND_PALETTE: [Rgba; 5] = [
    Rgba::opaque(234, 225, 176),
    Rgba::opaque(229, 216, 144),
    Rgba::opaque(195, 184, 124),
    Rgba::opaque(225, 200, 20),
    Rgba::opaque(207, 224, 227),
];

const FIRE_PALETTE: [Rgba; 5] = [
    Rgba::opaque(161, 0, 0),
    Rgba::opaque(234, 35, 0),
    Rgba::opaque(255, 129, 0),
    Rgba::opaque(242, 85, 0),
    Rgba::opaque(216, 0, 0),
];

const WOOD_PALETTE: [Rgba; 5] = [
    Rgba::opaque(39, 24, 16),
    Rgba::opaque(79, 32, 15),
    Rgba::opaque(149, 69, 32),
    Rgba::opaque(199, 108, 63),
    Rgba::opaque(189, 148, 118),
];

const WATER_PALETTE: [Rgba; 1] = [Rgba::opaque(15, 94, 156)];
const STEAM_PALETTE: [Rgba; 1] = [Rgba::new(75, 80, 75, 25)];
const EMPTY_PALETTE: [Rgba; 1] = [Rgba::BLACK];

impl Material {
    pub const ALL: [Material; 6] = [
        Material::Empty,
        Material::Sand,
        Material::Water,
        Material::Wood,
        Material::Fire,
        Material::Steam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Empty => "Empty",
            Material::Sand => "Sand",
            Material::Water => "Water",
            Material::Wood => "Wood",
            Material::Fire => "Fire",
            Material::Steam => "Steam",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Material::Empty
    }

    /// Color variants a freshly deposited cell picks from
    pub fn palette(&self) -> &'static [Rgba] {
        match self {
            Material::Empty => &EMPTY_PALETTE,
            Material::Sand => &SAND_PALETTE,
            Material::Water => &WATER_PALETTE,
            Material::Wood => &WOOD_PALETTE,
            Material::Fire => &FIRE_PALETTE,
            Material::Steam => &STEAM_PALETTE,
        }
    }

    /// Chance that a brush fills an empty cell with this material
    pub fn deposit_chance(&self) -> f64 {
        match self {
            Material::Empty => 0.0,
            Material::Sand | Material::Water => 0.75,
            Material::Fire => 0.55,
            Material::Wood | Material::Steam => 1.0,
        }
    }

    /// Ticks before a new cell decays, or `NO_DECAY`
    pub fn initial_lifetime(&self) -> i32 {
        match self {
            Material::Fire => FIRE_LIFETIME,
            Material::Steam => STEAM_LIFETIME,
            _ => NO_DECAY,
        }
    }

    /// Ignition countdown for a new cell, or `NO_DECAY` when not applicable
    pub fn initial_fuel_delay(&self) -> i32 {
        match self {
            Material::Fire => FIRE_IGNITION_DELAY,
            _ => NO_DECAY,
        }
    }

    /// Whether a falling cell of this material may enter a cell holding `other`
    pub fn sinks_through(&self, other: Material) -> bool {
        match self {
            Material::Sand => matches!(other, Material::Empty | Material::Water | Material::Steam),
            Material::Water => matches!(other, Material::Empty | Material::Steam),
            _ => false,
        }
    }

    /// Pick a palette color
    pub fn pick_color(&self, rng: &mut Pcg32) -> Rgba {
        let palette = self.palette();
        palette[rng.random_range(0..palette.len())]
    }
}

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub material: Material,
    /// Mirrors `material != Empty`
    pub exists: bool,
    /// Downward fall speed in cells/tick
    pub velocity: f32,
    /// Set once the cell has acted (or been moved into) during the current tick
    pub updated: bool,
    /// Ticks left before decay; `NO_DECAY` never decays
    pub lifetime: i32,
    /// Fire only: ticks next to wood left before igniting it
    pub fuel_delay: i32,
    pub color: Rgba,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        material: Material::Empty,
        exists: false,
        velocity: 0.0,
        updated: false,
        lifetime: NO_DECAY,
        fuel_delay: NO_DECAY,
        color: Rgba::BLACK,
    };

    /// A fresh cell of `material` using its spawn template
    pub fn new(material: Material, color: Rgba) -> Self {
        if material.is_empty() {
            return Self::EMPTY;
        }
        Self {
            material,
            exists: true,
            velocity: 0.0,
            updated: false,
            lifetime: material.initial_lifetime(),
            fuel_delay: material.initial_fuel_delay(),
            color,
        }
    }

    /// A fresh cell with a random palette color
    pub fn spawn(material: Material, rng: &mut Pcg32) -> Self {
        Self::new(material, material.pick_color(rng))
    }

    pub fn with_lifetime(mut self, lifetime: i32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_fuel_delay(mut self, fuel_delay: i32) -> Self {
        self.fuel_delay = fuel_delay;
        self
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Count the lifetime down by one tick; sentinel values are left alone
    #[inline]
    pub fn age(&mut self) {
        if self.lifetime > 0 {
            self.lifetime -= 1;
        }
    }
}

/// What a renderer needs from a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub material: Material,
    pub color: Rgba,
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        Self {
            material: cell.material,
            color: cell.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngStreams;

    #[test]
    fn test_templates() {
        let fire = Cell::new(Material::Fire, Rgba::BLACK);
        assert!(fire.exists);
        assert_eq!(fire.lifetime, FIRE_LIFETIME);
        assert_eq!(fire.fuel_delay, FIRE_IGNITION_DELAY);

        let steam = Cell::new(Material::Steam, Rgba::BLACK);
        assert_eq!(steam.lifetime, STEAM_LIFETIME);
        assert_eq!(steam.fuel_delay, NO_DECAY);

        assert_eq!(Cell::new(Material::Empty, Rgba::opaque(1, 2, 3)), Cell::EMPTY);
    }

    #[test]
    fn test_palette_pick() {
        let mut rng = RngStreams::new(3).cosmetic;
        for _ in 0..50 {
            let c = Cell::spawn(Material::Sand, &mut rng);
            assert!(SAND_PALETTE.contains(&c.color));
        }
        assert_eq!(Material::Water.pick_color(&mut rng), Rgba::opaque(15, 94, 156));
    }

    #[test]
    fn test_sinks_through() {
        assert!(Material::Sand.sinks_through(Material::Water));
        assert!(Material::Sand.sinks_through(Material::Steam));
        assert!(!Material::Sand.sinks_through(Material::Wood));
        assert!(Material::Water.sinks_through(Material::Steam));
        assert!(!Material::Water.sinks_through(Material::Sand));
        assert!(!Material::Steam.sinks_through(Material::Empty));
    }

    #[test]
    fn test_age_respects_sentinel() {
        let mut cell = Cell::new(Material::Sand, Rgba::BLACK);
        cell.age();
        assert_eq!(cell.lifetime, NO_DECAY);

        let mut cell = Cell::new(Material::Fire, Rgba::BLACK).with_lifetime(1);
        cell.age();
        assert_eq!(cell.lifetime, 0);
        cell.age();
        assert_eq!(cell.lifetime, 0);
    }

    #[test]
    fn test_material_names() {
        for m in Material::ALL {
            assert_eq!(Material::from_str(m.as_str()), Some(m));
        }
        assert_eq!(Material::from_str(" water "), Some(Material::Water));
        assert_eq!(Material::from_str("lava"), None);
    }
}
