//! Engine settings
//!
//! Both engines are configured from plain serde structs so a settings file
//! can tune grid resolution, physics constants and the circle capacity
//! without recompiling. Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Grid resolution/physics presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GridPreset {
    /// Multi-material sandbox: coarse 4px cells, strong gravity
    #[default]
    Sandbox,
    /// Fine 2px cells with gentle gravity
    FineSand,
}

impl GridPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridPreset::Sandbox => "Sandbox",
            GridPreset::FineSand => "FineSand",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sandbox" => Some(GridPreset::Sandbox),
            "finesand" | "fine" => Some(GridPreset::FineSand),
            _ => None,
        }
    }

    /// Cell size in screen pixels
    pub fn cell_size(&self) -> u32 {
        match self {
            GridPreset::Sandbox => CELL_SIZE,
            GridPreset::FineSand => 2,
        }
    }

    /// Gravity in cells/tick²
    pub fn gravity(&self) -> f32 {
        match self {
            GridPreset::Sandbox => GRAVITY,
            GridPreset::FineSand => 0.1,
        }
    }
}

/// Particle grid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Screen pixels per cell edge
    pub cell_size: u32,
    pub gravity: f32,
    pub max_velocity: f32,
    pub seed: u64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self::from_preset(GridPreset::Sandbox)
    }
}

impl GridSettings {
    /// Settings for a preset at the default screen size
    pub fn from_preset(preset: GridPreset) -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cell_size: preset.cell_size(),
            gravity: preset.gravity(),
            max_velocity: MAX_VELOCITY,
            seed: 0,
        }
    }

    /// Settings for an explicit grid size in cells (cell size 1)
    pub fn with_cells(width: u32, height: u32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            cell_size: 1,
            ..Self::default()
        }
    }

    pub fn grid_width(&self) -> usize {
        (self.screen_width / self.cell_size.max(1)) as usize
    }

    pub fn grid_height(&self) -> usize {
        (self.screen_height / self.cell_size.max(1)) as usize
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.cell_size == 0 {
            return Err(SettingsError::invalid("grid.cell_size", "must be positive"));
        }
        if self.grid_width() == 0 || self.grid_height() == 0 {
            return Err(SettingsError::invalid(
                "grid.screen_width/screen_height",
                format!(
                    "{}x{} screen holds no {}px cells",
                    self.screen_width, self.screen_height, self.cell_size
                ),
            ));
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(SettingsError::invalid("grid.gravity", "must be finite and >= 0"));
        }
        if !(self.max_velocity.is_finite() && self.max_velocity >= 1.0) {
            return Err(SettingsError::invalid("grid.max_velocity", "must be finite and >= 1"));
        }
        Ok(())
    }
}

/// Stochastic velocity decay for the sandbox variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DampingSettings {
    /// Chance per circle per tick that damping applies
    pub chance: f64,
    /// Multiplier applied to both velocity components
    pub factor: f32,
}

impl Default for DampingSettings {
    fn default() -> Self {
        Self {
            chance: DAMPING_CHANCE,
            factor: DAMPING_FACTOR,
        }
    }
}

/// Cursor probe shape and strength
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    pub radius: f32,
    pub mass: f32,
    /// Scale from cursor px/s to probe px/tick
    pub velocity_scale: f32,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            radius: PROBE_RADIUS,
            mass: PROBE_MASS,
            velocity_scale: PROBE_VELOCITY_SCALE,
        }
    }
}

/// Circle world configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Circles placed at startup (capped by `max_circles`)
    pub initial_circles: usize,
    /// Hard ceiling on the collection size
    pub max_circles: usize,
    pub mass_per_radius: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub spawn_margin: f32,
    pub max_initial_speed: f32,
    /// `None` = pure elastic demo, no decay
    pub damping: Option<DampingSettings>,
    pub probe: ProbeSettings,
    pub seed: u64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH as f32,
            screen_height: SCREEN_HEIGHT as f32,
            initial_circles: INITIAL_CIRCLES,
            max_circles: MAX_CIRCLES,
            mass_per_radius: MASS_PER_RADIUS,
            min_radius: MIN_CIRCLE_RADIUS,
            max_radius: MAX_CIRCLE_RADIUS,
            spawn_margin: SPAWN_MARGIN,
            max_initial_speed: MAX_INITIAL_SPEED,
            damping: Some(DampingSettings::default()),
            probe: ProbeSettings::default(),
            seed: 0,
        }
    }
}

impl WorldSettings {
    /// An empty, undamped world of the given size
    pub fn empty(screen_width: f32, screen_height: f32) -> Self {
        Self {
            screen_width,
            screen_height,
            initial_circles: 0,
            damping: None,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(SettingsError::invalid("world.screen_width/screen_height", "must be positive"));
        }
        if self.max_circles == 0 {
            return Err(SettingsError::invalid("world.max_circles", "must be positive"));
        }
        if !(self.mass_per_radius > 0.0) {
            return Err(SettingsError::invalid("world.mass_per_radius", "must be positive"));
        }
        if !(self.min_radius > 0.0 && self.min_radius <= self.max_radius) {
            return Err(SettingsError::invalid(
                "world.min_radius/max_radius",
                format!("need 0 < min ({}) <= max ({})", self.min_radius, self.max_radius),
            ));
        }
        if self.max_radius * 2.0 > self.screen_width.min(self.screen_height) {
            return Err(SettingsError::invalid("world.max_radius", "circles must fit on screen"));
        }
        if self.max_initial_speed < 0.0 || self.spawn_margin < 0.0 {
            return Err(SettingsError::invalid("world.max_initial_speed/spawn_margin", "must be >= 0"));
        }
        if let Some(damping) = &self.damping {
            if !(0.0..=1.0).contains(&damping.chance) {
                return Err(SettingsError::invalid("world.damping.chance", "must be in [0, 1]"));
            }
            if !(0.0..=1.0).contains(&damping.factor) {
                return Err(SettingsError::invalid("world.damping.factor", "must be in [0, 1]"));
            }
        }
        if !(self.probe.radius > 0.0 && self.probe.mass > 0.0) {
            return Err(SettingsError::invalid("world.probe", "radius and mass must be positive"));
        }
        Ok(())
    }
}

/// Settings for both engines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridSettings,
    pub world: WorldSettings,
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.grid.validate()?;
        self.world.validate()
    }

    /// Load settings from a JSON file; a missing file yields defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
