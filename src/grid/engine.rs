//! Particle grid engine
//!
//! Owns the cell buffer and the seeded RNG streams, and advances the
//! automaton one tick at a time in place.

use super::behavior::{UpdateContext, behavior_for};
use super::brush::{self, Brush};
use super::cells::CellGrid;
use super::material::{Cell, CellView, Material};
use crate::error::SettingsError;
use crate::geom::screen_to_cell;
use crate::rng::RngStreams;
use crate::settings::GridSettings;

/// A falling-sand world
#[derive(Debug, Clone)]
pub struct ParticleGrid {
    cells: CellGrid,
    settings: GridSettings,
    rng: RngStreams,
    ticks: u64,
}

impl ParticleGrid {
    /// Create an all-empty grid sized from the settings
    pub fn new(settings: GridSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        let (width, height) = (settings.grid_width(), settings.grid_height());
        log::info!(
            "Particle grid {}x{} (cell {}px, gravity {}, seed {})",
            width,
            height,
            settings.cell_size,
            settings.gravity,
            settings.seed
        );
        Ok(Self {
            cells: CellGrid::new(width, height),
            rng: RngStreams::new(settings.seed),
            settings,
            ticks: 0,
        })
    }

    /// Grid of `width × height` cells with default physics
    pub fn with_size(width: u32, height: u32, seed: u64) -> Result<Self, SettingsError> {
        Self::new(GridSettings {
            seed,
            ..GridSettings::with_cells(width, height)
        })
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Restart both RNG streams from a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.settings.seed = seed;
        self.rng = RngStreams::new(seed);
    }

    /// Advance the automaton by one tick.
    ///
    /// Rows are swept bottom to top; even rows scan left to right and odd
    /// rows right to left. Cells flagged `updated` earlier in the tick are
    /// skipped.
    pub fn tick(&mut self) {
        self.cells.begin_tick();

        let (width, height) = (self.width() as i32, self.height() as i32);
        for y in (0..height).rev() {
            if y % 2 == 0 {
                for x in 0..width {
                    self.update_cell(x, y);
                }
            } else {
                for x in (0..width).rev() {
                    self.update_cell(x, y);
                }
            }
        }

        self.ticks += 1;
    }

    fn update_cell(&mut self, x: i32, y: i32) {
        let material = match self.cells.get(x, y) {
            Some(cell) if cell.exists && !cell.updated => cell.material,
            _ => return,
        };
        let Some(behavior) = behavior_for(material) else {
            return;
        };
        let mut ctx = UpdateContext {
            cells: &mut self.cells,
            x,
            y,
            gravity: self.settings.gravity,
            max_velocity: self.settings.max_velocity,
            rng: &mut self.rng.physics,
            palette_rng: &mut self.rng.cosmetic,
        };
        behavior.update(&mut ctx);
    }

    /// Paint a square brush centered on cell `(cx, cy)`; returns cells changed
    pub fn paint(&mut self, cx: i32, cy: i32, radius: i32, brush: impl Into<Brush>) -> usize {
        brush::apply(
            &mut self.cells,
            cx,
            cy,
            radius,
            brush.into(),
            &mut self.rng.physics,
            &mut self.rng.cosmetic,
        )
    }

    /// Paint at a screen pixel, mapped through the cell size
    pub fn paint_screen(&mut self, px: i32, py: i32, radius: i32, brush: impl Into<Brush>) -> usize {
        let (cx, cy) = screen_to_cell(px, py, self.settings.cell_size);
        self.paint(cx, cy, radius, brush)
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill_empty();
        log::debug!("Particle grid cleared at tick {}", self.ticks);
    }

    /// Material and color for rendering, `None` outside the grid
    pub fn cell_at(&self, x: i32, y: i32) -> Option<CellView> {
        self.cells.get(x, y).map(CellView::from)
    }

    /// Full cell state, `None` outside the grid
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.cells.get(x, y)
    }

    /// Overwrite one cell; out-of-range coordinates are ignored
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        self.cells.set(x, y, cell)
    }

    /// Place a fresh cell of `material` with a palette color
    pub fn place(&mut self, x: i32, y: i32, material: Material) -> bool {
        let cell = Cell::spawn(material, &mut self.rng.cosmetic);
        self.cells.set(x, y, cell)
    }

    /// Number of non-empty cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.exists).count()
    }

    pub fn count(&self, material: Material) -> usize {
        self.cells.iter().filter(|c| c.material == material).count()
    }

    /// `(x, y, view)` for every non-empty cell
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, CellView)> + '_ {
        self.cells
            .occupied()
            .map(|(x, y, cell)| (x, y, CellView::from(cell)))
    }
}
