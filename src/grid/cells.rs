//! Fixed-size cell storage
//!
//! Row-major `width × height` buffer addressed by signed coordinates. Every
//! accessor bounds-checks; out-of-range coordinates read as `None` and
//! writes to them are ignored.

use super::material::{Cell, Material};

#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.index(x, y).map(move |i| &mut self.cells[i])
    }

    #[inline]
    pub fn material_at(&self, x: i32, y: i32) -> Option<Material> {
        self.get(x, y).map(|c| c.material)
    }

    /// In bounds and empty
    #[inline]
    pub fn is_vacant(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|c| !c.exists)
    }

    /// Overwrite a cell; returns false when out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.get_mut(x, y) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange two cells; returns false (and does nothing) if either is out of bounds
    pub fn swap(&mut self, from: (i32, i32), to: (i32, i32)) -> bool {
        match (self.index(from.0, from.1), self.index(to.0, to.1)) {
            (Some(a), Some(b)) => {
                self.cells.swap(a, b);
                true
            }
            _ => false,
        }
    }

    /// Copy `from` into `to` and clear the source
    pub fn move_cell(&mut self, from: (i32, i32), to: (i32, i32)) -> bool {
        match (self.index(from.0, from.1), self.index(to.0, to.1)) {
            (Some(a), Some(b)) => {
                self.cells[b] = self.cells[a];
                self.cells[a] = Cell::EMPTY;
                true
            }
            _ => false,
        }
    }

    /// Clear per-tick flags and age every cell
    pub fn begin_tick(&mut self) {
        for cell in &mut self.cells {
            cell.updated = false;
            cell.age();
        }
    }

    pub fn fill_empty(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// `(x, y, cell)` for every non-empty cell, row by row
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.exists)
            .map(move |(i, c)| (i % width, i / width, c))
    }
}
