//! Paint and erase brushes

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cells::CellGrid;
use super::material::{Cell, Material};

/// What a brush stroke does to the cells under it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brush {
    /// Fill empty cells with a material (sparsely for some materials)
    Deposit(Material),
    /// Clear every occupied cell
    Erase,
}

impl From<Material> for Brush {
    fn from(material: Material) -> Self {
        match material {
            Material::Empty => Brush::Erase,
            m => Brush::Deposit(m),
        }
    }
}

/// Apply a brush to the square of half-width `radius` around `(cx, cy)`.
///
/// Returns how many cells changed. Cells outside the grid are skipped.
pub(crate) fn apply(
    cells: &mut CellGrid,
    cx: i32,
    cy: i32,
    radius: i32,
    brush: Brush,
    rng: &mut Pcg32,
    palette_rng: &mut Pcg32,
) -> usize {
    let radius = radius.max(0);
    let Some((x_lo, x_hi)) = clip_span(cx, radius, cells.width()) else {
        return 0;
    };
    let Some((y_lo, y_hi)) = clip_span(cy, radius, cells.height()) else {
        return 0;
    };
    let mut changed = 0;

    for x in x_lo..=x_hi {
        for y in y_lo..=y_hi {
            let Some(occupied) = cells.get(x, y).map(|c| c.exists) else {
                continue;
            };
            match brush {
                Brush::Erase => {
                    if occupied {
                        cells.set(x, y, Cell::EMPTY);
                        changed += 1;
                    }
                }
                Brush::Deposit(material) => {
                    if occupied || material.is_empty() {
                        continue;
                    }
                    if rng.random_bool(material.deposit_chance()) {
                        cells.set(x, y, Cell::spawn(material, palette_rng));
                        changed += 1;
                    }
                }
            }
        }
    }

    changed
}

/// `[center - radius, center + radius]` clipped to `[0, extent)`, `None` if disjoint
fn clip_span(center: i32, radius: i32, extent: usize) -> Option<(i32, i32)> {
    let last = i32::try_from(extent).unwrap_or(i32::MAX).checked_sub(1)?;
    let lo = center.saturating_sub(radius).max(0);
    let hi = center.saturating_add(radius).min(last);
    (lo <= hi).then_some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Rgba;
    use crate::rng::RngStreams;

    fn paint(cells: &mut CellGrid, cx: i32, cy: i32, radius: i32, brush: Brush) -> usize {
        let mut streams = RngStreams::new(5);
        apply(cells, cx, cy, radius, brush, &mut streams.physics, &mut streams.cosmetic)
    }

    #[test]
    fn test_wood_brush_is_solid() {
        let mut cells = CellGrid::new(10, 10);
        assert_eq!(paint(&mut cells, 5, 5, 1, Brush::Deposit(Material::Wood)), 9);
        assert_eq!(cells.material_at(4, 4), Some(Material::Wood));
        assert_eq!(cells.material_at(6, 6), Some(Material::Wood));
        assert_eq!(cells.material_at(7, 5), Some(Material::Empty));
    }

    #[test]
    fn test_sand_brush_is_sparse() {
        let mut cells = CellGrid::new(64, 64);
        let placed = paint(&mut cells, 32, 32, 10, Brush::Deposit(Material::Sand));
        // 441 cells at 75%
        assert!(placed > 250 && placed < 420, "placed {placed}");
    }

    #[test]
    fn test_deposit_skips_occupied() {
        let mut cells = CellGrid::new(3, 3);
        cells.set(1, 1, Cell::new(Material::Water, Rgba::BLACK));
        paint(&mut cells, 1, 1, 1, Brush::Deposit(Material::Wood));
        assert_eq!(cells.material_at(1, 1), Some(Material::Water));
    }

    #[test]
    fn test_erase_clears_anything() {
        let mut cells = CellGrid::new(5, 5);
        paint(&mut cells, 2, 2, 2, Brush::Deposit(Material::Wood));
        cells.set(2, 2, Cell::new(Material::Fire, Rgba::BLACK));
        let erased = paint(&mut cells, 2, 2, 1, Brush::Erase);
        assert_eq!(erased, 9);
        assert!(cells.is_vacant(2, 2));
        assert_eq!(cells.material_at(0, 0), Some(Material::Wood));
    }

    #[test]
    fn test_brush_at_edge_clips() {
        let mut cells = CellGrid::new(4, 4);
        assert_eq!(paint(&mut cells, 0, 0, 1, Brush::Deposit(Material::Wood)), 4);
        assert_eq!(paint(&mut cells, -10, -10, 2, Brush::Deposit(Material::Wood)), 0);
    }

    #[test]
    fn test_far_off_grid_centers_change_nothing() {
        let mut cells = CellGrid::new(8, 8);
        assert_eq!(paint(&mut cells, i32::MAX, 0, 1, Brush::Deposit(Material::Wood)), 0);
        assert_eq!(paint(&mut cells, i32::MIN, i32::MIN, 2, Brush::Deposit(Material::Wood)), 0);
        assert_eq!(paint(&mut cells, 0, i32::MAX, i32::MAX, Brush::Erase), 0);
        assert_eq!(cells.iter().filter(|c| c.exists).count(), 0);
    }

    #[test]
    fn test_huge_radius_covers_grid_once() {
        let mut cells = CellGrid::new(6, 4);
        assert_eq!(paint(&mut cells, 3, 2, i32::MAX, Brush::Deposit(Material::Wood)), 24);
        assert_eq!(paint(&mut cells, 0, 0, i32::MAX, Brush::Erase), 24);
    }

    #[test]
    fn test_material_into_brush() {
        assert_eq!(Brush::from(Material::Empty), Brush::Erase);
        assert_eq!(Brush::from(Material::Fire), Brush::Deposit(Material::Fire));
    }
}
