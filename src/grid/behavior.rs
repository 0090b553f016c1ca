//! Per-material tick rules
//!
//! Each material with dynamics implements `MaterialBehavior`; the sweep looks
//! the rule up with `behavior_for` and hands it an `UpdateContext` for the
//! cell being processed. Rules only ever touch the grid through positions.

use rand::Rng;
use rand_pcg::Pcg32;

use super::cells::CellGrid;
use super::material::{Cell, Material};
use crate::consts::*;

/// The 8 neighbors, top row first
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Everything a rule may read or change while updating one cell
pub struct UpdateContext<'a> {
    pub cells: &'a mut CellGrid,
    pub x: i32,
    pub y: i32,
    pub gravity: f32,
    pub max_velocity: f32,
    /// Tie-breaks and decay rolls
    pub rng: &'a mut Pcg32,
    /// Colors of cells created mid-tick
    pub palette_rng: &'a mut Pcg32,
}

impl UpdateContext<'_> {
    #[inline]
    fn pos(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[inline]
    fn cell_mut(&mut self) -> Option<&mut Cell> {
        self.cells.get_mut(self.x, self.y)
    }

    /// -1 or 1, uniformly
    #[inline]
    fn random_dir(&mut self) -> i32 {
        if self.rng.random_bool(0.5) { -1 } else { 1 }
    }

    /// Move this cell into a vacant target and flag it as done
    fn move_to(&mut self, tx: i32, ty: i32) -> bool {
        if !self.cells.is_vacant(tx, ty) {
            return false;
        }
        self.cells.move_cell(self.pos(), (tx, ty));
        mark_updated(self.cells, tx, ty);
        true
    }

    /// Try `(x + dir*dx, y + dy)` then the mirrored side
    fn move_either_side(&mut self, dir: i32, dy: i32) -> Option<(i32, i32)> {
        for dx in [dir, -dir] {
            let (tx, ty) = (self.x + dx, self.y + dy);
            if self.move_to(tx, ty) {
                return Some((tx, ty));
            }
        }
        None
    }

    fn scale_velocity_at(&mut self, x: i32, y: i32, factor: f32) {
        if let Some(cell) = self.cells.get_mut(x, y) {
            cell.velocity *= factor;
        }
    }

    /// Velocity decay for a cell that could not move
    fn settle(&mut self) {
        if let Some(cell) = self.cell_mut() {
            cell.velocity *= REST_DAMPING;
            if cell.velocity < REST_EPSILON {
                cell.velocity = 0.0;
            }
        }
    }
}

#[inline]
fn mark_updated(cells: &mut CellGrid, x: i32, y: i32) {
    if let Some(cell) = cells.get_mut(x, y) {
        cell.updated = true;
    }
}

/// A material's movement/interaction rule
pub trait MaterialBehavior {
    fn update(&self, ctx: &mut UpdateContext);
}

/// Rule for a material, if it has any dynamics
pub fn behavior_for(material: Material) -> Option<&'static dyn MaterialBehavior> {
    match material {
        Material::Sand => Some(&SandBehavior),
        Material::Water => Some(&WaterBehavior),
        Material::Steam => Some(&SteamBehavior),
        Material::Fire => Some(&FireBehavior),
        Material::Wood | Material::Empty => None,
    }
}

/// Accelerate and drop straight down through anything `mover` sinks through.
///
/// Scans up to `floor(velocity)` rows (at least one) and takes the furthest
/// reachable row of an unbroken run. Returns true if the cell moved.
fn fall_straight(ctx: &mut UpdateContext, mover: Material) -> bool {
    let reach = {
        let (gravity, max_velocity) = (ctx.gravity, ctx.max_velocity);
        let Some(cell) = ctx.cell_mut() else {
            return false;
        };
        cell.velocity = (cell.velocity + gravity).min(max_velocity);
        (cell.velocity.floor() as i32).max(1)
    };

    let mut distance = 0;
    for dy in 1..=reach {
        match ctx.cells.material_at(ctx.x, ctx.y + dy) {
            Some(below) if mover.sinks_through(below) => distance = dy,
            _ => break,
        }
    }
    if distance == 0 {
        return false;
    }

    let target = (ctx.x, ctx.y + distance);
    // An empty target swaps in Cell::EMPTY, which is the same as a move
    ctx.cells.swap(ctx.pos(), target);
    mark_updated(ctx.cells, target.0, target.1);
    true
}

/// Powder: falls, sinks through water and steam, slides off piles
pub struct SandBehavior;

impl MaterialBehavior for SandBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        if fall_straight(ctx, Material::Sand) {
            return;
        }
        let dir = ctx.random_dir();
        match ctx.move_either_side(dir, 1) {
            Some((tx, ty)) => ctx.scale_velocity_at(tx, ty, DIAGONAL_DAMPING),
            None => ctx.settle(),
        }
    }
}

/// Liquid: falls through steam, spreads sideways before sliding diagonally
pub struct WaterBehavior;

impl MaterialBehavior for WaterBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        if fall_straight(ctx, Material::Water) {
            return;
        }
        let dir = ctx.random_dir();
        let moved = ctx
            .move_either_side(dir, 0)
            .or_else(|| ctx.move_either_side(dir, 1));
        match moved {
            Some((tx, ty)) => ctx.scale_velocity_at(tx, ty, DIAGONAL_DAMPING),
            None => ctx.settle(),
        }
    }
}

/// Gas: rises, dissipates stochastically when its lifetime runs out
pub struct SteamBehavior;

impl MaterialBehavior for SteamBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        let expired = ctx.cells.get(ctx.x, ctx.y).is_some_and(|c| c.lifetime == 0);
        if expired {
            let vanish = ctx.rng.random_bool(STEAM_DISSIPATE_CHANCE);
            if let Some(cell) = ctx.cell_mut() {
                if vanish {
                    *cell = Cell::EMPTY;
                } else {
                    cell.lifetime = STEAM_REFRESH_LIFETIME;
                }
            }
            return;
        }

        if ctx.move_to(ctx.x, ctx.y - 1) {
            return;
        }
        let dir = ctx.random_dir();
        if ctx.move_either_side(dir, -1).is_none() {
            ctx.move_either_side(dir, 0);
        }
    }
}

/// Combustion: burns out into steam, ignites neighboring wood after a delay
pub struct FireBehavior;

impl MaterialBehavior for FireBehavior {
    fn update(&self, ctx: &mut UpdateContext) {
        let Some(&fire) = ctx.cells.get(ctx.x, ctx.y) else {
            return;
        };

        if fire.lifetime == 0 {
            let mut steam = Cell::spawn(Material::Steam, ctx.palette_rng);
            steam.updated = true;
            ctx.cells.set(ctx.x, ctx.y, steam);
            return;
        }

        let mut fuel_delay = fire.fuel_delay;
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let (nx, ny) = (ctx.x + dx, ctx.y + dy);
            if ctx.cells.material_at(nx, ny) != Some(Material::Wood) {
                continue;
            }
            if fuel_delay == 0 {
                let mut flame = Cell::spawn(Material::Fire, ctx.palette_rng);
                flame.updated = true;
                ctx.cells.set(nx, ny, flame);
            } else if fuel_delay > 0 {
                fuel_delay -= 1;
            }
        }
        if let Some(cell) = ctx.cell_mut() {
            cell.fuel_delay = fuel_delay;
        }
    }
}
