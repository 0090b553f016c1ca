//! End-to-end scenarios for both engines

use glam::Vec2;
use sandpit::circles::{Probe, TickInput, elastic_response};
use sandpit::consts::*;
use sandpit::grid::Cell;
use sandpit::settings::ProbeSettings;
use sandpit::{CircleWorld, Material, ParticleGrid, Rgba, SpawnError, WorldSettings};

fn grid(width: u32, height: u32) -> ParticleGrid {
    ParticleGrid::with_size(width, height, 4242).unwrap()
}

fn fire(fuel_delay: i32) -> Cell {
    Cell::new(Material::Fire, Rgba::opaque(255, 129, 0))
        .with_lifetime(NO_DECAY)
        .with_fuel_delay(fuel_delay)
}

#[test]
fn test_sand_falls_straight_to_floor() {
    for y in [0, 5, 17] {
        let mut grid = grid(9, 24);
        grid.place(4, y, Material::Sand);
        for _ in 0..(24 - y - 1) {
            grid.tick();
        }
        assert_eq!(
            grid.cell_at(4, 23).unwrap().material,
            Material::Sand,
            "grain from row {y} did not land"
        );
        assert_eq!(grid.population(), 1);
    }
}

#[test]
fn test_sand_on_default_grid() {
    let mut grid = ParticleGrid::new(Default::default()).unwrap();
    let (x, y) = (100, 10);
    grid.place(x, y, Material::Sand);
    let bottom = grid.height() as i32 - 1;
    for _ in 0..(bottom - y) {
        grid.tick();
    }
    assert_eq!(grid.cell_at(x, bottom).unwrap().material, Material::Sand);
}

#[test]
fn test_fire_ignites_immediately_without_delay() {
    let mut grid = grid(4, 3);
    grid.set_cell(1, 1, fire(0));
    grid.place(2, 1, Material::Wood);
    grid.tick();
    assert_eq!(grid.cell_at(2, 1).unwrap().material, Material::Fire);
}

#[test]
fn test_fire_ignition_delay() {
    let mut grid = grid(4, 3);
    grid.set_cell(1, 1, fire(5));
    grid.place(2, 1, Material::Wood);
    for tick in 1..=5 {
        grid.tick();
        assert_eq!(
            grid.cell_at(2, 1).unwrap().material,
            Material::Wood,
            "wood caught early on tick {tick}"
        );
    }
    grid.tick();
    assert_eq!(grid.cell_at(2, 1).unwrap().material, Material::Fire);
}

#[test]
fn test_burning_out_keeps_cell_count() {
    let mut grid = grid(5, 5);
    grid.place(2, 4, Material::Fire);
    for _ in 0..FIRE_LIFETIME {
        grid.tick();
    }
    assert_eq!(grid.count(Material::Steam), 1);
    assert_eq!(grid.population(), 1);
}

#[test]
fn test_sand_sinks_through_water() {
    let mut grid = grid(1, 4);
    grid.place(0, 0, Material::Sand);
    grid.place(0, 1, Material::Water);
    grid.place(0, 2, Material::Water);
    grid.place(0, 3, Material::Water);
    for _ in 0..10 {
        grid.tick();
    }
    assert_eq!(grid.cell_at(0, 3).unwrap().material, Material::Sand);
    assert_eq!(grid.count(Material::Water), 3);
}

#[test]
fn test_equal_mass_head_on_exchange() {
    let (va, vb) = elastic_response(
        30.0,
        Vec2::new(100.0, 100.0),
        Vec2::new(5.0, 0.0),
        30.0,
        Vec2::new(150.0, 100.0),
        Vec2::new(-5.0, 0.0),
    )
    .unwrap();
    assert!((va - Vec2::new(-5.0, 0.0)).length() < 1e-4);
    assert!((vb - Vec2::new(5.0, 0.0)).length() < 1e-4);
}

#[test]
fn test_overlapping_circles_exchange_in_world() {
    let mut world = CircleWorld::empty(600.0, 400.0, 1).unwrap();
    world.spawn(100.0, 100.0, 30.0, Vec2::new(5.0, 0.0)).unwrap();
    world.spawn(150.0, 100.0, 30.0, Vec2::new(-5.0, 0.0)).unwrap();
    let momentum = world.total_momentum();
    let energy = world.kinetic_energy();

    world.tick();
    assert!((world.circle(0).unwrap().vel.x - -5.0).abs() < 1e-4);
    assert!((world.circle(1).unwrap().vel.x - 5.0).abs() < 1e-4);
    assert!((world.total_momentum() - momentum).length() < 1e-3);
    assert!((world.kinetic_energy() - energy).abs() < 1e-3);
}

#[test]
fn test_spawn_beyond_capacity() {
    let mut world = CircleWorld::new(WorldSettings {
        max_circles: 3,
        seed: 5,
        ..WorldSettings::empty(600.0, 400.0)
    })
    .unwrap();
    for i in 0..3 {
        assert_eq!(world.spawn(50.0 + 60.0 * i as f32, 50.0, 10.0, Vec2::ZERO), Ok(i));
    }
    assert_eq!(
        world.spawn(300.0, 300.0, 10.0, Vec2::ZERO),
        Err(SpawnError::CapacityExceeded { capacity: 3 })
    );
    assert!(world.spawn_random_at(300.0, 300.0).is_err());
    assert_eq!(world.count(), 3);
}

#[test]
fn test_coincident_centers_stay_finite() {
    let mut world = CircleWorld::empty(600.0, 400.0, 8).unwrap();
    world.spawn(200.0, 200.0, 15.0, Vec2::new(1.0, 0.0)).unwrap();
    world.spawn(200.0, 200.0, 15.0, Vec2::new(-1.0, 0.0)).unwrap();
    world.tick();
    for i in 0..2 {
        let c = world.circle(i).unwrap();
        assert!(c.pos.is_finite() && c.vel.is_finite());
    }
    assert!(elastic_response(1.0, Vec2::ZERO, Vec2::X, 1.0, Vec2::ZERO, Vec2::Y).is_none());
}

#[test]
fn test_cursor_probe_not_stored() {
    let mut world = CircleWorld::empty(600.0, 400.0, 3).unwrap();
    world.spawn(300.0, 200.0, 20.0, Vec2::ZERO).unwrap();
    let probe = Probe::from_cursor(
        Vec2::new(275.0, 200.0),
        Vec2::new(500.0, 0.0),
        &ProbeSettings::default(),
    );
    for _ in 0..3 {
        world.tick_with(&TickInput { probe: Some(probe) });
    }
    assert_eq!(world.count(), 1);
    assert!(world.circle(0).unwrap().vel.x > 0.0);
}
