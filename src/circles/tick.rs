//! Fixed timestep circle tick
//!
//! Advances the world deterministically: probe, pairwise response,
//! position correction, integration, walls, then optional damping.

use rand::Rng;

use super::collision::{bounce_off_walls, correct_positions, resolve_collisions};
use super::probe::Probe;
use super::state::CircleWorld;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cursor probe, collided once and discarded
    pub probe: Option<Probe>,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut CircleWorld, input: &TickInput) {
    if let Some(probe) = &input.probe {
        world.apply_probe(probe);
    }

    resolve_collisions(&mut world.circles);
    correct_positions(&mut world.circles);

    // Velocities are already px/tick
    let (width, height) = (world.settings.screen_width, world.settings.screen_height);
    for circle in &mut world.circles {
        circle.pos += circle.vel;
        bounce_off_walls(circle, width, height);
    }

    if let Some(damping) = world.settings.damping {
        for circle in &mut world.circles {
            if world.rng.physics.random_bool(damping.chance) {
                circle.vel *= damping.factor;
            }
        }
    }

    world.ticks += 1;
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::settings::{DampingSettings, ProbeSettings, WorldSettings};

    fn world() -> CircleWorld {
        CircleWorld::empty(400.0, 300.0, 77).unwrap()
    }

    #[test]
    fn test_free_flight() {
        let mut world = world();
        world.spawn(100.0, 100.0, 10.0, Vec2::new(2.0, -1.0)).unwrap();
        world.tick();
        assert_eq!(world.at(0).unwrap().pos, Vec2::new(102.0, 99.0));
        assert_eq!(world.tick_count(), 1);
    }

    #[test]
    fn test_overlapping_pair_bounces() {
        let mut world = world();
        world.spawn(100.0, 150.0, 30.0, Vec2::new(5.0, 0.0)).unwrap();
        world.spawn(150.0, 150.0, 30.0, Vec2::new(-5.0, 0.0)).unwrap();
        world.tick();

        let (a, b) = (world.circle(0).unwrap(), world.circle(1).unwrap());
        assert!((a.vel.x - -5.0).abs() < 1e-4);
        assert!((b.vel.x - 5.0).abs() < 1e-4);
        assert!(a.pos.distance(b.pos) >= 60.0 - 1e-3);
    }

    #[test]
    fn test_wall_reflection_in_tick() {
        let mut world = world();
        world.spawn(395.0, 150.0, 10.0, Vec2::new(4.0, 0.0)).unwrap();
        world.tick();
        let c = world.circle(0).unwrap();
        assert_eq!(c.pos.x, 390.0);
        assert_eq!(c.vel.x, -4.0);
    }

    #[test]
    fn test_damping_slows_world() {
        let mut world = CircleWorld::new(WorldSettings {
            damping: Some(DampingSettings {
                chance: 1.0,
                factor: 0.5,
            }),
            seed: 1,
            ..WorldSettings::empty(400.0, 300.0)
        })
        .unwrap();
        world.spawn(200.0, 150.0, 10.0, Vec2::new(4.0, 0.0)).unwrap();
        world.tick();
        assert!((world.circle(0).unwrap().vel.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_damping_without_settings() {
        let mut world = world();
        world.spawn(200.0, 150.0, 10.0, Vec2::new(1.0, 1.0)).unwrap();
        for _ in 0..50 {
            world.tick();
        }
        assert_eq!(world.circle(0).unwrap().vel.length(), Vec2::ONE.length());
    }

    #[test]
    fn test_tick_with_probe() {
        let mut world = world();
        world.spawn(200.0, 150.0, 10.0, Vec2::ZERO).unwrap();
        let input = TickInput {
            probe: Some(Probe::from_cursor(
                Vec2::new(185.0, 150.0),
                Vec2::new(200.0, 0.0),
                &ProbeSettings::default(),
            )),
        };
        world.tick_with(&input);
        assert!(world.circle(0).unwrap().pos.x > 200.0);
        assert_eq!(world.count(), 1);
    }

    #[test]
    fn test_same_seed_same_world() {
        let run = || {
            let mut world = CircleWorld::new(WorldSettings {
                screen_width: 600.0,
                screen_height: 400.0,
                initial_circles: 60,
                seed: 2024,
                ..WorldSettings::default()
            })
            .unwrap();
            for _ in 0..120 {
                world.tick();
            }
            world.circles().iter().map(|c| c.pos).collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
