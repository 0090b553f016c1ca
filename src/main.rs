//! Sandpit entry point
//!
//! Headless runner: loads settings, drives both engines for a fixed number
//! of ticks with scripted paint/spawn/cursor input, and logs summaries.
//!
//! Usage: `sandpit [settings.json] [ticks]`

use glam::Vec2;

use sandpit::circles::{CursorTracker, Probe, TickInput};
use sandpit::consts::TICK_DT;
use sandpit::{CircleWorld, Material, ParticleGrid, Settings};

const DEFAULT_TICKS: u64 = 600;
const SUMMARY_EVERY: u64 = 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sandpit (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let ticks = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid tick count: {}", e);
            std::process::exit(2);
        }
        None => DEFAULT_TICKS,
    };

    if let Err(e) = run(settings, ticks) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

fn run(settings: Settings, ticks: u64) -> Result<(), sandpit::SettingsError> {
    let mut grid = ParticleGrid::new(settings.grid.clone())?;
    let mut world = CircleWorld::new(settings.world.clone())?;
    let mut cursor = CursorTracker::new();

    let (w, h) = (grid.width() as i32, grid.height() as i32);
    grid.paint(w / 2, h - 4, 20, Material::Wood);

    for t in 0..ticks {
        // Scripted input: a sand stream, a water stream and a match
        if t < ticks / 2 {
            grid.paint(w / 3, 4, 3, Material::Sand);
            grid.paint(2 * w / 3, 4, 3, Material::Water);
        }
        if t == ticks / 4 {
            grid.paint(w / 2, h - 26, 2, Material::Fire);
        }
        grid.tick();

        // Cursor sweeping left to right across the middle of the screen
        let sweep = (t as f32 / ticks.max(1) as f32) * settings.world.screen_width;
        let pos = Vec2::new(sweep, settings.world.screen_height / 2.0);
        cursor.sample(pos, TICK_DT);
        let input = TickInput {
            probe: Probe::from_tracker(&cursor, &settings.world.probe),
        };
        if t % 60 == 0 {
            if let Err(e) = world.spawn_random_at(pos.x, pos.y / 2.0) {
                log::debug!("{}", e);
            }
        }
        world.tick_with(&input);

        if (t + 1) % SUMMARY_EVERY == 0 || t + 1 == ticks {
            log::info!(
                "tick {}: grid {} cells (sand {}, water {}, wood {}, fire {}, steam {}) | circles {} p=({:.2}, {:.2}) ke={:.2}",
                t + 1,
                grid.population(),
                grid.count(Material::Sand),
                grid.count(Material::Water),
                grid.count(Material::Wood),
                grid.count(Material::Fire),
                grid.count(Material::Steam),
                world.count(),
                world.total_momentum().x,
                world.total_momentum().y,
                world.kinetic_energy()
            );
        }
    }

    Ok(())
}
