//! Haunted Forest headless driver
//!
//! Populates a scene and runs the simulation on a fixed simulated clock,
//! logging actor positions. Usage: `haunted-forest [seed] [config.json]`

use haunted_forest::consts::TICK_INTERVAL_MS;
use haunted_forest::sim::{PickTarget, TickInput, interact};
use haunted_forest::{SceneConfig, SceneError, populate_scene, reset_scene, tick};

/// Simulated seconds to run
const RUN_SECONDS: f32 = 10.0;

fn run() -> Result<(), SceneError> {
    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let config = match args.next() {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    let mut state = populate_scene(config, seed, 0.0)?;
    log::info!("Seed {seed}: {} objects placed", state.objects().count());

    let dt = TICK_INTERVAL_MS as f32 / 1000.0;
    let ticks = (RUN_SECONDS / dt) as u32;
    let rain = TickInput {
        toggle_rain: true,
        ..Default::default()
    };

    for i in 1..=ticks {
        let now = i as f32 * dt;
        let input = if i == 1 { rain.clone() } else { TickInput::default() };
        let actors = tick(&mut state, &input, now);
        if i % 30 == 0 {
            for actor in actors {
                log::info!(
                    "t={now:.2} {:?} at ({:.2}, {:.2}, {:.2})",
                    actor.kind,
                    actor.position.x,
                    actor.position.y,
                    actor.position.z
                );
            }
        }
        if i % 100 == 0 {
            log::debug!("t={now:.2} sun on: {}", state.weather.sun_on);
            interact(&mut state, PickTarget::Mushroom, now)?;
        }
    }

    let snapshot = reset_scene(&mut state, RUN_SECONDS)?;
    log::info!(
        "Reset: {} objects, {} instances",
        snapshot.objects.len(),
        snapshot.instances().len()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Haunted Forest (headless) starting...");

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
