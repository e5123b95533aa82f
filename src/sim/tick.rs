//! Per-tick update and pick interactions
//!
//! `tick` is driven by an external timer (every `TICK_INTERVAL_MS`) and runs
//! before each render pass. Actor transforms depend only on the clock value
//! passed in.

use glam::Vec3;

use super::actor::ActorState;
use super::camera::{CameraMode, MoveKeys};
use super::effects::SmokeEffect;
use super::placement::{ObjectKind, PlacementSampler};
use super::state::{ForestState, PropId};
use crate::error::SceneError;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys (free roam only)
    pub keys: MoveKeys,
    /// Jump to a static camera view
    pub switch_camera: Option<CameraMode>,
    /// Toggle free roaming
    pub toggle_free_roam: bool,
    /// Change of camera pitch in degrees
    pub pitch: f32,
    pub toggle_rain: bool,
    pub toggle_fog: bool,
    /// Force the sun on (or release it)
    pub toggle_sun: bool,
    pub toggle_reflector: bool,
}

/// Object the user clicked on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Mushroom,
    Ground,
    ExtraProp,
    Skull,
}

/// What a pick did to the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome {
    /// The mushroom was caught and hopped away
    MushroomEscaped { attempts: u32, to: Vec3 },
    GroundPicked,
    HighlightToggled { highlighted: bool },
    GhostToggled { visible: bool, smoke_spawned: bool },
}

/// Advance the scene to simulation time `now`
pub fn tick<'a>(state: &'a mut ForestState, input: &TickInput, now: f32) -> &'a [ActorState] {
    if let Some(mode) = input.switch_camera {
        log::debug!("Camera switched to {}", mode.as_str());
        state.camera.switch_to(mode, now);
    }
    if input.toggle_free_roam {
        state.camera.free_roam = !state.camera.free_roam;
        log::debug!("Free roam: {}", state.camera.free_roam);
    }
    if input.pitch != 0.0 {
        state.camera.pitch(input.pitch);
    }
    apply_weather_input(state, input);

    let sampler = state.sampler();
    state
        .camera
        .update(input.keys, now, &sampler, &state.registry);

    state.update_actors(now);
    state.weather.update(now);

    if let Some(smoke) = state.smoke.as_mut() {
        smoke.animation.update(now);
        if smoke.animation.finished() {
            state.smoke = None;
        }
    }

    state.time = now;
    &state.actors
}

fn apply_weather_input(state: &mut ForestState, input: &TickInput) {
    let weather = &mut state.weather;
    if input.toggle_rain {
        weather.toggle_rain();
    }
    if input.toggle_fog {
        weather.toggle_fog();
    }
    if input.toggle_sun {
        weather.toggle_sun();
    }
    if input.toggle_reflector {
        weather.toggle_reflector();
    }
    if input.toggle_rain || input.toggle_fog || input.toggle_sun || input.toggle_reflector {
        log::debug!("Weather: {weather:?}");
    }
}

/// Move a relocatable prop to a fresh spot.
///
/// Uses the same sampler rules as population, without reserving the spot.
/// The start zone is kept clear whichever camera is active.
pub fn relocate_prop(state: &mut ForestState, prop: PropId) -> Result<Vec3, SceneError> {
    if prop != PropId::Mushroom {
        return Err(SceneError::UnknownProp(prop));
    }
    let sampler = PlacementSampler::new(state.config.placement, true);
    let size = state.mushroom.size;
    let position = sampler.sample(&mut state.rng, &mut state.registry, ObjectKind::Mushroom, size)?;
    state.mushroom.position = position;
    Ok(position)
}

/// Apply a pick at simulation time `now`
pub fn interact(
    state: &mut ForestState,
    target: PickTarget,
    now: f32,
) -> Result<InteractionOutcome, SceneError> {
    match target {
        PickTarget::Mushroom => {
            let to = relocate_prop(state, PropId::Mushroom)?;
            state.interaction.catch_attempts += 1;
            log::info!(
                "Mushroom caught but it got away! Attempt #{}",
                state.interaction.catch_attempts
            );
            Ok(InteractionOutcome::MushroomEscaped {
                attempts: state.interaction.catch_attempts,
                to,
            })
        }
        PickTarget::Ground => {
            log::info!("Ground picked");
            Ok(InteractionOutcome::GroundPicked)
        }
        PickTarget::ExtraProp => {
            state.interaction.highlight_extras = !state.interaction.highlight_extras;
            Ok(InteractionOutcome::HighlightToggled {
                highlighted: state.interaction.highlight_extras,
            })
        }
        PickTarget::Skull => {
            state.interaction.ghost_visible = !state.interaction.ghost_visible;
            let smoke_spawned = state.smoke.is_none();
            if smoke_spawned {
                state.smoke = Some(SmokeEffect::spawn(state.skull.position, now));
            }
            Ok(InteractionOutcome::GhostToggled {
                visible: state.interaction.ghost_visible,
                smoke_spawned,
            })
        }
    }
}
