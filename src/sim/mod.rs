//! Deterministic simulation module
//!
//! All scene logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Actor motion depends only on the clock value passed in
//! - Stable iteration order (by object type, then creation order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod camera;
pub mod curve;
pub mod effects;
pub mod placement;
pub mod state;
pub mod tick;
pub mod weather;

pub use actor::{ActorKind, ActorState, BatKind};
pub use camera::{Camera, CameraMode, MoveKeys};
pub use curve::{Curve, align_object, cyclic_clamp, evaluate_segment, evaluate_segment_derivative};
pub use effects::{Billboard, SmokeEffect, TimedAnimation};
pub use placement::{ObjectKind, PlacementRegistry, PlacementSampler, TreeType};
pub use state::{
    ForestState, InteractionState, PropId, SceneObject, SceneSnapshot, populate_scene, reset_scene,
};
pub use tick::{InteractionOutcome, PickTarget, TickInput, interact, relocate_prop, tick};
pub use weather::{WeatherState, lightning_flash};
