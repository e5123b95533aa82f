//! Haunted Forest - procedural scene population and curve-driven actors
//!
//! Core modules:
//! - `sim`: Deterministic simulation (curves, placement, actors, scene state)
//! - `curves`: Authored control-point tables for bat and ghost paths
//! - `config`: Data-driven scene configuration
//! - `instances`: Per-object instance records handed to the renderer
//! - `error`: Error type shared by the whole crate

pub mod config;
pub mod curves;
pub mod error;
pub mod instances;
pub mod sim;

pub use config::SceneConfig;
pub use error::SceneError;
pub use sim::{ForestState, SceneSnapshot, populate_scene, relocate_prop, reset_scene, tick};

use glam::{Vec2, Vec3};

/// Scene configuration constants
pub mod consts {
    /// Update cadence of the external timer driving `tick`
    pub const TICK_INTERVAL_MS: u64 = 33;

    /// Scene half-extent along x and y
    pub const SCENE_HALF_EXTENT: f32 = 3.0;
    /// Half-extent of the rectangle candidates are drawn from
    pub const SAMPLE_HALF_EXTENT: f32 = 4.0;
    /// Margin keeping "reachable" props away from the scene border
    pub const REACH_MARGIN: f32 = 1.0;
    /// Minimum planar distance between placed objects
    pub const SEPARATION_RADIUS: f32 = 0.13;
    /// Candidate draws allowed per placement before giving up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Object counts
    pub const TREE_COUNTS: [usize; 4] = [15, 23, 19, 20];
    pub const EXTRA_PROP_COUNT: usize = 5;

    /// Object sizes
    pub const SKULL_SIZE: f32 = 0.02;
    pub const MUSHROOM_SIZE: f32 = 0.05;
    pub const ROCK_SIZE: f32 = 0.005;
    pub const EXTRA_PROP_SIZE: f32 = 0.06;
    pub const GHOST_SIZE: f32 = 0.15;
    pub const BAT_SIZES: [f32; 3] = [0.25, 0.35, 0.50];
    pub const SMOKE_SIZE: f32 = 0.1;

    /// Actor speeds (curve parameter units per second)
    pub const BAT_SPEEDS: [f32; 3] = [2.1, 3.8, 4.0];
    pub const GHOST_SPEED: f32 = 0.1;

    /// Camera
    pub const VIEW_ANGLE_DELTA: f32 = 5.0;
    pub const CAMERA_MOVEMENT_SPEED: f32 = 0.5;
    pub const CAMERA_ELEVATION_MAX: f32 = 50.0;

    /// Smoke animation (spawned by the skull)
    pub const SMOKE_FRAMES: u32 = 16;
    pub const SMOKE_FRAME_DURATION: f32 = 0.09;

    /// Lightning repeats every 7 s while it rains
    pub const LIGHTNING_PERIOD_MS: i64 = 7000;
}

/// Planar (x, y) part of a 3D point
#[inline]
pub fn planar(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.y)
}

/// Planar distance between two 3D points, ignoring z
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}

/// Unit planar direction for a view angle in degrees
#[inline]
pub fn direction_from_angle(degrees: f32) -> Vec3 {
    let angle = degrees.to_radians();
    Vec3::new(angle.cos(), angle.sin(), 0.0)
}
