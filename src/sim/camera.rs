//! Viewer camera: three static views plus free roaming on foot

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::placement::{PlacementRegistry, PlacementSampler};
use crate::consts::{CAMERA_ELEVATION_MAX, CAMERA_MOVEMENT_SPEED, VIEW_ANGLE_DELTA};
use crate::direction_from_angle;

/// Static camera views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Standing at the player start in the middle of the forest
    #[default]
    Ground,
    /// Looking down from above the start
    Overhead,
    /// Looking in from the south-west corner
    Corner,
}

impl CameraMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMode::Ground => "Ground",
            CameraMode::Overhead => "Overhead",
            CameraMode::Corner => "Corner",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ground" | "0" => Some(CameraMode::Ground),
            "overhead" | "top" | "1" => Some(CameraMode::Overhead),
            "corner" | "2" => Some(CameraMode::Corner),
            _ => None,
        }
    }

    /// The camera standing on the start zone keeps it clear of objects
    pub fn guards_start_zone(&self) -> bool {
        *self == CameraMode::Ground
    }

    fn eye(&self) -> Vec3 {
        match self {
            CameraMode::Ground => Vec3::new(0.0, 0.0, 0.09),
            CameraMode::Overhead => Vec3::new(0.0, 0.0, 1.0),
            CameraMode::Corner => Vec3::new(-3.0, -3.0, 0.8),
        }
    }

    fn elevation(&self) -> f32 {
        match self {
            CameraMode::Ground => 10.0,
            CameraMode::Overhead => 30.0,
            CameraMode::Corner => 4.0,
        }
    }
}

/// Movement keys held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub mode: CameraMode,
    pub position: Vec3,
    /// Heading in degrees, 0 = +x
    pub view_angle: f32,
    /// Unit planar heading
    pub direction: Vec3,
    /// Pitch in degrees
    pub elevation: f32,
    pub free_roam: bool,
    pub start_time: f32,
    pub current_time: f32,
}

impl Camera {
    pub fn new(mode: CameraMode, now: f32) -> Self {
        let mut camera = Self {
            mode,
            position: Vec3::ZERO,
            view_angle: 0.0,
            direction: Vec3::X,
            elevation: 0.0,
            free_roam: false,
            start_time: now,
            current_time: now,
        };
        camera.switch_to(mode, now);
        camera
    }

    /// Jump to one of the static views, facing 45 degrees
    pub fn switch_to(&mut self, mode: CameraMode, now: f32) {
        self.mode = mode;
        self.view_angle = 45.0;
        self.direction = direction_from_angle(self.view_angle);
        self.position = mode.eye();
        self.elevation = mode.elevation();
        self.start_time = now;
        self.current_time = now;
    }

    pub fn turn_left(&mut self, delta: f32) {
        self.view_angle += delta;
        if self.view_angle > 360.0 {
            self.view_angle -= 360.0;
        }
        self.direction = direction_from_angle(self.view_angle);
    }

    pub fn turn_right(&mut self, delta: f32) {
        self.view_angle -= delta;
        if self.view_angle < 0.0 {
            self.view_angle += 360.0;
        }
        self.direction = direction_from_angle(self.view_angle);
    }

    pub fn pitch(&mut self, delta: f32) {
        self.elevation = (self.elevation + delta).clamp(-CAMERA_ELEVATION_MAX, CAMERA_ELEVATION_MAX);
    }

    /// Advance free-roam movement to `now`.
    ///
    /// Moves stay inside the scene; on the ground view a move into an
    /// occupied spot is refused.
    pub fn update(
        &mut self,
        keys: MoveKeys,
        now: f32,
        sampler: &PlacementSampler,
        registry: &PlacementRegistry,
    ) {
        let dt = now - self.current_time;
        self.current_time = now;
        if !self.free_roam {
            return;
        }

        let step = CAMERA_MOVEMENT_SPEED * dt * self.direction;
        if keys.forward {
            self.try_move(self.position + step, sampler, registry);
        }
        if keys.backward {
            self.try_move(self.position - step, sampler, registry);
        }
        if keys.right {
            self.turn_right(VIEW_ANGLE_DELTA);
        }
        if keys.left {
            self.turn_left(VIEW_ANGLE_DELTA);
        }
    }

    fn try_move(&mut self, target: Vec3, sampler: &PlacementSampler, registry: &PlacementRegistry) {
        let h = sampler.config.scene_half_extent;
        if target.x.abs() >= h || target.y.abs() >= h {
            return;
        }
        // The start zone itself is where the walker begins, only objects block
        if self.mode == CameraMode::Ground
            && registry.collides(target, sampler.config.separation_radius)
        {
            log::debug!("Camera blocked at ({:.2}, {:.2})", target.x, target.y);
            return;
        }
        self.position = target;
    }
}
