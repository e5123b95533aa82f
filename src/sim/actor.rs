//! Flying actors driven along closed curves
//!
//! An actor's transform is a function of elapsed time only:
//! `param = speed * (now - start_time)`, position and heading are read off
//! the curve at `param`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::curve::Curve;

/// Tangents this short (squared) are treated as degenerate
const DEGENERATE_TANGENT_SQ: f32 = 1e-12;

/// Bat variants, differing in speed and size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatKind {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Bat(BatKind),
    Ghost,
}

/// A moving actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorState {
    pub kind: ActorKind,
    /// Index of the followed curve in the scene's curve library
    pub curve: usize,
    pub position: Vec3,
    /// Reference position the model is authored around
    pub init_position: Vec3,
    /// Unit heading
    pub direction: Vec3,
    /// Curve parameter units per second
    pub speed: f32,
    pub size: f32,
    /// Simulation time the path started at
    pub start_time: f32,
    /// Simulation time of the last update
    pub current_time: f32,
}

impl ActorState {
    pub fn new(kind: ActorKind, curve: usize, speed: f32, size: f32, now: f32) -> Self {
        Self {
            kind,
            curve,
            position: Vec3::ZERO,
            init_position: Vec3::new(0.0, 1.0, 0.0),
            direction: Vec3::X,
            speed,
            size,
            start_time: now,
            current_time: now,
        }
    }

    /// Curve parameter at the last update
    #[inline]
    pub fn curve_param(&self) -> f32 {
        self.speed * (self.current_time - self.start_time)
    }

    /// Advance to `now`. A (near) zero-length tangent keeps the previous heading.
    pub fn update(&mut self, curve: &Curve, now: f32) {
        self.current_time = now;
        let t = self.curve_param();
        self.position = curve.position(t);
        let tangent = curve.tangent(t);
        if tangent.length_squared() > DEGENERATE_TANGENT_SQ {
            self.direction = tangent.normalize();
        }
    }

    /// Restart the path from `now`
    pub fn restart(&mut self, now: f32) {
        self.start_time = now;
        self.current_time = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ring() -> Curve {
        Curve::new("ring", crate::curves::ghost()).unwrap()
    }

    #[test]
    fn test_position_follows_elapsed_time() {
        let curve = ring();
        let mut bat = ActorState::new(ActorKind::Bat(BatKind::Small), 0, 2.0, 0.25, 10.0);
        bat.update(&curve, 10.0);
        assert!(bat.position.abs_diff_eq(curve.points()[0], 1e-5));

        bat.update(&curve, 11.5);
        assert!((bat.curve_param() - 3.0).abs() < 1e-6);
        assert!(bat.position.abs_diff_eq(curve.points()[3], 1e-4));
        assert!((bat.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_tangent_keeps_direction() {
        // Identical control points give a zero tangent everywhere
        let curve = Curve::new("still", vec![Vec3::ONE; 4]).unwrap();
        let mut ghost = ActorState::new(ActorKind::Ghost, 0, 0.1, 0.15, 0.0);
        ghost.direction = Vec3::Y;
        ghost.update(&curve, 3.0);
        assert_eq!(ghost.direction, Vec3::Y);
        assert_eq!(ghost.position, Vec3::ONE);

        // Mid-segment parameter (t = 2.37)
        ghost.update(&curve, 23.7);
        assert_eq!(ghost.direction, Vec3::Y);
        assert!(ghost.position.abs_diff_eq(Vec3::ONE, 1e-5));
    }

    #[test]
    fn test_tiny_tangent_keeps_direction() {
        let eps = 1e-7;
        let curve = Curve::new(
            "jitter",
            vec![
                Vec3::ZERO,
                Vec3::new(eps, 0.0, 0.0),
                Vec3::new(0.0, eps, 0.0),
                Vec3::new(0.0, 0.0, eps),
            ],
        )
        .unwrap();
        let mut bat = ActorState::new(ActorKind::Bat(BatKind::Large), 0, 1.0, 0.5, 0.0);
        bat.direction = Vec3::NEG_X;
        bat.update(&curve, 1.4);
        assert_eq!(bat.direction, Vec3::NEG_X);
    }

    #[test]
    fn test_restart_resets_path() {
        let curve = ring();
        let mut ghost = ActorState::new(ActorKind::Ghost, 0, 0.5, 0.15, 0.0);
        ghost.update(&curve, 4.0);
        ghost.restart(4.0);
        ghost.update(&curve, 4.0);
        assert!(ghost.position.abs_diff_eq(curve.points()[0], 1e-5));
    }

    proptest! {
        #[test]
        fn prop_replay_is_deterministic(start in 0.0f32..100.0, dt in 0.0f32..500.0, speed in 0.05f32..5.0) {
            let curve = ring();
            let mut a = ActorState::new(ActorKind::Ghost, 0, speed, 0.15, start);
            let mut b = ActorState::new(ActorKind::Ghost, 0, speed, 0.15, start);
            // `a` takes intermediate steps, `b` jumps straight to the end
            a.update(&curve, start + dt * 0.5);
            a.update(&curve, start + dt);
            b.update(&curve, start + dt);
            prop_assert_eq!(a.position, b.position);
            prop_assert_eq!(a.direction, b.direction);
        }
    }
}
