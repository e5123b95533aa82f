//! Short-lived visual effects
//!
//! An effect is a billboard (where it is drawn) plus a timed animation
//! (which texture frame is current and when it ends).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{SMOKE_FRAME_DURATION, SMOKE_FRAMES, SMOKE_SIZE};

/// Frame clock for a sprite-sheet animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedAnimation {
    pub start_time: f32,
    pub current_time: f32,
    pub frames: u32,
    pub frame_duration: f32,
}

impl TimedAnimation {
    pub fn new(frames: u32, frame_duration: f32, now: f32) -> Self {
        Self {
            start_time: now,
            current_time: now,
            frames,
            frame_duration,
        }
    }

    pub fn duration(&self) -> f32 {
        self.frames as f32 * self.frame_duration
    }

    pub fn update(&mut self, now: f32) {
        self.current_time = now;
    }

    pub fn finished(&self) -> bool {
        self.current_time > self.start_time + self.duration()
    }

    /// Index of the frame showing at the last update
    pub fn frame(&self) -> u32 {
        if self.frame_duration <= 0.0 || self.frames == 0 {
            return 0;
        }
        let elapsed = (self.current_time - self.start_time).max(0.0);
        ((elapsed / self.frame_duration) as u32).min(self.frames - 1)
    }
}

/// Camera-facing quad
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Billboard {
    pub position: Vec3,
    pub size: f32,
}

/// Smoke puff left behind when the skull is picked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmokeEffect {
    pub billboard: Billboard,
    pub animation: TimedAnimation,
}

impl SmokeEffect {
    /// Puff at ground level under `at`
    pub fn spawn(at: Vec3, now: f32) -> Self {
        Self {
            billboard: Billboard {
                position: Vec3::new(at.x, at.y, 0.0),
                size: SMOKE_SIZE,
            },
            animation: TimedAnimation::new(SMOKE_FRAMES, SMOKE_FRAME_DURATION, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke_lifetime() {
        let mut smoke = SmokeEffect::spawn(Vec3::new(1.0, -1.0, -0.25), 2.0);
        assert_eq!(smoke.billboard.position, Vec3::new(1.0, -1.0, 0.0));
        assert_eq!(smoke.animation.frame(), 0);

        smoke.animation.update(2.0 + 0.095);
        assert_eq!(smoke.animation.frame(), 1);
        assert!(!smoke.animation.finished());

        smoke.animation.update(2.0 + 1.43);
        assert_eq!(smoke.animation.frame(), 15);
        assert!(!smoke.animation.finished());

        smoke.animation.update(2.0 + 1.5);
        assert!(smoke.animation.finished());
        assert_eq!(smoke.animation.frame(), 15);
    }
}
