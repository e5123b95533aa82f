//! Constrained random placement of static scene objects
//!
//! Candidates are drawn uniformly over a working rectangle wider than the
//! scene and rejected while they sit within the separation radius of an
//! occupied spot (or of the player start zone). Each object kind then
//! re-samples until the candidate falls inside its own bound.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::PlacementConfig;
use crate::error::SceneError;
use crate::planar_distance;

/// The four dead-tree models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeType {
    One,
    Two,
    Three,
    Four,
}

impl TreeType {
    pub const ALL: [TreeType; 4] = [TreeType::One, TreeType::Two, TreeType::Three, TreeType::Four];

    /// Zero-based index into per-type tables
    pub fn index(self) -> usize {
        match self {
            TreeType::One => 0,
            TreeType::Two => 1,
            TreeType::Three => 2,
            TreeType::Four => 3,
        }
    }
}

/// Category of a static scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Tree(TreeType),
    Skull,
    /// Catchable prop, hops elsewhere when picked
    Mushroom,
    Rock,
    ExtraProp,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Tree(_) => "tree",
            ObjectKind::Skull => "skull",
            ObjectKind::Mushroom => "mushroom",
            ObjectKind::Rock => "rock",
            ObjectKind::ExtraProp => "extra prop",
        }
    }

    /// Whether the accepted spot is added to the occupied registry
    pub fn reserves_space(&self) -> bool {
        !matches!(self, ObjectKind::Mushroom)
    }

    /// Whether the object must stay inside the reachable (inner) bound
    pub fn needs_reach(&self) -> bool {
        matches!(self, ObjectKind::Skull | ObjectKind::Rock | ObjectKind::ExtraProp)
    }

    /// Vertical offset so the model sits on the ground
    pub fn depth(&self, size: f32) -> f32 {
        match self {
            ObjectKind::Tree(TreeType::Two) => -0.28 + size * 10.0 * 0.08,
            ObjectKind::Tree(_) => size - 0.29,
            ObjectKind::Skull => -0.25,
            ObjectKind::Mushroom | ObjectKind::ExtraProp => -0.23,
            ObjectKind::Rock => -0.05,
        }
    }
}

/// Occupied positions for one scene generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacementRegistry {
    positions: Vec<Vec3>,
}

impl PlacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// True if `point` lies within `radius` (inclusive) of an occupied spot
    pub fn collides(&self, point: Vec3, radius: f32) -> bool {
        self.positions
            .iter()
            .any(|&p| planar_distance(p, point) <= radius)
    }

    /// Record `point` unless it collides; returns whether it was recorded.
    /// Check and insert happen under the same `&mut` borrow.
    pub fn try_register(&mut self, point: Vec3, radius: f32) -> bool {
        if self.collides(point, radius) {
            return false;
        }
        self.positions.push(point);
        true
    }
}

/// Rejection sampler over the scene plane
#[derive(Debug, Clone, Copy)]
pub struct PlacementSampler {
    pub config: PlacementConfig,
    /// Keep the player start zone (origin) clear
    pub guard_start_zone: bool,
}

impl PlacementSampler {
    pub fn new(config: PlacementConfig, guard_start_zone: bool) -> Self {
        Self {
            config,
            guard_start_zone,
        }
    }

    /// Planar half-extent the kind must stay strictly inside
    pub fn bound_for(&self, kind: ObjectKind) -> f32 {
        if kind.needs_reach() {
            self.config.reachable_half_extent()
        } else {
            self.config.scene_half_extent
        }
    }

    fn draw_candidate<R: Rng>(&self, rng: &mut R) -> Vec3 {
        let h = self.config.sample_half_extent;
        Vec3::new(rng.random_range(-h..h), rng.random_range(-h..h), 0.0)
    }

    /// Find a free spot for an object of `kind` and `size`.
    ///
    /// The spot is recorded in `registry` when the kind reserves space. Every
    /// draw counts against `max_attempts`, whether it failed the separation
    /// test or the bound.
    pub fn sample<R: Rng>(
        &self,
        rng: &mut R,
        registry: &mut PlacementRegistry,
        kind: ObjectKind,
        size: f32,
    ) -> Result<Vec3, SceneError> {
        let bound = self.bound_for(kind);
        let max_attempts = self.config.max_attempts;
        let r = self.config.separation_radius;

        for attempt in 1..=max_attempts {
            let mut candidate = self.draw_candidate(rng);
            if candidate.x.abs() >= bound || candidate.y.abs() >= bound {
                continue;
            }
            if self.guard_start_zone && planar_distance(candidate, Vec3::ZERO) <= r {
                continue;
            }

            candidate.z = kind.depth(size);
            let accepted = if kind.reserves_space() {
                registry.try_register(candidate, r)
            } else {
                !registry.collides(candidate, r)
            };
            if !accepted {
                continue;
            }
            log::trace!(
                "placed {} at ({:.3}, {:.3}) after {} draws",
                kind.as_str(),
                candidate.x,
                candidate.y,
                attempt
            );
            return Ok(candidate);
        }

        log::warn!(
            "No free spot for {} after {} draws ({} occupied, radius {})",
            kind.as_str(),
            max_attempts,
            registry.len(),
            r
        );
        Err(SceneError::PlacementExhausted {
            kind: kind.as_str().to_string(),
            attempts: max_attempts,
        })
    }
}

/// Random unit direction in the ground plane
pub fn random_direction<R: Rng>(rng: &mut R) -> Vec3 {
    let v = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
    v.try_normalize().unwrap_or(Vec2::X).extend(0.0)
}

/// Random tree size: 0.2, 0.3, 0.4 or 0.5
pub fn random_tree_size<R: Rng>(rng: &mut R) -> f32 {
    rng.random_range(2..6) as f32 / 10.0
}
