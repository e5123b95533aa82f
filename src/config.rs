//! Scene configuration
//!
//! Authored, read-only data: bounds, counts, sizes and the curve tables the
//! actors follow. Stored as JSON alongside the scene assets.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::curves;
use crate::error::SceneError;
use crate::sim::actor::{ActorKind, BatKind};

/// A named closed path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    pub name: String,
    pub points: Vec<Vec3>,
}

/// An actor spawned on every (re)population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorConfig {
    pub kind: ActorKind,
    /// Name of the curve in `SceneConfig::curves`
    pub curve: String,
    pub speed: f32,
    pub size: f32,
}

/// Placement area and separation rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Objects stay strictly inside `[-half_extent, half_extent]²`
    pub scene_half_extent: f32,
    /// Candidates are drawn from `[-sample_half_extent, sample_half_extent)²`
    pub sample_half_extent: f32,
    /// Reachable props stay inside `scene_half_extent - reach_margin`
    pub reach_margin: f32,
    /// Minimum planar distance between registered positions
    pub separation_radius: f32,
    /// Candidate draws allowed for one object
    pub max_attempts: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            scene_half_extent: SCENE_HALF_EXTENT,
            sample_half_extent: SAMPLE_HALF_EXTENT,
            reach_margin: REACH_MARGIN,
            separation_radius: SEPARATION_RADIUS,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl PlacementConfig {
    /// Bound for props that must stay reachable on foot
    pub fn reachable_half_extent(&self) -> f32 {
        self.scene_half_extent - self.reach_margin
    }
}

/// Complete scene description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub placement: PlacementConfig,
    /// Tree counts by type (1-4)
    pub tree_counts: [usize; 4],
    pub extra_prop_count: usize,
    pub skull_size: f32,
    pub mushroom_size: f32,
    pub rock_size: f32,
    pub extra_prop_size: f32,
    pub curves: Vec<CurveConfig>,
    pub actors: Vec<ActorConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let curves = curves::authored()
            .into_iter()
            .map(|(name, points)| CurveConfig { name, points })
            .collect();

        let bats = [
            (BatKind::Small, curves::BAT_01),
            (BatKind::Medium, curves::BAT_02),
            (BatKind::Large, curves::BAT_03),
        ];
        let mut actors: Vec<ActorConfig> = bats
            .iter()
            .enumerate()
            .map(|(i, (kind, curve))| ActorConfig {
                kind: ActorKind::Bat(*kind),
                curve: curve.to_string(),
                speed: BAT_SPEEDS[i],
                size: BAT_SIZES[i],
            })
            .collect();
        actors.push(ActorConfig {
            kind: ActorKind::Ghost,
            curve: curves::GHOST.to_string(),
            speed: GHOST_SPEED,
            size: GHOST_SIZE,
        });

        Self {
            placement: PlacementConfig::default(),
            tree_counts: TREE_COUNTS,
            extra_prop_count: EXTRA_PROP_COUNT,
            skull_size: SKULL_SIZE,
            mushroom_size: MUSHROOM_SIZE,
            rock_size: ROCK_SIZE,
            extra_prop_size: EXTRA_PROP_SIZE,
            curves,
            actors,
        }
    }
}

impl SceneConfig {
    /// Parse a config from JSON text and validate it
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Scene config saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Total number of objects that reserve a spot in the registry
    pub fn registered_object_count(&self) -> usize {
        // skull + rock + trees + extras; the mushroom never registers
        2 + self.tree_counts.iter().sum::<usize>() + self.extra_prop_count
    }

    /// Reject configurations the sampler or curve evaluator cannot work with
    pub fn validate(&self) -> Result<(), SceneError> {
        let p = &self.placement;
        let r = p.separation_radius;
        if !r.is_finite() || r <= 0.0 {
            return Err(SceneError::InvalidSeparationRadius(r));
        }
        if !p.scene_half_extent.is_finite() || p.scene_half_extent <= 0.0 {
            return Err(SceneError::InvalidBounds(format!(
                "scene half-extent {} must be positive",
                p.scene_half_extent
            )));
        }
        if !p.sample_half_extent.is_finite() || p.sample_half_extent <= 0.0 {
            return Err(SceneError::InvalidBounds(format!(
                "sample half-extent {} must be positive",
                p.sample_half_extent
            )));
        }
        if p.sample_half_extent < p.scene_half_extent {
            return Err(SceneError::InvalidBounds(format!(
                "sample half-extent {} does not cover the scene half-extent {}",
                p.sample_half_extent, p.scene_half_extent
            )));
        }
        if p.max_attempts == 0 {
            return Err(SceneError::InvalidBounds(
                "max placement attempts must be at least 1".to_string(),
            ));
        }
        if p.reach_margin < 0.0 || p.reachable_half_extent() <= 0.0 {
            return Err(SceneError::InvalidBounds(format!(
                "reach margin {} leaves no reachable area",
                p.reach_margin
            )));
        }

        for curve in &self.curves {
            if curve.points.len() < 4 {
                return Err(SceneError::CurveTooShort {
                    name: curve.name.clone(),
                    len: curve.points.len(),
                });
            }
        }
        for actor in &self.actors {
            if !self.curves.iter().any(|c| c.name == actor.curve) {
                return Err(SceneError::UnknownCurve(actor.curve.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SceneConfig::default();
        config.validate().unwrap();
        assert_eq!(config.curves.len(), 4);
        assert_eq!(config.actors.len(), 4);
        assert_eq!(config.registered_object_count(), 2 + 77 + 5);
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let mut config = SceneConfig::default();
        config.placement.separation_radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SceneError::InvalidSeparationRadius(_))
        ));
        config.placement.separation_radius = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unusable_sampling_setup() {
        let mut config = SceneConfig::default();
        config.placement.max_attempts = 0;
        assert!(matches!(config.validate(), Err(SceneError::InvalidBounds(_))));

        let mut config = SceneConfig::default();
        config.placement.sample_half_extent = 2.5;
        assert!(matches!(config.validate(), Err(SceneError::InvalidBounds(_))));

        config.placement.sample_half_extent = 3.0;
        config.validate().unwrap();
    }

    #[test]
    fn test_rejects_short_curve() {
        let mut config = SceneConfig::default();
        config.curves[3].points.truncate(3);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SceneError::CurveTooShort { len: 3, .. }));
    }

    #[test]
    fn test_rejects_unknown_curve_reference() {
        let mut config = SceneConfig::default();
        config.actors[0].curve = "owl".into();
        assert!(matches!(
            config.validate(),
            Err(SceneError::UnknownCurve(name)) if name == "owl"
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_curves() {
        let config = SceneConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = SceneConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_bad_json_is_configuration_error() {
        let err = SceneConfig::from_json("{ not json").unwrap_err();
        assert!(err.is_configuration());
    }
}
