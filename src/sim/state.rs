//! Scene state and population
//!
//! Everything the renderer needs lives here. A scene is populated in one go
//! from a `SceneConfig` and a seed; a reset builds a complete new population
//! and only replaces the old one once every placement has succeeded.

use std::rc::Rc;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::{ActorKind, ActorState};
use super::camera::{Camera, CameraMode};
use super::curve::Curve;
use super::effects::SmokeEffect;
use super::placement::{
    ObjectKind, PlacementRegistry, PlacementSampler, TreeType, random_direction,
    random_tree_size,
};
use super::weather::WeatherState;
use crate::config::SceneConfig;
use crate::error::SceneError;

/// Handle for a single static object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropId {
    Skull,
    Mushroom,
    Rock,
    Extra(usize),
    Tree(TreeType, usize),
}

/// A static object: tree, rock or prop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub position: Vec3,
    /// Unit heading in the ground plane
    pub direction: Vec3,
    pub size: f32,
}

/// Results of the user's picks since the last reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    /// Times the mushroom was caught (and escaped)
    pub catch_attempts: u32,
    pub ghost_visible: bool,
    /// Extra props drawn in their alternate colour
    pub highlight_extras: bool,
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub time: f32,
    pub objects: Vec<SceneObject>,
    pub actors: Vec<ActorState>,
    pub registry: Vec<Vec3>,
    pub camera: Camera,
    pub interaction: InteractionState,
    pub weather: WeatherState,
    pub smoke: Option<SmokeEffect>,
}

impl SceneSnapshot {
    /// Number of objects of `kind`
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }
}

/// Complete scene state (deterministic for a given seed and clock)
#[derive(Debug, Clone)]
pub struct ForestState {
    /// Seed of the first population, for reproducibility
    pub seed: u64,
    pub config: SceneConfig,
    /// Curve library shared across resets; actors index into it
    curves: Rc<[Curve]>,
    pub(crate) rng: Pcg32,
    pub registry: PlacementRegistry,
    /// Trees by type (see `TreeType::index`)
    pub trees: [Vec<SceneObject>; 4],
    pub extras: Vec<SceneObject>,
    pub skull: SceneObject,
    pub mushroom: SceneObject,
    pub rock: SceneObject,
    pub actors: Vec<ActorState>,
    pub camera: Camera,
    pub interaction: InteractionState,
    pub weather: WeatherState,
    pub smoke: Option<SmokeEffect>,
    /// Simulation time of the last tick
    pub time: f32,
}

/// Allocates object ids during one population pass
struct Builder<'a> {
    rng: &'a mut Pcg32,
    sampler: PlacementSampler,
    registry: PlacementRegistry,
    next_id: u32,
}

impl Builder<'_> {
    fn place(&mut self, kind: ObjectKind, size: f32) -> Result<SceneObject, SceneError> {
        let direction = random_direction(self.rng);
        let position = self
            .sampler
            .sample(self.rng, &mut self.registry, kind, size)?;
        let id = self.next_id;
        self.next_id += 1;
        Ok(SceneObject {
            id,
            kind,
            position,
            direction,
            size,
        })
    }

    fn tree(&mut self, tree_type: TreeType) -> Result<SceneObject, SceneError> {
        let size = random_tree_size(self.rng);
        self.place(ObjectKind::Tree(tree_type), size)
    }
}

impl ForestState {
    /// Validate `config` and populate a new scene
    pub fn populate(config: SceneConfig, seed: u64, now: f32) -> Result<Self, SceneError> {
        config.validate()?;
        let curves = Self::load_curves(&config)?;
        let rng = Pcg32::seed_from_u64(seed);
        Self::build(config, seed, curves, rng, now)
    }

    fn load_curves(config: &SceneConfig) -> Result<Rc<[Curve]>, SceneError> {
        let curves = config
            .curves
            .iter()
            .map(|c| Curve::try_from(c.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(curves.into())
    }

    /// Whether the loaded curve library still matches `config.curves`
    fn curves_match_config(&self) -> bool {
        self.curves.len() == self.config.curves.len()
            && self
                .curves
                .iter()
                .zip(&self.config.curves)
                .all(|(curve, c)| curve.name() == c.name && curve.points() == c.points.as_slice())
    }

    fn build(
        config: SceneConfig,
        seed: u64,
        curves: Rc<[Curve]>,
        mut rng: Pcg32,
        now: f32,
    ) -> Result<Self, SceneError> {
        let camera = Camera::new(CameraMode::default(), now);
        let mut builder = Builder {
            rng: &mut rng,
            sampler: PlacementSampler::new(config.placement, camera.mode.guards_start_zone()),
            registry: PlacementRegistry::new(),
            next_id: 1,
        };

        let skull = builder.place(ObjectKind::Skull, config.skull_size)?;
        let mushroom = builder.place(ObjectKind::Mushroom, config.mushroom_size)?;
        let rock = builder.place(ObjectKind::Rock, config.rock_size)?;

        let mut trees: [Vec<SceneObject>; 4] = Default::default();
        for tree_type in TreeType::ALL {
            let count = config.tree_counts[tree_type.index()];
            let list = &mut trees[tree_type.index()];
            list.reserve(count);
            for _ in 0..count {
                list.push(builder.tree(tree_type)?);
            }
        }

        let extras = (0..config.extra_prop_count)
            .map(|_| builder.place(ObjectKind::ExtraProp, config.extra_prop_size))
            .collect::<Result<Vec<_>, _>>()?;

        let registry = builder.registry;

        let mut actors = Vec::with_capacity(config.actors.len());
        for actor_config in &config.actors {
            let curve = curves
                .iter()
                .position(|c| c.name() == actor_config.curve)
                .ok_or_else(|| SceneError::UnknownCurve(actor_config.curve.clone()))?;
            let mut actor = ActorState::new(
                actor_config.kind,
                curve,
                actor_config.speed,
                actor_config.size,
                now,
            );
            actor.update(&curves[curve], now);
            actors.push(actor);
        }

        log::info!(
            "Scene populated: {} trees, {} extras, {} actors, {} occupied spots",
            trees.iter().map(Vec::len).sum::<usize>(),
            extras.len(),
            actors.len(),
            registry.len()
        );

        Ok(Self {
            seed,
            config,
            curves,
            rng,
            registry,
            trees,
            extras,
            skull,
            mushroom,
            rock,
            actors,
            camera,
            interaction: InteractionState::default(),
            weather: WeatherState::default(),
            smoke: None,
            time: now,
        })
    }

    /// Tear down and repopulate from the current config.
    ///
    /// The config is validated again (it may have been edited since the
    /// last population). On error the current scene is left exactly as it
    /// was.
    pub fn reset(&mut self, now: f32) -> Result<(), SceneError> {
        self.config.validate()?;
        let curves = if self.curves_match_config() {
            Rc::clone(&self.curves)
        } else {
            log::debug!("Curve library changed, reloading");
            Self::load_curves(&self.config)?
        };
        let mut fresh = Self::build(self.config.clone(), self.seed, curves, self.rng.clone(), now)?;
        fresh.weather = self.weather.after_reset();
        *self = fresh;
        log::info!("Scene reset at t={now:.3}");
        Ok(())
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Move every actor along its curve to `now`
    pub fn update_actors(&mut self, now: f32) {
        for actor in &mut self.actors {
            actor.update(&self.curves[actor.curve], now);
        }
    }

    /// Curve followed by `actor`
    pub fn curve_for(&self, actor: &ActorState) -> &Curve {
        &self.curves[actor.curve]
    }

    /// Sampler configured for the current camera
    pub fn sampler(&self) -> PlacementSampler {
        PlacementSampler::new(self.config.placement, self.camera.mode.guards_start_zone())
    }

    pub fn object(&self, id: PropId) -> Option<&SceneObject> {
        match id {
            PropId::Skull => Some(&self.skull),
            PropId::Mushroom => Some(&self.mushroom),
            PropId::Rock => Some(&self.rock),
            PropId::Extra(i) => self.extras.get(i),
            PropId::Tree(t, i) => self.trees[t.index()].get(i),
        }
    }

    /// All static objects in a stable order
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        [&self.skull, &self.mushroom, &self.rock]
            .into_iter()
            .chain(self.trees.iter().flatten())
            .chain(self.extras.iter())
    }

    pub fn ghost(&self) -> Option<&ActorState> {
        self.actors.iter().find(|a| a.kind == ActorKind::Ghost)
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            time: self.time,
            objects: self.objects().cloned().collect(),
            actors: self.actors.clone(),
            registry: self.registry.positions().to_vec(),
            camera: self.camera.clone(),
            interaction: self.interaction,
            weather: self.weather,
            smoke: self.smoke,
        }
    }
}

/// Populate a scene from `config`
pub fn populate_scene(config: SceneConfig, seed: u64, now: f32) -> Result<ForestState, SceneError> {
    ForestState::populate(config, seed, now)
}

/// Reset `state` and return the new scene
pub fn reset_scene(state: &mut ForestState, now: f32) -> Result<SceneSnapshot, SceneError> {
    state.reset(now)?;
    Ok(state.snapshot())
}
