//! Per-object instance records for the renderer
//!
//! The renderer uploads these as one instance buffer per frame; `kind`
//! selects the mesh, `model` places it.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::sim::actor::{ActorKind, BatKind};
use crate::sim::curve::align_object;
use crate::sim::placement::{ObjectKind, TreeType};
use crate::sim::state::SceneSnapshot;

/// Mesh selectors
pub mod kinds {
    pub const TREE_01: u32 = 1;
    pub const TREE_02: u32 = 2;
    pub const TREE_03: u32 = 3;
    pub const TREE_04: u32 = 4;
    pub const SKULL: u32 = 10;
    pub const MUSHROOM: u32 = 11;
    pub const ROCK: u32 = 12;
    pub const EXTRA_PROP: u32 = 13;
    pub const BAT_SMALL: u32 = 20;
    pub const BAT_MEDIUM: u32 = 21;
    pub const BAT_LARGE: u32 = 22;
    pub const GHOST: u32 = 23;
    pub const SMOKE: u32 = 30;
}

/// Draw with the alternate colour
pub const FLAG_HIGHLIGHT: u32 = 1;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub model: [[f32; 4]; 4],
    pub kind: u32,
    pub flags: u32,
    /// Sprite-sheet frame (billboards only)
    pub frame: u32,
    pub _pad: u32,
}

impl InstanceData {
    pub fn new(model: Mat4, kind: u32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            kind,
            flags: 0,
            frame: 0,
            _pad: 0,
        }
    }

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }
}

fn object_kind(kind: ObjectKind) -> u32 {
    match kind {
        ObjectKind::Tree(TreeType::One) => kinds::TREE_01,
        ObjectKind::Tree(TreeType::Two) => kinds::TREE_02,
        ObjectKind::Tree(TreeType::Three) => kinds::TREE_03,
        ObjectKind::Tree(TreeType::Four) => kinds::TREE_04,
        ObjectKind::Skull => kinds::SKULL,
        ObjectKind::Mushroom => kinds::MUSHROOM,
        ObjectKind::Rock => kinds::ROCK,
        ObjectKind::ExtraProp => kinds::EXTRA_PROP,
    }
}

fn actor_kind(kind: ActorKind) -> u32 {
    match kind {
        ActorKind::Bat(BatKind::Small) => kinds::BAT_SMALL,
        ActorKind::Bat(BatKind::Medium) => kinds::BAT_MEDIUM,
        ActorKind::Bat(BatKind::Large) => kinds::BAT_LARGE,
        ActorKind::Ghost => kinds::GHOST,
    }
}

/// Oriented, uniformly scaled model matrix
fn model_matrix(position: Vec3, front: Vec3, size: f32) -> Mat4 {
    align_object(position, front, Vec3::Z) * Mat4::from_scale(Vec3::splat(size))
}

impl SceneSnapshot {
    /// Instance records for everything visible in this snapshot
    pub fn instances(&self) -> Vec<InstanceData> {
        let mut out = Vec::with_capacity(self.objects.len() + self.actors.len() + 1);

        for obj in &self.objects {
            let flags = if obj.kind == ObjectKind::ExtraProp && self.interaction.highlight_extras {
                FLAG_HIGHLIGHT
            } else {
                0
            };
            let model = model_matrix(obj.position, obj.direction, obj.size);
            out.push(InstanceData::new(model, object_kind(obj.kind)).with_flags(flags));
        }

        for actor in &self.actors {
            if actor.kind == ActorKind::Ghost && !self.interaction.ghost_visible {
                continue;
            }
            let model = model_matrix(actor.position, actor.direction, actor.size);
            out.push(InstanceData::new(model, actor_kind(actor.kind)));
        }

        if let Some(smoke) = &self.smoke {
            let model = Mat4::from_translation(smoke.billboard.position)
                * Mat4::from_scale(Vec3::splat(smoke.billboard.size));
            let mut instance = InstanceData::new(model, kinds::SMOKE);
            instance.frame = smoke.animation.frame();
            out.push(instance);
        }

        out
    }
}
