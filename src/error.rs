//! Error types for scene population and configuration

use thiserror::Error;

use crate::sim::state::PropId;

/// Errors surfaced by scene population, relocation and config loading
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("curve `{name}` has {len} control points, at least 4 are required")]
    CurveTooShort { name: String, len: usize },

    #[error("separation radius must be positive and finite, got {0}")]
    InvalidSeparationRadius(f32),

    #[error("invalid scene bounds: {0}")]
    InvalidBounds(String),

    #[error("actor references unknown curve `{0}`")]
    UnknownCurve(String),

    #[error("no free spot for {kind} after {attempts} attempts")]
    PlacementExhausted { kind: String, attempts: u32 },

    #[error("prop {0:?} cannot be relocated")]
    UnknownProp(PropId),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SceneError {
    /// True for errors caused by unusable configuration rather than a bad call
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SceneError::CurveTooShort { .. }
                | SceneError::InvalidSeparationRadius(_)
                | SceneError::InvalidBounds(_)
                | SceneError::UnknownCurve(_)
                | SceneError::PlacementExhausted { .. }
                | SceneError::Parse(_)
        )
    }
}
