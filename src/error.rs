//! Arena error taxonomy
//!
//! Only configuration problems are errors. Stale contacts, early timers and
//! touch-end without touch-begin are tolerated inside the simulation and
//! never surface here.

use thiserror::Error;

use crate::sim::Category;

#[derive(Debug, Error)]
pub enum ArenaError {
    /// The monster catalog must contain at least one variant
    #[error("monster catalog is empty")]
    EmptyCatalog,

    /// A category has no entry in the collision matrix
    #[error("category {0:?} is not registered in the collision matrix")]
    UnregisteredCategory(Category),

    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("config io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArenaError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ArenaError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArenaError>;
