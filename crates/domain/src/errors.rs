//! Error types used throughout the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The error kinds a caller outside the process can observe (see HTTP status
/// mapping in the api crate). Adapter failures never reach this type: they
/// are recovered locally and folded into `TestRun::notes`.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ProspectingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    GateBlocked(String),

    #[error("State conflict: {0}")]
    StateConflict(String),

    #[error("Authentication failed")]
    AuthFailed,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, ProspectingError>;
