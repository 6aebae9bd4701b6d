//! # Prospecting Domain
//!
//! Pure data types, error kinds and configuration shapes for the prospect
//! lifecycle engine.
//!
//! - No dependencies on other engine crates.
//! - No I/O: this crate only defines shapes, never reads a file or a socket.

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

pub use config::Config;
pub use errors::{ProspectingError, Result};
pub use types::*;
