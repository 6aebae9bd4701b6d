//! # Prospecting API
//!
//! HTTP entry point: thin handlers over `prospecting-core`/`prospecting-infra`.
//!
//! This crate contains:
//! - The axum router and request/response shapes (§6)
//! - `AppState`, the process-wide dependency injection container
//! - `ApiError`, the `IntoResponse` mapping for `ProspectingError` (§7)
//!
//! ## Architecture
//! - Depends on `prospecting-domain`, `prospecting-core` and `prospecting-infra`
//! - Validates, delegates, serializes — no business logic lives here

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
