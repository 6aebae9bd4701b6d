//! # Prospecting Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Text normalization, matching and entity extraction
//! - The query template bank
//! - The lifecycle state machine
//! - Scoring and the asset gate
//! - The test runner (model/query fan-out)
//! - Port/adapter interfaces (traits) that infra implements
//!
//! ## Architecture Principles
//! - Only depends on `prospecting-domain`
//! - No database, HTTP, or scheduler code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod gate;
pub mod lifecycle;
pub mod ports;
pub mod queries;
pub mod scoring;
pub mod test_runner;
pub mod text;

pub use gate::{mark_ready_to_send, set_assets};
pub use lifecycle::can_transition;
pub use ports::{
    CampaignRepository, ModelAdapter, ModelAdapterRegistry, ProspectRepository, Repository,
    TestRunRepository,
};
pub use queries::queries_for;
pub use scoring::{email_ok, score, stable_competitors, EmailOk, ScoreResult};
pub use test_runner::{CampaignRunSummary, ProspectRunError, TestRunner};
