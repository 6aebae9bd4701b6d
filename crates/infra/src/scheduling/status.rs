//! Shared per-job status shape surfaced by both schedulers' `status()`
//! (§4.10): running flag plus, per job, its id, next-run timestamp, and
//! trigger description.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct JobStatus {
    pub id: String,
    pub trigger: String,
    pub next_run: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchedulerStatus {
    pub running: bool,
    pub jobs: Vec<JobStatus>,
}
