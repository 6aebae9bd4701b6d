//! Manually triggered test-sweep runs (§4.6, §6). The scheduled sweep lives
//! entirely in `prospecting_infra::scheduling`; this just exposes the same
//! `TestRunner` on demand.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DryRunQuery {
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub campaign_id: String,
    #[serde(default)]
    pub prospect_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct RunResponseError {
    pub prospect_id: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    pub total: usize,
    pub processed: usize,
    pub runs_created: usize,
    pub errors: Vec<RunResponseError>,
}

pub async fn run_ia_test(
    State(state): State<AppState>,
    Query(q): Query<DryRunQuery>,
    Json(body): Json<RunRequest>,
) -> ApiResult<Json<RunResponse>> {
    let summary = state.runner.run_for_campaign(&body.campaign_id, body.prospect_ids, q.dry_run).await?;

    Ok(Json(RunResponse {
        total: summary.total,
        processed: summary.processed,
        runs_created: summary.runs_created,
        errors: summary
            .errors
            .into_iter()
            .map(|e| RunResponseError { prospect_id: e.prospect_id, error: e.error })
            .collect(),
    }))
}
