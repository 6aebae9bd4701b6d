//! Asset recording and the READY_TO_SEND gate (§4.8, §6).

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use prospecting_core::ports::ProspectRepository;
use prospecting_core::{mark_ready_to_send, set_assets};
use prospecting_domain::ProspectingError;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetAssetsRequest {
    pub video_url: String,
    pub screenshot_url: String,
}

#[derive(Debug, Serialize)]
pub struct ProspectSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub video_url: Option<String>,
    pub screenshot_url: Option<String>,
}

pub async fn set_prospect_assets(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SetAssetsRequest>,
) -> ApiResult<Json<ProspectSummary>> {
    let mut prospect = state
        .repository
        .get_prospect(&id)
        .await?
        .ok_or_else(|| ProspectingError::NotFound(format!("prospect {id}")))?;

    set_assets(
        &mut prospect.status,
        &mut prospect.video_url,
        &mut prospect.screenshot_url,
        &body.video_url,
        &body.screenshot_url,
    )?;
    prospect.updated_at = Utc::now();
    state.repository.save_prospect(&prospect).await?;

    Ok(Json(ProspectSummary {
        id: prospect.id,
        name: prospect.name,
        status: prospect.status.to_string(),
        video_url: prospect.video_url,
        screenshot_url: prospect.screenshot_url,
    }))
}

#[derive(Debug, Serialize)]
pub struct MarkReadyResponse {
    pub landing_url: String,
}

pub async fn mark_prospect_ready(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MarkReadyResponse>> {
    let mut prospect = state
        .repository
        .get_prospect(&id)
        .await?
        .ok_or_else(|| ProspectingError::NotFound(format!("prospect {id}")))?;

    mark_ready_to_send(
        &mut prospect.status,
        prospect.video_url.as_deref(),
        prospect.screenshot_url.as_deref(),
        prospect.eligibility_flag,
    )?;
    prospect.updated_at = Utc::now();
    state.repository.save_prospect(&prospect).await?;

    let landing_url = format!("{}/couvreur?t={}", state.config.base_url, prospect.landing_token);
    Ok(Json(MarkReadyResponse { landing_url }))
}
