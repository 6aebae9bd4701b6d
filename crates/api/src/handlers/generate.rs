//! Deliverable generation endpoints (§4.12, §6).

use std::path::Path as FsPath;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use prospecting_core::ports::{ProspectRepository, TestRunRepository};
use prospecting_domain::ProspectingError;
use prospecting_infra::deliverables::SendQueueEntry;
use prospecting_infra::write_send_queue_csv;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateCampaignRequest {
    pub campaign_id: String,
    #[serde(default)]
    pub prospect_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct GenerateCampaignResponse {
    pub generated: usize,
    pub send_queue_csv: String,
    pub prospect_ids: Vec<String>,
}

pub async fn generate_campaign(
    State(state): State<AppState>,
    Json(body): Json<GenerateCampaignRequest>,
) -> ApiResult<Json<GenerateCampaignResponse>> {
    use prospecting_domain::ProspectStatus;

    let prospects = match body.prospect_ids {
        Some(ids) => {
            let mut out = Vec::with_capacity(ids.len());
            for id in ids {
                if let Some(p) = state.repository.get_prospect(&id).await? {
                    out.push(p);
                }
            }
            out
        }
        None => state
            .repository
            .list_prospects(&body.campaign_id, Some(ProspectStatus::ReadyAssets))
            .await?
            .into_iter()
            .filter(|p| p.eligibility_flag)
            .collect(),
    };

    let mut eligible_deliverables = Vec::new();
    for prospect in prospects.iter().filter(|p| p.eligibility_flag) {
        let runs = state.repository.list_runs(&prospect.id).await?;
        let d = state.generator.generate_for_prospect(
            prospect,
            &runs,
            &state.config.base_url,
            &state.config.sender_signature,
        )?;
        eligible_deliverables.push((prospect, d));
    }

    let entries: Vec<SendQueueEntry<'_>> = eligible_deliverables
        .iter()
        .map(|(prospect, d)| SendQueueEntry {
            prospect,
            subject: &d.subject,
            landing_url: &d.landing_url,
        })
        .collect();

    let csv_path = write_send_queue_csv(FsPath::new("send_queue"), &entries, Utc::now())?;

    Ok(Json(GenerateCampaignResponse {
        generated: prospects.len(),
        send_queue_csv: csv_path.display().to_string(),
        prospect_ids: prospects.into_iter().map(|p| p.id).collect(),
    }))
}

async fn load_prospect_and_runs(
    state: &AppState,
    id: &str,
) -> ApiResult<(prospecting_domain::Prospect, Vec<prospecting_domain::TestRun>)> {
    let prospect = state
        .repository
        .get_prospect(id)
        .await?
        .ok_or_else(|| ProspectingError::NotFound(format!("prospect {id}")))?;
    let runs = state.repository.list_runs(id).await?;
    Ok((prospect, runs))
}

#[derive(Debug, Serialize)]
pub struct GeneratedFileResponse {
    pub path: String,
}

pub async fn generate_prospect_audit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<GeneratedFileResponse>> {
    let (prospect, runs) = load_prospect_and_runs(&state, &id).await?;
    let path = state.generator.regenerate_audit(&prospect, &runs, &state.config.base_url)?;
    Ok(Json(GeneratedFileResponse { path: path.display().to_string() }))
}

#[derive(Debug, Serialize)]
pub struct GeneratedEmailResponse {
    pub email_json: String,
    pub email_body: String,
    pub subject: String,
}

pub async fn generate_prospect_email(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<GeneratedEmailResponse>> {
    let (prospect, runs) = load_prospect_and_runs(&state, &id).await?;
    let (json_path, body_path, subject) = state.generator.regenerate_email(
        &prospect,
        &runs,
        &state.config.base_url,
        &state.config.sender_signature,
    )?;
    Ok(Json(GeneratedEmailResponse {
        email_json: json_path.display().to_string(),
        email_body: body_path.display().to_string(),
        subject,
    }))
}

pub async fn generate_prospect_video_script(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<GeneratedFileResponse>> {
    let (prospect, runs) = load_prospect_and_runs(&state, &id).await?;
    let path = state.generator.regenerate_video_script(&prospect, &runs, &state.config.base_url)?;
    Ok(Json(GeneratedFileResponse { path: path.display().to_string() }))
}
