//! Campaign creation, listing and status (§6).

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use prospecting_core::ports::{CampaignRepository, ProspectRepository};
use prospecting_domain::{Campaign, CampaignMode, ProspectingError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::state::{AppState, SchedulerSnapshot};

#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    pub profession: String,
    pub city: String,
    pub max_prospects: u32,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CampaignSummary {
    pub id: String,
    pub profession: String,
    pub city: String,
    pub status: String,
    pub mode: String,
    pub max_prospects: u32,
}

impl From<&Campaign> for CampaignSummary {
    fn from(c: &Campaign) -> Self {
        Self {
            id: c.id.clone(),
            profession: c.profession.clone(),
            city: c.city.clone(),
            status: c.status.to_string(),
            mode: c.mode.to_string(),
            max_prospects: c.max_prospects,
        }
    }
}

pub async fn create_campaign(
    State(state): State<AppState>,
    Json(body): Json<CreateCampaignRequest>,
) -> ApiResult<Json<CampaignSummary>> {
    if body.profession.trim().is_empty() || body.city.trim().is_empty() {
        return Err(ProspectingError::InvalidInput("profession et city sont obligatoires".into()).into());
    }

    let mode = match body.mode.as_deref() {
        Some(raw) => raw
            .parse::<CampaignMode>()
            .map_err(|_| ProspectingError::InvalidInput(format!("mode inconnu: {raw}")))?,
        None => CampaignMode::AutoTest,
    };

    let campaign = Campaign::new(
        Uuid::new_v4().to_string(),
        body.profession,
        body.city,
        body.max_prospects,
        mode,
    );

    let created = state.repository.create_campaign(campaign).await?;
    Ok(Json(CampaignSummary::from(&created)))
}

pub async fn list_campaigns(State(state): State<AppState>) -> ApiResult<Json<Vec<CampaignSummary>>> {
    let campaigns = state.repository.list_campaigns().await?;
    Ok(Json(campaigns.iter().map(CampaignSummary::from).collect()))
}

#[derive(Debug, Serialize)]
pub struct CampaignStatusResponse {
    pub campaign: CampaignSummary,
    pub counts: HashMap<String, usize>,
    pub scheduler: SchedulerSnapshot,
}

pub async fn campaign_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CampaignStatusResponse>> {
    let campaign = state
        .repository
        .get_campaign(&id)
        .await?
        .ok_or_else(|| ProspectingError::NotFound(format!("campaign {id}")))?;

    let prospects = state.repository.list_prospects(&id, None).await?;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for prospect in &prospects {
        *counts.entry(prospect.status.to_string()).or_insert(0) += 1;
    }

    Ok(Json(CampaignStatusResponse {
        campaign: CampaignSummary::from(&campaign),
        counts,
        scheduler: state.scheduler_snapshot().await,
    }))
}
