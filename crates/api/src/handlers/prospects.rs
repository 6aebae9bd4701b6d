//! Prospect scanning (manual and CSV) and per-prospect read endpoints (§6).

use axum::extract::{Multipart, Path, State};
use axum::Json;
use prospecting_core::ports::{CampaignRepository, ProspectRepository, TestRunRepository};
use prospecting_domain::{Prospect, ProspectStatus, ProspectingError, TestRun};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ManualProspectInput {
    pub name: String,
    pub city: String,
    pub profession: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProspectScanRequest {
    pub campaign_id: String,
    #[serde(default)]
    pub manual_prospects: Vec<ManualProspectInput>,
}

fn landing_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn new_scheduled_prospect(campaign_id: &str, input: ManualProspectInput) -> Prospect {
    let mut prospect = Prospect::new(
        Uuid::new_v4().to_string(),
        campaign_id.to_string(),
        input.name,
        input.city,
        input.profession,
        input.website,
        input.phone,
        landing_token(),
    );
    prospect.status = ProspectStatus::Scheduled;
    prospect
}

pub async fn prospect_scan(
    State(state): State<AppState>,
    Json(body): Json<ProspectScanRequest>,
) -> ApiResult<Json<Vec<Prospect>>> {
    if state.repository.get_campaign(&body.campaign_id).await?.is_none() {
        return Err(ProspectingError::NotFound(format!("campaign {}", body.campaign_id)).into());
    }

    let mut created = Vec::with_capacity(body.manual_prospects.len());
    for input in body.manual_prospects {
        let prospect = new_scheduled_prospect(&body.campaign_id, input);
        created.push(state.repository.create_prospect(prospect).await?);
    }

    Ok(Json(created))
}

/// Minimal CSV parsing (§9, out-of-scope note): only `name,city,profession`
/// and the optional `website,phone` columns are read.
fn parse_manual_prospects_csv(bytes: &[u8]) -> ApiResult<Vec<ManualProspectInput>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| ApiError(ProspectingError::InvalidInput(format!("invalid csv headers: {e}"))))?
        .clone();

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| ApiError(ProspectingError::InvalidInput(format!("invalid csv row: {e}"))))?;
        let get = |col: &str| -> Option<String> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(col))
                .and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let name = get("name")
            .ok_or_else(|| ApiError(ProspectingError::InvalidInput("missing name column".into())))?;
        let city = get("city")
            .ok_or_else(|| ApiError(ProspectingError::InvalidInput("missing city column".into())))?;
        let profession = get("profession").ok_or_else(|| {
            ApiError(ProspectingError::InvalidInput("missing profession column".into()))
        })?;

        out.push(ManualProspectInput {
            name,
            city,
            profession,
            website: get("website"),
            phone: get("phone"),
        });
    }

    Ok(out)
}

pub async fn prospect_scan_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Vec<Prospect>>> {
    let mut campaign_id: Option<String> = None;
    let mut csv_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(ProspectingError::InvalidInput(format!("invalid multipart body: {e}"))))?
    {
        match field.name().unwrap_or_default() {
            "campaign_id" => {
                campaign_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError(ProspectingError::InvalidInput(e.to_string())))?,
                );
            }
            "file" => {
                csv_bytes = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError(ProspectingError::InvalidInput(e.to_string())))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let campaign_id = campaign_id
        .ok_or_else(|| ApiError(ProspectingError::InvalidInput("missing campaign_id field".into())))?;
    let csv_bytes =
        csv_bytes.ok_or_else(|| ApiError(ProspectingError::InvalidInput("missing file field".into())))?;

    if state.repository.get_campaign(&campaign_id).await?.is_none() {
        return Err(ProspectingError::NotFound(format!("campaign {campaign_id}")).into());
    }

    let inputs = parse_manual_prospects_csv(&csv_bytes)?;
    let mut created = Vec::with_capacity(inputs.len());
    for input in inputs {
        let prospect = new_scheduled_prospect(&campaign_id, input);
        created.push(state.repository.create_prospect(prospect).await?);
    }

    Ok(Json(created))
}

pub async fn prospect_runs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<TestRun>>> {
    if state.repository.get_prospect(&id).await?.is_none() {
        return Err(ProspectingError::NotFound(format!("prospect {id}")).into());
    }
    Ok(Json(state.repository.list_runs(&id).await?))
}

#[derive(Debug, Serialize)]
pub struct ScoreSnapshot {
    pub status: String,
    pub score: Option<f64>,
    pub justification: Option<String>,
    pub eligibility_flag: bool,
}

pub async fn prospect_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ScoreSnapshot>> {
    let prospect = state
        .repository
        .get_prospect(&id)
        .await?
        .ok_or_else(|| ProspectingError::NotFound(format!("prospect {id}")))?;

    Ok(Json(ScoreSnapshot {
        status: prospect.status.to_string(),
        score: prospect.ia_visibility_score,
        justification: prospect.score_justification,
        eligibility_flag: prospect.eligibility_flag,
    }))
}
