//! Manually triggered scoring pass over a campaign's tested prospects (§4.7, §6).

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use prospecting_core::ports::{ProspectRepository, TestRunRepository};
use prospecting_core::{can_transition, email_ok, score};
use prospecting_domain::ProspectStatus;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScoringRunRequest {
    pub campaign_id: String,
    #[serde(default)]
    pub prospect_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ScoringRunResponse {
    pub total: usize,
    pub scored: usize,
    pub eligible: usize,
}

pub async fn run_scoring(
    State(state): State<AppState>,
    Json(body): Json<ScoringRunRequest>,
) -> ApiResult<Json<ScoringRunResponse>> {
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
        None => {
            state
                .repository
                .list_prospects(&body.campaign_id, Some(ProspectStatus::Tested))
                .await?
        }
    };

    let mut scored = 0usize;
    let mut eligible = 0usize;

    for mut prospect in prospects.clone() {
        let runs = state.repository.list_runs(&prospect.id).await?;
        if runs.is_empty() {
            // Scoring never partially updates a prospect (§7): no runs, leave it unchanged.
            continue;
        }

        let email = email_ok(&runs);
        let result = score(&prospect, &runs, &email);

        prospect.ia_visibility_score = Some(result.score);
        prospect.score_justification = Some(result.justification);
        prospect.competitors_cited = result.stable_competitors;
        prospect.eligibility_flag = email.eligible;
        prospect.updated_at = Utc::now();

        if prospect.status == ProspectStatus::Tested
            && can_transition(ProspectStatus::Tested, ProspectStatus::Scored)
        {
            prospect.status = ProspectStatus::Scored;
        }

        state.repository.save_prospect(&prospect).await?;
        scored += 1;
        if email.eligible {
            eligible += 1;
        }
    }

    Ok(Json(ScoringRunResponse { total: prospects.len(), scored, eligible }))
}
