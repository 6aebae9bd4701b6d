//! Admin campaign view (§6): guarded by `X-Admin-Token` or `?token=`.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use prospecting_core::ports::{CampaignRepository, ProspectRepository};
use prospecting_domain::ProspectingError;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    #[serde(default)]
    pub token: Option<String>,
}

fn escape_html(input: &str) -> String {
    input.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn check_admin_token(headers: &HeaderMap, query_token: Option<&str>, expected: &str) -> ApiResult<()> {
    let header_token = headers.get(ADMIN_TOKEN_HEADER).and_then(|v| v.to_str().ok());
    let provided = header_token.or(query_token);

    match provided {
        Some(token) if token == expected => Ok(()),
        _ => Err(ProspectingError::AuthFailed.into()),
    }
}

pub async fn admin_campaign_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(q): Query<AdminQuery>,
    headers: HeaderMap,
) -> ApiResult<Html<String>> {
    check_admin_token(&headers, q.token.as_deref(), &state.config.admin_token)?;

    let campaign = state
        .repository
        .get_campaign(&id)
        .await?
        .ok_or_else(|| ProspectingError::NotFound(format!("campaign {id}")))?;
    let prospects = state.repository.list_prospects(&id, None).await?;

    let mut rows = String::new();
    for p in &prospects {
        rows.push_str(&format!(
            "<tr><td>{name}</td><td>{city}</td><td>{status}</td><td>{score}</td><td>{eligible}</td></tr>\n",
            name = escape_html(&p.name),
            city = escape_html(&p.city),
            status = escape_html(&p.status.to_string()),
            score = p.ia_visibility_score.map(|s| s.to_string()).unwrap_or_else(|| "—".to_string()),
            eligible = if p.eligibility_flag { "oui" } else { "non" },
        ));
    }

    let html = format!(
        "<!doctype html>\n<html lang=\"fr\">\n<head><meta charset=\"utf-8\"><title>Campagne {profession} — {city}</title></head>\n<body>\n<h1>{profession} à {city}</h1>\n<p>{count} prospects</p>\n<table border=\"1\"><thead><tr><th>Nom</th><th>Ville</th><th>Statut</th><th>Score</th><th>Éligible</th></tr></thead><tbody>\n{rows}</tbody></table>\n</body>\n</html>\n",
        profession = escape_html(&campaign.profession),
        city = escape_html(&campaign.city),
        count = prospects.len(),
        rows = rows,
    );

    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};

    use super::*;

    #[test]
    fn header_token_wins_over_query_token() {
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_TOKEN_HEADER, HeaderValue::from_static("right"));
        assert!(check_admin_token(&headers, Some("wrong"), "right").is_ok());
    }

    #[test]
    fn query_token_is_accepted_when_no_header_present() {
        let headers = HeaderMap::new();
        assert!(check_admin_token(&headers, Some("right"), "right").is_ok());
    }

    #[test]
    fn mismatched_token_is_rejected() {
        let headers = HeaderMap::new();
        let err = check_admin_token(&headers, Some("wrong"), "right").unwrap_err();
        assert!(matches!(err.0, ProspectingError::AuthFailed));
    }

    #[test]
    fn missing_token_is_rejected() {
        let headers = HeaderMap::new();
        let err = check_admin_token(&headers, None, "right").unwrap_err();
        assert!(matches!(err.0, ProspectingError::AuthFailed));
    }
}
