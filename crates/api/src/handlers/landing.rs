//! Public, token-gated landing page (§6): `GET /couvreur?t={landing_token}`.

use axum::extract::{Query, State};
use axum::response::Html;
use prospecting_core::ports::ProspectRepository;
use prospecting_domain::ProspectingError;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LandingQuery {
    pub t: String,
}

fn escape_html(input: &str) -> String {
    input.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

pub async fn landing_page(
    State(state): State<AppState>,
    Query(q): Query<LandingQuery>,
) -> ApiResult<Html<String>> {
    if q.t.trim().is_empty() {
        return Err(ProspectingError::InvalidInput("missing landing token".into()).into());
    }

    let prospect = state
        .repository
        .get_prospect_by_token(&q.t)
        .await?
        .ok_or_else(|| ProspectingError::NotFound("landing token".into()))?;

    let top_competitor = prospect
        .competitors_cited
        .first()
        .cloned()
        .unwrap_or_else(|| "un concurrent local".to_string());

    let html = format!(
        "<!doctype html>\n<html lang=\"fr\">\n<head><meta charset=\"utf-8\"><title>{name} — visibilité IA</title></head>\n<body>\n<h1>{name} à {city}</h1>\n<p>Quand on demande à une IA qui contacter pour un {profession} à {city}, c'est <strong>{top_competitor}</strong> qui est recommandé.</p>\n</body>\n</html>\n",
        name = escape_html(&prospect.name),
        city = escape_html(&prospect.city),
        profession = escape_html(&prospect.profession),
        top_competitor = escape_html(&top_competitor),
    );

    Ok(Html(html))
}
