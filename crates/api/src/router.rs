//! Route table (§6): thin handlers wired onto one shared `AppState`.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, assets, campaigns, generate, ia_test, landing, prospects, scoring};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/campaign/create", post(campaigns::create_campaign))
        .route("/api/campaigns", get(campaigns::list_campaigns))
        .route("/api/campaign/{id}/status", get(campaigns::campaign_status))
        .route("/api/prospect-scan", post(prospects::prospect_scan))
        .route("/api/prospect-scan/csv", post(prospects::prospect_scan_csv))
        .route("/api/ia-test/run", post(ia_test::run_ia_test))
        .route("/api/prospect/{id}/runs", get(prospects::prospect_runs))
        .route("/api/prospect/{id}/score", get(prospects::prospect_score))
        .route("/api/scoring/run", post(scoring::run_scoring))
        .route("/api/prospect/{id}/assets", post(assets::set_prospect_assets))
        .route("/api/prospect/{id}/mark-ready", post(assets::mark_prospect_ready))
        .route("/api/generate/campaign", post(generate::generate_campaign))
        .route("/api/generate/prospect/{id}/audit", post(generate::generate_prospect_audit))
        .route("/api/generate/prospect/{id}/email", post(generate::generate_prospect_email))
        .route(
            "/api/generate/prospect/{id}/video-script",
            post(generate::generate_prospect_video_script),
        )
        .route("/couvreur", get(landing::landing_page))
        .route("/admin/campaign/{id}", get(admin::admin_campaign_view))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
