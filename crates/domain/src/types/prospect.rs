//! Prospect: the central entity tracked through the lifecycle (§3, §4.9).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::ProspectStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prospect {
    pub id: String,
    pub campaign_id: String,
    pub name: String,
    pub city: String,
    pub profession: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub reviews_count: Option<i64>,
    pub google_ads_active: Option<bool>,
    pub competitors_cited: Vec<String>,
    pub ia_visibility_score: Option<f64>,
    pub eligibility_flag: bool,
    pub landing_token: String,
    pub video_url: Option<String>,
    pub screenshot_url: Option<String>,
    pub status: ProspectStatus,
    pub score_justification: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prospect {
    /// Fresh prospect as created by a scan (§4.11), starting life `SCANNED`
    /// and immediately advanced to `SCHEDULED` by the caller once queued.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        campaign_id: String,
        name: String,
        city: String,
        profession: String,
        website: Option<String>,
        phone: Option<String>,
        landing_token: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            campaign_id,
            name,
            city,
            profession,
            website,
            phone,
            email: None,
            reviews_count: None,
            google_ads_active: None,
            competitors_cited: Vec::new(),
            ia_visibility_score: None,
            eligibility_flag: false,
            landing_token,
            video_url: None,
            screenshot_url: None,
            status: ProspectStatus::Scanned,
            score_justification: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True iff the READY_TO_SEND invariant holds (§3, §8): eligible, with
    /// both assets set.
    #[must_use]
    pub fn satisfies_ready_to_send_invariant(&self) -> bool {
        self.eligibility_flag
            && self.video_url.as_deref().is_some_and(|v| !v.is_empty())
            && self.screenshot_url.as_deref().is_some_and(|v| !v.is_empty())
    }
}
