//! Campaign: the (profession, city) scoping container for prospects and runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::{CampaignMode, CampaignStatus};

/// Scoping unit for a prospecting run (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub profession: String,
    pub city: String,
    pub timezone: String,
    pub schedule_days: Vec<String>,
    pub schedule_times: Vec<(u8, u8)>,
    pub mode: CampaignMode,
    pub status: CampaignStatus,
    pub max_prospects: u32,
    pub created_at: DateTime<Utc>,
}

/// Default schedule: the fixed test-sweep grid from §4.10, expressed as the
/// days/times a freshly created campaign inherits unless overridden.
pub const DEFAULT_SCHEDULE_DAYS: &[&str] = &["wed", "fri", "sun"];
pub const DEFAULT_SCHEDULE_TIMES: &[(u8, u8)] = &[(9, 0), (13, 0), (20, 30)];

impl Campaign {
    /// Builds a new campaign with the fixed test-sweep schedule and
    /// `Europe/Rome` timezone, per §4.10.
    #[must_use]
    pub fn new(id: String, profession: String, city: String, max_prospects: u32, mode: CampaignMode) -> Self {
        Self {
            id,
            profession,
            city,
            timezone: "Europe/Rome".to_string(),
            schedule_days: DEFAULT_SCHEDULE_DAYS.iter().map(|s| (*s).to_string()).collect(),
            schedule_times: DEFAULT_SCHEDULE_TIMES.to_vec(),
            mode,
            status: CampaignStatus::Active,
            max_prospects,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.status, CampaignStatus::Active)
    }
}
