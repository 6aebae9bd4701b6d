//! Campaign-level send-queue export (§4.12): one
//! `send_queue_<UTC-YYYYMMDD-HHMM>.csv` per `delivery_generate` call, with
//! a fixed, deterministic column set.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use prospecting_domain::{Prospect, ProspectingError, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SendQueueRow<'a> {
    prospect_id: &'a str,
    name: &'a str,
    city: &'a str,
    profession: &'a str,
    email: &'a str,
    phone: &'a str,
    website: &'a str,
    score: String,
    competitor_1: &'a str,
    competitor_2: &'a str,
    subject: &'a str,
    landing_url: &'a str,
    video_url: &'a str,
    status: String,
}

/// One row of CSV input: a prospect plus the subject/landing URL already
/// computed by [`crate::deliverables::DeliverableGenerator`].
pub struct SendQueueEntry<'a> {
    pub prospect: &'a Prospect,
    pub subject: &'a str,
    pub landing_url: &'a str,
}

/// Writes `send_queue_<timestamp>.csv` under `base_dir` and returns its path.
pub fn write_send_queue_csv(
    base_dir: &Path,
    entries: &[SendQueueEntry<'_>],
    generated_at: DateTime<Utc>,
) -> Result<PathBuf> {
    std::fs::create_dir_all(base_dir)
        .map_err(|e| ProspectingError::Internal(format!("failed to create send queue dir: {e}")))?;

    let filename = format!("send_queue_{}.csv", generated_at.format("%Y%m%d_%H%M"));
    let path = base_dir.join(filename);

    let mut writer = csv::Writer::from_path(&path)
        .map_err(|e| ProspectingError::Internal(format!("failed to create csv writer: {e}")))?;

    for entry in entries {
        let prospect = entry.prospect;
        if !prospect.eligibility_flag {
            continue;
        }
        let mut competitors = prospect.competitors_cited.iter();
        let row = SendQueueRow {
            prospect_id: &prospect.id,
            name: &prospect.name,
            city: &prospect.city,
            profession: &prospect.profession,
            email: prospect.email.as_deref().unwrap_or(""),
            phone: prospect.phone.as_deref().unwrap_or(""),
            website: prospect.website.as_deref().unwrap_or(""),
            score: prospect.ia_visibility_score.map(|s| s.to_string()).unwrap_or_default(),
            competitor_1: competitors.next().map(String::as_str).unwrap_or(""),
            competitor_2: competitors.next().map(String::as_str).unwrap_or(""),
            subject: entry.subject,
            landing_url: entry.landing_url,
            video_url: prospect.video_url.as_deref().unwrap_or(""),
            status: prospect.status.to_string(),
        };

        writer
            .serialize(row)
            .map_err(|e| ProspectingError::Internal(format!("failed to write csv row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| ProspectingError::Internal(format!("failed to flush csv writer: {e}")))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use prospecting_domain::ProspectStatus;
    use tempfile::TempDir;

    use super::*;

    fn prospect() -> Prospect {
        Prospect {
            id: "p1".into(),
            campaign_id: "c1".into(),
            name: "Toiture Martin".into(),
            city: "Lyon".into(),
            profession: "couvreur".into(),
            website: Some("https://martin-toiture.fr".into()),
            phone: Some("0600000000".into()),
            email: Some("contact@martin-toiture.fr".into()),
            reviews_count: None,
            google_ads_active: None,
            competitors_cited: vec!["Couverture Dupont".into(), "Toiture Leroy".into()],
            ia_visibility_score: Some(7.5),
            eligibility_flag: true,
            landing_token: "tok".repeat(8),
            video_url: Some("https://cdn.example/video.mp4".into()),
            screenshot_url: Some("https://cdn.example/shot.png".into()),
            status: ProspectStatus::ReadyAssets,
            score_justification: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn writes_csv_with_deterministic_filename_and_columns() {
        let dir = TempDir::new().unwrap();
        let p = prospect();
        let entries = vec![SendQueueEntry {
            prospect: &p,
            subject: "À Lyon, ChatGPT recommande Couverture Dupont. Pas vous.",
            landing_url: "https://base.example/couvreur?t=tok",
        }];

        let generated_at = Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        let path = write_send_queue_csv(dir.path(), &entries, generated_at).unwrap();

        assert_eq!(path.file_name().unwrap(), "send_queue_20260305_0900.csv");
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("prospect_id,name,city,profession,email,phone,website,score,competitor_1,competitor_2,subject,landing_url,video_url,status"));
        assert!(contents.contains("Couverture Dupont"));
        assert!(contents.contains("Toiture Leroy"));
    }

    #[test]
    fn skips_ineligible_prospects() {
        let dir = TempDir::new().unwrap();
        let mut ineligible = prospect();
        ineligible.eligibility_flag = false;
        let entries = vec![SendQueueEntry {
            prospect: &ineligible,
            subject: "À Lyon, ChatGPT recommande Couverture Dupont. Pas vous.",
            landing_url: "https://base.example/couvreur?t=tok",
        }];

        let generated_at = Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap();
        let path = write_send_queue_csv(dir.path(), &entries, generated_at).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("Toiture Martin"));
        let rows: Vec<&str> = contents.lines().collect();
        assert_eq!(rows.len(), 1, "only the header row should remain");
    }
}
