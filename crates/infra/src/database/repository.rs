//! SQLite repository implementations of the core's persistence ports.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prospecting_core::ports::{CampaignRepository, ProspectRepository, TestRunRepository};
use prospecting_domain::{
    AiModel, Campaign, CampaignMode, CampaignStatus, Entity, Prospect, ProspectStatus,
    ProspectingError, Result, TestRun,
};
use rusqlite::{params, OptionalExtension, Row};

use super::manager::DbManager;

fn map_sql(err: rusqlite::Error) -> ProspectingError {
    ProspectingError::from(crate::errors::InfraError::from(err))
}

fn map_join(err: tokio::task::JoinError) -> ProspectingError {
    ProspectingError::Internal(format!("blocking task panicked: {err}"))
}

fn join_schedule_times(times: &[(u8, u8)]) -> String {
    times.iter().map(|(h, m)| format!("{h}:{m}")).collect::<Vec<_>>().join(",")
}

fn parse_schedule_times(raw: &str) -> Vec<(u8, u8)> {
    raw.split(',')
        .filter(|s| !s.is_empty())
        .filter_map(|part| {
            let (h, m) = part.split_once(':')?;
            Some((h.parse().ok()?, m.parse().ok()?))
        })
        .collect()
}

fn campaign_from_row(row: &Row<'_>) -> rusqlite::Result<Campaign> {
    let mode_raw: String = row.get(5)?;
    let status_raw: String = row.get(6)?;
    let schedule_days_raw: String = row.get(3)?;
    let schedule_times_raw: String = row.get(4)?;

    Ok(Campaign {
        id: row.get(0)?,
        profession: row.get(1)?,
        city: row.get(2)?,
        timezone: row.get(8)?,
        schedule_days: schedule_days_raw.split(',').filter(|s| !s.is_empty()).map(String::from).collect(),
        schedule_times: parse_schedule_times(&schedule_times_raw),
        mode: CampaignMode::from_str(&mode_raw).unwrap_or(CampaignMode::AutoTest),
        status: CampaignStatus::from_str(&status_raw).unwrap_or(CampaignStatus::Active),
        max_prospects: row.get::<_, i64>(7)? as u32,
        created_at: row.get(9)?,
    })
}

fn prospect_from_row(row: &Row<'_>) -> rusqlite::Result<Prospect> {
    let status_raw: String = row.get(15)?;
    let competitors_raw: String = row.get(10)?;

    Ok(Prospect {
        id: row.get(0)?,
        campaign_id: row.get(1)?,
        name: row.get(2)?,
        city: row.get(3)?,
        profession: row.get(4)?,
        website: row.get(5)?,
        phone: row.get(6)?,
        email: row.get(7)?,
        reviews_count: row.get(8)?,
        google_ads_active: row.get(9)?,
        competitors_cited: competitors_raw
            .split('\u{1f}')
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        ia_visibility_score: row.get(11)?,
        eligibility_flag: row.get(12)?,
        landing_token: row.get(13)?,
        video_url: row.get(14)?,
        screenshot_url: row.get(16)?,
        status: ProspectStatus::from_str(&status_raw).unwrap_or(ProspectStatus::Scanned),
        score_justification: row.get(17)?,
        created_at: row.get(18)?,
        updated_at: row.get(19)?,
    })
}

fn test_run_from_row(row: &Row<'_>) -> rusqlite::Result<TestRun> {
    let model_raw: String = row.get(4)?;
    let queries_raw: String = row.get(5)?;
    let answers_raw: String = row.get(6)?;
    let entities_raw: String = row.get(7)?;
    let mention_per_query_raw: String = row.get(9)?;
    let competitors_raw: String = row.get(10)?;

    let queries: Vec<String> = serde_json::from_str(&queries_raw).unwrap_or_default();
    let raw_answers: Vec<String> = serde_json::from_str(&answers_raw).unwrap_or_default();
    let extracted_entities: Vec<Vec<Entity>> = serde_json::from_str(&entities_raw).unwrap_or_default();
    let mention_per_query: Vec<bool> = serde_json::from_str(&mention_per_query_raw).unwrap_or_default();
    let competitors_entities: Vec<String> = serde_json::from_str(&competitors_raw).unwrap_or_default();

    Ok(TestRun {
        id: row.get(0)?,
        campaign_id: row.get(1)?,
        prospect_id: row.get(2)?,
        timestamp: row.get(3)?,
        model: AiModel::from_str(&model_raw).unwrap_or(AiModel::OpenAi),
        queries,
        raw_answers,
        extracted_entities,
        mentioned_target: row.get(8)?,
        mention_per_query,
        competitors_entities,
        notes: row.get(11)?,
    })
}

/// SQLite implementation of the three persistence ports, sharing one pool.
pub struct SqliteRepository {
    db: Arc<DbManager>,
}

impl SqliteRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CampaignRepository for SqliteRepository {
    async fn create_campaign(&self, campaign: Campaign) -> Result<Campaign> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO campaigns (id, profession, city, schedule_days, schedule_times, mode, status, max_prospects, timezone, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    campaign.id,
                    campaign.profession,
                    campaign.city,
                    campaign.schedule_days.join(","),
                    join_schedule_times(&campaign.schedule_times),
                    campaign.mode.to_string(),
                    campaign.status.to_string(),
                    campaign.max_prospects,
                    campaign.timezone,
                    campaign.created_at,
                ],
            )
            .map_err(map_sql)?;
            Ok(campaign)
        })
        .await
        .map_err(map_join)?
    }

    async fn get_campaign(&self, id: &str) -> Result<Option<Campaign>> {
        let db = self.db.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.query_row(
                "SELECT id, profession, city, schedule_days, schedule_times, mode, status, max_prospects, timezone, created_at FROM campaigns WHERE id = ?1",
                params![id],
                campaign_from_row,
            )
            .optional()
            .map_err(map_sql)
        })
        .await
        .map_err(map_join)?
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare("SELECT id, profession, city, schedule_days, schedule_times, mode, status, max_prospects, timezone, created_at FROM campaigns ORDER BY created_at")
                .map_err(map_sql)?;
            let rows = stmt
                .query_map(params![], campaign_from_row)
                .map_err(map_sql)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql)?;
            Ok(rows)
        })
        .await
        .map_err(map_join)?
    }

    async fn save_campaign(&self, campaign: &Campaign) -> Result<()> {
        let db = self.db.clone();
        let campaign = campaign.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                "UPDATE campaigns SET profession = ?2, city = ?3, schedule_days = ?4, schedule_times = ?5, mode = ?6, status = ?7, max_prospects = ?8, timezone = ?9 WHERE id = ?1",
                params![
                    campaign.id,
                    campaign.profession,
                    campaign.city,
                    campaign.schedule_days.join(","),
                    join_schedule_times(&campaign.schedule_times),
                    campaign.mode.to_string(),
                    campaign.status.to_string(),
                    campaign.max_prospects,
                    campaign.timezone,
                ],
            )
            .map_err(map_sql)?;
            Ok(())
        })
        .await
        .map_err(map_join)?
    }
}

#[async_trait]
impl ProspectRepository for SqliteRepository {
    async fn create_prospect(&self, prospect: Prospect) -> Result<Prospect> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO prospects (id, campaign_id, name, city, profession, website, phone, email, reviews_count, google_ads_active, competitors_cited, ia_visibility_score, eligibility_flag, landing_token, video_url, status, screenshot_url, score_justification, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
                params![
                    prospect.id,
                    prospect.campaign_id,
                    prospect.name,
                    prospect.city,
                    prospect.profession,
                    prospect.website,
                    prospect.phone,
                    prospect.email,
                    prospect.reviews_count,
                    prospect.google_ads_active,
                    prospect.competitors_cited.join("\u{1f}"),
                    prospect.ia_visibility_score,
                    prospect.eligibility_flag,
                    prospect.landing_token,
                    prospect.video_url,
                    prospect.status.to_string(),
                    prospect.screenshot_url,
                    prospect.score_justification,
                    prospect.created_at,
                    prospect.updated_at,
                ],
            )
            .map_err(map_sql)?;
            Ok(prospect)
        })
        .await
        .map_err(map_join)?
    }

    async fn get_prospect(&self, id: &str) -> Result<Option<Prospect>> {
        let db = self.db.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.query_row(&prospect_select("WHERE id = ?1"), params![id], prospect_from_row)
                .optional()
                .map_err(map_sql)
        })
        .await
        .map_err(map_join)?
    }

    async fn get_prospect_by_token(&self, token: &str) -> Result<Option<Prospect>> {
        let db = self.db.clone();
        let token = token.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.query_row(
                &prospect_select("WHERE landing_token = ?1"),
                params![token],
                prospect_from_row,
            )
            .optional()
            .map_err(map_sql)
        })
        .await
        .map_err(map_join)?
    }

    async fn list_prospects(
        &self,
        campaign_id: &str,
        status: Option<ProspectStatus>,
    ) -> Result<Vec<Prospect>> {
        let db = self.db.clone();
        let campaign_id = campaign_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let rows = match status {
                Some(status) => {
                    let sql = prospect_select(
                        "WHERE campaign_id = ?1 AND status = ?2 ORDER BY ia_visibility_score DESC",
                    );
                    let mut stmt = conn.prepare(&sql).map_err(map_sql)?;
                    stmt.query_map(params![campaign_id, status.to_string()], prospect_from_row)
                        .map_err(map_sql)?
                        .collect::<rusqlite::Result<Vec<_>>>()
                        .map_err(map_sql)?
                }
                None => {
                    let sql = prospect_select(
                        "WHERE campaign_id = ?1 ORDER BY ia_visibility_score DESC",
                    );
                    let mut stmt = conn.prepare(&sql).map_err(map_sql)?;
                    stmt.query_map(params![campaign_id], prospect_from_row)
                        .map_err(map_sql)?
                        .collect::<rusqlite::Result<Vec<_>>>()
                        .map_err(map_sql)?
                }
            };
            Ok(rows)
        })
        .await
        .map_err(map_join)?
    }

    async fn save_prospect(&self, prospect: &Prospect) -> Result<()> {
        let db = self.db.clone();
        let prospect = prospect.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                "UPDATE prospects SET name = ?2, website = ?3, phone = ?4, email = ?5, reviews_count = ?6, google_ads_active = ?7, competitors_cited = ?8, ia_visibility_score = ?9, eligibility_flag = ?10, video_url = ?11, screenshot_url = ?12, status = ?13, score_justification = ?14, updated_at = ?15 WHERE id = ?1",
                params![
                    prospect.id,
                    prospect.name,
                    prospect.website,
                    prospect.phone,
                    prospect.email,
                    prospect.reviews_count,
                    prospect.google_ads_active,
                    prospect.competitors_cited.join("\u{1f}"),
                    prospect.ia_visibility_score,
                    prospect.eligibility_flag,
                    prospect.video_url,
                    prospect.screenshot_url,
                    prospect.status.to_string(),
                    prospect.score_justification,
                    prospect.updated_at,
                ],
            )
            .map_err(map_sql)?;
            Ok(())
        })
        .await
        .map_err(map_join)?
    }
}

fn prospect_select(clause: &str) -> String {
    format!(
        "SELECT id, campaign_id, name, city, profession, website, phone, email, reviews_count, google_ads_active, competitors_cited, ia_visibility_score, eligibility_flag, landing_token, video_url, status, screenshot_url, score_justification, created_at, updated_at FROM prospects {clause}"
    )
}

#[async_trait]
impl TestRunRepository for SqliteRepository {
    async fn create_run(&self, run: TestRun) -> Result<TestRun> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO test_runs (id, campaign_id, prospect_id, timestamp, model, queries, raw_answers, extracted_entities, mentioned_target, mention_per_query, competitors_entities, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    run.id,
                    run.campaign_id,
                    run.prospect_id,
                    run.timestamp,
                    run.model.to_string(),
                    serde_json::to_string(&run.queries).map_err(|e| ProspectingError::Internal(e.to_string()))?,
                    serde_json::to_string(&run.raw_answers).map_err(|e| ProspectingError::Internal(e.to_string()))?,
                    serde_json::to_string(&run.extracted_entities).map_err(|e| ProspectingError::Internal(e.to_string()))?,
                    run.mentioned_target,
                    serde_json::to_string(&run.mention_per_query).map_err(|e| ProspectingError::Internal(e.to_string()))?,
                    serde_json::to_string(&run.competitors_entities).map_err(|e| ProspectingError::Internal(e.to_string()))?,
                    run.notes,
                ],
            )
            .map_err(map_sql)?;
            Ok(run)
        })
        .await
        .map_err(map_join)?
    }

    async fn list_runs(&self, prospect_id: &str) -> Result<Vec<TestRun>> {
        let db = self.db.clone();
        let prospect_id = prospect_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, campaign_id, prospect_id, timestamp, model, queries, raw_answers, extracted_entities, mentioned_target, mention_per_query, competitors_entities, notes FROM test_runs WHERE prospect_id = ?1 ORDER BY timestamp ASC",
                )
                .map_err(map_sql)?;
            let rows = stmt
                .query_map(params![prospect_id], test_run_from_row)
                .map_err(map_sql)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql)?;
            Ok(rows)
        })
        .await
        .map_err(map_join)?
    }
}
