//! Per-prospect fan-out: models × queries → `TestRun` records (§4.6).

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use uuid::Uuid;

use prospecting_domain::constants::MAX_COMPETITORS_PER_RUN;
use prospecting_domain::{AiModel, Entity, Prospect, ProspectStatus, ProspectingError, Result, TestRun};

use crate::ports::{ModelAdapterRegistry, Repository};
use crate::queries::queries_for;
use crate::text::{domain, extract_entities, mentioned, normalize};

/// One prospect's sweep outcome, isolated from its siblings in
/// `run_for_campaign`.
#[derive(Debug, Clone)]
pub struct ProspectRunError {
    pub prospect_id: String,
    pub error: String,
}

/// Summary returned by `run_for_campaign`.
#[derive(Debug, Clone, Default)]
pub struct CampaignRunSummary {
    pub total: usize,
    pub processed: usize,
    pub runs_created: usize,
    pub errors: Vec<ProspectRunError>,
}

/// Entities that are not the target prospect itself (by normalized-name
/// containment or website-domain mention).
fn competitors_from(entities: &[Entity], target_name: &str, target_website: Option<&str>) -> Vec<String> {
    let norm_target = normalize(target_name);
    let target_domain = domain(target_website.unwrap_or(""));
    entities
        .iter()
        .filter_map(|e| {
            let norm_val = normalize(&e.value);
            if !norm_target.is_empty() && norm_val.contains(&norm_target) {
                return None;
            }
            if !target_domain.is_empty() && e.value.to_lowercase().contains(&target_domain) {
                return None;
            }
            Some(e.value.clone())
        })
        .collect()
}

pub struct TestRunner {
    repository: Arc<dyn Repository>,
    registry: Arc<dyn ModelAdapterRegistry>,
    stale_after: Duration,
}

impl TestRunner {
    #[must_use]
    pub fn new(
        repository: Arc<dyn Repository>,
        registry: Arc<dyn ModelAdapterRegistry>,
        stale_after: Duration,
    ) -> Self {
        Self { repository, registry, stale_after }
    }

    /// Runs one sweep (up to 3 models × 5 queries) for a single prospect.
    ///
    /// # Errors
    /// Returns `NotFound` if the prospect does not exist, `StateConflict` if
    /// its status is neither `SCHEDULED` nor a stale `TESTING`.
    pub async fn run_for_prospect(&self, prospect_id: &str, dry_run: bool) -> Result<Vec<TestRun>> {
        let mut prospect = self
            .repository
            .get_prospect(prospect_id)
            .await?
            .ok_or_else(|| ProspectingError::NotFound(format!("prospect {prospect_id}")))?;

        let now = Utc::now();
        let is_stale_testing = prospect.status == ProspectStatus::Testing
            && (now - prospect.updated_at)
                .to_std()
                .is_ok_and(|elapsed| elapsed > self.stale_after);

        if prospect.status != ProspectStatus::Scheduled && !is_stale_testing {
            return Err(ProspectingError::StateConflict(format!(
                "prospect {prospect_id} is '{}', expected 'scheduled'",
                prospect.status
            )));
        }

        let models: Vec<AiModel> = if dry_run {
            AiModel::ALL.to_vec()
        } else {
            self.registry.active_models()
        };

        if models.is_empty() && !dry_run {
            tracing::warn!(prospect_id, "no AI model configured, skipping sweep");
            return Ok(Vec::new());
        }

        if prospect.status == ProspectStatus::Scheduled {
            prospect.status = ProspectStatus::Testing;
            prospect.updated_at = now;
            self.repository.save_prospect(&prospect).await?;
        }

        let queries = queries_for(&prospect.profession, &prospect.city);
        let mut created = Vec::with_capacity(models.len());
        for model in models {
            let run = self.run_one_model(&prospect, model, &queries, dry_run).await?;
            created.push(run);
        }

        prospect.status = ProspectStatus::Tested;
        prospect.updated_at = Utc::now();
        self.repository.save_prospect(&prospect).await?;

        Ok(created)
    }

    #[tracing::instrument(skip(self, prospect, queries), fields(prospect_id = %prospect.id, model = %model))]
    async fn run_one_model(
        &self,
        prospect: &Prospect,
        model: AiModel,
        queries: &[String],
        dry_run: bool,
    ) -> Result<TestRun> {
        let adapter = self.registry.adapter(model);
        let mut raw_answers = Vec::with_capacity(queries.len());
        let mut entities_per_query = Vec::with_capacity(queries.len());
        let mut mention_per_query = Vec::with_capacity(queries.len());
        let mut all_competitors = Vec::new();
        let mut notes_parts = Vec::new();

        for (qi, query) in queries.iter().enumerate() {
            let answer = if dry_run {
                format!("[DRY_RUN] Réponse simulée pour : {query}")
            } else {
                match adapter.ask(query).await {
                    Ok(a) => a,
                    Err(e) => {
                        tracing::error!(model = %model, query_index = qi, error = %e, "adapter call failed");
                        notes_parts.push(format!("Q{} erreur {model}: {e}", qi + 1));
                        format!("[ERROR] {e}")
                    }
                }
            };

            let entities = extract_entities(&answer);
            let is_mention = mentioned(&answer, &prospect.name, prospect.website.as_deref());
            mention_per_query.push(is_mention);

            let competitors = competitors_from(&entities, &prospect.name, prospect.website.as_deref());
            all_competitors.extend(competitors);

            raw_answers.push(answer);
            entities_per_query.push(entities);
        }

        let mut seen = HashSet::new();
        let unique_competitors: Vec<String> = all_competitors
            .into_iter()
            .filter(|c| seen.insert(c.to_lowercase()))
            .take(MAX_COMPETITORS_PER_RUN)
            .collect();

        let run = TestRun {
            id: Uuid::new_v4().to_string(),
            campaign_id: prospect.campaign_id.clone(),
            prospect_id: prospect.id.clone(),
            timestamp: Utc::now(),
            model,
            queries: queries.to_vec(),
            raw_answers,
            extracted_entities: entities_per_query,
            mentioned_target: mention_per_query.iter().any(|m| *m),
            mention_per_query,
            competitors_entities: unique_competitors,
            notes: if notes_parts.is_empty() { None } else { Some(notes_parts.join("; ")) },
        };

        self.repository.create_run(run.clone()).await
    }

    /// Runs a sweep for every selected prospect of a campaign (or every
    /// `SCHEDULED` prospect when `prospect_ids` is `None`), isolating
    /// failures per prospect.
    pub async fn run_for_campaign(
        &self,
        campaign_id: &str,
        prospect_ids: Option<Vec<String>>,
        dry_run: bool,
    ) -> Result<CampaignRunSummary> {
        let prospects = match prospect_ids {
            Some(ids) => {
                let mut out = Vec::with_capacity(ids.len());
                for id in ids {
                    if let Some(p) = self.repository.get_prospect(&id).await? {
                        out.push(p);
                    }
                }
                out
            }
            None => {
                self.repository
                    .list_prospects(campaign_id, Some(ProspectStatus::Scheduled))
                    .await?
            }
        };

        let mut summary = CampaignRunSummary {
            total: prospects.len(),
            ..CampaignRunSummary::default()
        };

        for prospect in prospects {
            match self.run_for_prospect(&prospect.id, dry_run).await {
                Ok(runs) => {
                    summary.processed += 1;
                    summary.runs_created += runs.len();
                }
                Err(e) => {
                    tracing::error!(prospect_id = %prospect.id, error = %e, "sweep failed for prospect");
                    summary.errors.push(ProspectRunError {
                        prospect_id: prospect.id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(summary)
    }
}
