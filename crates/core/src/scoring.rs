//! EMAIL_OK eligibility rule and the /10 scalar score (§4.7).

use prospecting_domain::constants::{
    EMAIL_OK_MODELS_REQUIRED, EMAIL_OK_QUERIES_REQUIRED, MAX_CITED_COMPETITORS,
    MIN_STABLE_COMPETITOR_RUNS, QUERIES_PER_PROSPECT, SCORING_MIN_REVIEWS, TOTAL_MODELS,
};
use prospecting_domain::{AiModel, Prospect, TestRun};

/// Counts competitor mentions (lowercased) across all runs, preserving
/// first-seen order so ties break the same way `Counter.most_common` would.
fn competitor_counts(runs: &[TestRun]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    for run in runs {
        for competitor in &run.competitors_entities {
            let key = competitor.to_lowercase();
            if !counts.contains_key(&key) {
                order.push(key.clone());
            }
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    let mut pairs: Vec<(String, usize)> = order
        .into_iter()
        .map(|name| {
            let count = counts[&name];
            (name, count)
        })
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}

/// Stable competitors: names seen in at least `MIN_STABLE_COMPETITOR_RUNS`
/// runs, ordered by descending count.
#[must_use]
pub fn stable_competitors(runs: &[TestRun]) -> Vec<String> {
    competitor_counts(runs)
        .into_iter()
        .filter(|(_, count)| *count >= MIN_STABLE_COMPETITOR_RUNS)
        .map(|(name, _)| name)
        .collect()
}

/// Result of evaluating the EMAIL_OK rule.
pub struct EmailOk {
    pub eligible: bool,
    pub explanation: String,
}

/// Evaluates the EMAIL_OK eligibility rule across all of a prospect's runs.
#[must_use]
pub fn email_ok(runs: &[TestRun]) -> EmailOk {
    if runs.is_empty() {
        return EmailOk {
            eligible: false,
            explanation: "Aucun run disponible".to_string(),
        };
    }

    let invisible_models = AiModel::ALL
        .iter()
        .filter(|model| {
            let model_runs: Vec<&TestRun> = runs.iter().filter(|r| r.model == **model).collect();
            !model_runs.is_empty() && model_runs.iter().all(|r| !r.mentioned_target)
        })
        .count();

    let mut invisible_queries = 0usize;
    for qi in 0..QUERIES_PER_PROSPECT {
        let mentions: Vec<bool> = runs
            .iter()
            .filter_map(|r| r.mention_per_query.get(qi).copied())
            .collect();
        if !mentions.is_empty() && mentions.iter().all(|m| !m) {
            invisible_queries += 1;
        }
    }

    let stable = stable_competitors(runs);

    let models_ok = invisible_models >= EMAIL_OK_MODELS_REQUIRED;
    let queries_ok = invisible_queries >= EMAIL_OK_QUERIES_REQUIRED;
    let competitors_ok = !stable.is_empty();
    let eligible = models_ok && queries_ok && competitors_ok;

    let explanation = format!(
        "Modèles invisibles: {invisible_models}/{TOTAL_MODELS} ({}) | Requêtes invisibles: {invisible_queries}/{QUERIES_PER_PROSPECT} ({}) | Concurrents stables: {} ({})",
        if models_ok { "✓" } else { "✗" },
        if queries_ok { "✓" } else { "✗" },
        stable.len(),
        if competitors_ok { "✓" } else { "✗" },
    );

    EmailOk { eligible, explanation }
}

/// Result of computing the scalar score.
pub struct ScoreResult {
    pub score: f64,
    pub justification: String,
    pub stable_competitors: Vec<String>,
}

/// Computes the /10 scalar score and its human-readable justification
/// (§4.7). Does not mutate `prospect`; the caller (`run_scoring`) applies
/// the side effects.
#[must_use]
pub fn score(prospect: &Prospect, runs: &[TestRun], email: &EmailOk) -> ScoreResult {
    let mut total = 0.0;
    let mut parts: Vec<String> = Vec::new();

    if email.eligible {
        total += 4.0;
        parts.push("+4 Invisibilité IA robuste confirmée".to_string());
    }

    let stable: Vec<String> = competitor_counts(runs)
        .into_iter()
        .filter(|(_, count)| *count >= MIN_STABLE_COMPETITOR_RUNS)
        .take(MAX_CITED_COMPETITORS)
        .map(|(name, _)| name)
        .collect();

    if !stable.is_empty() {
        total += 2.0;
        let preview: Vec<&str> = stable.iter().take(2).map(String::as_str).collect();
        parts.push(format!("+2 Concurrents stables cités ({})", preview.join(", ")));
    }

    if prospect.google_ads_active == Some(true) {
        total += 1.0;
        parts.push("+1 Google Ads actif (budget marketing existant)".to_string());
    }

    if prospect.reviews_count.is_some_and(|n| n >= SCORING_MIN_REVIEWS) {
        total += 1.0;
        let count = prospect.reviews_count.unwrap_or_default();
        parts.push(format!("+1 {count} avis (présence locale établie)"));
    }

    if prospect.website.as_deref().is_some_and(|w| !w.is_empty()) {
        total += 1.0;
        parts.push("+1 Site web présent".to_string());
    }

    let header = format!(
        "Score {total}/10 — EMAIL_OK: {}",
        if email.eligible { "OUI" } else { "NON" }
    );
    let justification = format!("{header}\n{}", parts.join("\n"));

    ScoreResult {
        score: total,
        justification,
        stable_competitors: stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use prospecting_domain::ProspectStatus;

    fn prospect(website: Option<&str>) -> Prospect {
        Prospect {
            id: "p1".into(),
            campaign_id: "c1".into(),
            name: "Toiture Martin".into(),
            city: "Paris".into(),
            profession: "couvreur".into(),
            website: website.map(str::to_string),
            phone: None,
            email: None,
            reviews_count: None,
            google_ads_active: None,
            competitors_cited: vec![],
            ia_visibility_score: None,
            eligibility_flag: false,
            landing_token: "t".repeat(24),
            video_url: None,
            screenshot_url: None,
            status: ProspectStatus::Tested,
            score_justification: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn run(model: AiModel, mentions: [bool; 5], competitors: &[&str]) -> TestRun {
        TestRun {
            id: uuid::Uuid::new_v4().to_string(),
            campaign_id: "c1".into(),
            prospect_id: "p1".into(),
            timestamp: Utc::now(),
            model,
            queries: vec!["q".into(); 5],
            raw_answers: vec!["a".into(); 5],
            extracted_entities: vec![vec![]; 5],
            mentioned_target: mentions.iter().any(|m| *m),
            mention_per_query: mentions.to_vec(),
            competitors_entities: competitors.iter().map(|s| (*s).to_string()).collect(),
            notes: None,
        }
    }

    #[test]
    fn all_invisible_scenario_scores_seven() {
        let p = prospect(Some("https://martin-couvreur.fr"));
        let mut runs = Vec::new();
        for model in AiModel::ALL {
            for _ in 0..3 {
                runs.push(run(model, [false; 5], &["Concurrent A", "Concurrent B"]));
            }
        }
        let e = email_ok(&runs);
        assert!(e.eligible);
        let result = score(&p, &runs, &e);
        assert!((result.score - 7.0).abs() < f64::EPSILON);
        assert_eq!(result.stable_competitors, vec!["concurrent a", "concurrent b"]);
    }

    #[test]
    fn one_visible_model_kills_eligibility() {
        let p = prospect(Some("https://martin-couvreur.fr"));
        let mut runs = Vec::new();
        for _ in 0..3 {
            runs.push(run(AiModel::OpenAi, [true; 5], &["Concurrent A", "Concurrent B"]));
        }
        for model in [AiModel::Anthropic, AiModel::Gemini] {
            for _ in 0..3 {
                runs.push(run(model, [false; 5], &["Concurrent A", "Concurrent B"]));
            }
        }
        let e = email_ok(&runs);
        assert!(!e.eligible);
        let result = score(&p, &runs, &e);
        assert!((result.score - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_runs_are_not_eligible() {
        let e = email_ok(&[]);
        assert!(!e.eligible);
    }

    #[test]
    fn email_ok_implies_score_at_least_six() {
        let p = prospect(None);
        let mut runs = Vec::new();
        for model in AiModel::ALL {
            for _ in 0..3 {
                runs.push(run(model, [false; 5], &["Concurrent A", "Concurrent B"]));
            }
        }
        let e = email_ok(&runs);
        assert!(e.eligible);
        let result = score(&p, &runs, &e);
        assert!(result.score >= 6.0);
    }
}
