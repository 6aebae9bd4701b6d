//! Per-prospect artefacts: `audit.html`, `email.json` + `email_body.txt`,
//! `video_script.txt`, written under `send_queue/<prospect_id>/`.

use std::path::PathBuf;

use prospecting_core::stable_competitors;
use prospecting_domain::{Prospect, ProspectingError, Result, TestRun};
use serde::Serialize;

const LANDING_PATH_SEGMENT: &str = "couvreur";
const VIDEO_PLACEHOLDER: &str = "[vidéo en cours de production]";

/// Paths of the four files written for one prospect.
#[derive(Debug, Clone)]
pub struct ProspectDeliverables {
    pub audit_html: PathBuf,
    pub email_json: PathBuf,
    pub email_body_txt: PathBuf,
    pub video_script_txt: PathBuf,
    pub subject: String,
    pub landing_url: String,
}

#[derive(Debug, Serialize)]
struct EmailDraft<'a> {
    to: Option<&'a str>,
    subject: &'a str,
    body: &'a str,
    signature: &'a str,
}

/// Writes deliverables under a configurable `send_queue/` root.
pub struct DeliverableGenerator {
    base_dir: PathBuf,
}

impl DeliverableGenerator {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    fn prospect_dir(&self, prospect_id: &str) -> PathBuf {
        self.base_dir.join(prospect_id)
    }

    /// Builds and writes all four artefacts for one prospect.
    pub fn generate_for_prospect(
        &self,
        prospect: &Prospect,
        runs: &[TestRun],
        base_url: &str,
        sender_signature: &str,
    ) -> Result<ProspectDeliverables> {
        let dir = self.prospect_dir(&prospect.id);
        std::fs::create_dir_all(&dir)
            .map_err(|e| ProspectingError::Internal(format!("failed to create send queue dir: {e}")))?;

        let top_competitor = top_competitor(prospect, runs);
        let landing_url = format!("{base_url}/{LANDING_PATH_SEGMENT}?t={}", prospect.landing_token);
        let video_url = prospect.video_url.as_deref().unwrap_or(VIDEO_PLACEHOLDER);
        let subject = format!("À {}, ChatGPT recommande {top_competitor}. Pas vous.", prospect.city);

        let audit_html = self.write_audit_html(&dir, prospect, &top_competitor, &landing_url, video_url)?;
        let (email_json, email_body_txt) =
            self.write_email(&dir, prospect, &subject, &top_competitor, &landing_url, video_url, sender_signature)?;
        let video_script_txt =
            self.write_video_script(&dir, prospect, &top_competitor, &landing_url)?;

        Ok(ProspectDeliverables {
            audit_html,
            email_json,
            email_body_txt,
            video_script_txt,
            subject,
            landing_url,
        })
    }

    fn write_audit_html(
        &self,
        dir: &std::path::Path,
        prospect: &Prospect,
        top_competitor: &str,
        landing_url: &str,
        video_url: &str,
    ) -> Result<PathBuf> {
        let html = format!(
            "<!doctype html>\n<html lang=\"fr\">\n<head><meta charset=\"utf-8\"><title>Audit de visibilité IA — {name}</title></head>\n<body>\n<h1>{name} — {city}</h1>\n<p>Quand on demande à ChatGPT qui contacter pour un {profession} à {city}, c'est <strong>{top_competitor}</strong> qui ressort, pas vous.</p>\n<p>Vidéo : <a href=\"{video_url}\">{video_url}</a></p>\n<p><a href=\"{landing_url}\">Voir la démonstration complète</a></p>\n</body>\n</html>\n",
            name = escape_html(&prospect.name),
            city = escape_html(&prospect.city),
            profession = escape_html(&prospect.profession),
            top_competitor = escape_html(top_competitor),
            video_url = escape_html(video_url),
            landing_url = escape_html(landing_url),
        );

        let path = dir.join("audit.html");
        std::fs::write(&path, html)
            .map_err(|e| ProspectingError::Internal(format!("failed to write audit.html: {e}")))?;
        Ok(path)
    }

    #[allow(clippy::too_many_arguments)]
    fn write_email(
        &self,
        dir: &std::path::Path,
        prospect: &Prospect,
        subject: &str,
        top_competitor: &str,
        landing_url: &str,
        video_url: &str,
        sender_signature: &str,
    ) -> Result<(PathBuf, PathBuf)> {
        let body = format!(
            "Bonjour,\n\nQuand on demande à ChatGPT qui contacter pour un {profession} à {city}, c'est {top_competitor} qui est recommandé — pas {name}.\n\nVous pouvez voir la démonstration ici : {landing_url}\nVidéo : {video_url}\n\n{signature}",
            profession = prospect.profession,
            city = prospect.city,
            top_competitor = top_competitor,
            name = prospect.name,
            landing_url = landing_url,
            video_url = video_url,
            signature = sender_signature,
        );

        let draft = EmailDraft {
            to: prospect.email.as_deref(),
            subject,
            body: &body,
            signature: sender_signature,
        };

        let json_path = dir.join("email.json");
        let json = serde_json::to_string_pretty(&draft)
            .map_err(|e| ProspectingError::Internal(format!("failed to serialize email draft: {e}")))?;
        std::fs::write(&json_path, json)
            .map_err(|e| ProspectingError::Internal(format!("failed to write email.json: {e}")))?;

        let body_path = dir.join("email_body.txt");
        std::fs::write(&body_path, &body)
            .map_err(|e| ProspectingError::Internal(format!("failed to write email_body.txt: {e}")))?;

        Ok((json_path, body_path))
    }

    /// Regenerates just `audit.html` for a prospect already on disk.
    pub fn regenerate_audit(
        &self,
        prospect: &Prospect,
        runs: &[TestRun],
        base_url: &str,
    ) -> Result<PathBuf> {
        let dir = self.prospect_dir(&prospect.id);
        std::fs::create_dir_all(&dir)
            .map_err(|e| ProspectingError::Internal(format!("failed to create send queue dir: {e}")))?;
        let top_competitor = top_competitor(prospect, runs);
        let landing_url = format!("{base_url}/{LANDING_PATH_SEGMENT}?t={}", prospect.landing_token);
        let video_url = prospect.video_url.as_deref().unwrap_or(VIDEO_PLACEHOLDER);
        self.write_audit_html(&dir, prospect, &top_competitor, &landing_url, video_url)
    }

    /// Regenerates just `email.json`/`email_body.txt`, returning both paths
    /// plus the computed subject line.
    pub fn regenerate_email(
        &self,
        prospect: &Prospect,
        runs: &[TestRun],
        base_url: &str,
        sender_signature: &str,
    ) -> Result<(PathBuf, PathBuf, String)> {
        let dir = self.prospect_dir(&prospect.id);
        std::fs::create_dir_all(&dir)
            .map_err(|e| ProspectingError::Internal(format!("failed to create send queue dir: {e}")))?;
        let top_competitor = top_competitor(prospect, runs);
        let landing_url = format!("{base_url}/{LANDING_PATH_SEGMENT}?t={}", prospect.landing_token);
        let video_url = prospect.video_url.as_deref().unwrap_or(VIDEO_PLACEHOLDER);
        let subject = format!("À {}, ChatGPT recommande {top_competitor}. Pas vous.", prospect.city);
        let (json_path, body_path) = self.write_email(
            &dir,
            prospect,
            &subject,
            &top_competitor,
            &landing_url,
            video_url,
            sender_signature,
        )?;
        Ok((json_path, body_path, subject))
    }

    /// Regenerates just `video_script.txt`.
    pub fn regenerate_video_script(
        &self,
        prospect: &Prospect,
        runs: &[TestRun],
        base_url: &str,
    ) -> Result<PathBuf> {
        let dir = self.prospect_dir(&prospect.id);
        std::fs::create_dir_all(&dir)
            .map_err(|e| ProspectingError::Internal(format!("failed to create send queue dir: {e}")))?;
        let top_competitor = top_competitor(prospect, runs);
        let landing_url = format!("{base_url}/{LANDING_PATH_SEGMENT}?t={}", prospect.landing_token);
        self.write_video_script(&dir, prospect, &top_competitor, &landing_url)
    }

    fn write_video_script(
        &self,
        dir: &std::path::Path,
        prospect: &Prospect,
        top_competitor: &str,
        landing_url: &str,
    ) -> Result<PathBuf> {
        let script = format!(
            "[0:00] Accroche : \"Saviez-vous que ChatGPT recommande {top_competitor} plutôt que {name} pour un {profession} à {city} ?\"\n[0:10] Démonstration : capture d'écran d'une conversation IA ignorant {name}.\n[0:25] Appel à l'action : \"Découvrez votre audit complet sur {landing_url}\"\n",
            top_competitor = top_competitor,
            name = prospect.name,
            profession = prospect.profession,
            city = prospect.city,
            landing_url = landing_url,
        );

        let path = dir.join("video_script.txt");
        std::fs::write(&path, script)
            .map_err(|e| ProspectingError::Internal(format!("failed to write video_script.txt: {e}")))?;
        Ok(path)
    }
}

fn top_competitor(prospect: &Prospect, runs: &[TestRun]) -> String {
    stable_competitors(runs)
        .into_iter()
        .next()
        .or_else(|| prospect.competitors_cited.first().cloned())
        .unwrap_or_else(|| "un concurrent local".to_string())
}

fn escape_html(input: &str) -> String {
    input.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
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
            phone: None,
            email: Some("contact@martin-toiture.fr".into()),
            reviews_count: None,
            google_ads_active: None,
            competitors_cited: vec!["Couverture Dupont".into()],
            ia_visibility_score: Some(7.0),
            eligibility_flag: true,
            landing_token: "tok".repeat(8),
            video_url: None,
            screenshot_url: Some("https://cdn.example/shot.png".into()),
            status: ProspectStatus::ReadyAssets,
            score_justification: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn generates_all_four_files_and_embeds_landing_url() {
        let dir = TempDir::new().unwrap();
        let generator = DeliverableGenerator::new(dir.path());
        let p = prospect();

        let deliverables = generator
            .generate_for_prospect(&p, &[], "https://base.example", "L'équipe EURKAI")
            .unwrap();

        assert!(deliverables.audit_html.exists());
        assert!(deliverables.email_json.exists());
        assert!(deliverables.email_body_txt.exists());
        assert!(deliverables.video_script_txt.exists());

        assert_eq!(
            deliverables.landing_url,
            format!("https://base.example/couvreur?t={}", p.landing_token)
        );
        assert!(deliverables.subject.contains("Lyon"));
        assert!(deliverables.subject.contains("Couverture Dupont"));

        let body = std::fs::read_to_string(&deliverables.email_body_txt).unwrap();
        assert!(body.contains(&deliverables.landing_url));
        assert!(body.contains(VIDEO_PLACEHOLDER));
    }

    #[test]
    fn regenerate_audit_overwrites_only_the_audit_file() {
        let dir = TempDir::new().unwrap();
        let generator = DeliverableGenerator::new(dir.path());
        let p = prospect();

        generator.generate_for_prospect(&p, &[], "https://base.example", "sig").unwrap();
        let path = generator.regenerate_audit(&p, &[], "https://base.example").unwrap();

        assert!(path.ends_with("audit.html"));
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Toiture Martin"));
    }

    #[test]
    fn regenerate_email_returns_subject() {
        let dir = TempDir::new().unwrap();
        let generator = DeliverableGenerator::new(dir.path());
        let p = prospect();

        let (json_path, body_path, subject) =
            generator.regenerate_email(&p, &[], "https://base.example", "sig").unwrap();

        assert!(json_path.exists());
        assert!(body_path.exists());
        assert!(subject.contains("Lyon"));
    }
}
