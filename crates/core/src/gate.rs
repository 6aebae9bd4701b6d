//! Asset gate protecting the READY_TO_SEND transition (§4.8).

use prospecting_domain::{ProspectStatus, ProspectingError, Result};

use crate::lifecycle::can_transition;

/// Records the deliverable assets for a prospect and, if currently `SCORED`,
/// advances it to `READY_ASSETS`. Both URLs must be non-empty after
/// trimming.
pub fn set_assets(
    status: &mut ProspectStatus,
    video_url: &mut Option<String>,
    screenshot_url: &mut Option<String>,
    new_video_url: &str,
    new_screenshot_url: &str,
) -> Result<()> {
    let video = new_video_url.trim();
    let screenshot = new_screenshot_url.trim();
    if video.is_empty() {
        return Err(ProspectingError::InvalidInput("video_url est obligatoire".to_string()));
    }
    if screenshot.is_empty() {
        return Err(ProspectingError::InvalidInput(
            "screenshot_url est obligatoire".to_string(),
        ));
    }

    *video_url = Some(video.to_string());
    *screenshot_url = Some(screenshot.to_string());

    if *status == ProspectStatus::Scored && can_transition(*status, ProspectStatus::ReadyAssets) {
        *status = ProspectStatus::ReadyAssets;
    }
    Ok(())
}

/// Attempts to promote a prospect to `READY_TO_SEND`. Requires both asset
/// URLs, `eligibility_flag`, and current status `READY_ASSETS`; any missing
/// precondition is enumerated in a single `GateBlocked` error.
pub fn mark_ready_to_send(
    status: &mut ProspectStatus,
    video_url: Option<&str>,
    screenshot_url: Option<&str>,
    eligibility_flag: bool,
) -> Result<()> {
    let mut errors = Vec::new();
    if video_url.map_or(true, str::is_empty) {
        errors.push("video_url manquante".to_string());
    }
    if screenshot_url.map_or(true, str::is_empty) {
        errors.push("screenshot_url manquante".to_string());
    }
    if !eligibility_flag {
        errors.push("prospect non éligible (EMAIL_OK = False)".to_string());
    }
    if *status != ProspectStatus::ReadyAssets {
        errors.push(format!("statut actuel '{status}' — attendu READY_ASSETS"));
    }

    if !errors.is_empty() {
        return Err(ProspectingError::GateBlocked(format!(
            "Gate READY_TO_SEND bloquée : {}",
            errors.join(" | ")
        )));
    }

    *status = ProspectStatus::ReadyToSend;
    Ok(())
}
