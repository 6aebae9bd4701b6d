//! Decides whether a target business is mentioned in free-form text (§4.2).

use similar::{capture_diff_slices, Algorithm, DiffOp};

use prospecting_domain::constants::{
    MATCH_MIN_DOMAIN_LEN, MATCH_MIN_TOKEN_LEN, MATCH_SIMILARITY_THRESHOLD,
};

use super::normalize::{domain, normalize, tokens};

/// Ratcliff/Obershelp-style similarity ratio: `2 * matched / (len(a) + len(b))`,
/// computed over the matching blocks of a token-level diff.
fn similarity_ratio(a: &[&str], b: &[&str]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let ops = capture_diff_slices(Algorithm::Myers, a, b);
    let matched: usize = ops
        .iter()
        .map(|op| match op {
            DiffOp::Equal { len, .. } => *len,
            _ => 0,
        })
        .sum();
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

/// Returns true iff `name` is mentioned in `text`, by any of the four rules
/// in §4.2. Empty `name` always returns false.
#[must_use]
pub fn mentioned(text: &str, name: &str, website: Option<&str>) -> bool {
    if name.is_empty() {
        return false;
    }
    let norm_text = normalize(text);
    let norm_name = normalize(name);
    if norm_name.is_empty() {
        return false;
    }

    if norm_text.contains(&norm_name) {
        return true;
    }

    let name_tokens = tokens(&norm_name);
    let significant: Vec<&str> = name_tokens
        .iter()
        .copied()
        .filter(|t| t.len() > MATCH_MIN_TOKEN_LEN)
        .collect();
    if !significant.is_empty() && significant.iter().all(|t| norm_text.contains(t)) {
        return true;
    }

    let text_tokens = tokens(&norm_text);
    let window_len = (name_tokens.len() + 3).max(5);
    if !text_tokens.is_empty() && window_len <= text_tokens.len() {
        for window in text_tokens.windows(window_len) {
            if similarity_ratio(window, &name_tokens) >= MATCH_SIMILARITY_THRESHOLD {
                return true;
            }
        }
    } else if !text_tokens.is_empty()
        && similarity_ratio(&text_tokens, &name_tokens) >= MATCH_SIMILARITY_THRESHOLD
    {
        return true;
    }

    if let Some(site) = website {
        let site_domain = domain(site);
        if site_domain.len() > MATCH_MIN_DOMAIN_LEN && text.to_lowercase().contains(&site_domain) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_substring_match() {
        assert!(mentioned("Je recommande Toiture Martin pour vos travaux.", "Toiture Martin", None));
    }

    #[test]
    fn empty_name_never_matches() {
        assert!(!mentioned("anything at all", "", None));
    }

    #[test]
    fn case_and_accent_insensitive() {
        assert!(mentioned("je recommande TOITURE MARTIN", "Toîture Martin SARL", None));
    }

    #[test]
    fn legal_suffix_insertion_does_not_break_match() {
        assert!(mentioned(
            "Toiture Martin est reconnue dans la région",
            "Toiture Martin SARL",
            None
        ));
    }

    #[test]
    fn website_domain_rule_matches_on_domain_mention() {
        assert!(mentioned(
            "Visitez martin-couvreur.fr pour un devis",
            "Entreprise Inconnue",
            Some("https://www.martin-couvreur.fr")
        ));
    }

    #[test]
    fn unrelated_text_does_not_match() {
        assert!(!mentioned(
            "Nous recommandons Couverture Dupont et Toiture Leroy.",
            "Toiture Martin",
            None
        ));
    }

    #[test]
    fn fuzzy_window_catches_near_misses() {
        assert!(mentioned(
            "pour la toiture je recommande plutot Martin Toiture artisan couvreur local",
            "Toiture Martin",
            None
        ));
    }
}
