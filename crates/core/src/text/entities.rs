//! Pulls candidate company names and URLs out of free-form AI answers (§4.3).

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use prospecting_domain::Entity;

use super::normalize::domain;

lazy_static! {
    static ref URL_RE: Regex = Regex::new(r"https?://\S+").expect("url pattern compiles");
    // Unicode-aware capitalized phrase, 1-4 words, including accented uppercase letters.
    static ref COMPANY_RE: Regex = Regex::new(
        r"(?:[A-ZÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖØÙÚÛÜÝ][a-zàáâãäåæçèéêëìíîïðñòóôõöøùúûüý]+\s?){1,4}"
    )
    .expect("company pattern compiles");
}

/// Scans `text` for URLs and capitalized company-like phrases, deduplicating
/// case-insensitively on `value` while preserving first-seen order.
#[must_use]
pub fn extract_entities(text: &str) -> Vec<Entity> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for m in URL_RE.find_iter(text) {
        let value = m.as_str().trim_end_matches(['.', ',', ')', ']']).to_string();
        let key = value.to_lowercase();
        if seen.insert(key) {
            let d = domain(&value);
            out.push(Entity::url(value, d));
        }
    }

    for m in COMPANY_RE.find_iter(text) {
        let value = m.as_str().trim().to_string();
        if value.len() <= 3 {
            continue;
        }
        let key = value.to_lowercase();
        if seen.insert(key) {
            out.push(Entity::company(value));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use prospecting_domain::types::entity::EntityKind;

    #[test]
    fn extracts_url_and_company() {
        let text = "Je recommande Couverture Dupont, voir https://dupont-couverture.fr pour plus.";
        let entities = extract_entities(text);
        assert!(entities.iter().any(|e| e.kind == EntityKind::Url));
        assert!(entities.iter().any(|e| e.kind == EntityKind::Company && e.value.contains("Couverture Dupont")));
    }

    #[test]
    fn deduplicates_case_insensitively_preserving_order() {
        let text = "Martin Toiture est reconnu. martin toiture est excellent.";
        let entities = extract_entities(text);
        let companies: Vec<_> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Company)
            .collect();
        assert_eq!(companies.len(), 1);
    }

    #[test]
    fn concatenated_text_yields_same_multiset_as_single_copy() {
        let text = "Couverture Dupont est recommandée pour Paris.";
        let once = extract_entities(text);
        let twice_input = format!("{text} {text}");
        let twice = extract_entities(&twice_input);
        assert_eq!(once.len(), twice.len());
    }

    #[test]
    fn ignores_short_fragments() {
        let entities = extract_entities("Le Roi. Un Toit. Tout.");
        assert!(entities.iter().all(|e| e.value.len() > 3));
    }
}
