//! Deterministic profession → 5-query template bank (§4.5).

use prospecting_domain::constants::QUERIES_PER_PROSPECT;

const COUVREUR: [&str; 5] = [
    "Quel est le meilleur couvreur à {city} ?",
    "Couvreur recommandé à {city}",
    "Entreprise fiable pour réparation toiture {city}",
    "Qui contacter pour fuite toiture à {city} ?",
    "Couvreur urgent {city} avis",
];

const PLOMBIER: [&str; 5] = [
    "Meilleur plombier à {city} ?",
    "Plombier recommandé à {city}",
    "Dépannage plomberie urgence {city}",
    "Qui appeler pour fuite d'eau à {city} ?",
    "Plombier {city} avis fiable",
];

const ELECTRICIEN: [&str; 5] = [
    "Meilleur électricien à {city} ?",
    "Électricien recommandé {city}",
    "Dépannage électrique urgent {city}",
    "Qui contacter panne électrique {city} ?",
    "Électricien {city} avis certifié",
];

const DEFAULT: [&str; 5] = [
    "Meilleur {profession} à {city} ?",
    "{profession} recommandé à {city}",
    "Entreprise fiable {profession} {city}",
    "Qui contacter pour {profession} à {city} ?",
    "{profession} {city} avis",
];

fn templates_for(profession: &str) -> &'static [&'static str; 5] {
    match profession.to_lowercase().as_str() {
        "couvreur" => &COUVREUR,
        "plombier" => &PLOMBIER,
        "electricien" => &ELECTRICIEN,
        _ => &DEFAULT,
    }
}

/// Substitutes `{profession}` and `{city}` into the five templates for
/// `profession`, falling back to the generic wording for unknown
/// professions. Always returns exactly 5 queries.
#[must_use]
pub fn queries_for(profession: &str, city: &str) -> Vec<String> {
    let queries: Vec<String> = templates_for(profession)
        .iter()
        .map(|t| t.replace("{profession}", profession).replace("{city}", city))
        .collect();
    debug_assert_eq!(queries.len(), QUERIES_PER_PROSPECT);
    queries
}
