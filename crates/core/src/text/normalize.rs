//! Accent-folding, legal-suffix stripping and domain extraction (§4.1).

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use prospecting_domain::constants::LEGAL_SUFFIX_TOKENS;

lazy_static! {
    static ref LEGAL_SUFFIX_RE: Regex = {
        let alternation = LEGAL_SUFFIX_TOKENS
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"(?i)\b({alternation})\b")).expect("legal suffix pattern compiles")
    };
    static ref NON_ALNUM_RE: Regex = Regex::new(r"[^a-z0-9]+").expect("non-alnum pattern compiles");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("whitespace pattern compiles");
}

/// Lowercases, strips combining marks, removes legal-form tokens, collapses
/// non-alphanumeric runs to spaces and squeezes whitespace. Empty input
/// yields an empty string.
#[must_use]
pub fn normalize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let folded: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    let without_legal = LEGAL_SUFFIX_RE.replace_all(&folded, " ");
    let spaced = NON_ALNUM_RE.replace_all(&without_legal, " ");
    WHITESPACE_RE.replace_all(spaced.trim(), " ").to_string()
}

/// Strips scheme and leading `www.`, truncates at the first `/` or `?`, and
/// returns the second-level label of the remaining host (or the whole host
/// if it has a single label). Missing/empty input yields an empty string.
#[must_use]
pub fn domain(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let without_scheme = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let host_end = without_scheme
        .find(['/', '?'])
        .unwrap_or(without_scheme.len());
    let host = &without_scheme[..host_end];
    let host = host.strip_prefix("www.").unwrap_or(host);
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    match labels.len() {
        0 => String::new(),
        1 => labels[0].to_string(),
        n => labels[n - 2].to_string(),
    }
}

/// Tokenizes an already-normalized string on whitespace.
#[must_use]
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}
