//! Fixed, build-time constants shared across the engine.

/// Ratcliff/Obershelp similarity threshold above which a sliding window of
/// text counts as a mention. Fixed per spec — never tuned per profession.
pub const MATCH_SIMILARITY_THRESHOLD: f64 = 0.82;

/// Minimum significant-token length considered in the Matcher's token-subset
/// rule.
pub const MATCH_MIN_TOKEN_LEN: usize = 2;

/// Minimum length of an extracted domain for the Matcher's website rule to
/// apply.
pub const MATCH_MIN_DOMAIN_LEN: usize = 2;

/// Number of canonical queries every profession resolves to.
pub const QUERIES_PER_PROSPECT: usize = 5;

/// Cap on deduplicated competitor entities kept per `TestRun`.
pub const MAX_COMPETITORS_PER_RUN: usize = 20;

/// Minimum number of observations before a competitor name counts as stable.
pub const MIN_STABLE_COMPETITOR_RUNS: usize = 2;

/// Cap on competitors copied onto `Prospect::competitors_cited`.
pub const MAX_CITED_COMPETITORS: usize = 5;

/// Number of invisible models required for `EMAIL_OK`.
pub const EMAIL_OK_MODELS_REQUIRED: usize = 2;

/// Number of invisible queries required for `EMAIL_OK`.
pub const EMAIL_OK_QUERIES_REQUIRED: usize = 4;

/// Total number of adapters in the registry (openai, anthropic, gemini).
pub const TOTAL_MODELS: usize = 3;

/// Minimum Google review count treated as "established" for scoring.
pub const SCORING_MIN_REVIEWS: i64 = 20;

/// Length of a generated landing token.
pub const LANDING_TOKEN_LEN: usize = 24;

/// Default `TESTING` staleness threshold, in seconds, before a stuck
/// prospect becomes eligible for a re-run (see §9 open questions).
pub const DEFAULT_TESTING_STALE_AFTER_SECS: i64 = 3600;

/// Legal-form tokens stripped by the text normalizer, matched case
/// insensitively as whole words.
pub const LEGAL_SUFFIX_TOKENS: &[&str] = &[
    "sarl",
    "sas",
    "eurl",
    "srl",
    "snc",
    "sa",
    "spa",
    "ltd",
    "llc",
    "gmbh",
    "inc",
    "cie",
    "co",
    "groupe",
    "group",
    "et fils",
    "et associés",
    "&",
];
