//! Status and mode enums shared by the lifecycle engine.

use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// A prospect's position in the lifecycle (§4.9). `SENT_MANUAL` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProspectStatus {
    Scanned,
    Scheduled,
    Testing,
    Tested,
    Scored,
    ReadyAssets,
    ReadyToSend,
    SentManual,
}

impl_domain_status_conversions!(ProspectStatus {
    Scanned => "scanned",
    Scheduled => "scheduled",
    Testing => "testing",
    Tested => "tested",
    Scored => "scored",
    ReadyAssets => "ready_assets",
    ReadyToSend => "ready_to_send",
    SentManual => "sent_manual",
});

/// Campaign operating mode, controls whether the test runner calls real
/// adapters or only seeds dry-run rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignMode {
    DryRun,
    AutoTest,
    SendReady,
}

impl_domain_status_conversions!(CampaignMode {
    DryRun => "dry_run",
    AutoTest => "auto_test",
    SendReady => "send_ready",
});

/// Campaign activity flag; paused campaigns are skipped by both schedulers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignStatus {
    Active,
    Paused,
}

impl_domain_status_conversions!(CampaignStatus {
    Active => "active",
    Paused => "paused",
});

/// One of the three bundled AI model adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiModel {
    OpenAi,
    Anthropic,
    Gemini,
}

impl_domain_status_conversions!(AiModel {
    OpenAi => "openai",
    Anthropic => "anthropic",
    Gemini => "gemini",
});

impl AiModel {
    /// All adapters the registry knows about, in a fixed, stable order.
    pub const ALL: [AiModel; 3] = [AiModel::OpenAi, AiModel::Anthropic, AiModel::Gemini];
}
