//! Trait boundaries the core depends on but does not implement (§4.4, §4.11).
//! Infra provides concrete adapters; core only ever sees these traits.

use async_trait::async_trait;

use prospecting_domain::{AiModel, Campaign, Prospect, ProspectStatus, Result, TestRun};

/// Uniform call signature for the three bundled AI model adapters (§4.4).
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    fn model(&self) -> AiModel;

    /// True iff the adapter's API key is configured.
    fn is_active(&self) -> bool;

    /// Asks the model `query` and returns its raw text answer. Errors here
    /// are caught by the test runner and never abort a sweep.
    async fn ask(&self, query: &str) -> Result<String>;
}

/// Looks up adapters by model id and reports which are active.
pub trait ModelAdapterRegistry: Send + Sync {
    fn adapter(&self, model: AiModel) -> &dyn ModelAdapter;

    fn active_models(&self) -> Vec<AiModel> {
        AiModel::ALL
            .iter()
            .copied()
            .filter(|m| self.adapter(*m).is_active())
            .collect()
    }
}

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn create_campaign(&self, campaign: Campaign) -> Result<Campaign>;
    async fn get_campaign(&self, id: &str) -> Result<Option<Campaign>>;
    async fn list_campaigns(&self) -> Result<Vec<Campaign>>;
    async fn save_campaign(&self, campaign: &Campaign) -> Result<()>;
}

#[async_trait]
pub trait ProspectRepository: Send + Sync {
    async fn create_prospect(&self, prospect: Prospect) -> Result<Prospect>;
    async fn get_prospect(&self, id: &str) -> Result<Option<Prospect>>;
    async fn get_prospect_by_token(&self, token: &str) -> Result<Option<Prospect>>;
    /// Ordered by score descending, nulls last.
    async fn list_prospects(
        &self,
        campaign_id: &str,
        status: Option<ProspectStatus>,
    ) -> Result<Vec<Prospect>>;
    async fn save_prospect(&self, prospect: &Prospect) -> Result<()>;
}

#[async_trait]
pub trait TestRunRepository: Send + Sync {
    async fn create_run(&self, run: TestRun) -> Result<TestRun>;
    /// Ascending by timestamp.
    async fn list_runs(&self, prospect_id: &str) -> Result<Vec<TestRun>>;
}

/// Umbrella trait bundling the three repository traits so callers needing
/// the full surface (e.g. the test runner, the HTTP layer) can hold a
/// single `Arc<dyn Repository>`.
pub trait Repository: CampaignRepository + ProspectRepository + TestRunRepository {}
impl<T: CampaignRepository + ProspectRepository + TestRunRepository> Repository for T {}
