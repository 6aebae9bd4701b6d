//! Wires the three adapters together behind `ModelAdapterRegistry` (§4.4).

use prospecting_core::ports::{ModelAdapter, ModelAdapterRegistry};
use prospecting_domain::{AiModel, Config};

use super::{AnthropicAdapter, GeminiAdapter, OpenAiAdapter};
use crate::http::HttpClient;

pub struct AdapterRegistry {
    openai: OpenAiAdapter,
    anthropic: AnthropicAdapter,
    gemini: GeminiAdapter,
}

impl AdapterRegistry {
    pub fn new(http: HttpClient, config: &Config) -> Self {
        Self {
            openai: OpenAiAdapter::new(http.clone(), config.openai_api_key.clone()),
            anthropic: AnthropicAdapter::new(http.clone(), config.anthropic_api_key.clone()),
            gemini: GeminiAdapter::new(http, config.gemini_api_key.clone()),
        }
    }
}

impl ModelAdapterRegistry for AdapterRegistry {
    fn adapter(&self, model: AiModel) -> &dyn ModelAdapter {
        match model {
            AiModel::OpenAi => &self.openai,
            AiModel::Anthropic => &self.anthropic,
            AiModel::Gemini => &self.gemini,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(openai: Option<&str>) -> Config {
        Config { openai_api_key: openai.map(String::from), ..Config::default() }
    }

    #[test]
    fn active_models_reflects_configured_keys() {
        let http = HttpClient::new().unwrap();
        let registry = AdapterRegistry::new(http, &config_with(Some("key")));

        let active = registry.active_models();
        assert_eq!(active, vec![AiModel::OpenAi]);
    }

    #[test]
    fn no_keys_means_no_active_models() {
        let http = HttpClient::new().unwrap();
        let registry = AdapterRegistry::new(http, &config_with(None));

        assert!(registry.active_models().is_empty());
    }
}
