//! AI model adapters (§4.4).
//!
//! Each adapter wraps one provider's HTTP API behind the core's
//! `ModelAdapter` trait. A missing API key makes an adapter inert
//! (`is_active() == false`) rather than a construction error, so a campaign
//! can run with whichever providers are configured.

mod anthropic;
mod gemini;
mod openai;
mod registry;

pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;
pub use registry::AdapterRegistry;
