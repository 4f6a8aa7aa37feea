//! Application state wiring config, credentials, and the gateway together.

use std::sync::Arc;

use secrecy::SecretString;

use parley_core::chat::gateway::SubmissionGateway;
use parley_core::llm::box_provider::BoxCompletionProvider;
use parley_infra::llm::openai_compat::OpenAiCompatibleProvider;
use parley_infra::secret::env::resolve_api_key;
use parley_types::config::ServerConfig;

/// Shared application state used by both the CLI and the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<SubmissionGateway>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire the state from a loaded configuration.
    ///
    /// A missing API key is not fatal: the gateway starts anyway and every
    /// submission fails through the generic error path until a key is
    /// provided.
    pub fn new(config: ServerConfig) -> Self {
        let api_key = match resolve_api_key() {
            Some(key) => key,
            None => {
                tracing::warn!(
                    "no provider API key found (set PARLEY_OPENAI_API_KEY or OPENAI_API_KEY); \
                     every submission will fail"
                );
                SecretString::from("")
            }
        };

        let provider = OpenAiCompatibleProvider::openai(api_key);
        let gateway = SubmissionGateway::new(BoxCompletionProvider::new(provider));

        Self {
            gateway: Arc::new(gateway),
            config: Arc::new(config),
        }
    }
}
