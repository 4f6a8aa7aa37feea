//! Configuration for OpenAI-compatible providers.
//!
//! Any endpoint that speaks the OpenAI chat completions protocol can be
//! targeted by pointing `base_url` at it; `openai_defaults` covers the
//! hosted api.openai.com case.

use secrecy::SecretString;

/// Configuration for an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication. An empty key is allowed; every call
    /// then fails upstream with an authentication error.
    pub api_key: SecretString,
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: SecretString) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults(SecretString::from("sk-test"));
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
    }
}
