//! OpenAI-compatible completion provider.
//!
//! Implements [`CompletionProvider`] against any endpoint speaking the
//! OpenAI chat completions protocol, using [`async_openai`] for type-safe
//! request/response handling. One `complete` call is one upstream request;
//! the reply is read from `choices[0].message` and passed through
//! unchanged.

pub mod config;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use secrecy::ExposeSecret;

use parley_core::llm::provider::CompletionProvider;
use parley_types::llm::{ChatMessage, CompletionRequest, GatewayError, Role};

use self::config::OpenAiCompatConfig;

/// Provider for any OpenAI-compatible chat completions API.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
        }
    }

    /// Create a provider targeting api.openai.com.
    pub fn openai(api_key: secrecy::SecretString) -> Self {
        Self::new(config::openai_defaults(api_key))
    }

    /// Build a [`CreateChatCompletionRequest`] from the gateway payload.
    ///
    /// The payload's message order is preserved exactly; the gateway has
    /// already placed the system instruction first.
    fn build_request(request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(|msg| match msg.role {
                Role::System => {
                    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
                Role::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                        name: None,
                    })
                }
                Role::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                        content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                            msg.content.clone(),
                        )),
                        refusal: None,
                        name: None,
                        audio: None,
                        tool_calls: None,
                        function_call: None,
                    })
                }
            })
            .collect();

        CreateChatCompletionRequest {
            model: request.model.clone(),
            messages,
            ..Default::default()
        }
    }
}

impl CompletionProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<ChatMessage, GatewayError> {
        let oai_request = Self::build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::MalformedResponse("response contained no choices".into()))?;

        let content = choice.message.content.ok_or_else(|| {
            GatewayError::MalformedResponse("top choice carried no text content".into())
        })?;

        Ok(ChatMessage::assistant(content))
    }
}

/// Map an `async_openai::error::OpenAIError` to a classified [`GatewayError`].
fn map_openai_error(err: async_openai::error::OpenAIError) -> GatewayError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                GatewayError::InvalidCredentials
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                GatewayError::RateLimited
            } else if code == "server_error" || error_type == "overloaded_error" {
                GatewayError::ProviderUnavailable(api_err.message.clone())
            } else {
                GatewayError::Unknown(err.to_string())
            }
        }
        OpenAIError::Reqwest(reqwest_err) => {
            if let Some(status) = reqwest_err.status() {
                match status.as_u16() {
                    401 | 403 => GatewayError::InvalidCredentials,
                    429 => GatewayError::RateLimited,
                    500..=599 => GatewayError::ProviderUnavailable(err.to_string()),
                    _ => GatewayError::Unknown(err.to_string()),
                }
            } else {
                // Connection-level failures carry no status.
                GatewayError::ProviderUnavailable(err.to_string())
            }
        }
        OpenAIError::JSONDeserialize(_, content) => {
            GatewayError::MalformedResponse(format!("failed to parse response: {content}"))
        }
        _ => GatewayError::Unknown(err.to_string()),
    }
}
