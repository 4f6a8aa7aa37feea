//! Transcript submission endpoint.
//!
//! POST /api/chat
//!
//! Request body: `{ "messages": [...], "model": "...", "role_selected": "..." }`
//! where `role_selected` is the system instruction text. The response is
//! always status 200; callers must treat the presence of an `error` field
//! as the only failure signal:
//!
//! - success: `{ "result": { "role": "assistant", "content": "..." } }`
//! - failure: `{ "error": { "kind": "...", "message": "..." } }`

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use parley_types::chat::{SubmissionRequest, Transcript};
use parley_types::llm::{ChatMessage, ErrorKind};

use crate::state::AppState;

/// Request body for the chat endpoint.
///
/// Field names follow the original wire contract. Callers are expected
/// not to place system-role entries inside `messages`; any that appear are
/// forwarded verbatim after the prepended instruction.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The full transcript in conversation order.
    pub messages: Vec<ChatMessage>,
    /// Provider model identifier; empty falls back to the configured default.
    pub model: String,
    /// System instruction text, forwarded verbatim (empty included).
    pub role_selected: String,
}

/// Response envelope: exactly one of `result` or `error`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Reply { result: ChatMessage },
    Failure { error: ChatErrorBody },
}

/// Failure payload with a machine-readable kind.
#[derive(Debug, Serialize)]
pub struct ChatErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

/// POST /api/chat -- one provider call per request.
///
/// Stateless: the transcript rides in the request body and the reply is
/// not stored server-side. All failures come back as a 200 with an
/// `error` field; nothing propagates past this boundary unhandled.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let model_id = if body.model.is_empty() {
        state.config.default_model.clone()
    } else {
        body.model
    };

    // `role_selected` is free-form instruction text and goes upstream
    // exactly as sent, even when empty.
    let request = SubmissionRequest {
        transcript: Transcript::from(body.messages),
        model_id,
        system_instruction: body.role_selected,
    };

    match state.gateway.submit(&request).await {
        Ok(result) => Json(ChatResponse::Reply { result }),
        Err(err) => Json(ChatResponse::Failure {
            error: ChatErrorBody {
                kind: err.kind(),
                message: err.to_string(),
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use parley_core::chat::gateway::SubmissionGateway;
    use parley_core::llm::box_provider::BoxCompletionProvider;
    use parley_core::llm::provider::CompletionProvider;
    use parley_types::config::ServerConfig;
    use parley_types::llm::{CompletionRequest, GatewayError, Role};

    /// Replays a fixed outcome and records every upstream payload.
    struct FixedProvider {
        outcome: Result<String, ErrorKind>,
        calls: Mutex<Vec<CompletionRequest>>,
    }

    impl FixedProvider {
        fn new(outcome: Result<String, ErrorKind>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    /// Local newtype: the orphan rule forbids implementing the trait
    /// directly on `Arc<FixedProvider>`.
    struct SharedProvider(Arc<FixedProvider>);

    impl CompletionProvider for SharedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<ChatMessage, GatewayError> {
            self.0.calls.lock().unwrap().push(request.clone());
            match &self.0.outcome {
                Ok(content) => Ok(ChatMessage::assistant(content.clone())),
                Err(ErrorKind::InvalidCredentials) => Err(GatewayError::InvalidCredentials),
                Err(_) => Err(GatewayError::ProviderUnavailable("down".into())),
            }
        }
    }

    fn state_with(provider: &Arc<FixedProvider>) -> AppState {
        let gateway =
            SubmissionGateway::new(BoxCompletionProvider::new(SharedProvider(Arc::clone(
                provider,
            ))));
        AppState {
            gateway: Arc::new(gateway),
            config: Arc::new(ServerConfig::default()),
        }
    }

    fn request_body() -> ChatRequest {
        ChatRequest {
            messages: vec![
                ChatMessage::assistant("Hi there! How can I help?"),
                ChatMessage::user("What is 2+2?"),
            ],
            model: "gpt-4o-mini".to_string(),
            role_selected: "You are a helpful assistant.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_chat_success_envelope() {
        let provider = FixedProvider::new(Ok("4".to_string()));
        let state = state_with(&provider);
        let Json(response) = chat(State(state), Json(request_body())).await;

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["result"]["role"], "assistant");
        assert_eq!(value["result"]["content"], "4");
        assert!(value.get("error").is_none());
    }

    #[tokio::test]
    async fn test_chat_failure_envelope_is_well_formed_json() {
        let provider = FixedProvider::new(Err(ErrorKind::ProviderUnavailable));
        let state = state_with(&provider);
        let Json(response) = chat(State(state), Json(request_body())).await;

        let value = serde_json::to_value(&response).unwrap();
        // "Has an error field" is the only failure signal.
        assert!(value.get("error").is_some());
        assert!(value.get("result").is_none());
        assert_eq!(value["error"]["kind"], "provider_unavailable");
    }

    #[tokio::test]
    async fn test_chat_failure_classifies_credentials() {
        let provider = FixedProvider::new(Err(ErrorKind::InvalidCredentials));
        let state = state_with(&provider);
        let Json(response) = chat(State(state), Json(request_body())).await;

        match response {
            ChatResponse::Failure { error } => {
                assert_eq!(error.kind, ErrorKind::InvalidCredentials);
            }
            ChatResponse::Reply { .. } => panic!("expected failure envelope"),
        }
    }

    #[tokio::test]
    async fn test_chat_empty_model_uses_config_default() {
        let provider = FixedProvider::new(Ok("hello".to_string()));
        let state = state_with(&provider);
        let body = ChatRequest {
            messages: vec![ChatMessage::user("hi")],
            model: String::new(),
            role_selected: "You are a helpful assistant.".to_string(),
        };

        let Json(response) = chat(State(state), Json(body)).await;
        match response {
            ChatResponse::Reply { result } => {
                assert_eq!(result.role, Role::Assistant);
                assert_eq!(result.content, "hello");
            }
            ChatResponse::Failure { .. } => panic!("expected reply"),
        }

        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn test_chat_empty_instruction_is_forwarded_verbatim() {
        let provider = FixedProvider::new(Ok("hello".to_string()));
        let state = state_with(&provider);
        let body = ChatRequest {
            messages: vec![ChatMessage::user("hi")],
            model: "gpt-4o-mini".to_string(),
            role_selected: String::new(),
        };

        chat(State(state), Json(body)).await;

        // The instruction is free-form text; an empty string goes upstream
        // as an empty system message, not the configured default.
        let calls = provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages[0].role, Role::System);
        assert_eq!(calls[0].messages[0].content, "");
    }
}
