//! LLM conversation and gateway error types for Parley.
//!
//! These types model the data shapes crossing the provider boundary:
//! conversation messages, the completion payload sent to a provider, and
//! the classified errors coming back from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single conversation message. Immutable once created; duplicates are
/// allowed and ordering is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Build an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// The exact payload handed to a completion provider.
///
/// `messages` carries the leading system-instruction message followed by
/// the full transcript in original order. Built by the submission gateway;
/// providers send it as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Errors from the submission gateway and its provider backends.
///
/// The upstream failure is classified by kind at the boundary even though
/// callers receive a single generic failure signal; tests and logs assert
/// on the kind, never on message text.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("invalid provider credentials")]
    InvalidCredentials,

    #[error("rate limited by provider")]
    RateLimited,

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("unknown provider error: {0}")]
    Unknown(String),
}

impl GatewayError {
    /// The wire-serializable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::ProviderUnavailable(_) => ErrorKind::ProviderUnavailable,
            GatewayError::InvalidCredentials => ErrorKind::InvalidCredentials,
            GatewayError::RateLimited => ErrorKind::RateLimited,
            GatewayError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            GatewayError::Unknown(_) => ErrorKind::Unknown,
        }
    }
}

/// Machine-readable error classification carried in failure payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ProviderUnavailable,
    InvalidCredentials,
    RateLimited,
    MalformedResponse,
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ProviderUnavailable => write!(f, "provider_unavailable"),
            ErrorKind::InvalidCredentials => write!(f, "invalid_credentials"),
            ErrorKind::RateLimited => write!(f, "rate_limited"),
            ErrorKind::MalformedResponse => write!(f, "malformed_response"),
            ErrorKind::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for ErrorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "provider_unavailable" => Ok(ErrorKind::ProviderUnavailable),
            "invalid_credentials" => Ok(ErrorKind::InvalidCredentials),
            "rate_limited" => Ok(ErrorKind::RateLimited),
            "malformed_response" => Ok(ErrorKind::MalformedResponse),
            "unknown" => Ok(ErrorKind::Unknown),
            other => Err(format!("invalid error kind: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::System, Role::User, Role::Assistant] {
            let s = role.to_string();
            let parsed: Role = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Role::Assistant);
    }

    #[test]
    fn test_chat_message_json_shape() {
        let msg = ChatMessage::user("What is 2+2?");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"What is 2+2?"}"#);

        let parsed: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_completion_request_serde() {
        let request = CompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![
                ChatMessage::system("You are a helpful assistant."),
                ChatMessage::user("Hello"),
            ],
        };
        let json = serde_json::to_string(&request).unwrap();
        let parsed: CompletionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.model, "gpt-4o-mini");
        assert_eq!(parsed.messages.len(), 2);
        assert_eq!(parsed.messages[0].role, Role::System);
    }

    #[test]
    fn test_gateway_error_kinds() {
        assert_eq!(
            GatewayError::ProviderUnavailable("down".into()).kind(),
            ErrorKind::ProviderUnavailable
        );
        assert_eq!(
            GatewayError::InvalidCredentials.kind(),
            ErrorKind::InvalidCredentials
        );
        assert_eq!(GatewayError::RateLimited.kind(), ErrorKind::RateLimited);
        assert_eq!(
            GatewayError::MalformedResponse("no choices".into()).kind(),
            ErrorKind::MalformedResponse
        );
        assert_eq!(GatewayError::Unknown("?".into()).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_error_kind_serde_snake_case() {
        let json = serde_json::to_string(&ErrorKind::ProviderUnavailable).unwrap();
        assert_eq!(json, "\"provider_unavailable\"");
        let parsed: ErrorKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ErrorKind::ProviderUnavailable);
    }

    #[test]
    fn test_error_kind_roundtrip() {
        for kind in [
            ErrorKind::ProviderUnavailable,
            ErrorKind::InvalidCredentials,
            ErrorKind::RateLimited,
            ErrorKind::MalformedResponse,
            ErrorKind::Unknown,
        ] {
            let s = kind.to_string();
            let parsed: ErrorKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }
}
