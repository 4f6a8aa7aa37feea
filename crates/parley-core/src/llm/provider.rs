//! CompletionProvider trait definition.
//!
//! This is the abstraction the submission gateway calls through. Uses
//! RPITIT (native async fn in traits, Rust 2024 edition) for `complete`;
//! the object-safe wrapper for runtime provider selection lives in
//! [`super::box_provider`].

use parley_types::llm::{ChatMessage, CompletionRequest, GatewayError};

/// Trait for completion provider backends.
///
/// One invocation of `complete` is one upstream call: no retries, no
/// streaming. Implementations live in `parley-infra` (e.g.,
/// `OpenAiCompatibleProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the single top-choice reply.
    ///
    /// The returned message always has role `assistant`. Model id
    /// validation is delegated upstream; an unrecognized model surfaces as
    /// a [`GatewayError`] like any other provider fault.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<ChatMessage, GatewayError>> + Send;
}
