//! BoxCompletionProvider -- object-safe dynamic dispatch wrapper for
//! CompletionProvider.
//!
//! 1. Define an object-safe `CompletionProviderDyn` trait with boxed futures
//! 2. Blanket-impl `CompletionProviderDyn` for all `T: CompletionProvider`
//! 3. `BoxCompletionProvider` wraps `Box<dyn CompletionProviderDyn>` and
//!    delegates

use std::future::Future;
use std::pin::Pin;

use parley_types::llm::{ChatMessage, CompletionRequest, GatewayError};

use super::provider::CompletionProvider;

/// Object-safe version of [`CompletionProvider`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch; a blanket
/// implementation is provided for all types implementing
/// `CompletionProvider`.
pub trait CompletionProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ChatMessage, GatewayError>> + Send + 'a>>;
}

impl<T: CompletionProvider> CompletionProviderDyn for T {
    fn name(&self) -> &str {
        CompletionProvider::name(self)
    }

    fn complete_boxed<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ChatMessage, GatewayError>> + Send + 'a>> {
        Box::pin(self.complete(request))
    }
}

/// Type-erased completion provider.
///
/// `CompletionProvider` uses RPITIT and cannot be a trait object directly;
/// `BoxCompletionProvider` provides equivalent methods delegating to the
/// inner `CompletionProviderDyn` trait object. This is what the gateway
/// holds, which also lets tests swap in mock providers.
pub struct BoxCompletionProvider {
    inner: Box<dyn CompletionProviderDyn + Send + Sync>,
}

impl BoxCompletionProvider {
    /// Wrap a concrete `CompletionProvider` in a type-erased box.
    pub fn new<T: CompletionProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Send a completion request and receive the single reply message.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<ChatMessage, GatewayError> {
        self.inner.complete_boxed(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::llm::Role;

    struct EchoProvider;

    impl CompletionProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<ChatMessage, GatewayError> {
            let last = request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(ChatMessage::assistant(last))
        }
    }

    #[tokio::test]
    async fn test_box_provider_delegates() {
        let provider = BoxCompletionProvider::new(EchoProvider);
        assert_eq!(provider.name(), "echo");

        let request = CompletionRequest {
            model: "test".to_string(),
            messages: vec![ChatMessage::user("ping")],
        };
        let reply = provider.complete(&request).await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "ping");
    }
}
