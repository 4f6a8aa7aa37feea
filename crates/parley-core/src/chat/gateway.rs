//! Submission gateway: one transcript in, one provider call, one reply out.
//!
//! The gateway owns the completion provider and is the single boundary
//! where upstream failures are caught, logged for the operator, and
//! classified into [`GatewayError`] kinds. No retry, no backoff, no
//! streaming.

use tracing::{debug, error};

use parley_types::chat::{SessionError, SubmissionRequest};
use parley_types::llm::{ChatMessage, CompletionRequest, GatewayError};

use crate::llm::box_provider::BoxCompletionProvider;

use super::session::ChatSession;

/// Turns a [`SubmissionRequest`] into exactly one provider call.
pub struct SubmissionGateway {
    provider: BoxCompletionProvider,
}

impl SubmissionGateway {
    pub fn new(provider: BoxCompletionProvider) -> Self {
        Self { provider }
    }

    /// Name of the backing provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Build the provider payload for a submission.
    ///
    /// The message array is always `[system instruction] ++ transcript` in
    /// original order. Callers are expected not to place system-role
    /// entries inside the transcript; if they do, those entries are passed
    /// through verbatim after the prepended instruction and the upstream
    /// behavior is provider-dependent.
    pub fn build_completion(request: &SubmissionRequest) -> CompletionRequest {
        let mut messages = Vec::with_capacity(request.transcript.len() + 1);
        messages.push(ChatMessage::system(request.system_instruction.clone()));
        messages.extend(request.transcript.iter().cloned());

        CompletionRequest {
            model: request.model_id.clone(),
            messages,
        }
    }

    /// Submit a transcript and receive the single reply message.
    ///
    /// Exactly one upstream call per invocation. Failures are logged here
    /// and returned as classified [`GatewayError`]s; nothing propagates
    /// past this boundary unhandled.
    pub async fn submit(
        &self,
        request: &SubmissionRequest,
    ) -> Result<ChatMessage, GatewayError> {
        let completion = Self::build_completion(request);
        debug!(
            provider = self.provider.name(),
            model = %completion.model,
            messages = completion.messages.len(),
            "submitting transcript"
        );

        match self.provider.complete(&completion).await {
            Ok(reply) => Ok(reply),
            Err(err) => {
                error!(
                    provider = self.provider.name(),
                    kind = %err.kind(),
                    error = %err,
                    "provider call failed"
                );
                Err(err)
            }
        }
    }

    /// Drive one full request/response cycle on a session.
    ///
    /// Appends the user turn (empty text is a silent no-op with no network
    /// call), flips the session to pending, submits, and appends either the
    /// reply or the fixed fallback message. The session is back to idle on
    /// return. Errs only if a submission was already in flight.
    pub async fn take_turn(
        &self,
        session: &mut ChatSession,
        text: &str,
        model_id: &str,
        system_instruction: &str,
    ) -> Result<(), SessionError> {
        if !session.append_user_turn(text) {
            return Ok(());
        }
        session.begin_submission()?;

        let request = SubmissionRequest {
            transcript: session.transcript().clone(),
            model_id: model_id.to_string(),
            system_instruction: system_instruction.to_string(),
        };

        match self.submit(&request).await {
            Ok(reply) => session.record_reply(reply.content),
            Err(_) => session.record_failure(),
        }
        Ok(())
    }
}
