//! Chat session domain types for Parley.
//!
//! Defines the `Transcript` (the ordered conversation history owned by one
//! session), the `SubmissionRequest` value object handed to the submission
//! gateway, and the session state machine types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::llm::ChatMessage;

/// Ordered conversation history for one session.
///
/// Grows by one entry per user turn and one per reply (success or
/// fallback). Never truncated, never persisted, and never contains a
/// system-role entry -- the system instruction is prepended transiently by
/// the gateway at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<ChatMessage>);

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of messages in the transcript.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the transcript holds no messages.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a message in conversation order.
    pub fn push(&mut self, message: ChatMessage) {
        self.0.push(message);
    }

    /// The messages in conversation order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.0
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.0.last()
    }

    /// Iterate over the messages in conversation order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.0.iter()
    }
}

impl From<Vec<ChatMessage>> for Transcript {
    fn from(messages: Vec<ChatMessage>) -> Self {
        Self(messages)
    }
}

impl IntoIterator for Transcript {
    type Item = ChatMessage;
    type IntoIter = std::vec::IntoIter<ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A transcript plus per-call configuration, built fresh for each
/// submission.
///
/// `system_instruction` is inserted as the sole leading system message of
/// the provider payload; it is never written back into the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub transcript: Transcript,
    pub model_id: String,
    pub system_instruction: String,
}

/// Submission lifecycle state of a chat session.
///
/// `Idle -> Pending -> Idle` on both the success and failure paths; there
/// is no terminal error state and the session stays usable after failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Pending,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Pending => write!(f, "pending"),
        }
    }
}

/// Errors from session operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// A submission was started while another one was still in flight.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
}
