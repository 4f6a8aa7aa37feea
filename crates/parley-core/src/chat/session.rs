//! Chat session: exclusive owner of one conversation transcript.
//!
//! The session is an explicit object passed by reference to the submission
//! routine, not ambient global state. It enforces the single-in-flight
//! submission discipline through an `Idle`/`Pending` state flag so the
//! contract holds for any caller, not just a UI that disables its input.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use parley_types::chat::{SessionError, SessionState, Transcript};
use parley_types::llm::ChatMessage;

/// Fixed assistant reply appended when a submission fails.
///
/// Failures are additive: the failed user turn stays in the transcript and
/// this message lands after it.
pub const FALLBACK_REPLY: &str = "Oops! There seems to be an error. Please try again.";

/// One conversation session and its transcript.
///
/// State machine: `Idle -> Pending -> Idle` on both the success and the
/// failure path. There is no terminal error state; the session remains
/// usable after any outcome. The transcript never contains a system-role
/// entry -- only user and assistant turns are appendable.
pub struct ChatSession {
    /// UUIDv7 session ID.
    id: Uuid,
    started_at: DateTime<Utc>,
    transcript: Transcript,
    state: SessionState,
}

impl ChatSession {
    /// Create a new idle session with an empty transcript.
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            transcript: Transcript::new(),
            state: SessionState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == SessionState::Pending
    }

    /// The conversation so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Seed the transcript with an opening assistant message (e.g. a
    /// greeting shown before the first user turn).
    pub fn seed_greeting(&mut self, content: impl Into<String>) {
        self.transcript.push(ChatMessage::assistant(content));
    }

    /// Append a user turn.
    ///
    /// Returns `false` without touching the transcript when the trimmed
    /// text is empty -- blank input is silently dropped and no submission
    /// should follow.
    pub fn append_user_turn(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.transcript.push(ChatMessage::user(text));
        true
    }

    /// Flip the session to `Pending` before submitting.
    ///
    /// Fails with [`SessionError::SubmissionInFlight`] if a submission is
    /// already outstanding; a second concurrent submission is never issued.
    pub fn begin_submission(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Pending {
            return Err(SessionError::SubmissionInFlight);
        }
        self.state = SessionState::Pending;
        Ok(())
    }

    /// Record a successful reply and return to `Idle`.
    pub fn record_reply(&mut self, content: impl Into<String>) {
        self.transcript.push(ChatMessage::assistant(content));
        self.state = SessionState::Idle;
    }

    /// Record a failed submission and return to `Idle`.
    ///
    /// Appends the fixed [`FALLBACK_REPLY`]; the user turn that triggered
    /// the failure is not rolled back.
    pub fn record_failure(&mut self) {
        self.transcript.push(ChatMessage::assistant(FALLBACK_REPLY));
        self.state = SessionState::Idle;
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
