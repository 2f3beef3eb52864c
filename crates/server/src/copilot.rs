//! Chat copilot session.
//!
//! The caller retains an ordered, append-only transcript of
//! (role, text, timestamp) entries across turns. The collaborator itself is
//! stateless per call: each turn sends only the current message and the
//! current plant snapshot, never prior turns. Any transport or parsing
//! failure yields the fixed fallback string, recorded in the transcript as
//! a normal assistant turn.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use ai_client::{AiClient, ChatContext};
use roster::RosterIndex;

/// Fixed reply appended when the collaborator cannot answer.
pub const FALLBACK_REPLY: &str =
    "I'm having trouble processing your request right now. Please try again.";

/// Opening assistant turn seeded into every new session.
const GREETING: &str =
    "Hi! I'm your SkillMatrix copilot. Ask me about operators, skills, machines, or certifications.";

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// One transcript entry.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn now(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only chat transcript plus the send operation.
pub struct CopilotSession {
    transcript: Vec<ChatMessage>,
}

impl CopilotSession {
    /// New session seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatMessage::now(ChatRole::Assistant, GREETING)],
        }
    }

    /// The full transcript, oldest first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Send one user message and append the assistant's reply.
    ///
    /// Never fails: collaborator errors become [`FALLBACK_REPLY`], logged
    /// by kind ("unavailable" vs "try again") but indistinguishable in the
    /// transcript from a normal turn. Returns the reply text.
    pub async fn send(&mut self, ai: &AiClient, roster: &RosterIndex, message: &str) -> String {
        self.transcript
            .push(ChatMessage::now(ChatRole::User, message));

        let context = ChatContext::build(roster, Utc::now().date_naive());
        let reply = match ai.chat(message, &context).await {
            Ok(text) => text,
            Err(err) if err.is_unconfigured() => {
                debug!("Copilot unavailable: {err}");
                FALLBACK_REPLY.to_string()
            }
            Err(err) => {
                warn!("Copilot turn failed: {err}");
                FALLBACK_REPLY.to_string()
            }
        };

        self.transcript
            .push(ChatMessage::now(ChatRole::Assistant, reply.clone()));
        reply
    }
}

impl Default for CopilotSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_client::AiClientConfig;
    use roster::fixtures;

    #[test]
    fn test_new_session_starts_with_greeting() {
        let session = CopilotSession::new();

        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn test_send_without_credential_appends_fallback_turn() {
        let ai = AiClient::new(AiClientConfig::unconfigured());
        let roster = fixtures::demo();
        let mut session = CopilotSession::new();

        let reply = session.send(&ai, &roster, "Who can run the Haas VF-2?").await;

        assert_eq!(reply, FALLBACK_REPLY);
        // Greeting, user turn, assistant fallback - in order
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, ChatRole::User);
        assert_eq!(transcript[1].text, "Who can run the Haas VF-2?");
        assert_eq!(transcript[2].role, ChatRole::Assistant);
        assert_eq!(transcript[2].text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_transcript_is_append_only_across_turns() {
        let ai = AiClient::new(AiClientConfig::unconfigured());
        let roster = fixtures::demo();
        let mut session = CopilotSession::new();

        session.send(&ai, &roster, "first").await;
        session.send(&ai, &roster, "second").await;

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript[1].text, "first");
        assert_eq!(transcript[3].text, "second");
        // Timestamps never go backwards
        for pair in transcript.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }
}
