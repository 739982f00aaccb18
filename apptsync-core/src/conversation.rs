//! Conversational command channel.
//!
//! Every line the user types, chit-chat or instruction, goes to the remote
//! interpreter as plain text under one fixed session id. The transcript is
//! presentation only: it lives for the process lifetime and never feeds
//! back into appointment state.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::appointment::AppointmentId;
use crate::constants::{CONNECTION_FAILURE_REPLY, DEFAULT_SESSION_ID};
use crate::remote::RemoteSyncClient;

/// Identifier scoping all exchanges to the single conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        SessionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        SessionId::new(DEFAULT_SESSION_ID)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMessage {
    pub sender: Sender,
    pub text: String,
}

impl ConversationMessage {
    pub fn user(text: impl Into<String>) -> Self {
        ConversationMessage {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn agent(text: impl Into<String>) -> Self {
        ConversationMessage {
            sender: Sender::Agent,
            text: text.into(),
        }
    }
}

/// The text that asks the remote interpreter to delete an appointment.
pub fn delete_command(id: &AppointmentId) -> String {
    format!("delete appointment {id}")
}

pub struct ConversationSession {
    client: Arc<dyn RemoteSyncClient>,
    session_id: SessionId,
    transcript: Mutex<Vec<ConversationMessage>>,
}

impl ConversationSession {
    pub fn new(client: Arc<dyn RemoteSyncClient>, session_id: SessionId) -> Self {
        ConversationSession {
            client,
            session_id,
            transcript: Mutex::new(Vec::new()),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Send a line of user text and record the exchange.
    ///
    /// Blank input is ignored entirely. Otherwise the user message is
    /// recorded before the round trip and exactly one agent message after
    /// it, the real reply or a connection failure notice. Returns that agent
    /// message.
    ///
    /// The two appends take the lock separately, so overlapping sends may
    /// interleave (user A, user B, agent A, agent B). The user-then-agent
    /// ordering of the last two entries only holds for sends that do not
    /// overlap; every user message is still answered exactly once.
    pub async fn send(&self, text: &str) -> Option<ConversationMessage> {
        if text.trim().is_empty() {
            return None;
        }

        self.append(ConversationMessage::user(text));

        let reply = match self.client.send_command(text, &self.session_id).await {
            Ok(response) => ConversationMessage::agent(response),
            Err(e) => {
                tracing::warn!(error = %e, session = %self.session_id, "Command failed");
                ConversationMessage::agent(CONNECTION_FAILURE_REPLY)
            }
        };

        self.append(reply.clone());
        Some(reply)
    }

    /// Ask the remote side to delete an appointment.
    ///
    /// Success only means the interpreter answered. The appointment
    /// disappears from the store on the next successful poll, if at all.
    pub async fn delete_appointment(&self, id: &AppointmentId) -> Option<ConversationMessage> {
        self.send(&delete_command(id)).await
    }

    pub fn history(&self) -> Vec<ConversationMessage> {
        self.transcript().clone()
    }

    fn append(&self, message: ConversationMessage) {
        self.transcript().push(message);
    }

    fn transcript(&self) -> MutexGuard<'_, Vec<ConversationMessage>> {
        self.transcript.lock().unwrap_or_else(|e| e.into_inner())
    }
}
