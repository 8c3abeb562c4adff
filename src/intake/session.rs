//! Per-user sessions and the store that owns them.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::backend::Record;
use crate::intake::state::ConversationStep;

/// In-progress answers for one user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub chat_id: String,
    pub step: ConversationStep,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Session {
    pub fn new(chat_id: &str) -> Self {
        Self {
            chat_id: chat_id.to_string(),
            ..Default::default()
        }
    }

    /// Store `text` into the field the current step is waiting for.
    ///
    /// Each field is written exactly once: the machine only moves forward.
    fn store_answer(&mut self, text: &str) {
        let value = Some(text.to_string());
        match self.step {
            ConversationStep::AwaitingFirstName => self.first_name = value,
            ConversationStep::AwaitingLastName => self.last_name = value,
            ConversationStep::AwaitingEmail => self.email = value,
            ConversationStep::AwaitingPhone => self.phone = value,
            ConversationStep::Terminal => {}
        }
    }

    /// Build the submission payload from a finished session.
    ///
    /// All four answers are present once the final step has been fed; the
    /// linear step order enforces this, not runtime validation.
    pub fn into_record(self) -> Record {
        Record {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone_number: self.phone.unwrap_or_default(),
            chat_id: self.chat_id,
            has_license: false,
        }
    }
}

/// What a single answer did to the conversation.
#[derive(Debug)]
pub enum StepOutcome {
    /// More answers needed; send this prompt next.
    NextPrompt(&'static str),
    /// All fields collected; the session has been removed from the store.
    Completed(Session),
}

/// Session map owned by the engine, keyed by chat id.
///
/// Entries are created on the entry command and removed on terminal
/// transition, so the map only ever holds in-flight conversations.
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or reset) the session for a chat.
    pub async fn begin(&self, chat_id: &str) {
        let mut sessions = self.inner.write().await;
        sessions.insert(chat_id.to_string(), Session::new(chat_id));
    }

    /// Discard the session for a chat, returning it if one existed.
    pub async fn remove(&self, chat_id: &str) -> Option<Session> {
        self.inner.write().await.remove(chat_id)
    }

    /// Feed one answer to the chat's session: store the field, advance the
    /// step, and hand back either the next prompt or the finished session.
    ///
    /// Returns `None` when the chat has no active conversation. The whole
    /// step runs under the write lock with no await points, so each
    /// transition is atomic per chat.
    pub async fn advance_with_answer(&self, chat_id: &str, text: &str) -> Option<StepOutcome> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(chat_id)?;

        session.store_answer(text);
        let next = session.step.next()?;
        session.step = next;
        tracing::debug!(%chat_id, step = %next, "Conversation advanced");

        if next.is_terminal() {
            sessions.remove(chat_id).map(StepOutcome::Completed)
        } else {
            next.prompt().map(StepOutcome::NextPrompt)
        }
    }

    /// Number of in-flight conversations.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
