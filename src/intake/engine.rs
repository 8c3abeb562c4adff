//! Conversation engine — drives the prompt/collect/advance cycle.

use std::sync::Arc;

use crate::backend::Submitter;
use crate::channels::{IncomingMessage, OutgoingResponse};
use crate::intake::session::{SessionStore, StepOutcome};
use crate::intake::texts;

/// Entry command that starts (or restarts) a conversation.
const CMD_START: &str = "start";
/// Command that abandons the current conversation.
const CMD_CANCEL: &str = "cancel";
/// Utility command that echoes the sender's chat id.
const CMD_CHAT_ID: &str = "chatid";

/// The intake conversation engine.
///
/// Owns the session store and the submitter; shared across per-chat workers
/// behind an `Arc`.
pub struct IntakeEngine {
    sessions: SessionStore,
    submitter: Arc<dyn Submitter>,
}

impl IntakeEngine {
    pub fn new(submitter: Arc<dyn Submitter>) -> Self {
        Self {
            sessions: SessionStore::new(),
            submitter,
        }
    }

    /// Handle one inbound message and produce the reply, if any.
    ///
    /// Unrecognized commands, and plain text outside a conversation, yield
    /// no reply.
    pub async fn handle_message(&self, msg: &IncomingMessage) -> Option<OutgoingResponse> {
        match msg.command() {
            Some(command) => self.handle_command(&msg.chat_id, command).await,
            None => self.handle_answer(msg).await,
        }
    }

    async fn handle_command(&self, chat_id: &str, command: &str) -> Option<OutgoingResponse> {
        match command {
            CMD_START => {
                self.sessions.begin(chat_id).await;
                tracing::info!(%chat_id, "Conversation started");
                Some(OutgoingResponse::text(texts::PROMPT_FIRST_NAME))
            }
            CMD_CANCEL => {
                if self.sessions.remove(chat_id).await.is_some() {
                    tracing::info!(%chat_id, "Conversation cancelled");
                    Some(OutgoingResponse::text(texts::CANCELLED).with_keyboard_cleared())
                } else {
                    None
                }
            }
            CMD_CHAT_ID => Some(OutgoingResponse::text(format!("Your chat ID is: {chat_id}"))),
            _ => None,
        }
    }

    async fn handle_answer(&self, msg: &IncomingMessage) -> Option<OutgoingResponse> {
        match self
            .sessions
            .advance_with_answer(&msg.chat_id, &msg.text)
            .await?
        {
            StepOutcome::NextPrompt(prompt) => Some(OutgoingResponse::text(prompt)),
            StepOutcome::Completed(session) => {
                let record = session.into_record();
                let outcome = self.submitter.submit(&record).await;
                tracing::info!(chat_id = %msg.chat_id, ?outcome, "Conversation finished");
                Some(OutgoingResponse::text(texts::outcome_text(outcome)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use super::*;
    use crate::backend::{Outcome, Record};

    /// Submitter that records every submission and returns a fixed outcome.
    struct MockSubmitter {
        outcome: Outcome,
        records: Mutex<Vec<Record>>,
    }

    impl MockSubmitter {
        fn new(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                records: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl Submitter for MockSubmitter {
        async fn submit(&self, record: &Record) -> Outcome {
            self.records.lock().await.push(record.clone());
            self.outcome
        }
    }

    fn msg(chat_id: &str, text: &str) -> IncomingMessage {
        IncomingMessage::new("test", chat_id, text)
    }

    async fn reply(
        engine: &IntakeEngine,
        chat_id: &str,
        text: &str,
    ) -> Option<OutgoingResponse> {
        engine.handle_message(&msg(chat_id, text)).await
    }

    #[tokio::test]
    async fn full_conversation_submits_the_record() {
        let submitter = MockSubmitter::new(Outcome::Submitted);
        let engine = IntakeEngine::new(submitter.clone());

        let exchanges = [
            ("/start", texts::PROMPT_FIRST_NAME),
            ("Ali", texts::PROMPT_LAST_NAME),
            ("Veli", texts::PROMPT_EMAIL),
            ("a@b.com", texts::PROMPT_PHONE),
            ("5551234567", texts::SUBMITTED),
        ];
        for (input, expected) in exchanges {
            let r = reply(&engine, "42", input).await.unwrap();
            assert_eq!(r.content, expected);
            assert!(!r.clear_keyboard);
        }

        let records = submitter.records.lock().await;
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            Record {
                first_name: "Ali".to_string(),
                last_name: "Veli".to_string(),
                email: "a@b.com".to_string(),
                phone_number: "5551234567".to_string(),
                chat_id: "42".to_string(),
                has_license: false,
            }
        );
    }

    #[tokio::test]
    async fn cancel_in_every_state_skips_submission() {
        let inputs = ["Ali", "Veli", "a@b.com"];

        for answers_given in 0..=3 {
            let submitter = MockSubmitter::new(Outcome::Submitted);
            let engine = IntakeEngine::new(submitter.clone());

            reply(&engine, "7", "/start").await.unwrap();
            for &text in &inputs[..answers_given] {
                reply(&engine, "7", text).await.unwrap();
            }

            let r = reply(&engine, "7", "/cancel").await.unwrap();
            assert_eq!(r.content, texts::CANCELLED);
            assert!(r.clear_keyboard);
            assert!(submitter.records.lock().await.is_empty());

            // The conversation is over; stray text does nothing.
            assert!(reply(&engine, "7", "stray text").await.is_none());
        }
    }

    #[tokio::test]
    async fn cancel_without_a_conversation_is_ignored() {
        let engine = IntakeEngine::new(MockSubmitter::new(Outcome::Submitted));
        assert!(reply(&engine, "7", "/cancel").await.is_none());
    }

    #[tokio::test]
    async fn text_without_a_conversation_is_ignored() {
        let engine = IntakeEngine::new(MockSubmitter::new(Outcome::Submitted));
        assert!(reply(&engine, "7", "hello there").await.is_none());
    }

    #[tokio::test]
    async fn unknown_commands_are_not_field_input() {
        let submitter = MockSubmitter::new(Outcome::Submitted);
        let engine = IntakeEngine::new(submitter.clone());

        reply(&engine, "42", "/start").await.unwrap();
        assert!(reply(&engine, "42", "/help").await.is_none());

        // Still waiting for the first name.
        let r = reply(&engine, "42", "Ali").await.unwrap();
        assert_eq!(r.content, texts::PROMPT_LAST_NAME);
    }

    #[tokio::test]
    async fn chatid_reports_the_sender_and_preserves_the_session() {
        let engine = IntakeEngine::new(MockSubmitter::new(Outcome::Submitted));

        reply(&engine, "99", "/start").await.unwrap();
        reply(&engine, "99", "Ali").await.unwrap();

        let r = reply(&engine, "99", "/chatid").await.unwrap();
        assert_eq!(r.content, "Your chat ID is: 99");

        // The conversation picks up where it left off.
        let r = reply(&engine, "99", "Veli").await.unwrap();
        assert_eq!(r.content, texts::PROMPT_EMAIL);
    }

    #[tokio::test]
    async fn restart_resets_the_session() {
        let submitter = MockSubmitter::new(Outcome::Submitted);
        let engine = IntakeEngine::new(submitter.clone());

        reply(&engine, "42", "/start").await.unwrap();
        reply(&engine, "42", "Wrong").await.unwrap();

        let r = reply(&engine, "42", "/start").await.unwrap();
        assert_eq!(r.content, texts::PROMPT_FIRST_NAME);

        for input in ["Ali", "Veli", "a@b.com", "5551234567"] {
            reply(&engine, "42", input).await.unwrap();
        }

        let records = submitter.records.lock().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name, "Ali");
    }

    #[tokio::test]
    async fn every_outcome_maps_to_its_reply_text() {
        let outcomes = [
            Outcome::Submitted,
            Outcome::RejectedMissingFields,
            Outcome::RejectedDuplicate,
            Outcome::BackendError,
            Outcome::ConnectionError,
        ];

        for outcome in outcomes {
            let engine = IntakeEngine::new(MockSubmitter::new(outcome));

            reply(&engine, "42", "/start").await.unwrap();
            for input in ["Ali", "Veli", "a@b.com"] {
                reply(&engine, "42", input).await.unwrap();
            }
            let r = reply(&engine, "42", "5551234567").await.unwrap();
            assert_eq!(r.content, texts::outcome_text(outcome));
        }
    }

    #[tokio::test]
    async fn failed_submission_still_ends_the_conversation() {
        let submitter = MockSubmitter::new(Outcome::ConnectionError);
        let engine = IntakeEngine::new(submitter.clone());

        reply(&engine, "42", "/start").await.unwrap();
        for input in ["Ali", "Veli", "a@b.com", "5551234567"] {
            reply(&engine, "42", input).await.unwrap();
        }

        // No retry path: further text is outside any conversation.
        assert!(reply(&engine, "42", "5551234567").await.is_none());
        assert_eq!(submitter.records.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn interleaved_users_do_not_cross_contaminate() {
        let submitter = MockSubmitter::new(Outcome::Submitted);
        let engine = IntakeEngine::new(submitter.clone());

        reply(&engine, "a", "/start").await.unwrap();
        reply(&engine, "b", "/start").await.unwrap();
        reply(&engine, "a", "Alice").await.unwrap();
        reply(&engine, "b", "Bob").await.unwrap();
        reply(&engine, "a", "Anderson").await.unwrap();
        reply(&engine, "b", "Brown").await.unwrap();
        reply(&engine, "a", "alice@example.com").await.unwrap();
        reply(&engine, "b", "bob@example.com").await.unwrap();
        reply(&engine, "a", "5550001").await.unwrap();
        reply(&engine, "b", "5550002").await.unwrap();

        let records = submitter.records.lock().await;
        assert_eq!(records.len(), 2);

        let a = records.iter().find(|r| r.chat_id == "a").unwrap();
        let b = records.iter().find(|r| r.chat_id == "b").unwrap();
        assert_eq!(a.first_name, "Alice");
        assert_eq!(a.phone_number, "5550001");
        assert_eq!(b.first_name, "Bob");
        assert_eq!(b.phone_number, "5550002");
    }
}
