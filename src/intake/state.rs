//! Conversation state machine — tracks which answer the user owes next.

use crate::intake::texts;

/// The steps of the intake conversation.
///
/// Progresses linearly: AwaitingFirstName → AwaitingLastName →
/// AwaitingEmail → AwaitingPhone → Terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationStep {
    AwaitingFirstName,
    AwaitingLastName,
    AwaitingEmail,
    AwaitingPhone,
    Terminal,
}

impl ConversationStep {
    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<ConversationStep> {
        use ConversationStep::*;
        match self {
            AwaitingFirstName => Some(AwaitingLastName),
            AwaitingLastName => Some(AwaitingEmail),
            AwaitingEmail => Some(AwaitingPhone),
            AwaitingPhone => Some(Terminal),
            Terminal => None,
        }
    }

    /// Whether this step is terminal (the conversation is over).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }

    /// The prompt to send when entering this step.
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            Self::AwaitingFirstName => Some(texts::PROMPT_FIRST_NAME),
            Self::AwaitingLastName => Some(texts::PROMPT_LAST_NAME),
            Self::AwaitingEmail => Some(texts::PROMPT_EMAIL),
            Self::AwaitingPhone => Some(texts::PROMPT_PHONE),
            Self::Terminal => None,
        }
    }
}

impl Default for ConversationStep {
    fn default() -> Self {
        Self::AwaitingFirstName
    }
}

impl std::fmt::Display for ConversationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AwaitingFirstName => "awaiting_first_name",
            Self::AwaitingLastName => "awaiting_last_name",
            Self::AwaitingEmail => "awaiting_email",
            Self::AwaitingPhone => "awaiting_phone",
            Self::Terminal => "terminal",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_steps() {
        use ConversationStep::*;
        let expected = [AwaitingLastName, AwaitingEmail, AwaitingPhone, Terminal];
        let mut current = AwaitingFirstName;
        for expected_next in expected {
            let next = current.next().unwrap();
            assert_eq!(next, expected_next);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn only_terminal_is_terminal() {
        use ConversationStep::*;
        assert!(Terminal.is_terminal());
        for step in [AwaitingFirstName, AwaitingLastName, AwaitingEmail, AwaitingPhone] {
            assert!(!step.is_terminal(), "{step} should not be terminal");
        }
    }

    #[test]
    fn every_awaiting_step_has_a_prompt() {
        use ConversationStep::*;
        for step in [AwaitingFirstName, AwaitingLastName, AwaitingEmail, AwaitingPhone] {
            assert!(step.prompt().is_some(), "{step} should have a prompt");
        }
        assert!(Terminal.prompt().is_none());
    }

    #[test]
    fn default_is_the_entry_step() {
        assert_eq!(
            ConversationStep::default(),
            ConversationStep::AwaitingFirstName
        );
    }
}
