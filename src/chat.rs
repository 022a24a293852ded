//! Conversation state for the troubleshooting chat.
//!
//! An append-only message list owned by one UI session, plus the
//! at-most-one-in-flight turn discipline: a submission while a prior turn is
//! outstanding is rejected as a no-op. No persistence; the conversation lives
//! as long as the session does.

use uuid::Uuid;

use crate::core::catalog;
use crate::core::record::Record;
use crate::invoker::Invoker;
use crate::llm::GenerationService;

/// Greeting seeded as the first assistant message.
pub const GREETING: &str = "Hello! I'm your AI IT Assistant. How can I help you today?";

/// Fixed assistant reply appended when an invocation fails.
pub const FALLBACK_REPLY: &str =
    "Sorry, I encountered an error and couldn't process your request. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
}

impl Message {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
        }
    }
}

/// Ordered, append-only message sequence with an in-flight flag.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<Message>,
    in_flight: bool,
}

impl Conversation {
    /// A fresh conversation, seeded with the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::new(Role::Assistant, GREETING)],
            in_flight: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Start a turn: append the user message and raise the in-flight flag.
    ///
    /// Returns `false` without touching the message list when a prior turn is
    /// still outstanding or the text is blank.
    pub fn begin_turn(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.in_flight || text.trim().is_empty() {
            return false;
        }
        self.messages.push(Message::new(Role::User, text));
        self.in_flight = true;
        true
    }

    /// Finish the outstanding turn: append the assistant reply, or the fixed
    /// fallback text on failure, and clear the in-flight flag.
    pub fn complete_turn(&mut self, reply: Option<String>) {
        let text = reply.unwrap_or_else(|| FALLBACK_REPLY.to_string());
        self.messages.push(Message::new(Role::Assistant, text));
        self.in_flight = false;
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Drive one full chat turn through the `troubleshoot_problems` flow.
///
/// A no-op when a prior turn is in flight. Invocation failure is not
/// propagated; it becomes the fallback assistant message, matching the UI
/// contract.
pub async fn run_turn<S: GenerationService>(
    conversation: &mut Conversation,
    invoker: &Invoker<S>,
    text: &str,
) {
    if !conversation.begin_turn(text) {
        return;
    }

    let flow = catalog::troubleshoot_problems();
    let input = Record::new().with("problem_description", text);

    let reply = match invoker.invoke(&flow, &input).await {
        Ok(output) => output
            .get_str("troubleshooting_instructions")
            .map(str::to_string),
        Err(e) => {
            log::error!("troubleshooting turn failed: {}", e);
            None
        }
    };

    conversation.complete_turn(reply);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_starts_with_greeting() {
        let conversation = Conversation::new();
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].role, Role::Assistant);
        assert_eq!(conversation.messages()[0].text, GREETING);
    }

    #[test]
    fn test_begin_turn_appends_user_message() {
        let mut conversation = Conversation::new();
        assert!(conversation.begin_turn("my printer is offline"));
        assert_eq!(conversation.messages().len(), 2);
        assert_eq!(conversation.messages()[1].role, Role::User);
        assert!(conversation.is_in_flight());
    }

    #[test]
    fn test_submission_while_in_flight_is_a_no_op() {
        let mut conversation = Conversation::new();
        assert!(conversation.begin_turn("first"));
        let before = conversation.messages().len();
        assert!(!conversation.begin_turn("second"));
        assert_eq!(conversation.messages().len(), before);
    }

    #[test]
    fn test_blank_submission_is_rejected() {
        let mut conversation = Conversation::new();
        assert!(!conversation.begin_turn("   "));
        assert_eq!(conversation.messages().len(), 1);
        assert!(!conversation.is_in_flight());
    }

    #[test]
    fn test_failed_turn_appends_exactly_one_fallback_message() {
        let mut conversation = Conversation::new();
        conversation.begin_turn("help");
        conversation.complete_turn(None);
        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].text, FALLBACK_REPLY);
        assert!(!conversation.is_in_flight());
    }
}
