//! Integration tests for the troubleshooting chat session.

use async_trait::async_trait;

use opsflow::chat::{self, Conversation, FALLBACK_REPLY, GREETING};
use opsflow::prelude::*;

struct FixedReplyService {
    response: Result<String, String>,
}

impl FixedReplyService {
    fn ok(body: impl Into<String>) -> Self {
        Self {
            response: Ok(body.into()),
        }
    }

    fn failing() -> Self {
        Self {
            response: Err("HTTP 503: overloaded".to_string()),
        }
    }
}

#[async_trait]
impl GenerationService for FixedReplyService {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        match &self.response {
            Ok(body) => Ok(body.clone()),
            Err(msg) => Err(ProviderError::GeminiError(msg.clone())),
        }
    }
}

#[tokio::test]
async fn successful_turn_appends_user_then_assistant_message() {
    let invoker = Invoker::new(FixedReplyService::ok(
        r#"{"troubleshooting_instructions": "1. Restart the print spooler."}"#,
    ));
    let mut conversation = Conversation::new();

    chat::run_turn(&mut conversation, &invoker, "my printer is offline").await;

    let messages = conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].text, GREETING);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].text, "my printer is offline");
    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(messages[2].text, "1. Restart the print spooler.");
    assert!(!conversation.is_in_flight());
}

#[tokio::test]
async fn failed_turn_appends_exactly_one_fallback_message() {
    let invoker = Invoker::new(FixedReplyService::failing());
    let mut conversation = Conversation::new();

    chat::run_turn(&mut conversation, &invoker, "vpn keeps dropping").await;

    let messages = conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[2].text, FALLBACK_REPLY);
    assert!(!conversation.is_in_flight());
}

#[tokio::test]
async fn submission_while_in_flight_leaves_message_count_unchanged() {
    let invoker = Invoker::new(FixedReplyService::ok(
        r#"{"troubleshooting_instructions": "ok"}"#,
    ));
    let mut conversation = Conversation::new();

    // Simulate an outstanding turn, then try to drive a second one.
    assert!(conversation.begin_turn("first question"));
    let before = conversation.messages().len();

    chat::run_turn(&mut conversation, &invoker, "second question").await;
    assert_eq!(conversation.messages().len(), before);
    assert!(conversation.is_in_flight());

    // The outstanding turn still completes normally.
    conversation.complete_turn(Some("resolved".to_string()));
    assert_eq!(conversation.messages().len(), before + 1);
    assert!(!conversation.is_in_flight());
}

#[tokio::test]
async fn malformed_flow_output_falls_back_like_a_provider_failure() {
    let invoker = Invoker::new(FixedReplyService::ok("not json at all"));
    let mut conversation = Conversation::new();

    chat::run_turn(&mut conversation, &invoker, "screen flickers").await;

    let messages = conversation.messages();
    assert_eq!(messages[messages.len() - 1].text, FALLBACK_REPLY);
    assert!(!conversation.is_in_flight());
}
