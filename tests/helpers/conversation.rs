//! Conversation drivers shared by integration tests

use Negotiator::models::TranscriptEntry;
use Negotiator::state::Submission;
use Negotiator::{ChatController, ConversationState, NegotiationApi};

/// Submit each input in order, asserting every one is accepted
pub async fn submit_all<B: NegotiationApi>(controller: &ChatController<B>, inputs: &[&str]) {
    for input in inputs {
        let outcome = controller.submit(input).await;
        assert!(
            matches!(outcome, Submission::Accepted { .. }),
            "input {:?} was not accepted: {:?}",
            input,
            outcome
        );
    }
}

/// Drive a fresh controller up to the market analysis step
pub async fn walk_to_negotiating<B: NegotiationApi>(controller: &ChatController<B>) {
    submit_all(controller, &["Hi there", "iPhone 13", "$450", "FRIENDLY"]).await;
    assert_eq!(controller.state().await, ConversationState::Negotiating);
}

pub async fn last_entry<B: NegotiationApi>(controller: &ChatController<B>) -> TranscriptEntry {
    controller
        .entries()
        .await
        .pop()
        .expect("transcript is never empty")
}
