//! Negotiation session controller
//!
//! [`NegotiationSession`] owns the conversation state, the negotiation
//! context and the transcript, and advances them one input at a time.
//! [`ChatController`] is the shared handle front-ends talk to: it rejects
//! empty input and input that arrives while a request is in flight, and runs
//! the deferred reset after a successful delivery.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};
use crate::config::ConversationConfig;
use crate::models::{DeliveryMethod, PendingEntry, Transcript, TranscriptEntry, TranscriptEvent};
use crate::services::NegotiationApi;
use crate::state::context::{NegotiationContext, NegotiationOutcome};
use crate::state::replies;
use crate::state::steps::{classify, transition, Action, ConversationState};
use crate::utils::errors::Result;
use crate::utils::logging::{log_api_error, log_transition, log_validation_failure};

/// Work the caller must schedule after a turn completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    None,
    ResetAfter(Duration),
}

/// Outcome of executing one action
struct Reply {
    text: String,
    next: ConversationState,
    follow_up: FollowUp,
}

impl Reply {
    fn to(next: ConversationState, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next,
            follow_up: FollowUp::None,
        }
    }
}

pub struct NegotiationSession<B> {
    backend: Arc<B>,
    settings: ConversationConfig,
    state: ConversationState,
    context: NegotiationContext,
    transcript: Transcript,
}

impl<B: NegotiationApi> NegotiationSession<B> {
    /// Create a session in the initial step with the welcome message shown
    pub fn new(backend: Arc<B>, settings: ConversationConfig) -> Self {
        let mut transcript = Transcript::new();
        transcript.push_assistant(replies::WELCOME);

        Self {
            backend,
            settings,
            state: ConversationState::Initial,
            context: NegotiationContext::new(),
            transcript,
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn context(&self) -> &NegotiationContext {
        &self.context
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.transcript.subscribe()
    }

    /// Handle one trimmed, non-empty user input
    pub async fn process(&mut self, input: &str) -> FollowUp {
        self.transcript.push_user(input);
        let pending = self.transcript.begin_assistant(replies::TYPING);

        let from = self.state;
        match self.respond(input, &pending).await {
            Ok(reply) => {
                self.transcript.finalize(pending, reply.text);
                self.state = reply.next;
                log_transition(from.as_str(), self.state.as_str(), "submit");
                reply.follow_up
            }
            Err(e) => {
                error!(
                    state = %from,
                    severity = %e.severity(),
                    recoverable = e.is_recoverable(),
                    error = %e,
                    "Failed to process input"
                );
                self.transcript.finalize(pending, replies::GENERIC_ERROR);
                FollowUp::None
            }
        }
    }

    /// Return to the initial step with an empty context
    pub fn reset(&mut self) {
        self.state = ConversationState::Initial;
        self.context.clear();
    }

    /// Reset scheduled after a successful delivery
    pub fn auto_reset(&mut self) {
        info!(from = %self.state, "Automatic reset after delivery");
        self.reset();
        self.transcript.push_system(replies::RESET_NOTICE);
    }

    async fn respond(&mut self, input: &str, pending: &PendingEntry) -> Result<Reply> {
        let step_input = classify(self.state, input);
        let step = transition(self.state, step_input)?;
        debug!(state = %self.state, action = ?step.action, "Executing transition");

        let reply = match step.action {
            Action::Greet => {
                tokio::time::sleep(self.settings.greeting_delay()).await;
                Reply::to(step.next, replies::GREETING)
            }
            Action::StoreProduct(product_name) => {
                tokio::time::sleep(self.settings.acknowledge_delay()).await;
                self.context.set_product(&product_name);
                Reply::to(step.next, replies::product_acknowledged(&product_name))
            }
            Action::StorePrice(price) => {
                self.context.set_price(price);
                Reply::to(step.next, replies::ASK_TONE)
            }
            Action::RejectPrice => {
                log_validation_failure(self.state.as_str(), "unparseable price");
                Reply::to(step.next, replies::INVALID_PRICE)
            }
            Action::StoreTone(tone) => {
                self.context.set_tone(tone);
                Reply::to(step.next, replies::tone_acknowledged(tone.as_str()))
            }
            Action::RejectTone => {
                log_validation_failure(self.state.as_str(), "unknown tone");
                Reply::to(step.next, replies::INVALID_TONE)
            }
            Action::Negotiate => self.negotiate(step.next, pending).await,
            Action::SendEmail(address) => self.send_email(address).await,
            Action::Restart => {
                self.reset();
                Reply::to(step.next, replies::RESTART)
            }
            Action::RepromptEmail => {
                log_validation_failure(self.state.as_str(), "neither address nor restart");
                Reply::to(step.next, replies::REPROMPT_EMAIL)
            }
        };

        Ok(reply)
    }

    async fn negotiate(&mut self, next: ConversationState, pending: &PendingEntry) -> Reply {
        let Some(brief) = self.context.brief() else {
            warn!(context = ?self.context, "Negotiation details missing, resetting session");
            self.reset();
            return Reply::to(ConversationState::Initial, replies::MISSING_DETAILS);
        };

        self.transcript.update_placeholder(pending, replies::ANALYZING);

        let result = self
            .backend
            .generate_negotiation(brief.product_name, brief.asking_price, brief.tone)
            .await;

        match result {
            Ok(response) => {
                let outcome = NegotiationOutcome::from(response);
                let summary = replies::analysis_summary(
                    &brief,
                    &outcome,
                    self.settings.competitor_title_limit,
                );
                self.context.set_outcome(outcome);
                Reply::to(next, summary)
            }
            Err(e) => {
                log_api_error("negotiate", &e.to_string(), Some(brief.product_name));
                Reply::to(self.state, replies::NEGOTIATION_FAILED)
            }
        }
    }

    async fn send_email(&mut self, address: String) -> Reply {
        let message = self
            .context
            .generated_message()
            .unwrap_or(replies::MESSAGE_UNAVAILABLE);

        let result = self
            .backend
            .send_message(message, DeliveryMethod::Email, Some(&address))
            .await;

        match result {
            Ok(_) => {
                info!(recipient = %address, "Negotiation message delivered");
                Reply {
                    text: replies::email_sent(&address),
                    next: self.state,
                    follow_up: FollowUp::ResetAfter(self.settings.reset_delay()),
                }
            }
            Err(e) => {
                log_api_error("send", &e.to_string(), Some(&address));
                Reply::to(self.state, replies::EMAIL_FAILED)
            }
        }
    }
}

/// Why a submission was not processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted { state: ConversationState },
    Rejected(Rejection),
}

/// Shared handle to the single session of this process
pub struct ChatController<B> {
    session: Arc<Mutex<NegotiationSession<B>>>,
}

impl<B> Clone for ChatController<B> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

impl<B: NegotiationApi> ChatController<B> {
    pub fn new(backend: B, settings: ConversationConfig) -> Self {
        Self::from_session(NegotiationSession::new(Arc::new(backend), settings))
    }

    pub fn from_session(session: NegotiationSession<B>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Submit user input; a no-op when blank or while a request is in flight
    pub async fn submit(&self, input: &str) -> Submission {
        let input = input.trim();
        if input.is_empty() {
            return Submission::Rejected(Rejection::Empty);
        }

        let Ok(mut session) = self.session.try_lock() else {
            debug!("Input rejected, request in flight");
            return Submission::Rejected(Rejection::Busy);
        };

        let follow_up = session.process(input).await;
        let state = session.state();
        drop(session);

        if let FollowUp::ResetAfter(delay) = follow_up {
            self.schedule_reset(delay);
        }

        Submission::Accepted { state }
    }

    /// One-shot deferred reset; not cancelled by later input
    fn schedule_reset(&self, delay: Duration) {
        let session = Arc::clone(&self.session);
        debug!(delay_ms = delay.as_millis() as u64, "Scheduling automatic reset");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            session.lock().await.auto_reset();
        });
    }

    pub async fn state(&self) -> ConversationState {
        self.session.lock().await.state()
    }

    pub async fn context(&self) -> NegotiationContext {
        self.session.lock().await.context().clone()
    }

    pub async fn entries(&self) -> Vec<TranscriptEntry> {
        self.session.lock().await.transcript().entries().to_vec()
    }

    pub async fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.session.lock().await.subscribe()
    }
}
