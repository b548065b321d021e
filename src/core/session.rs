//! Session controller: drives one chat turn from submission to transcript.
//!
//! The controller is a strictly sequential state machine. A session moves
//! Idle -> AwaitingInference while the single outbound request is in flight,
//! passes through Done while the exchange is written, and returns to Idle.
//! Submissions arriving while a request is pending are ignored, so at most
//! one inference is ever in flight per session.

use crate::api::client::InferenceResult;
use crate::core::gate::{self, OFF_TOPIC_REPLY};
use crate::core::prompt;
use crate::core::transcript::{Transcript, Turn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingInference,
    /// Transient: the result has arrived and the exchange is being written.
    Done,
}

/// What the caller must do with a submitted input.
#[derive(Debug, PartialEq, Eq)]
pub enum TurnDispatch {
    /// Empty input, or a submission while a request is already in flight.
    /// Nothing was appended and no state changed.
    Ignored,
    /// Off-topic input answered with the canned reply; the exchange is
    /// already in the transcript.
    Resolved,
    /// Formatted prompt to send to the model. Feed the outcome back through
    /// [`SessionController::complete_turn`].
    Inference(String),
}

pub struct SessionController {
    transcript: Transcript,
    state: SessionState,
    topic_filter: bool,
    pending_user: Option<String>,
}

impl SessionController {
    pub fn new(topic_filter: bool) -> Self {
        Self {
            transcript: Transcript::new(),
            state: SessionState::Idle,
            topic_filter,
            pending_user: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        self.state == SessionState::AwaitingInference
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The question currently waiting on the model, if any. Display-only;
    /// the pair reaches the transcript once the turn completes.
    pub fn pending_user(&self) -> Option<&str> {
        self.pending_user.as_deref()
    }

    /// Starts a turn for the submitted text. Empty input and input arriving
    /// while a request is pending are no-ops.
    pub fn begin_turn(&mut self, input: &str) -> TurnDispatch {
        let text = input.trim();
        if text.is_empty() || self.state != SessionState::Idle {
            return TurnDispatch::Ignored;
        }

        if self.topic_filter && !gate::is_on_topic(text) {
            self.push_exchange(text, OFF_TOPIC_REPLY);
            return TurnDispatch::Resolved;
        }

        self.state = SessionState::AwaitingInference;
        self.pending_user = Some(text.to_string());
        TurnDispatch::Inference(prompt::build_prompt(text))
    }

    /// Finishes the pending turn with the inference outcome. Failures become
    /// the assistant's visible reply; the session stays usable either way.
    pub fn complete_turn(&mut self, result: InferenceResult) {
        let Some(user_text) = self.pending_user.take() else {
            return;
        };
        self.state = SessionState::Done;

        let reply = match result {
            InferenceResult::Success(text) => text,
            InferenceResult::Failure(failure) => failure.user_message(),
        };
        self.push_exchange(&user_text, &reply);
        self.state = SessionState::Idle;
    }

    /// User and assistant land together, so a renderer between turns never
    /// observes a half-written pair.
    fn push_exchange(&mut self, user: &str, assistant: &str) {
        self.transcript.append(Turn::user(user));
        self.transcript.append(Turn::assistant(assistant));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::{InferenceClient, InferenceFailure};
    use crate::api::GenerationParameters;
    use crate::core::transcript::TurnRole;

    #[test]
    fn a_completed_turn_appends_exactly_one_pair() {
        let mut session = SessionController::new(false);
        let dispatch = session.begin_turn("when should I harvest wheat?");
        assert!(matches!(dispatch, TurnDispatch::Inference(_)));
        assert_eq!(session.transcript().len(), 0);

        session.complete_turn(InferenceResult::Success("In April.".to_string()));

        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[0].content, "when should I harvest wheat?");
        assert_eq!(turns[1].role, TurnRole::Assistant);
        assert_eq!(turns[1].content, "In April.");
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn empty_submission_is_a_no_op() {
        let mut session = SessionController::new(true);
        assert_eq!(session.begin_turn(""), TurnDispatch::Ignored);
        assert_eq!(session.begin_turn("   \n"), TurnDispatch::Ignored);
        assert!(session.transcript().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn submission_while_awaiting_is_ignored() {
        let mut session = SessionController::new(false);
        assert!(matches!(
            session.begin_turn("first question about soil"),
            TurnDispatch::Inference(_)
        ));
        assert!(session.is_awaiting());

        assert_eq!(session.begin_turn("second question"), TurnDispatch::Ignored);
        assert!(session.transcript().is_empty());

        session.complete_turn(InferenceResult::Success("ok".to_string()));
        assert_eq!(session.transcript().len(), 2);
    }

    #[test]
    fn off_topic_input_gets_the_canned_reply_without_inference() {
        let mut session = SessionController::new(true);
        let dispatch = session.begin_turn("who won the football match?");
        assert_eq!(dispatch, TurnDispatch::Resolved);

        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].content, OFF_TOPIC_REPLY);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn gate_is_skipped_when_the_filter_is_off() {
        let mut session = SessionController::new(false);
        let dispatch = session.begin_turn("who won the football match?");
        assert!(matches!(dispatch, TurnDispatch::Inference(_)));
    }

    #[test]
    fn failures_become_the_assistant_reply() {
        let mut session = SessionController::new(false);
        session.begin_turn("irrigation schedule for paddy");
        session.complete_turn(InferenceResult::Failure(InferenceFailure::AuthError));

        let turns = session.transcript().turns();
        assert_eq!(turns[1].content, "Invalid or missing API token.");
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn every_turn_keeps_the_transcript_in_pairs() {
        let mut session = SessionController::new(true);
        session.begin_turn("fertilizer dose for maize");
        session.complete_turn(InferenceResult::Success("10 kg".to_string()));
        session.begin_turn("tell me a joke");
        session.begin_turn("");
        session.begin_turn("rainfall outlook for June");
        session.complete_turn(InferenceResult::Failure(InferenceFailure::ModelLoading));

        assert_eq!(session.transcript().len() % 2, 0);
        for pair in session.transcript().turns().chunks(2) {
            assert_eq!(pair[0].role, TurnRole::User);
            assert_eq!(pair[1].role, TurnRole::Assistant);
        }
    }

    #[tokio::test]
    async fn an_http_401_surfaces_the_auth_wording_in_the_transcript() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(401)
            .create_async()
            .await;

        let client = InferenceClient::new(server.url(), "bad-token").unwrap();
        let mut session = SessionController::new(false);

        let TurnDispatch::Inference(prompt) = session.begin_turn("soil ph for chillies") else {
            panic!("expected an inference dispatch");
        };
        let result = client.complete(&prompt, GenerationParameters::default()).await;
        session.complete_turn(result);

        let turns = session.transcript().turns();
        assert_eq!(turns[1].content, "Invalid or missing API token.");
    }
}
