//! Interview lifecycle controller
//!
//! Owns the state of one interview visit:
//!
//! ```text
//! Form --start--> Interview --submit/expiry--> Interview | Completed
//! Completed --create agent--> AgentCreation
//! Loading --resume--> Interview | Completed | AgentCreation | Error
//! ```
//!
//! Failures outside the resumption flow never change the state. They are
//! recorded as an inline error message and the same operation can be
//! retried. At most one mutating call is in flight at a time; attempts made
//! while one is pending are ignored.

use super::countdown::{Countdown, Tick};
use crate::api::InterviewApi;
use crate::error::{ApiResult, ClientError};
use crate::types::{
    AgentCreationResponse, InterviewCompleted, InterviewSession, Question, SessionStatus,
    StartInterviewRequest, SubmitOutcome, SubmitResponseRequest,
};
use std::fmt;

const START_FAILED: &str = "Failed to start interview";
const SUBMIT_FAILED: &str = "Failed to submit response";
const CREATE_FAILED: &str = "Failed to create agent";
const LOAD_FAILED: &str = "Failed to load interview session";

/// Where the visit currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Collecting participant information
    #[default]
    Form,
    /// Fetching an existing session
    Loading,
    /// Answering questions
    Interview,
    /// All questions answered, agent not yet created
    Completed,
    /// Agent created from the session
    AgentCreation,
    /// Resumption failed; terminal for this visit
    Error,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Form => "form",
            LifecycleState::Loading => "loading",
            LifecycleState::Interview => "interview",
            LifecycleState::Completed => "completed",
            LifecycleState::AgentCreation => "agent-creation",
            LifecycleState::Error => "error",
        };
        f.write_str(name)
    }
}

/// Kind of call currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingCall {
    Start,
    Resume,
    Submit,
    Finalize,
}

/// Controller for a single interview visit
#[derive(Debug, Default)]
pub struct InterviewController {
    state: LifecycleState,
    session_id: Option<String>,
    question: Option<Question>,
    session_info: Option<InterviewSession>,
    completion: Option<InterviewCompleted>,
    agent_result: Option<AgentCreationResponse>,
    error: Option<String>,
    draft: String,
    countdown: Countdown,
    // expiry reached while a call was in flight
    deferred_expiry: bool,
    pending: Option<PendingCall>,
}

impl InterviewController {
    /// Start a new visit at the participant form
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Session being driven, once known
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Question on screen
    pub fn current_question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Session loaded by [`resume`](Self::resume)
    pub fn session_info(&self) -> Option<&InterviewSession> {
        self.session_info.as_ref()
    }

    /// Completion signal from the last submission
    pub fn completion(&self) -> Option<&InterviewCompleted> {
        self.completion.as_ref()
    }

    /// Result of a successful finalize
    pub fn agent_result(&self) -> Option<&AgentCreationResponse> {
        self.agent_result.as_ref()
    }

    /// Inline error from the last failed operation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a call is in flight
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Kind of call in flight
    pub fn pending(&self) -> Option<PendingCall> {
        self.pending
    }

    /// Countdown for the current question
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Draft response for the current question
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the draft response
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    fn transition(&mut self, next: LifecycleState) {
        let current = self.state();
        if current != next {
            tracing::info!(from = %current, to = %next, session_id = ?self.session_id, "Interview state changed");
        }
        self.state = next;
    }

    fn present(&mut self, question: Question) {
        self.countdown.reset(question.time_limit);
        self.deferred_expiry = false;
        self.draft.clear();
        self.session_id = Some(question.session_id.clone());
        self.question = Some(question);
    }

    fn claim(&mut self, call: PendingCall) -> bool {
        if let Some(in_flight) = self.pending {
            tracing::warn!(?in_flight, attempted = ?call, "Ignoring call while another is pending");
            return false;
        }
        self.pending = Some(call);
        self.error = None;
        true
    }

    /// Start a new interview from the participant form
    ///
    /// Required fields are checked first; a validation failure is reported
    /// inline and no request is sent.
    ///
    /// # Examples
    ///
    /// ```
    /// use interview_agent::api::HttpInterviewApi;
    /// use interview_agent::config::ApiConfig;
    /// use interview_agent::lifecycle::{InterviewController, LifecycleState};
    /// use interview_agent::types::StartInterviewRequest;
    ///
    /// # tokio_test::block_on(async {
    /// let api = HttpInterviewApi::new(&ApiConfig::default()).unwrap();
    /// let mut controller = InterviewController::new();
    /// let request = StartInterviewRequest::new("", "Lovelace", "36");
    ///
    /// assert_eq!(controller.start(&api, &request).await, LifecycleState::Form);
    /// assert_eq!(controller.error(), Some("Validation error: First name is required"));
    /// # });
    /// ```
    pub async fn start<A: InterviewApi + ?Sized>(
        &mut self,
        api: &A,
        request: &StartInterviewRequest,
    ) -> LifecycleState {
        if self.state() != LifecycleState::Form {
            tracing::warn!(state = %self.state(), "start ignored outside the form");
            return self.state();
        }
        if let Err(e) = request.validate() {
            self.error = Some(e.user_message(START_FAILED));
            return self.state();
        }
        if !self.claim(PendingCall::Start) {
            return self.state();
        }

        let result = api.start_interview(request).await;
        self.pending = None;
        match result {
            Ok(question) => {
                self.present(question);
                self.transition(LifecycleState::Interview);
            }
            Err(e) => self.error = Some(e.user_message(START_FAILED)),
        }
        self.state()
    }

    /// Re-enter an existing session by identifier
    ///
    /// Routes on the session's status: `completed` goes straight to agent
    /// creation without fetching a question, `agent_created` to the
    /// finished view, `active` fetches the current question. Any other
    /// status, or any failed call, ends in [`LifecycleState::Error`].
    pub async fn resume<A: InterviewApi + ?Sized>(
        &mut self,
        api: &A,
        session_id: &str,
    ) -> LifecycleState {
        if !self.claim(PendingCall::Resume) {
            return self.state();
        }
        self.session_id = Some(session_id.to_string());
        self.transition(LifecycleState::Loading);

        let next = match api.get_session(session_id).await {
            Ok(session) => {
                let status = session.status.clone();
                self.session_info = Some(session);
                match status {
                    SessionStatus::Completed => Ok(LifecycleState::Completed),
                    SessionStatus::AgentCreated => Ok(LifecycleState::AgentCreation),
                    SessionStatus::Active => match api.get_current_question(session_id).await {
                        Ok(question) => {
                            self.present(question);
                            Ok(LifecycleState::Interview)
                        }
                        Err(e) => Err(e.user_message(LOAD_FAILED)),
                    },
                    SessionStatus::Other(other) => {
                        Err(format!("Interview session has status: {}", other))
                    }
                }
            }
            Err(e) => Err(e.user_message(LOAD_FAILED)),
        };

        self.pending = None;
        match next {
            Ok(state) => self.transition(state),
            Err(message) => {
                self.error = Some(message);
                self.transition(LifecycleState::Error);
            }
        }
        self.state()
    }

    /// Claim the in-flight slot for a submission of `response`
    ///
    /// Returns the request to send, or `None` when not answering a question
    /// or when a call is already pending. Introduction and conclusion
    /// screens always submit an empty response.
    pub fn begin_submit(&mut self, response: &str) -> Option<SubmitResponseRequest> {
        if self.state() != LifecycleState::Interview {
            tracing::warn!(state = %self.state(), "submit ignored outside the interview");
            return None;
        }
        let (session_id, accepts_response) = match &self.question {
            Some(q) => (q.session_id.clone(), q.accepts_response()),
            None => return None,
        };
        if !self.claim(PendingCall::Submit) {
            return None;
        }

        let response = if accepts_response {
            response.trim().to_string()
        } else {
            String::new()
        };
        Some(SubmitResponseRequest {
            session_id,
            response,
        })
    }

    /// Apply the result of a submission claimed by [`begin_submit`](Self::begin_submit)
    pub fn finish_submit(&mut self, result: ApiResult<SubmitOutcome>) -> LifecycleState {
        if self.pending != Some(PendingCall::Submit) {
            tracing::warn!("finish_submit without a pending submission");
            return self.state();
        }
        self.pending = None;

        match result {
            Ok(SubmitOutcome::NextQuestion(next)) => {
                let current = self.question.as_ref().map(|q| q.question_number);
                match current {
                    Some(current) if next.question_number < current => {
                        let e = ClientError::ProgressRegression {
                            current,
                            received: next.question_number,
                        };
                        tracing::warn!("{}", e);
                        self.error = Some(e.user_message(SUBMIT_FAILED));
                    }
                    _ => self.present(next),
                }
            }
            Ok(SubmitOutcome::Completed(done)) => {
                self.countdown.reset(0);
                self.deferred_expiry = false;
                self.draft.clear();
                self.completion = Some(done);
                self.transition(LifecycleState::Completed);
            }
            Err(e) => self.error = Some(e.user_message(SUBMIT_FAILED)),
        }
        self.state()
    }

    /// Submit a response for the current question
    pub async fn submit<A: InterviewApi + ?Sized>(
        &mut self,
        api: &A,
        response: &str,
    ) -> LifecycleState {
        match self.begin_submit(response) {
            Some(request) => {
                let result = api.submit_response(&request).await;
                self.finish_submit(result)
            }
            None => self.state(),
        }
    }

    /// Advance the countdown by one second
    ///
    /// Returns the auto-submission to send when the limit is reached on this
    /// tick. Expiry fires once per question and never while another call is
    /// pending. An expiry reached during a pending call is held and sent on
    /// the first tick after that call failed on the same question.
    pub fn tick(&mut self) -> Option<SubmitResponseRequest> {
        if self.state() != LifecycleState::Interview {
            return None;
        }
        let expired = match self.countdown.tick() {
            Tick::Expired => true,
            Tick::Elapsed => self.deferred_expiry,
            Tick::Unlimited | Tick::Running(_) => false,
        };
        if !expired {
            return None;
        }
        if self.is_pending() {
            tracing::debug!("Countdown expired while a call is pending");
            self.deferred_expiry = true;
            return None;
        }

        self.deferred_expiry = false;
        tracing::info!(session_id = ?self.session_id, "Time limit reached, submitting draft");
        let draft = self.draft.clone();
        self.begin_submit(&draft)
    }

    /// Advance the countdown and send the auto-submission if one fires
    ///
    /// Returns `true` when a submission was sent on this tick.
    pub async fn on_tick<A: InterviewApi + ?Sized>(&mut self, api: &A) -> bool {
        match self.tick() {
            Some(request) => {
                let result = api.submit_response(&request).await;
                self.finish_submit(result);
                true
            }
            None => false,
        }
    }

    /// Finalize the agent from a completed interview
    ///
    /// On failure the controller stays in [`LifecycleState::Completed`] and
    /// the call can be retried.
    pub async fn create_agent<A: InterviewApi + ?Sized>(&mut self, api: &A) -> LifecycleState {
        if self.state() != LifecycleState::Completed {
            tracing::warn!(state = %self.state(), "create_agent ignored before completion");
            return self.state();
        }
        let session_id = match &self.session_id {
            Some(id) => id.clone(),
            None => return self.state(),
        };
        if !self.claim(PendingCall::Finalize) {
            return self.state();
        }

        let result = api.finalize_agent(&session_id).await;
        self.pending = None;
        match result {
            Ok(created) => {
                self.agent_result = Some(created);
                self.transition(LifecycleState::AgentCreation);
            }
            Err(e) => self.error = Some(e.user_message(CREATE_FAILED)),
        }
        self.state()
    }

    /// Progress through the interview as a fraction in `[0, 1]`
    pub fn progress(&self) -> Option<f64> {
        self.question.as_ref().map(crate::display::progress_fraction)
    }
}
