//! Request and response shapes exchanged with the interview service
//!
//! Field names follow the service's JSON exactly. Fields the service does
//! not always send are defaulted so a listing from an older backend still
//! decodes.

use crate::error::{ApiResult, ClientError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Participant information submitted to start an interview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartInterviewRequest {
    /// Participant first name
    pub first_name: String,
    /// Participant last name
    pub last_name: String,
    /// Participant age, free text
    pub age: String,
    /// Additional free-form participant fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<BTreeMap<String, String>>,
}

impl StartInterviewRequest {
    /// Create a request from the three required fields
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age: age.into(),
            additional_info: None,
        }
    }

    /// Attach an additional participant field
    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_info
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Check the required form fields
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` naming the first missing field
    pub fn validate(&self) -> ApiResult<()> {
        let required = [
            ("First name", &self.first_name),
            ("Last name", &self.last_name),
            ("Age", &self.age),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(ClientError::Validation(format!("{} is required", label)));
            }
        }
        Ok(())
    }
}

/// A single interview question as delivered by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Session the question belongs to
    pub session_id: String,
    /// Zero-based index; 0 is the introduction
    pub question_number: u32,
    /// Number of answerable questions, excluding introduction and conclusion
    pub total_questions: u32,
    /// Prompt text
    pub question: String,
    /// Seconds allowed for the answer; 0 means unlimited
    pub time_limit: u32,
    /// True for the introduction screen
    #[serde(default)]
    pub is_introduction: bool,
    /// True for the closing screen
    #[serde(default)]
    pub is_conclusion: bool,
}

impl Question {
    /// Whether the participant is expected to type an answer
    pub fn accepts_response(&self) -> bool {
        !self.is_introduction && !self.is_conclusion
    }

    /// Whether a countdown applies to this question
    pub fn is_timed(&self) -> bool {
        self.time_limit > 0
    }
}

/// Body of `POST /interview/response`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponseRequest {
    /// Session being answered
    pub session_id: String,
    /// Response text, possibly empty
    pub response: String,
}

/// Completion signal returned after the last response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewCompleted {
    /// Always true when the interview is finished
    pub ready_for_agent_creation: bool,
    /// Service message
    #[serde(default)]
    pub message: String,
    /// Finished session
    pub session_id: String,
    /// Number of responses recorded
    #[serde(default)]
    pub total_responses: u32,
}

/// Result of submitting a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The interview continues with this question
    NextQuestion(Question),
    /// The interview is finished and ready for agent creation
    Completed(InterviewCompleted),
}

impl SubmitOutcome {
    /// Classify a raw response body
    ///
    /// A body is a completion signal exactly when it carries
    /// `ready_for_agent_creation: true`; anything else must be a question.
    pub fn from_value(value: serde_json::Value) -> ApiResult<Self> {
        let ready = value
            .get("ready_for_agent_creation")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);

        if ready {
            let completed = serde_json::from_value(value)
                .map_err(|e| ClientError::Decode(format!("completion signal: {}", e)))?;
            Ok(SubmitOutcome::Completed(completed))
        } else {
            let question = serde_json::from_value(value)
                .map_err(|e| ClientError::Decode(format!("question: {}", e)))?;
            Ok(SubmitOutcome::NextQuestion(question))
        }
    }
}

/// Result of `POST /interview/{id}/finalize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCreationResponse {
    /// Session the agent was built from
    pub session_id: String,
    /// Storage location of the agent on the service
    pub agent_path: String,
    /// Responses folded into the agent
    pub total_responses: u32,
    /// Memory nodes created
    pub memory_nodes: u32,
    /// Service message
    #[serde(default)]
    pub message: String,
}

/// Lifecycle status of an interview session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionStatus {
    /// Questions remain
    Active,
    /// All questions answered, agent not yet created
    Completed,
    /// Agent finalized from this session
    AgentCreated,
    /// Any other status reported by the service
    Other(String),
}

impl From<String> for SessionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => SessionStatus::Active,
            "completed" => SessionStatus::Completed,
            "agent_created" => SessionStatus::AgentCreated,
            _ => SessionStatus::Other(value),
        }
    }
}

impl From<SessionStatus> for String {
    fn from(value: SessionStatus) -> Self {
        value.as_str().to_string()
    }
}

impl SessionStatus {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
            SessionStatus::AgentCreated => "agent_created",
            SessionStatus::Other(other) => other,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Participant record stored with a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub age: String,
    /// Additional fields supplied at interview start
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Participant {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// One recorded answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedResponse {
    pub question_number: u32,
    pub question: String,
    pub response: String,
    /// Seconds since the Unix epoch
    pub timestamp: f64,
}

/// Full session as returned by `GET /interview/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    pub session_id: String,
    pub participant: Participant,
    pub current_question_index: u32,
    pub total_questions: u32,
    #[serde(default)]
    pub responses: Vec<RecordedResponse>,
    #[serde(default)]
    pub created_at: String,
    pub status: SessionStatus,
}

/// Row of `GET /interview/sessions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub participant_name: String,
    #[serde(default)]
    pub created_at: String,
    pub status: SessionStatus,
    /// "answered/total"
    #[serde(default)]
    pub progress: String,
}

/// Envelope of `GET /interview/sessions`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SessionList {
    #[serde(default)]
    pub sessions: Vec<SessionSummary>,
}

/// Agent listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub agent_id: String,
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub created_date: String,
    #[serde(default)]
    pub total_responses: u32,
    #[serde(default)]
    pub memory_nodes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Envelope of `GET /agents`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AgentList {
    #[serde(default)]
    pub agents: Vec<Agent>,
}

/// Result of `GET /agents/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDetails {
    #[serde(flatten)]
    pub agent: Agent,
    #[serde(default)]
    pub participant: Participant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body of `POST /agents/{id}/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub agent_id: String,
    pub message: String,
}

/// Agent reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub agent_id: String,
    pub agent_name: String,
    pub response: String,
    pub timestamp: String,
}

/// Generic `{message}` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// `{detail}` error body
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: String,
}
