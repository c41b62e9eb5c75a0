//! Test utilities
//!
//! [`FakeApi`] is a scripted [`InterviewApi`]: each endpoint pops the next
//! queued result and records the call. Unscripted calls fail with HTTP 500.

use crate::api::InterviewApi;
use crate::error::{ApiResult, ClientError};
use crate::types::{
    Agent, AgentCreationResponse, AgentDetails, ChatRequest, ChatResponse, InterviewCompleted,
    InterviewSession, MessageResponse, Participant, Question, SessionStatus, SessionSummary,
    StartInterviewRequest, SubmitOutcome, SubmitResponseRequest,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

type Script<T> = Mutex<VecDeque<ApiResult<T>>>;

/// Scripted API double
#[derive(Default)]
pub struct FakeApi {
    starts: Script<Question>,
    questions: Script<Question>,
    submits: Script<SubmitOutcome>,
    finalizes: Script<AgentCreationResponse>,
    sessions: Script<InterviewSession>,
    chats: Script<ChatResponse>,
    clears: Script<MessageResponse>,
    agents: Mutex<Vec<Agent>>,
    calls: Mutex<Vec<String>>,
    submitted: Mutex<Vec<SubmitResponseRequest>>,
}

fn pop<T>(script: &Script<T>, call: &str) -> ApiResult<T> {
    script
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(http_error(500, Some(&format!("unscripted call: {}", call)))))
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_start(&self, result: ApiResult<Question>) {
        self.starts.lock().unwrap().push_back(result);
    }

    pub fn push_question(&self, result: ApiResult<Question>) {
        self.questions.lock().unwrap().push_back(result);
    }

    pub fn push_submit(&self, result: ApiResult<SubmitOutcome>) {
        self.submits.lock().unwrap().push_back(result);
    }

    pub fn push_finalize(&self, result: ApiResult<AgentCreationResponse>) {
        self.finalizes.lock().unwrap().push_back(result);
    }

    pub fn push_session(&self, result: ApiResult<InterviewSession>) {
        self.sessions.lock().unwrap().push_back(result);
    }

    pub fn push_chat(&self, result: ApiResult<ChatResponse>) {
        self.chats.lock().unwrap().push_back(result);
    }

    pub fn push_clear(&self, result: ApiResult<MessageResponse>) {
        self.clears.lock().unwrap().push_back(result);
    }

    pub fn set_agents(&self, agents: Vec<Agent>) {
        *self.agents.lock().unwrap() = agents;
    }

    /// Calls made so far, as `endpoint` or `endpoint:id`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Bodies sent to `submit_response`
    pub fn submitted(&self) -> Vec<SubmitResponseRequest> {
        self.submitted.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl InterviewApi for FakeApi {
    async fn start_interview(&self, _request: &StartInterviewRequest) -> ApiResult<Question> {
        self.record("start_interview");
        pop(&self.starts, "start_interview")
    }

    async fn get_current_question(&self, session_id: &str) -> ApiResult<Question> {
        self.record(format!("get_current_question:{}", session_id));
        pop(&self.questions, "get_current_question")
    }

    async fn submit_response(&self, request: &SubmitResponseRequest) -> ApiResult<SubmitOutcome> {
        self.record(format!("submit_response:{}", request.session_id));
        self.submitted.lock().unwrap().push(request.clone());
        pop(&self.submits, "submit_response")
    }

    async fn finalize_agent(&self, session_id: &str) -> ApiResult<AgentCreationResponse> {
        self.record(format!("finalize_agent:{}", session_id));
        pop(&self.finalizes, "finalize_agent")
    }

    async fn get_session(&self, session_id: &str) -> ApiResult<InterviewSession> {
        self.record(format!("get_session:{}", session_id));
        pop(&self.sessions, "get_session")
    }

    async fn list_sessions(&self) -> ApiResult<Vec<SessionSummary>> {
        self.record("list_sessions");
        Ok(Vec::new())
    }

    async fn delete_session(&self, session_id: &str) -> ApiResult<MessageResponse> {
        self.record(format!("delete_session:{}", session_id));
        Ok(MessageResponse {
            message: "Interview session deleted successfully".to_string(),
        })
    }

    async fn list_agents(&self) -> ApiResult<Vec<Agent>> {
        self.record("list_agents");
        Ok(self.agents.lock().unwrap().clone())
    }

    async fn get_agent_details(&self, agent_id: &str) -> ApiResult<AgentDetails> {
        self.record(format!("get_agent_details:{}", agent_id));
        self.agents
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.agent_id == agent_id)
            .map(|a| AgentDetails {
                agent: a.clone(),
                participant: Participant::default(),
                status: None,
            })
            .ok_or_else(|| http_error(404, Some("Agent not found")))
    }

    async fn chat_with_agent(&self, request: &ChatRequest) -> ApiResult<ChatResponse> {
        self.record(format!("chat_with_agent:{}", request.agent_id));
        pop(&self.chats, "chat_with_agent")
    }

    async fn clear_conversation(&self, agent_id: &str) -> ApiResult<MessageResponse> {
        self.record(format!("clear_conversation:{}", agent_id));
        pop(&self.clears, "clear_conversation")
    }
}

/// HTTP failure with an optional `detail`
pub fn http_error(status: u16, detail: Option<&str>) -> ClientError {
    ClientError::Http {
        status,
        detail: detail.map(str::to_string),
    }
}

/// Regular question
pub fn question(session_id: &str, number: u32, total: u32, time_limit: u32) -> Question {
    Question {
        session_id: session_id.to_string(),
        question_number: number,
        total_questions: total,
        question: format!("Question {}", number),
        time_limit,
        is_introduction: false,
        is_conclusion: false,
    }
}

/// Introduction screen, number 0
pub fn intro_question(session_id: &str, total: u32) -> Question {
    Question {
        is_introduction: true,
        ..question(session_id, 0, total, 0)
    }
}

/// Conclusion screen, number `total + 1`
pub fn conclusion_question(session_id: &str, total: u32) -> Question {
    Question {
        is_conclusion: true,
        ..question(session_id, total + 1, total, 0)
    }
}

/// Completion signal
pub fn completed(session_id: &str, total_responses: u32) -> InterviewCompleted {
    InterviewCompleted {
        ready_for_agent_creation: true,
        message: "Interview completed".to_string(),
        session_id: session_id.to_string(),
        total_responses,
    }
}

/// Session for Ada Lovelace with the given status
pub fn session(session_id: &str, status: SessionStatus) -> InterviewSession {
    InterviewSession {
        session_id: session_id.to_string(),
        participant: Participant {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            age: "30".to_string(),
            extra: Default::default(),
        },
        current_question_index: 2,
        total_questions: 3,
        responses: Vec::new(),
        created_at: "2024-01-02 03:04:05".to_string(),
        status,
    }
}

/// Agent listing entry
pub fn agent(agent_id: &str, name: &str) -> Agent {
    Agent {
        agent_id: agent_id.to_string(),
        name: name.to_string(),
        age: "30".to_string(),
        created_date: "2024-01-02 03:04:05".to_string(),
        total_responses: 3,
        memory_nodes: 7,
        agent_path: None,
        session_id: None,
    }
}

/// Agent details built from [`agent`]
pub fn agent_details(agent_id: &str, name: &str) -> AgentDetails {
    AgentDetails {
        agent: agent(agent_id, name),
        participant: Participant::default(),
        status: None,
    }
}
