//! Chat transcript with a created agent
//!
//! The transcript lives only in the client. The service keeps its own
//! conversation history per agent, which [`ChatSession::clear`] resets.

use crate::api::InterviewApi;
use crate::types::{AgentDetails, ChatRequest};
use chrono::Utc;
use serde::{Deserialize, Serialize};

const SEND_FAILED: &str = "Failed to send message";
const CLEAR_FAILED: &str = "Failed to clear conversation";

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

/// One message in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub message: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
}

impl ChatMessage {
    fn user(message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender: Sender::User,
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
            agent_name: None,
        }
    }

    fn agent(
        message: impl Into<String>,
        timestamp: impl Into<String>,
        agent_name: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender: Sender::Agent,
            message: message.into(),
            timestamp: timestamp.into(),
            agent_name: Some(agent_name.into()),
        }
    }
}

/// Outcome of [`ChatSession::send`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The agent replied
    Replied,
    /// Input was blank
    Ignored,
    /// The call failed; see [`ChatSession::error`]
    Failed,
}

/// Conversation with one agent
#[derive(Debug)]
pub struct ChatSession {
    agent: AgentDetails,
    messages: Vec<ChatMessage>,
    error: Option<String>,
}

impl ChatSession {
    /// Open a conversation, seeded with the agent's greeting
    pub fn new(agent: AgentDetails) -> Self {
        let mut session = Self {
            agent,
            messages: Vec::new(),
            error: None,
        };
        session.reset_transcript();
        session
    }

    fn reset_transcript(&mut self) {
        let name = self.agent.agent.name.clone();
        let greeting = format!(
            "Hello! I'm {}. I'm ready to chat with you based on the experiences I shared during my interview. What would you like to talk about?",
            name
        );
        self.messages = vec![ChatMessage::agent(greeting, Utc::now().to_rfc3339(), name)];
    }

    /// Agent being talked to
    pub fn agent(&self) -> &AgentDetails {
        &self.agent
    }

    /// Transcript, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Inline error from the last failed call
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Send a message and append the agent's reply
    ///
    /// Blank input is ignored. On failure the user's message stays in the
    /// transcript and the error is recorded inline.
    pub async fn send<A: InterviewApi + ?Sized>(&mut self, api: &A, text: &str) -> SendOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }

        self.messages.push(ChatMessage::user(text));
        self.error = None;

        let request = ChatRequest {
            agent_id: self.agent.agent.agent_id.clone(),
            message: text.to_string(),
        };
        match api.chat_with_agent(&request).await {
            Ok(reply) => {
                tracing::debug!(agent_id = %reply.agent_id, "Agent replied");
                self.messages.push(ChatMessage::agent(
                    reply.response,
                    reply.timestamp,
                    reply.agent_name,
                ));
                SendOutcome::Replied
            }
            Err(e) => {
                self.error = Some(e.user_message(SEND_FAILED));
                SendOutcome::Failed
            }
        }
    }

    /// Clear the service-side history and restart the transcript
    pub async fn clear<A: InterviewApi + ?Sized>(&mut self, api: &A) -> bool {
        self.error = None;
        match api.clear_conversation(&self.agent.agent.agent_id).await {
            Ok(_) => {
                self.reset_transcript();
                true
            }
            Err(e) => {
                self.error = Some(e.user_message(CLEAR_FAILED));
                false
            }
        }
    }
}
