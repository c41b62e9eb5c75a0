//! Client for the interview service HTTP API
//!
//! [`InterviewApi`] has one operation per endpoint. [`HttpInterviewApi`] is
//! the `reqwest` implementation; controllers are generic over the trait so
//! they can be driven by a scripted fake in tests.
//!
//! Responses are decoded into the types in [`crate::types`]. A non-2xx
//! response becomes [`ClientError::Http`] carrying the `detail` of a
//! `{detail: string}` body when the service sent one. Nothing is retried or
//! cached.

use crate::config::ApiConfig;
use crate::error::{ApiResult, ClientError};
use crate::types::{
    Agent, AgentCreationResponse, AgentDetails, AgentList, ChatRequest, ChatResponse, ErrorBody,
    InterviewSession, MessageResponse, Question, SessionList, SessionSummary,
    StartInterviewRequest, SubmitOutcome, SubmitResponseRequest,
};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

/// Operations exposed by the interview service
#[async_trait]
pub trait InterviewApi: Send + Sync {
    /// Create a session and return its introduction question
    async fn start_interview(&self, request: &StartInterviewRequest) -> ApiResult<Question>;

    /// Fetch the question the session is currently on
    async fn get_current_question(&self, session_id: &str) -> ApiResult<Question>;

    /// Record a response and advance the session
    async fn submit_response(&self, request: &SubmitResponseRequest) -> ApiResult<SubmitOutcome>;

    /// Build the agent from a completed session
    async fn finalize_agent(&self, session_id: &str) -> ApiResult<AgentCreationResponse>;

    /// Fetch a full session
    async fn get_session(&self, session_id: &str) -> ApiResult<InterviewSession>;

    /// List all sessions
    async fn list_sessions(&self) -> ApiResult<Vec<SessionSummary>>;

    /// Delete a session
    async fn delete_session(&self, session_id: &str) -> ApiResult<MessageResponse>;

    /// List all created agents
    async fn list_agents(&self) -> ApiResult<Vec<Agent>>;

    /// Fetch one agent
    async fn get_agent_details(&self, agent_id: &str) -> ApiResult<AgentDetails>;

    /// Send a chat message and receive the agent's reply
    async fn chat_with_agent(&self, request: &ChatRequest) -> ApiResult<ChatResponse>;

    /// Drop the service-side conversation history for an agent
    async fn clear_conversation(&self, agent_id: &str) -> ApiResult<MessageResponse>;
}

/// `reqwest`-backed implementation of [`InterviewApi`]
///
/// # Examples
///
/// ```no_run
/// use interview_agent::api::{HttpInterviewApi, InterviewApi};
/// use interview_agent::config::ApiConfig;
///
/// # async fn example() -> interview_agent::error::ApiResult<()> {
/// let api = HttpInterviewApi::new(&ApiConfig::default())?;
/// for agent in api.list_agents().await? {
///     println!("{}", agent.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpInterviewApi {
    client: Client,
    base_url: Url,
}

impl HttpInterviewApi {
    /// Create a client for the configured service
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the base URL cannot be parsed or the
    /// HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            ClientError::Config(format!("Invalid api.base_url '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "api.base_url '{}' cannot be used as a base URL",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("interview-agent/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        tracing::debug!(%method, %url, "Sending request");
        self.client.request(method, url)
    }

    /// Send a request and decode a successful body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!("Request to interview service failed: {}", e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|b| b.detail);
            tracing::warn!(status = status.as_u16(), detail = ?detail, "Interview service returned error");
            return Err(ClientError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Failed to decode response: {}", e);
            ClientError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl InterviewApi for HttpInterviewApi {
    async fn start_interview(&self, request: &StartInterviewRequest) -> ApiResult<Question> {
        self.send(self.request(Method::POST, &["interview", "start"]).json(request))
            .await
    }

    async fn get_current_question(&self, session_id: &str) -> ApiResult<Question> {
        self.send(self.request(Method::GET, &["interview", session_id, "question"]))
            .await
    }

    async fn submit_response(&self, request: &SubmitResponseRequest) -> ApiResult<SubmitOutcome> {
        let value: serde_json::Value = self
            .send(self.request(Method::POST, &["interview", "response"]).json(request))
            .await?;
        SubmitOutcome::from_value(value)
    }

    async fn finalize_agent(&self, session_id: &str) -> ApiResult<AgentCreationResponse> {
        self.send(self.request(Method::POST, &["interview", session_id, "finalize"]))
            .await
    }

    async fn get_session(&self, session_id: &str) -> ApiResult<InterviewSession> {
        self.send(self.request(Method::GET, &["interview", session_id]))
            .await
    }

    async fn list_sessions(&self) -> ApiResult<Vec<SessionSummary>> {
        let list: SessionList = self
            .send(self.request(Method::GET, &["interview", "sessions"]))
            .await?;
        Ok(list.sessions)
    }

    async fn delete_session(&self, session_id: &str) -> ApiResult<MessageResponse> {
        self.send(self.request(Method::DELETE, &["interview", session_id]))
            .await
    }

    async fn list_agents(&self) -> ApiResult<Vec<Agent>> {
        let list: AgentList = self.send(self.request(Method::GET, &["agents"])).await?;
        Ok(list.agents)
    }

    async fn get_agent_details(&self, agent_id: &str) -> ApiResult<AgentDetails> {
        self.send(self.request(Method::GET, &["agents", agent_id]))
            .await
    }

    async fn chat_with_agent(&self, request: &ChatRequest) -> ApiResult<ChatResponse> {
        self.send(
            self.request(Method::POST, &["agents", request.agent_id.as_str(), "chat"])
                .json(request),
        )
        .await
    }

    async fn clear_conversation(&self, agent_id: &str) -> ApiResult<MessageResponse> {
        self.send(self.request(Method::DELETE, &["agents", agent_id, "chat"]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_for(base: &str) -> HttpInterviewApi {
        HttpInterviewApi::new(&ApiConfig {
            base_url: base.to_string(),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = api_for("http://localhost:8000");
        assert_eq!(
            api.endpoint(&["interview", "abc", "question"]).as_str(),
            "http://localhost:8000/interview/abc/question"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = api_for("https://example.com/api/");
        assert_eq!(
            api.endpoint(&["agents"]).as_str(),
            "https://example.com/api/agents"
        );
    }

    #[test]
    fn test_endpoint_encodes_identifiers() {
        let api = api_for("http://localhost:8000");
        assert_eq!(
            api.endpoint(&["agents", "a/b c"]).as_str(),
            "http://localhost:8000/agents/a%2Fb%20c"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = HttpInterviewApi::new(&ApiConfig {
            base_url: "not a url".to_string(),
            timeout_seconds: 5,
        })
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_non_base_url_rejected() {
        let err = HttpInterviewApi::new(&ApiConfig {
            base_url: "mailto:someone@example.com".to_string(),
            timeout_seconds: 5,
        })
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
