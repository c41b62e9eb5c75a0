//! Interview agent client library
//!
//! Client for a generative-agent interview service: participants answer a
//! sequence of interview questions, the service derives a personalized
//! agent from the answers, and users can then chat with that agent.
//!
//! # Architecture
//!
//! - `api`: typed client with one operation per service endpoint
//! - `lifecycle`: interview state machine and per-question countdown
//! - `chat`: client-side chat transcript
//! - `display`: derived display values (progress, dates, timers)
//! - `types`: request and response shapes
//! - `config`: configuration loading and validation
//! - `error`: error types and result aliases
//! - `cli` / `commands`: the `interview-agent` binary
//!
//! # Example
//!
//! ```no_run
//! use interview_agent::api::HttpInterviewApi;
//! use interview_agent::config::ApiConfig;
//! use interview_agent::lifecycle::{InterviewController, LifecycleState};
//! use interview_agent::types::StartInterviewRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = HttpInterviewApi::new(&ApiConfig::default())?;
//!     let mut controller = InterviewController::new();
//!
//!     let request = StartInterviewRequest::new("Ada", "Lovelace", "30");
//!     if controller.start(&api, &request).await == LifecycleState::Interview {
//!         controller.submit(&api, "").await;
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod lifecycle;
pub mod types;

// Re-export commonly used types
pub use api::{HttpInterviewApi, InterviewApi};
pub use chat::ChatSession;
pub use config::Config;
pub use error::{ApiResult, ClientError, Result};
pub use lifecycle::{InterviewController, LifecycleState};

#[cfg(test)]
pub mod test_utils;
