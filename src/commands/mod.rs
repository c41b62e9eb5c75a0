/*!
Command handlers for the CLI

- `interview`: start or resume an interview and create the agent
- `sessions`: list and delete interview sessions
- `agents`: list agents and show agent details
- `chat`: interactive chat with an agent

Handlers build an [`HttpInterviewApi`] from the configuration and render
results to the terminal.
*/

use crate::api::HttpInterviewApi;
use crate::config::Config;
use crate::error::Result;

pub mod agents;
pub mod chat;
pub mod interview;
pub mod sessions;

/// Build the HTTP client for the configured service
pub fn build_api(config: &Config) -> Result<HttpInterviewApi> {
    tracing::debug!(base_url = %config.api.base_url, "Using interview service");
    Ok(HttpInterviewApi::new(&config.api)?)
}

/// Pretty-print a serializable value as JSON on stdout
pub(crate) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
