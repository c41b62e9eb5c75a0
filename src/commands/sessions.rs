//! Interview session listing and deletion

use crate::api::InterviewApi;
use crate::config::Config;
use crate::display;
use crate::error::Result;
use crate::types::{SessionStatus, SessionSummary};

use colored::Colorize;
use prettytable::{cell, row, Table};

/// List interview sessions
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `json` - Print JSON instead of a table
pub async fn list_sessions(config: &Config, json: bool) -> Result<()> {
    let api = super::build_api(config)?;
    let sessions = fetch_sessions(&api).await?;

    if json {
        return super::print_json(&sessions);
    }
    if sessions.is_empty() {
        println!("No interview sessions yet. Start one with: interview-agent interview");
        return Ok(());
    }
    sessions_table(&sessions).printstd();
    Ok(())
}

async fn fetch_sessions<A: InterviewApi + ?Sized>(api: &A) -> Result<Vec<SessionSummary>> {
    api.list_sessions().await.map_err(|e| {
        anyhow::anyhow!("{}", e.user_message("Failed to load interview sessions"))
    })
}

fn colored_status(status: &SessionStatus) -> String {
    match status {
        SessionStatus::Active => status.as_str().yellow().to_string(),
        SessionStatus::Completed => status.as_str().cyan().to_string(),
        SessionStatus::AgentCreated => status.as_str().green().to_string(),
        SessionStatus::Other(other) => other.red().to_string(),
    }
}

fn sessions_table(sessions: &[SessionSummary]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Session ID", "Participant", "Created", "Status", "Progress"]);
    for session in sessions {
        table.add_row(row![
            session.session_id,
            session.participant_name,
            display::format_date(&session.created_at),
            colored_status(&session.status),
            session.progress
        ]);
    }
    table
}

/// Delete an interview session
pub async fn delete_session(config: &Config, session_id: &str) -> Result<()> {
    let api = super::build_api(config)?;
    let response = api
        .delete_session(session_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message("Failed to delete interview session")))?;
    tracing::info!(session_id, "Deleted interview session");
    println!("{}", response.message.green());
    Ok(())
}
