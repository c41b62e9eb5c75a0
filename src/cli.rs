//! Command-line interface definition
//!
//! Each subcommand corresponds to one screen of the interview client:
//! starting or resuming an interview, browsing sessions and agents, and
//! chatting with an agent.

use clap::{Parser, Subcommand};

/// Interview agent - create and chat with agents built from interviews
#[derive(Parser, Debug, Clone)]
#[command(name = "interview-agent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base URL of the interview service
    #[arg(long)]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start a new interview
    Interview {
        /// Participant first name (prompted when omitted)
        #[arg(long)]
        first_name: Option<String>,

        /// Participant last name (prompted when omitted)
        #[arg(long)]
        last_name: Option<String>,

        /// Participant age (prompted when omitted)
        #[arg(long)]
        age: Option<String>,

        /// Additional participant field as key=value (repeatable)
        #[arg(long = "info", value_parser = parse_key_value)]
        info: Vec<(String, String)>,
    },

    /// Resume an existing interview session
    Resume {
        /// Session identifier
        session_id: String,
    },

    /// List interview sessions
    Sessions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an interview session
    DeleteSession {
        /// Session identifier
        session_id: String,
    },

    /// List created agents
    Agents {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details of an agent
    Agent {
        /// Agent identifier
        agent_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Chat with an agent
    Chat {
        /// Agent identifier
        agent_id: String,
    },
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_interview_with_fields() {
        let cli = Cli::try_parse_from([
            "interview-agent",
            "interview",
            "--first-name",
            "Ada",
            "--last-name",
            "Lovelace",
            "--age",
            "30",
            "--info",
            "city=London",
        ])
        .unwrap();
        if let Commands::Interview {
            first_name,
            last_name,
            age,
            info,
        } = cli.command
        {
            assert_eq!(first_name.as_deref(), Some("Ada"));
            assert_eq!(last_name.as_deref(), Some("Lovelace"));
            assert_eq!(age.as_deref(), Some("30"));
            assert_eq!(info, vec![("city".to_string(), "London".to_string())]);
        } else {
            panic!("Expected Interview command");
        }
    }

    #[test]
    fn test_cli_rejects_malformed_info() {
        let cli = Cli::try_parse_from(["interview-agent", "interview", "--info", "novalue"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_resume() {
        let cli = Cli::try_parse_from(["interview-agent", "resume", "abc-123"]).unwrap();
        assert!(matches!(cli.command, Commands::Resume { session_id } if session_id == "abc-123"));
    }

    #[test]
    fn test_cli_resume_requires_id() {
        assert!(Cli::try_parse_from(["interview-agent", "resume"]).is_err());
    }

    #[test]
    fn test_cli_parse_agents_json() {
        let cli = Cli::try_parse_from(["interview-agent", "agents", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Agents { json: true }));
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "interview-agent",
            "--api-url",
            "http://example.com:9000",
            "-v",
            "-c",
            "custom.yaml",
            "chat",
            "agent-1",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://example.com:9000"));
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
        assert!(matches!(cli.command, Commands::Chat { agent_id } if agent_id == "agent-1"));
    }

    #[test]
    fn test_cli_parse_delete_session() {
        let cli = Cli::try_parse_from(["interview-agent", "delete-session", "s1"]).unwrap();
        assert!(matches!(cli.command, Commands::DeleteSession { session_id } if session_id == "s1"));
    }
}
