//! Interview agent - terminal client for the generative agent interview service
//!
//! Main entry point for the `interview-agent` binary.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interview_agent::cli::{Cli, Commands};
use interview_agent::commands;
use interview_agent::commands::interview::ParticipantArgs;
use interview_agent::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Interview {
            first_name,
            last_name,
            age,
            info,
        } => {
            tracing::info!("Starting new interview");
            let participant = ParticipantArgs {
                first_name,
                last_name,
                age,
                info,
            };
            commands::interview::run_interview(config, participant).await
        }
        Commands::Resume { session_id } => {
            tracing::info!(session_id = %session_id, "Resuming interview");
            commands::interview::run_resume(config, session_id).await
        }
        Commands::Sessions { json } => commands::sessions::list_sessions(&config, json).await,
        Commands::DeleteSession { session_id } => {
            commands::sessions::delete_session(&config, &session_id).await
        }
        Commands::Agents { json } => commands::agents::list_agents(&config, json).await,
        Commands::Agent { agent_id, json } => {
            commands::agents::show_agent(&config, &agent_id, json).await
        }
        Commands::Chat { agent_id } => {
            tracing::info!(agent_id = %agent_id, "Starting chat");
            commands::chat::run_chat(config, agent_id).await
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they do not interleave with rendered output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "interview_agent=debug"
    } else {
        "interview_agent=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
