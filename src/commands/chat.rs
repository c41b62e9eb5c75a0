//! Interactive chat with an agent
//!
//! Runs a readline loop over a [`ChatSession`]. Lines starting with `/` are
//! special commands; everything else is sent to the agent.

use crate::api::InterviewApi;
use crate::chat::{ChatMessage, ChatSession, SendOutcome, Sender};
use crate::config::Config;
use crate::display;
use crate::error::Result;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Special commands available in chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Send the text to the agent
    Message(String),
    /// Clear the conversation history
    Clear,
    /// Show help
    Help,
    /// Leave the chat
    Exit,
    /// Unrecognised `/command`
    Unknown(String),
    /// Blank line
    Empty,
}

/// Classify one input line
pub fn parse_chat_command(input: &str) -> ChatCommand {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ChatCommand::Empty;
    }
    if !trimmed.starts_with('/') {
        return ChatCommand::Message(trimmed.to_string());
    }
    match trimmed.to_lowercase().as_str() {
        "/clear" | "/reset" => ChatCommand::Clear,
        "/help" | "/?" => ChatCommand::Help,
        "/exit" | "/quit" | "/back" => ChatCommand::Exit,
        _ => ChatCommand::Unknown(trimmed.to_string()),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  /clear   Clear the conversation history");
    println!("  /help    Show this help");
    println!("  /exit    Back to the shell");
}

fn print_message(message: &ChatMessage) {
    let time = display::format_time(&message.timestamp);
    match message.sender {
        Sender::User => println!("{} {} {}", time.dimmed(), "You:".blue().bold(), message.message),
        Sender::Agent => {
            let name = message.agent_name.as_deref().unwrap_or("Agent");
            println!(
                "{} {} {}",
                time.dimmed(),
                format!("{}:", name).green().bold(),
                message.message
            );
        }
    }
}

/// Start interactive chat with an agent
pub async fn run_chat(config: Config, agent_id: String) -> Result<()> {
    let api = super::build_api(&config)?;
    let details = api
        .get_agent_details(&agent_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message("Failed to load agent")))?;

    let mut session = ChatSession::new(details);
    let agent = &session.agent().agent;
    println!(
        "{} {}",
        format!("[{}]", display::initials(&agent.name)).cyan(),
        format!("Chat with {}", agent.name).bold()
    );
    println!(
        "{}",
        format!("Age {} • {} memory nodes", agent.age, agent.memory_nodes).dimmed()
    );
    println!("{}\n", "Type /help for commands".dimmed());
    for message in session.messages() {
        print_message(message);
    }

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                match parse_chat_command(&line) {
                    ChatCommand::Empty => continue,
                    ChatCommand::Help => print_help(),
                    ChatCommand::Exit => break,
                    ChatCommand::Unknown(command) => {
                        println!("Unknown command: {}. Type /help for commands", command)
                    }
                    ChatCommand::Clear => {
                        if session.clear(&api).await {
                            println!("{}", "Conversation cleared".dimmed());
                            for message in session.messages() {
                                print_message(message);
                            }
                        } else if let Some(error) = session.error() {
                            println!("{}", error.red());
                        }
                    }
                    ChatCommand::Message(text) => {
                        rl.add_history_entry(text.as_str())?;
                        send_and_print(&api, &mut session, &text).await;
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(agent_id = %agent_id, "Chat ended");
    Ok(())
}

async fn send_and_print<A: InterviewApi + ?Sized>(api: &A, session: &mut ChatSession, text: &str) {
    println!("{}", "Thinking...".dimmed());
    match session.send(api, text).await {
        SendOutcome::Replied => {
            if let Some(reply) = session.messages().last() {
                print_message(reply);
            }
        }
        SendOutcome::Failed => {
            if let Some(error) = session.error() {
                println!("{}", error.red());
            }
        }
        SendOutcome::Ignored => {}
    }
}
