//! Agent listing and details

use crate::api::InterviewApi;
use crate::config::Config;
use crate::display;
use crate::error::Result;
use crate::types::{Agent, AgentDetails};

use colored::Colorize;
use prettytable::{cell, row, Table};

/// List created agents, newest first as returned by the service
pub async fn list_agents(config: &Config, json: bool) -> Result<()> {
    let api = super::build_api(config)?;
    let agents = api
        .list_agents()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message("Failed to load agents")))?;

    if json {
        return super::print_json(&agents);
    }
    if agents.is_empty() {
        println!("No agents yet.");
        println!("Start by creating your first AI agent through the interview process:");
        println!("  interview-agent interview");
        return Ok(());
    }
    agents_table(&agents).printstd();
    Ok(())
}

fn agents_table(agents: &[Agent]) -> Table {
    let mut table = Table::new();
    table.add_row(row![
        "", "Agent ID", "Name", "Age", "Created", "Responses", "Memory Nodes"
    ]);
    for agent in agents {
        table.add_row(row![
            display::initials(&agent.name),
            agent.agent_id,
            agent.name,
            agent.age,
            display::format_date(&agent.created_date),
            agent.total_responses,
            agent.memory_nodes
        ]);
    }
    table
}

/// Show one agent
pub async fn show_agent(config: &Config, agent_id: &str, json: bool) -> Result<()> {
    let api = super::build_api(config)?;
    let details = api
        .get_agent_details(agent_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message("Failed to load agent")))?;

    if json {
        return super::print_json(&details);
    }
    print_details(&details);
    Ok(())
}

fn print_details(details: &AgentDetails) {
    let agent = &details.agent;
    println!(
        "{} {}",
        format!("[{}]", display::initials(&agent.name)).cyan(),
        agent.name.bold()
    );
    println!("  Agent ID:     {}", agent.agent_id);
    println!("  Age:          {}", agent.age);
    println!("  Created:      {}", display::format_date(&agent.created_date));
    println!("  Memory Nodes: {}", agent.memory_nodes);
    if agent.total_responses > 0 {
        println!("  Responses:    {}", agent.total_responses);
    }
    if let Some(status) = &details.status {
        println!("  Status:       {}", status);
    }
    if !details.participant.extra.is_empty() {
        println!("  Participant:");
        for (key, value) in &details.participant.extra {
            println!("    {}: {}", key, value);
        }
    }
    println!("\nChat with this agent: interview-agent chat {}", agent.agent_id);
}
