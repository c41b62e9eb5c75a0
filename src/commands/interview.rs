//! Interactive interview command
//!
//! Drives an [`InterviewController`] from terminal input. Input lines and a
//! one-second ticker are multiplexed with `tokio::select!`:
//!
//! - a non-empty line is appended to the draft answer
//! - an empty line submits the draft
//! - `/clear` discards the draft, `/time` shows the time left, `/quit`
//!   pauses the interview
//!
//! When a question's time limit runs out the draft is submitted as is.
//! Everything is rendered to a [`Write`] sink, stdout for the binary.

use crate::api::InterviewApi;
use crate::config::Config;
use crate::display;
use crate::error::Result;
use crate::lifecycle::{InterviewController, LifecycleState};
use crate::types::{InterviewSession, StartInterviewRequest};

use colored::Colorize;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::time::{interval, MissedTickBehavior};

/// Participant fields supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ParticipantArgs {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<String>,
    pub info: Vec<(String, String)>,
}

/// How a driven interview ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewExit {
    /// The agent was created, or already existed
    AgentReady,
    /// Interview finished but no agent was created
    Completed,
    /// Input ended or the user quit before finishing
    Paused,
}

/// Start a new interview
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `participant` - Form fields given on the command line; missing ones are prompted
pub async fn run_interview(config: Config, participant: ParticipantArgs) -> Result<()> {
    let api = super::build_api(&config)?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut out = std::io::stdout();

    writeln!(out, "{}", "Generative Agent Interview".bold())?;
    writeln!(out, "Complete the interview to create your personalized AI agent\n")?;

    let mut controller = InterviewController::new();
    if !fill_form(&api, &mut controller, &participant, &mut lines, &mut out).await? {
        return Ok(());
    }
    let show_progress = config.interview.show_progress;
    drive(&api, &mut controller, &mut lines, &mut out, show_progress).await?;
    Ok(())
}

/// Resume an interview session by identifier
pub async fn run_resume(config: Config, session_id: String) -> Result<()> {
    let api = super::build_api(&config)?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut out = std::io::stdout();

    writeln!(out, "Loading interview session...")?;
    let mut controller = InterviewController::new();
    if controller.resume(&api, &session_id).await == LifecycleState::Error {
        let message = controller
            .error()
            .unwrap_or("Failed to load interview session")
            .to_string();
        writeln!(out, "{}", "Unable to Load Interview".red().bold())?;
        anyhow::bail!("{}", message);
    }

    if let Some(info) = controller.session_info() {
        write_resume_header(info, &mut out)?;
    }

    let show_progress = config.interview.show_progress;
    drive(&api, &mut controller, &mut lines, &mut out, show_progress).await?;
    Ok(())
}

fn write_resume_header<W: Write>(info: &InterviewSession, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", "Resume Interview".bold())?;
    writeln!(
        out,
        "Continuing interview for {}",
        info.participant.full_name().cyan()
    )?;
    writeln!(
        out,
        "Progress: {}/{} questions completed",
        info.responses.len(),
        info.total_questions
    )?;
    if let Some(last) = info.responses.last() {
        writeln!(
            out,
            "Last answer recorded: {}",
            display::format_epoch(last.timestamp)
        )?;
    }
    writeln!(out)
}

async fn prompt_line<R, W>(label: &str, lines: &mut Lines<R>, out: &mut W) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}: ", label)?;
    out.flush()?;
    Ok(lines.next_line().await?)
}

/// Collect participant fields and start the interview
///
/// Returns `false` when input ended before the interview started.
pub async fn fill_form<A, R, W>(
    api: &A,
    controller: &mut InterviewController,
    participant: &ParticipantArgs,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<bool>
where
    A: InterviewApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        let mut fields = Vec::with_capacity(3);
        for (label, given) in [
            ("First Name", &participant.first_name),
            ("Last Name", &participant.last_name),
            ("Age", &participant.age),
        ] {
            let value = match given {
                Some(value) => value.clone(),
                None => match prompt_line(label, lines, out).await? {
                    Some(value) => value.trim().to_string(),
                    None => return Ok(false),
                },
            };
            fields.push(value);
        }

        let mut request = StartInterviewRequest::new(&fields[0], &fields[1], &fields[2]);
        for (key, value) in &participant.info {
            request = request.with_info(key, value);
        }

        writeln!(out, "Starting Interview...")?;
        if controller.start(api, &request).await == LifecycleState::Interview {
            return Ok(true);
        }
        if let Some(error) = controller.error() {
            writeln!(out, "{}", error.red())?;
        }

        // arguments given on the command line would fail the same way again
        let all_given = participant.first_name.is_some()
            && participant.last_name.is_some()
            && participant.age.is_some();
        if all_given && !confirm("Try again?", lines, out).await? {
            return Ok(false);
        }
    }
}

async fn confirm<R, W>(question: &str, lines: &mut Lines<R>, out: &mut W) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    match prompt_line(&format!("{} [Y/n]", question), lines, out).await? {
        Some(answer) => {
            let answer = answer.trim().to_lowercase();
            Ok(answer.is_empty() || answer == "y" || answer == "yes")
        }
        None => Ok(false),
    }
}

fn render_question<W: Write>(
    controller: &InterviewController,
    show_progress: bool,
    out: &mut W,
) -> std::io::Result<()> {
    let Some(question) = controller.current_question() else {
        return Ok(());
    };

    writeln!(out)?;
    let timer = if question.is_timed() {
        format!("Time: {}", display::format_countdown(question.time_limit))
    } else {
        "No time limit".to_string()
    };
    writeln!(
        out,
        "{}  {}",
        display::question_heading(question).bold(),
        timer.dimmed()
    )?;
    if show_progress {
        writeln!(
            out,
            "{}",
            display::progress_bar(display::progress_fraction(question), 30)
        )?;
    }
    writeln!(out, "\n{}\n", question.question.cyan())?;

    let hint = if question.accepts_response() {
        format!(
            "Type your response, then an empty line for \"{}\"",
            display::submit_label(question)
        )
    } else {
        format!("Press Enter to {}", display::submit_label(question))
    };
    writeln!(out, "{}", hint.dimmed())
}

/// Print the error left by the call that just finished
fn report_error<W: Write>(controller: &InterviewController, out: &mut W) -> std::io::Result<()> {
    match controller.error() {
        Some(error) => writeln!(out, "{}", error.red()),
        None => Ok(()),
    }
}

fn should_announce(remaining: u32) -> bool {
    remaining > 0 && (remaining % 30 == 0 || remaining == 10 || remaining <= 5)
}

/// Question identity used to detect when a new one was presented
fn question_key(controller: &InterviewController) -> Option<(String, u32)> {
    controller
        .current_question()
        .map(|q| (q.session_id.clone(), q.question_number))
}

/// Run the controller from its current state to an exit
pub async fn drive<A, R, W>(
    api: &A,
    controller: &mut InterviewController,
    lines: &mut Lines<R>,
    out: &mut W,
    show_progress: bool,
) -> Result<InterviewExit>
where
    A: InterviewApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if controller.state() == LifecycleState::Interview
        && !answer_questions(api, controller, lines, out, show_progress).await?
    {
        if let Some(id) = controller.session_id() {
            writeln!(
                out,
                "\nInterview paused. Resume with: interview-agent resume {}",
                id
            )?;
        }
        return Ok(InterviewExit::Paused);
    }

    match controller.state() {
        LifecycleState::Completed => create_agent(api, controller, lines, out).await,
        LifecycleState::AgentCreation => {
            render_agent_ready(controller, out)?;
            Ok(InterviewExit::AgentReady)
        }
        _ => Ok(InterviewExit::Paused),
    }
}

/// Answer questions until the interview completes
///
/// Returns `false` if input ended or the user quit first.
async fn answer_questions<A, R, W>(
    api: &A,
    controller: &mut InterviewController,
    lines: &mut Lines<R>,
    out: &mut W,
    show_progress: bool,
) -> Result<bool>
where
    A: InterviewApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    render_question(controller, show_progress, out)?;
    let mut shown = question_key(controller);

    while controller.state() == LifecycleState::Interview {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    return Ok(false);
                };
                match line.trim() {
                    "/quit" | "/exit" => return Ok(false),
                    "/clear" => {
                        controller.set_draft("");
                        writeln!(out, "{}", "Draft cleared".dimmed())?;
                    }
                    "/time" => {
                        let countdown = controller.countdown();
                        if countdown.is_limited() {
                            writeln!(out, "Time left: {}", display::format_countdown(countdown.remaining()))?;
                        } else {
                            writeln!(out, "No time limit")?;
                        }
                    }
                    "" => {
                        let draft = controller.draft().to_string();
                        writeln!(out, "{}", "Submitting...".dimmed())?;
                        controller.submit(api, &draft).await;
                        report_error(controller, out)?;
                    }
                    _ => {
                        let draft = if controller.draft().is_empty() {
                            line
                        } else {
                            format!("{}\n{}", controller.draft(), line)
                        };
                        controller.set_draft(draft);
                    }
                }
            }
            _ = ticker.tick() => {
                if controller.countdown().is_limited() && !controller.countdown().has_expired() {
                    let remaining = controller.countdown().remaining().saturating_sub(1);
                    if remaining == 0 {
                        writeln!(out, "{}", "Time is up, submitting your response".yellow())?;
                    } else if should_announce(remaining) {
                        writeln!(out, "{}", format!("{} left", display::format_countdown(remaining)).yellow())?;
                    }
                }
                if controller.on_tick(api).await {
                    report_error(controller, out)?;
                }
            }
        }

        let current = question_key(controller);
        if controller.state() == LifecycleState::Interview && current != shown {
            shown = current;
            ticker.reset();
            render_question(controller, show_progress, out)?;
        }
    }
    Ok(true)
}

async fn create_agent<A, R, W>(
    api: &A,
    controller: &mut InterviewController,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<InterviewExit>
where
    A: InterviewApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "\n{}", "Interview Complete!".green().bold())?;
    writeln!(
        out,
        "Your interview has been completed successfully. Now we can create your personalized agent based on your responses."
    )?;

    let mut question = "Create My Agent?";
    loop {
        if !confirm(question, lines, out).await? {
            if let Some(id) = controller.session_id() {
                writeln!(
                    out,
                    "You can create the agent later with: interview-agent resume {}",
                    id
                )?;
            }
            return Ok(InterviewExit::Completed);
        }
        writeln!(out, "Creating Agent...")?;
        if controller.create_agent(api).await == LifecycleState::AgentCreation {
            render_agent_ready(controller, out)?;
            return Ok(InterviewExit::AgentReady);
        }
        report_error(controller, out)?;
        question = "Try Again?";
    }
}

fn render_agent_ready<W: Write>(controller: &InterviewController, out: &mut W) -> std::io::Result<()> {
    match controller.agent_result() {
        Some(result) => {
            writeln!(out, "\n{}", "Agent Created Successfully!".green().bold())?;
            writeln!(out, "{}", result.message)?;
            writeln!(out, "  Session ID:      {}", result.session_id)?;
            writeln!(out, "  Agent Path:      {}", result.agent_path)?;
            writeln!(out, "  Total Responses: {}", result.total_responses)?;
            writeln!(out, "  Memory Nodes:    {}", result.memory_nodes)?;
        }
        None => {
            writeln!(
                out,
                "\n{}",
                "An agent has already been created from this interview.".green()
            )?;
        }
    }
    writeln!(out, "View all agents with: interview-agent agents")
}
