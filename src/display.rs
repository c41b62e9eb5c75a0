//! Derived display values
//!
//! Pure helpers used by the command renderers. None of them touch the
//! lifecycle; they only format what the controller and the API return.

use crate::types::Question;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

/// Timestamp layout used by the interview service
const SERVICE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Fraction of the interview reached: `(number + 1) / (total + 2)`
///
/// The two extra slots are the introduction and the conclusion.
pub fn progress_fraction(question: &Question) -> f64 {
    let reached = f64::from(question.question_number) + 1.0;
    let slots = f64::from(question.total_questions) + 2.0;
    (reached / slots).min(1.0)
}

/// [`progress_fraction`] as a percentage
pub fn progress_percent(question: &Question) -> f64 {
    progress_fraction(question) * 100.0
}

/// "Question N of M" counting introduction and conclusion
pub fn question_heading(question: &Question) -> String {
    format!(
        "Question {} of {}",
        question.question_number + 1,
        question.total_questions + 2
    )
}

/// Text-mode progress bar of `width` cells
///
/// # Examples
///
/// ```
/// use interview_agent::display::progress_bar;
///
/// assert_eq!(progress_bar(0.5, 10), "[#####-----]");
/// ```
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Countdown as `m:ss`
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Label of the submit action for a question
pub fn submit_label(question: &Question) -> &'static str {
    if question.is_introduction {
        "Begin Interview"
    } else if question.is_conclusion {
        "Complete Interview"
    } else {
        "Next Question"
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Local).naive_local());
    }
    NaiveDateTime::parse_from_str(value, SERVICE_TIMESTAMP)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Date for listings, e.g. `Jan 2, 2024, 03:04 PM`
///
/// `Unknown` and unparseable values are returned unchanged.
pub fn format_date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(parsed) => parsed.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => value.to_string(),
    }
}

/// Time of a chat message, e.g. `03:04 PM`; empty when unparseable
pub fn format_time(value: &str) -> String {
    parse_timestamp(value)
        .map(|parsed| parsed.format("%I:%M %p").to_string())
        .unwrap_or_default()
}

/// Local date and time of a Unix timestamp in seconds
pub fn format_epoch(seconds: f64) -> String {
    let millis = (seconds * 1000.0) as i64;
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format(SERVICE_TIMESTAMP).to_string())
        .unwrap_or_default()
}

/// Initials of a display name, e.g. `AL` for `Ada Lovelace`
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
