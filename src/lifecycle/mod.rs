//! Interview lifecycle
//!
//! - `controller`: state machine for one interview visit
//! - `countdown`: per-question timer that drives auto-submission

pub mod controller;
pub mod countdown;

pub use controller::{InterviewController, LifecycleState, PendingCall};
pub use countdown::{Countdown, Tick};
