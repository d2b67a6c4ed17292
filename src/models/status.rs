//! Enrolment status snapshot model.
//!
//! The status snapshot is a fold of an employee's enrolment history. It is
//! recomputed on demand and never persisted independently, so it cannot
//! diverge from the event log it was derived from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The current position of an employee in the enrolment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrolmentState {
    /// No lifecycle events recorded yet.
    NotStarted,
    /// No events recorded and the auto-enrolment date has not yet arrived.
    PendingEnrolment,
    /// Currently enrolled in the scheme.
    Enrolled,
    /// Opted out and awaiting the re-enrolment cycle.
    OptedOut,
    /// No longer eligible (employment ended or criteria no longer met).
    Ineligible,
}

impl std::fmt::Display for EnrolmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EnrolmentState::NotStarted => "NOT_STARTED",
            EnrolmentState::PendingEnrolment => "PENDING_ENROLMENT",
            EnrolmentState::Enrolled => "ENROLLED",
            EnrolmentState::OptedOut => "OPTED_OUT",
            EnrolmentState::Ineligible => "INELIGIBLE",
        };
        write!(f, "{}", label)
    }
}

/// A point-in-time snapshot of an employee's enrolment lifecycle.
///
/// Derived from the event log by [`crate::calculation::build_enrolment_status`];
/// all counts and most-recent dates are re-computed on every fold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolmentStatus {
    /// The employee the snapshot describes.
    pub employee_id: String,
    /// The current lifecycle state.
    pub state: EnrolmentState,
    /// The date of the event that produced the current state.
    pub status_date: Option<NaiveDate>,
    /// How many times the employee has been enrolled (auto, manual, or re-enrolment).
    pub enrolment_count: u32,
    /// How many times the employee has opted out.
    pub opt_out_count: u32,
    /// The most recent enrolment date, if any.
    pub last_enrolment_date: Option<NaiveDate>,
    /// The most recent opt-out date, if any.
    pub last_opt_out_date: Option<NaiveDate>,
    /// The end of the opt-out window opened by the most recent enrolment.
    pub opt_out_window_end: Option<NaiveDate>,
    /// The next mandatory re-enrolment date recorded on the most recent opt-out.
    pub next_re_enrolment_date: Option<NaiveDate>,
}

impl EnrolmentStatus {
    /// Creates an empty snapshot for an employee with no recorded history.
    pub fn not_started(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            state: EnrolmentState::NotStarted,
            status_date: None,
            enrolment_count: 0,
            opt_out_count: 0,
            last_enrolment_date: None,
            last_opt_out_date: None,
            opt_out_window_end: None,
            next_re_enrolment_date: None,
        }
    }
}
