//! Enrolment history event model.
//!
//! This module defines the append-only event log that records every
//! lifecycle transition for an employee. Events are never mutated or
//! deleted; the current enrolment status is always re-derived from the log.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of lifecycle transition an event records.
///
/// This is a closed enum: every consumer matches exhaustively, so adding a
/// new event kind is a compile-time-checked decision rather than a silent
/// default-case fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrolmentEventKind {
    /// The employee was automatically enrolled on a staging date.
    AutoEnrolled,
    /// The employee opted out inside the opt-out window.
    OptedOut,
    /// The employee was re-enrolled after the cooldown period.
    ReEnrolled,
    /// The employee joined the scheme voluntarily.
    ManuallyEnrolled,
    /// The employee's employment ended.
    EmploymentEnded,
    /// The employee stopped meeting the eligibility criteria.
    BecameIneligible,
}

impl std::fmt::Display for EnrolmentEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EnrolmentEventKind::AutoEnrolled => "AUTO_ENROLLED",
            EnrolmentEventKind::OptedOut => "OPTED_OUT",
            EnrolmentEventKind::ReEnrolled => "RE_ENROLLED",
            EnrolmentEventKind::ManuallyEnrolled => "MANUALLY_ENROLLED",
            EnrolmentEventKind::EmploymentEnded => "EMPLOYMENT_ENDED",
            EnrolmentEventKind::BecameIneligible => "BECAME_INELIGIBLE",
        };
        write!(f, "{}", label)
    }
}

/// A single entry in an employee's enrolment history.
///
/// The `(event_date, sequence)` pair is the chronological ordering key.
/// `sequence` must be assigned monotonically by whichever store records the
/// event; two events on the same date are ordered by it rather than by the
/// order they happen to arrive in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolmentEvent {
    /// Unique identifier for this event.
    pub event_id: Uuid,
    /// The employee this event belongs to.
    pub employee_id: String,
    /// The employer context that recorded the event.
    pub employer_id: String,
    /// The kind of transition recorded.
    pub kind: EnrolmentEventKind,
    /// The date the transition took effect.
    pub event_date: NaiveDate,
    /// Monotonic sequence number within the employee's log.
    pub sequence: u32,
    /// The contribution escalation phase in force at the time, if relevant.
    #[serde(default)]
    pub contribution_phase: Option<u32>,
    /// End of the opt-out window opened by an enrolment event.
    #[serde(default)]
    pub opt_out_window_end: Option<NaiveDate>,
    /// Next mandatory re-enrolment date recorded on an opt-out event.
    #[serde(default)]
    pub next_re_enrolment_date: Option<NaiveDate>,
    /// Refund amount recorded on a valid opt-out event.
    #[serde(default)]
    pub refund_amount: Option<Decimal>,
    /// Free-text notes attached when the event was recorded.
    #[serde(default)]
    pub notes: Option<String>,
}

impl EnrolmentEvent {
    /// Returns the chronological ordering key for this event.
    pub fn ordering_key(&self) -> (NaiveDate, u32) {
        (self.event_date, self.sequence)
    }
}

/// Sorts a slice of events into chronological order by `(event_date, sequence)`.
///
/// The status fold sorts defensively with this before reading the log, so a
/// store that returns events out of order cannot change the derived status.
pub fn sort_events(events: &mut [EnrolmentEvent]) {
    events.sort_by_key(EnrolmentEvent::ordering_key);
}
