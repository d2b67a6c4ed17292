//! Enrolment status derivation.
//!
//! This module folds an employee's append-only event history into a
//! current-status snapshot. The snapshot is recomputed on every call and
//! never persisted, so it cannot diverge from the log.

use chrono::Months;

use crate::models::{
    EnrolmentEvent, EnrolmentEventKind, EnrolmentState, EnrolmentStatus, sort_events,
};

use super::opt_out::{OPT_OUT_WINDOW_MONTHS, RE_ENROLMENT_COOLDOWN_YEARS};

/// Folds an employee's event history into a status snapshot.
///
/// Events are sorted by `(event_date, sequence)` before folding, so the
/// order the store returned them in does not matter. Events belonging to a
/// different employee are ignored. The current state is determined by the
/// chronologically last event; counts and most-recent dates accumulate over
/// the whole log.
///
/// An enrolment event without a recorded window end gets one computed as
/// enrolment + 6 calendar months; an opt-out without a recorded
/// re-enrolment date gets opt-out + 3 years. Recorded values always win.
///
/// # Example
///
/// ```
/// use enrolment_engine::calculation::build_enrolment_status;
/// use enrolment_engine::models::EnrolmentState;
///
/// let status = build_enrolment_status("emp_001", &[]);
/// assert_eq!(status.state, EnrolmentState::NotStarted);
/// ```
pub fn build_enrolment_status(employee_id: &str, events: &[EnrolmentEvent]) -> EnrolmentStatus {
    let mut own: Vec<EnrolmentEvent> = events
        .iter()
        .filter(|e| e.employee_id == employee_id)
        .cloned()
        .collect();
    sort_events(&mut own);

    let mut status = EnrolmentStatus::not_started(employee_id);

    for event in &own {
        match event.kind {
            EnrolmentEventKind::AutoEnrolled
            | EnrolmentEventKind::ManuallyEnrolled
            | EnrolmentEventKind::ReEnrolled => {
                status.state = EnrolmentState::Enrolled;
                status.enrolment_count += 1;
                status.last_enrolment_date = Some(event.event_date);
                status.opt_out_window_end = Some(event.opt_out_window_end.unwrap_or(
                    event.event_date + Months::new(OPT_OUT_WINDOW_MONTHS),
                ));
            }
            EnrolmentEventKind::OptedOut => {
                status.state = EnrolmentState::OptedOut;
                status.opt_out_count += 1;
                status.last_opt_out_date = Some(event.event_date);
                status.next_re_enrolment_date = Some(event.next_re_enrolment_date.unwrap_or(
                    event.event_date + Months::new(12 * RE_ENROLMENT_COOLDOWN_YEARS),
                ));
            }
            EnrolmentEventKind::EmploymentEnded | EnrolmentEventKind::BecameIneligible => {
                status.state = EnrolmentState::Ineligible;
            }
        }
        status.status_date = Some(event.event_date);
    }

    status
}
