//! Re-enrolment cycle calculation.
//!
//! After a 3-year cooldown an opted-out employee must be re-assessed and,
//! if still eligible, re-enrolled on the next staging date. This module
//! computes that date and filters a population down to the employees whose
//! cycle has come around.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::StagingConfig;
use crate::models::{EnrolmentState, EnrolmentStatus};

use super::opt_out::RE_ENROLMENT_COOLDOWN_YEARS;
use super::staging_date::next_staging_date;

/// The computed re-enrolment cycle for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReEnrolmentCalculation {
    /// The raw cooldown expiry (opt-out date + 3 years), before staging
    /// alignment.
    pub target_date: NaiveDate,
    /// The cooldown expiry snapped forward to the next valid staging date.
    pub re_enrolment_date: NaiveDate,
    /// Whether the snapped date has arrived as of the evaluation date.
    pub is_due: bool,
    /// Days from the evaluation date to the snapped date (negative when past).
    pub days_until: i64,
}

/// An employee whose mandatory re-enrolment cycle has arrived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueForReEnrolment {
    /// The employee due for re-enrolment.
    pub employee_id: String,
    /// The computed cycle that made them due.
    pub calculation: ReEnrolmentCalculation,
}

/// Computes the mandatory re-enrolment date after an opt-out.
///
/// Adds the 3-year cooldown to the opt-out date, then snaps forward to the
/// next valid staging date. The result is `is_due` as soon as the snapped
/// date is on or before `as_of`; a not-yet-due cycle is an expected
/// outcome, not an error.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use enrolment_engine::calculation::calculate_re_enrolment_date;
/// use enrolment_engine::config::StagingConfig;
///
/// let config = StagingConfig::default(); // quarterly, day 1
/// let opt_out = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
///
/// let calc = calculate_re_enrolment_date(opt_out, &config, as_of);
/// assert_eq!(calc.target_date, NaiveDate::from_ymd_opt(2027, 1, 15).unwrap());
/// assert_eq!(calc.re_enrolment_date, NaiveDate::from_ymd_opt(2027, 4, 1).unwrap());
/// assert!(!calc.is_due);
/// ```
pub fn calculate_re_enrolment_date(
    last_opt_out_date: NaiveDate,
    config: &StagingConfig,
    as_of: NaiveDate,
) -> ReEnrolmentCalculation {
    let target_date = last_opt_out_date + Months::new(12 * RE_ENROLMENT_COOLDOWN_YEARS);
    let snapped = next_staging_date(config, target_date).date;

    ReEnrolmentCalculation {
        target_date,
        re_enrolment_date: snapped,
        is_due: snapped <= as_of,
        days_until: (snapped - as_of).num_days(),
    }
}

/// Filters a population of statuses to the opted-out employees whose
/// re-enrolment date has arrived.
///
/// Statuses that are not `OPTED_OUT`, or that carry no opt-out date, are
/// skipped. Output order follows input order.
pub fn employees_due_for_re_enrolment(
    statuses: &[EnrolmentStatus],
    config: &StagingConfig,
    as_of: NaiveDate,
) -> Vec<DueForReEnrolment> {
    statuses
        .iter()
        .filter(|status| status.state == EnrolmentState::OptedOut)
        .filter_map(|status| {
            let opt_out_date = status.last_opt_out_date?;
            let calculation = calculate_re_enrolment_date(opt_out_date, config, as_of);
            calculation.is_due.then(|| DueForReEnrolment {
                employee_id: status.employee_id.clone(),
                calculation,
            })
        })
        .collect()
}
