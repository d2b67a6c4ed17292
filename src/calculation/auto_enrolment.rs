//! Auto-enrolment date resolution.
//!
//! This module combines an employment start date with the staging date
//! calculator to produce the date an employee must be enrolled: the first
//! staging date after the statutory waiting period ends.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::StagingConfig;
use crate::models::PayrollRecord;

use super::staging_date::next_staging_date;

/// The statutory waiting period between employment start and enrolment
/// eligibility, in calendar months.
pub const WAITING_PERIOD_MONTHS: u32 = 6;

/// The resolved auto-enrolment dates for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoEnrolmentResolution {
    /// The end of the waiting period (employment start + 6 calendar months).
    pub waiting_period_end: NaiveDate,
    /// The first valid staging date after the waiting period ends.
    ///
    /// Always a legitimate staging date, never an arbitrary day.
    pub auto_enrolment_date: NaiveDate,
    /// Days from `as_of` until the enrolment date (negative when past).
    pub days_until_enrolment: i64,
    /// Whether the waiting period has ended as of the evaluation date.
    pub ready_to_enrol: bool,
}

/// Resolves the auto-enrolment date for a single employment start date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use enrolment_engine::calculation::resolve_auto_enrolment_date;
/// use enrolment_engine::config::StagingConfig;
///
/// let config = StagingConfig::default(); // quarterly, day 1
/// let start = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
///
/// let resolution = resolve_auto_enrolment_date(start, &config, as_of);
/// assert_eq!(resolution.waiting_period_end, NaiveDate::from_ymd_opt(2025, 9, 15).unwrap());
/// assert_eq!(resolution.auto_enrolment_date, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
/// assert!(!resolution.ready_to_enrol);
/// ```
pub fn resolve_auto_enrolment_date(
    employment_start_date: NaiveDate,
    config: &StagingConfig,
    as_of: NaiveDate,
) -> AutoEnrolmentResolution {
    let waiting_period_end = employment_start_date + Months::new(WAITING_PERIOD_MONTHS);
    let staging = next_staging_date(config, waiting_period_end);

    AutoEnrolmentResolution {
        waiting_period_end,
        auto_enrolment_date: staging.date,
        days_until_enrolment: (staging.date - as_of).num_days(),
        ready_to_enrol: waiting_period_end <= as_of,
    }
}

/// Resolves auto-enrolment dates for a batch of records sharing one
/// configuration.
///
/// Records are independent; the output order follows the input order.
pub fn resolve_auto_enrolment_batch(
    records: &[PayrollRecord],
    config: &StagingConfig,
    as_of: NaiveDate,
) -> Vec<AutoEnrolmentResolution> {
    records
        .iter()
        .map(|record| resolve_auto_enrolment_date(record.employment_start_date, config, as_of))
        .collect()
}
