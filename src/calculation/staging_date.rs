//! Staging date calculation.
//!
//! This module computes the next legally valid enrolment-processing date
//! after a reference date, given an employer's staging configuration.
//! Staging dates fall in the anchor months of the configured frequency on
//! the configured days of the month, clamped to month length.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::StagingConfig;

/// The result of a staging date calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingDateResult {
    /// The smallest valid staging date strictly after the reference date.
    pub date: NaiveDate,
    /// Number of days from the reference date to the staging date.
    pub days_until: i64,
    /// The staging date after `date`, for lookahead planning.
    pub following: NaiveDate,
}

/// Builds a date from year/month/day, clamping the day to the month length.
///
/// Day 31 in February yields Feb 28 (or 29 in a leap year).
fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| {
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        // Last day of the requested month.
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .expect("first of month is always valid")
            .pred_opt()
            .expect("month has a previous day")
    })
}

/// Computes the next staging date strictly after the reference date.
///
/// Candidate dates are generated from the configuration's anchor months
/// and days of month, rolling into following years when no candidate
/// remains in the current one. The result also carries the staging date
/// after the next one, so callers can plan a cycle ahead.
///
/// The configuration must have passed [`StagingConfig::validate`]; resolve
/// a possibly-missing configuration with [`StagingConfig::resolve`] before
/// calling.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use enrolment_engine::calculation::next_staging_date;
/// use enrolment_engine::config::StagingConfig;
///
/// let config = StagingConfig::default(); // quarterly, day 1
/// let reference = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
/// let result = next_staging_date(&config, reference);
/// assert_eq!(result.date, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
/// assert_eq!(result.following, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// ```
pub fn next_staging_date(config: &StagingConfig, reference: NaiveDate) -> StagingDateResult {
    let days = config.sorted_days();
    let mut found: Vec<NaiveDate> = Vec::with_capacity(2);

    // Two extra years always contain at least two candidates, even for an
    // annual frequency referenced late in the year.
    'years: for year in reference.year()..=reference.year() + 2 {
        for &month in config.frequency.anchor_months() {
            for &day in &days {
                let candidate = clamped_date(year, month, day);
                if candidate > reference && found.last() != Some(&candidate) {
                    found.push(candidate);
                    if found.len() == 2 {
                        break 'years;
                    }
                }
            }
        }
    }

    let date = found[0];
    let following = found[1];

    StagingDateResult {
        date,
        days_until: (date - reference).num_days(),
        following,
    }
}
