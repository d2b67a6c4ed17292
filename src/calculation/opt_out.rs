//! Opt-out window validation.
//!
//! This module validates opt-out requests against the rolling window that
//! opens at enrolment, and computes the refund and next mandatory
//! re-enrolment date for a valid opt-out.

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Length of the opt-out window, in calendar months (not 180 days).
pub const OPT_OUT_WINDOW_MONTHS: u32 = 6;

/// Cooldown before an opted-out employee must be re-enrolled, in years.
pub const RE_ENROLMENT_COOLDOWN_YEARS: u32 = 3;

/// The result of validating an opt-out request.
///
/// An out-of-window request is an expected, frequent outcome: it is
/// reported as `is_valid: false` with a reason, never as an error. Callers
/// decide whether to surface it as a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptOutValidation {
    /// Whether the request falls inside the opt-out window.
    pub is_valid: bool,
    /// The last day on which an opt-out is accepted.
    pub window_end: NaiveDate,
    /// Days left in the window, when the request is valid.
    pub days_remaining: Option<i64>,
    /// Days past the window, when the request is invalid.
    pub days_overdue: Option<i64>,
    /// Refund of employee plus employer contributions, rounded to 2 dp.
    ///
    /// State contributions are never refunded.
    pub refund_amount: Option<Decimal>,
    /// The next mandatory re-enrolment date (enrolment + 3 years, before
    /// staging alignment), when the request is valid.
    pub next_re_enrolment_date: Option<NaiveDate>,
    /// Human-readable explanation when the request is invalid.
    pub reason: Option<String>,
}

/// Validates an opt-out request against the window opened at enrolment.
///
/// The window ends exactly 6 calendar months after the enrolment date and
/// the boundary day itself is valid. Both inputs are plain dates, so
/// time-of-day skew cannot affect the comparison.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use enrolment_engine::calculation::validate_opt_out;
///
/// let enrolment = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let request = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
///
/// let validation = validate_opt_out(enrolment, request, Decimal::new(5000, 2), Decimal::new(3000, 2));
/// assert!(validation.is_valid);
/// assert_eq!(validation.refund_amount, Some(Decimal::new(8000, 2)));
/// ```
pub fn validate_opt_out(
    enrolment_date: NaiveDate,
    request_date: NaiveDate,
    employee_contributions: Decimal,
    employer_contributions: Decimal,
) -> OptOutValidation {
    let window_end = enrolment_date + Months::new(OPT_OUT_WINDOW_MONTHS);

    if request_date <= window_end {
        let refund = (employee_contributions + employer_contributions)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        OptOutValidation {
            is_valid: true,
            window_end,
            days_remaining: Some((window_end - request_date).num_days()),
            days_overdue: None,
            refund_amount: Some(refund),
            next_re_enrolment_date: Some(
                enrolment_date + Months::new(12 * RE_ENROLMENT_COOLDOWN_YEARS),
            ),
            reason: None,
        }
    } else {
        let overdue = (request_date - window_end).num_days();
        OptOutValidation {
            is_valid: false,
            window_end,
            days_remaining: None,
            days_overdue: Some(overdue),
            refund_amount: None,
            next_re_enrolment_date: None,
            reason: Some(format!(
                "opt-out window closed on {} ({} days before the request)",
                window_end, overdue
            )),
        }
    }
}
