//! Eligibility evaluation.
//!
//! This module applies age, earnings, and status thresholds to decide
//! whether an employee is currently eligible for auto-enrolment, and
//! whether an opt-out window is open for them.

use chrono::{Datelike, NaiveDate};

use crate::config::EligibilityThresholds;
use crate::models::{EligibilityOutcome, EmploymentStatus, PayrollRecord};

/// The cooldown after an opt-out during which an employee is not
/// re-assessed as eligible, in full years.
pub const OPT_OUT_COOLDOWN_YEARS: i32 = 2;

/// Full years elapsed between two dates (negative when `to` precedes `from`).
fn full_years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    years
}

/// Evaluates an employee's eligibility for auto-enrolment.
///
/// Eligible iff, as of the evaluation date:
/// - the employee is actively employed;
/// - their age lies within `[min_age, max_age]` inclusive;
/// - their annualised pay lies within `[lower_earnings, upper_earnings]`
///   inclusive (annualisation assumes equal pay periods);
/// - they are not already in a qualifying scheme;
/// - they did not opt out within the last two full years.
///
/// The outcome's `opt_out_window_open` is true only when the employee is
/// eligible and has not already opted out.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use enrolment_engine::calculation::evaluate_eligibility;
/// use enrolment_engine::config::EligibilityThresholds;
/// # use enrolment_engine::models::{ContractType, EmploymentStatus, PayFrequency, PayrollRecord};
/// # use rust_decimal::Decimal;
/// # let record = PayrollRecord {
/// #     employee_id: "emp_001".into(), tax_identifier: None,
/// #     date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 15), age: None,
/// #     employment_start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
/// #     employment_status: EmploymentStatus::Active, contract_type: ContractType::Permanent,
/// #     gross_pay: Decimal::new(250000, 2), pay_frequency: PayFrequency::Monthly,
/// #     insurance_class: None, pay_period_end: None, has_opted_out: false,
/// #     prior_opt_out_date: None, in_existing_scheme: false,
/// #     currency: "GBP".into(), notes: None,
/// # };
///
/// let thresholds = EligibilityThresholds::default();
/// let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let outcome = evaluate_eligibility(&record, &thresholds, as_of);
/// assert!(outcome.eligible);
/// assert!(outcome.opt_out_window_open);
/// ```
pub fn evaluate_eligibility(
    record: &PayrollRecord,
    thresholds: &EligibilityThresholds,
    as_of: NaiveDate,
) -> EligibilityOutcome {
    let ineligible = |reason: String| EligibilityOutcome {
        eligible: false,
        reason: Some(reason),
        opt_out_window_open: false,
    };

    if record.employment_status != EmploymentStatus::Active {
        return ineligible(format!(
            "employment status is {}, not active",
            match record.employment_status {
                EmploymentStatus::Active => "active",
                EmploymentStatus::OnLeave => "on_leave",
                EmploymentStatus::Terminated => "terminated",
            }
        ));
    }

    let Some(age) = record.age_on(as_of) else {
        return ineligible("age could not be determined from the record".to_string());
    };

    if age < thresholds.min_age {
        return ineligible(format!(
            "age {} is below the minimum age of {}",
            age, thresholds.min_age
        ));
    }
    if age > thresholds.max_age {
        return ineligible(format!(
            "age {} is above the maximum age of {}",
            age, thresholds.max_age
        ));
    }

    let annualised = record.annualised_pay();
    if annualised < thresholds.lower_earnings {
        return ineligible(format!(
            "annualised pay {} is below the lower earnings threshold {}",
            annualised, thresholds.lower_earnings
        ));
    }
    if annualised > thresholds.upper_earnings {
        return ineligible(format!(
            "annualised pay {} is above the upper earnings threshold {}",
            annualised, thresholds.upper_earnings
        ));
    }

    if record.in_existing_scheme {
        return ineligible("already a member of a qualifying pension scheme".to_string());
    }

    if let Some(opt_out_date) = record.prior_opt_out_date {
        let years_since = full_years_between(opt_out_date, as_of);
        if years_since >= 0 && years_since < OPT_OUT_COOLDOWN_YEARS {
            return ineligible(format!(
                "opted out on {}, within the {}-year cooldown",
                opt_out_date, OPT_OUT_COOLDOWN_YEARS
            ));
        }
    }

    EligibilityOutcome {
        eligible: true,
        reason: None,
        opt_out_window_open: !record.has_opted_out,
    }
}
