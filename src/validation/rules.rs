//! Payroll record validation rules.
//!
//! A deterministic rule pipeline over one record. Every rule is evaluated
//! unconditionally and in a fixed order, so a single record can accumulate
//! multiple findings and repeated runs produce identical audit output.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{PayrollRecord, RuleResult, Severity};

use super::sanitize::{MAX_IDENTIFIER_LENGTH, MAX_TEXT_LENGTH, check_text_field};

/// Youngest age the pipeline accepts as plausible for an employee.
pub const MIN_PLAUSIBLE_AGE: u32 = 16;

/// Oldest age the pipeline accepts as plausible for an employee.
pub const MAX_PLAUSIBLE_AGE: u32 = 75;

/// A pay-period end date older than this many months is considered stale.
pub const STALE_PERIOD_MONTHS: u32 = 12;

/// Insurance contribution classes the engine recognises.
const KNOWN_INSURANCE_CLASSES: [&str; 9] = ["A", "B", "C", "H", "J", "M", "V", "X", "Z"];

/// Runs the full validation pipeline over one record.
///
/// The record should already have passed through
/// [`super::sanitize::sanitize_record`] so that benign control characters
/// do not trigger content findings. The returned list is in pipeline
/// order.
pub fn run_validation_rules(record: &PayrollRecord, as_of: NaiveDate) -> Vec<RuleResult> {
    let mut issues = Vec::new();

    // Identifier presence and content.
    if record.employee_id.trim().is_empty() {
        issues.push(RuleResult::new(
            "missing_employee_id",
            "employee_id is missing",
            Severity::Critical,
        ));
    } else {
        issues.extend(check_text_field(
            "employee_id",
            &record.employee_id,
            MAX_IDENTIFIER_LENGTH,
        ));
    }

    match record.tax_identifier.as_deref() {
        None => issues.push(RuleResult::new(
            "missing_tax_identifier",
            "tax_identifier is missing",
            Severity::High,
        )),
        Some(tax_id) if tax_id.trim().is_empty() => issues.push(RuleResult::new(
            "missing_tax_identifier",
            "tax_identifier is missing",
            Severity::High,
        )),
        Some(tax_id) => {
            issues.extend(check_text_field(
                "tax_identifier",
                tax_id,
                MAX_IDENTIFIER_LENGTH,
            ));
        }
    }

    if record.gross_pay <= Decimal::ZERO {
        issues.push(RuleResult::new(
            "non_positive_pay",
            format!("gross pay {} is not positive", record.gross_pay),
            Severity::Critical,
        ));
    }

    match record.age_on(as_of) {
        None => issues.push(RuleResult::new(
            "implausible_age",
            "neither date_of_birth nor age resolves to an age",
            Severity::High,
        )),
        Some(age) if !(MIN_PLAUSIBLE_AGE..=MAX_PLAUSIBLE_AGE).contains(&age) => {
            issues.push(RuleResult::new(
                "implausible_age",
                format!(
                    "age {} is outside the plausible range {}-{}",
                    age, MIN_PLAUSIBLE_AGE, MAX_PLAUSIBLE_AGE
                ),
                Severity::High,
            ));
        }
        Some(_) => {}
    }

    if let Some(class) = record.insurance_class.as_deref() {
        if !KNOWN_INSURANCE_CLASSES.contains(&class) {
            issues.push(RuleResult::new(
                "unrecognised_insurance_class",
                format!("insurance class '{}' is not recognised", class),
                Severity::Warning,
            ));
        }
    }

    match record.pay_period_end {
        None => issues.push(RuleResult::new(
            "missing_pay_period_end",
            "pay_period_end is missing",
            Severity::Warning,
        )),
        Some(end) if end > as_of => issues.push(RuleResult::new(
            "future_pay_period_end",
            format!("pay_period_end {} is in the future", end),
            Severity::High,
        )),
        Some(end) if end < as_of - Months::new(STALE_PERIOD_MONTHS) => {
            issues.push(RuleResult::new(
                "stale_pay_period_end",
                format!(
                    "pay_period_end {} is more than {} months old",
                    end, STALE_PERIOD_MONTHS
                ),
                Severity::High,
            ));
        }
        Some(_) => {}
    }

    if record.pay_frequency == crate::models::PayFrequency::Unknown {
        issues.push(RuleResult::new(
            "unsupported_pay_frequency",
            "pay frequency is not supported; annualisation assumed monthly",
            Severity::Warning,
        ));
    }

    if record.has_opted_out && record.prior_opt_out_date.is_none() {
        issues.push(RuleResult::new(
            "opt_out_without_date",
            "record is flagged as opted out but carries no opt-out date",
            Severity::Warning,
        ));
    }

    if let Some(notes) = record.notes.as_deref() {
        issues.extend(check_text_field("notes", notes, MAX_TEXT_LENGTH));
    }

    issues
}
