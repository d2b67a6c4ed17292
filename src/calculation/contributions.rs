//! Contribution calculation.
//!
//! This module applies the time-phased escalation schedule to compute
//! employee, employer, and state contribution amounts over qualifying
//! earnings.

use rust_decimal::Decimal;

use crate::config::{ContributionSchedule, EligibilityThresholds};
use crate::error::{EngineError, EngineResult};
use crate::models::{ContributionBreakdown, PayrollRecord};

/// Calculates per-period contributions for an employee in a given phase year.
///
/// The escalation schedule is looked up by `phase_year`; years beyond the
/// schedule use the last (fully escalated) entry, so rates never reset or
/// extrapolate. Qualifying earnings are the band of annualised pay between
/// the lower and upper thresholds:
///
/// ```text
/// qualifying = max(0, min(annualised, upper) - lower)
/// pensionable per period = qualifying / periods_per_year
/// ```
///
/// All arithmetic stays unrounded; call [`ContributionBreakdown::rounded`]
/// at the point of external reporting.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] when the schedule is empty.
pub fn calculate_contributions(
    record: &PayrollRecord,
    phase_year: u32,
    schedule: &ContributionSchedule,
    thresholds: &EligibilityThresholds,
) -> EngineResult<ContributionBreakdown> {
    let phase = schedule
        .phase_for_year(phase_year)
        .ok_or_else(|| EngineError::CalculationError {
            message: "contribution schedule is empty".to_string(),
        })?;

    let annualised = record.annualised_pay();
    let capped = annualised.min(thresholds.upper_earnings).max(Decimal::ZERO);
    let qualifying = (capped - thresholds.lower_earnings).max(Decimal::ZERO);

    let periods = Decimal::from(record.pay_frequency.periods_per_year());
    let pensionable_pay = qualifying / periods;

    let employee_amount = pensionable_pay * phase.employee_rate;
    let employer_amount = pensionable_pay * phase.employer_rate;
    let state_amount = pensionable_pay * phase.state_rate;

    Ok(ContributionBreakdown {
        phase_year,
        pensionable_pay,
        employee_amount,
        employer_amount,
        state_amount,
        total: employee_amount + employer_amount + state_amount,
    })
}
