//! Assessment orchestration.
//!
//! Runs one payroll record through the full pipeline: sanitisation,
//! validation, eligibility, auto-enrolment date resolution, contribution
//! calculation, and status folding. The result is a self-describing
//! envelope suitable for audit storage.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    build_enrolment_status, calculate_contributions, evaluate_eligibility,
    resolve_auto_enrolment_date, AutoEnrolmentResolution,
};
use crate::config::SchemeConfig;
use crate::error::EngineResult;
use crate::models::{
    EnrolmentEvent, EnrolmentState, EnrolmentStatus, PayrollRecord, RiskBand, ValidationSummary,
};
use crate::validation::{run_validation_rules, sanitize_record, summarise};

/// One employee's complete assessment result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeAssessment {
    /// Unique identifier for this assessment run.
    pub assessment_id: Uuid,
    /// When the assessment was performed.
    pub assessed_at: DateTime<Utc>,
    /// Version of the engine that produced this result.
    pub engine_version: String,
    /// The (sanitised) employee identifier the result belongs to.
    pub employee_id: String,
    /// Validation findings, eligibility, contribution and risk summary.
    pub validation: ValidationSummary,
    /// Waiting-period and auto-enrolment date resolution.
    pub auto_enrolment: AutoEnrolmentResolution,
    /// Current enrolment status derived from the event history.
    pub status: EnrolmentStatus,
}

/// Scheme year the employee is in on `as_of`, relative to their
/// auto-enrolment date. Year 1 runs from the enrolment date to the day
/// before its first anniversary.
fn phase_year_on(auto_enrolment_date: NaiveDate, as_of: NaiveDate) -> u32 {
    if as_of < auto_enrolment_date {
        return 1;
    }
    let mut completed = (as_of.year() - auto_enrolment_date.year()) as u32;
    if (as_of.month(), as_of.day()) < (auto_enrolment_date.month(), auto_enrolment_date.day()) {
        completed = completed.saturating_sub(1);
    }
    completed + 1
}

/// Assesses a single payroll record against a resolved scheme configuration.
///
/// `history` may contain events for other employees; only those matching
/// the record's (sanitised) employee id are folded. An employee who is
/// eligible, still inside the waiting period, and has no recorded events
/// is reported as [`EnrolmentState::PendingEnrolment`].
///
/// # Errors
///
/// Returns an error only when the contribution schedule is empty; policy
/// rejections such as ineligibility are reported in the summary, not as
/// errors.
pub fn assess_employee(
    record: &PayrollRecord,
    history: &[EnrolmentEvent],
    config: &SchemeConfig,
    as_of: NaiveDate,
) -> EngineResult<EmployeeAssessment> {
    let assessment_id = Uuid::new_v4();
    let record = sanitize_record(record);

    info!(
        assessment_id = %assessment_id,
        employee_id = %record.employee_id,
        as_of = %as_of,
        "Starting employee assessment"
    );

    let issues = run_validation_rules(&record, as_of);
    let eligibility = evaluate_eligibility(&record, config.thresholds(), as_of);
    let auto_enrolment = resolve_auto_enrolment_date(
        record.employment_start_date,
        config.staging(),
        as_of,
    );

    let contribution = if eligibility.eligible {
        let phase_year = phase_year_on(auto_enrolment.auto_enrolment_date, as_of);
        Some(calculate_contributions(
            &record,
            phase_year,
            config.schedule(),
            config.thresholds(),
        )?)
    } else {
        None
    };

    let mut status = build_enrolment_status(&record.employee_id, history);
    if status.state == EnrolmentState::NotStarted
        && eligibility.eligible
        && !auto_enrolment.ready_to_enrol
    {
        status.state = EnrolmentState::PendingEnrolment;
        status.status_date = Some(as_of);
    }

    let validation = summarise(issues, eligibility, contribution);

    match validation.risk_band {
        RiskBand::High | RiskBand::Critical => warn!(
            assessment_id = %assessment_id,
            employee_id = %record.employee_id,
            risk_score = validation.risk_score,
            risk_band = ?validation.risk_band,
            "Assessment flagged for review"
        ),
        _ => info!(
            assessment_id = %assessment_id,
            employee_id = %record.employee_id,
            eligible = validation.eligibility.eligible,
            risk_score = validation.risk_score,
            "Assessment complete"
        ),
    }

    Ok(EmployeeAssessment {
        assessment_id,
        assessed_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: record.employee_id,
        validation,
        auto_enrolment,
        status,
    })
}

/// Assesses a batch of records sharing one configuration and event history.
///
/// Records are independent; output order follows input order. The whole
/// batch fails only when an individual assessment fails, which requires a
/// broken (empty) contribution schedule.
pub fn assess_batch(
    records: &[PayrollRecord],
    history: &[EnrolmentEvent],
    config: &SchemeConfig,
    as_of: NaiveDate,
) -> EngineResult<Vec<EmployeeAssessment>> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        record_count = records.len(),
        "Starting batch assessment"
    );

    let results = records
        .iter()
        .map(|record| assess_employee(record, history, config, as_of))
        .collect::<EngineResult<Vec<_>>>()?;

    let flagged = results
        .iter()
        .filter(|a| matches!(a.validation.risk_band, RiskBand::High | RiskBand::Critical))
        .count();
    info!(
        correlation_id = %correlation_id,
        record_count = results.len(),
        flagged,
        "Batch assessment complete"
    );

    Ok(results)
}
