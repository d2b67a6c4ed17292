//! Integration tests for the enrolment engine.
//!
//! This suite runs the engine end to end including:
//! - Scheme configuration loading from YAML
//! - Staging date and auto-enrolment resolution
//! - Eligibility across age, earnings, and cooldown boundaries
//! - Contribution escalation and clamping
//! - Opt-out window validation and refunds
//! - Re-enrolment scheduling after the cooldown
//! - Status folding over event histories
//! - Whole-record assessment of a mixed population

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use enrolment_engine::assessment::{assess_batch, assess_employee};
use enrolment_engine::calculation::{
    calculate_contributions, calculate_re_enrolment_date, evaluate_eligibility,
    next_staging_date, resolve_auto_enrolment_date, validate_opt_out, build_enrolment_status,
};
use enrolment_engine::config::{ConfigLoader, SchemeConfig, StagingConfig};
use enrolment_engine::models::{
    ContractType, EmploymentStatus, EnrolmentEvent, EnrolmentEventKind, EnrolmentState,
    PayFrequency, PayrollRecord, RiskBand, Severity,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> SchemeConfig {
    ConfigLoader::load("./config/scheme")
        .expect("Failed to load config")
        .into_config()
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn base_record(employee_id: &str) -> PayrollRecord {
    PayrollRecord {
        employee_id: employee_id.to_string(),
        tax_identifier: Some("AB123456C".to_string()),
        date_of_birth: Some(date("1985-04-20")),
        age: None,
        employment_start_date: date("2024-01-10"),
        employment_status: EmploymentStatus::Active,
        contract_type: ContractType::Permanent,
        gross_pay: decimal("2600.00"),
        pay_frequency: PayFrequency::Monthly,
        insurance_class: Some("A".to_string()),
        pay_period_end: Some(date("2025-05-31")),
        has_opted_out: false,
        prior_opt_out_date: None,
        in_existing_scheme: false,
        currency: "GBP".to_string(),
        notes: None,
    }
}

fn event(
    employee_id: &str,
    kind: EnrolmentEventKind,
    event_date: &str,
    sequence: u32,
) -> EnrolmentEvent {
    EnrolmentEvent {
        event_id: Uuid::new_v4(),
        employee_id: employee_id.to_string(),
        employer_id: "employer_1".to_string(),
        kind,
        event_date: date(event_date),
        sequence,
        contribution_phase: None,
        opt_out_window_end: None,
        next_re_enrolment_date: None,
        refund_amount: None,
        notes: None,
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

#[test]
fn test_config_loads_from_yaml() {
    let loader = ConfigLoader::load("./config/scheme").expect("Failed to load config");
    assert_eq!(loader.scheme().code, "WPS-2024");

    let config = loader.into_config();
    assert_eq!(config.thresholds().min_age, 23);
    assert_eq!(config.thresholds().max_age, 60);
    assert_eq!(config.thresholds().lower_earnings, decimal("6240"));
    assert_eq!(config.thresholds().upper_earnings, decimal("50270"));
    assert_eq!(config.schedule().phases().len(), 3);
}

#[test]
fn test_missing_config_directory_is_an_error() {
    let result = ConfigLoader::load("./config/no_such_scheme");
    assert!(result.is_err());
}

// =============================================================================
// Lifecycle: hire through enrolment
// =============================================================================

#[test]
fn test_new_hire_lifecycle_to_enrolment() {
    let config = load_config();

    // Hired mid-March: six months of waiting, then the next quarterly
    // staging date.
    let resolution = resolve_auto_enrolment_date(
        date("2025-03-15"),
        config.staging(),
        date("2025-06-01"),
    );
    assert_eq!(resolution.waiting_period_end, date("2025-09-15"));
    assert_eq!(resolution.auto_enrolment_date, date("2025-10-01"));
    assert!(!resolution.ready_to_enrol);

    // Once the waiting period has elapsed the same resolution reports
    // readiness without moving the date.
    let later = resolve_auto_enrolment_date(
        date("2025-03-15"),
        config.staging(),
        date("2025-09-15"),
    );
    assert_eq!(later.auto_enrolment_date, date("2025-10-01"));
    assert!(later.ready_to_enrol);
}

#[test]
fn test_staging_dates_are_strictly_after_reference() {
    let config = StagingConfig::default();
    let on_staging_day = next_staging_date(&config, date("2025-10-01"));
    assert_eq!(on_staging_day.date, date("2026-01-01"));
}

// =============================================================================
// Eligibility boundaries
// =============================================================================

#[test]
fn test_eligibility_boundaries() {
    let config = load_config();
    let as_of = date("2025-06-01");

    let eligible = evaluate_eligibility(&base_record("emp_ok"), config.thresholds(), as_of);
    assert!(eligible.eligible);
    assert!(eligible.opt_out_window_open);

    let mut too_young = base_record("emp_young");
    too_young.date_of_birth = Some(date("2003-06-02"));
    let outcome = evaluate_eligibility(&too_young, config.thresholds(), as_of);
    assert!(!outcome.eligible);
    assert!(outcome.reason.as_deref().unwrap_or("").contains("below"));

    let mut low_paid = base_record("emp_low");
    low_paid.gross_pay = decimal("519.99");
    low_paid.pay_frequency = PayFrequency::Monthly;
    assert!(!evaluate_eligibility(&low_paid, config.thresholds(), as_of).eligible);

    // Exactly on the lower earnings threshold is eligible.
    let mut on_threshold = base_record("emp_edge");
    on_threshold.gross_pay = decimal("520.00");
    assert!(evaluate_eligibility(&on_threshold, config.thresholds(), as_of).eligible);

    let mut already_in = base_record("emp_in_scheme");
    already_in.in_existing_scheme = true;
    assert!(!evaluate_eligibility(&already_in, config.thresholds(), as_of).eligible);
}

// =============================================================================
// Contribution escalation
// =============================================================================

#[test]
fn test_contribution_escalation_and_clamp() {
    let config = load_config();
    let record = base_record("emp_contrib");

    // 2600/month annualises to 31200; qualifying = 31200 - 6240 = 24960,
    // or 2080 per month.
    let year_one =
        calculate_contributions(&record, 1, config.schedule(), config.thresholds()).unwrap();
    assert_eq!(year_one.pensionable_pay, decimal("2080"));
    assert_eq!(year_one.rounded().employee_amount, decimal("20.80"));

    let year_three =
        calculate_contributions(&record, 3, config.schedule(), config.thresholds()).unwrap();
    let year_ten =
        calculate_contributions(&record, 10, config.schedule(), config.thresholds()).unwrap();
    assert_eq!(year_three.employee_amount, year_ten.employee_amount);
    assert!(year_three.employee_amount > year_one.employee_amount);
}

#[test]
fn test_high_earner_is_capped_at_upper_threshold() {
    let config = load_config();
    let mut record = base_record("emp_exec");
    record.gross_pay = decimal("20000.00"); // 240000/year, well over the cap

    let breakdown =
        calculate_contributions(&record, 1, config.schedule(), config.thresholds()).unwrap();
    let expected = (decimal("50270") - decimal("6240")) / decimal("12");
    assert_eq!(
        breakdown.pensionable_pay.round_dp(6),
        expected.round_dp(6)
    );
}

// =============================================================================
// Opt-out window and refunds
// =============================================================================

#[test]
fn test_opt_out_window_boundaries_and_refund() {
    // Enrolled 15 January: the window closes at the end of 15 July.
    let last_day = validate_opt_out(
        date("2024-01-15"),
        date("2024-07-15"),
        decimal("131.69"),
        decimal("65.84"),
    );
    assert!(last_day.is_valid);
    assert_eq!(last_day.window_end, date("2024-07-15"));
    assert_eq!(last_day.refund_amount, Some(decimal("197.53")));
    assert_eq!(last_day.next_re_enrolment_date, Some(date("2027-01-15")));

    let day_after = validate_opt_out(
        date("2024-01-15"),
        date("2024-07-16"),
        decimal("131.69"),
        decimal("65.84"),
    );
    assert!(!day_after.is_valid);
    assert_eq!(day_after.days_overdue, Some(1));
    assert!(day_after.refund_amount.is_none());
}

#[test]
fn test_re_enrolment_snaps_to_staging_date() {
    let config = load_config();
    let calc = calculate_re_enrolment_date(date("2024-01-15"), config.staging(), date("2025-06-01"));
    assert_eq!(calc.target_date, date("2027-01-15"));
    assert_eq!(calc.re_enrolment_date, date("2027-04-01"));
    assert!(!calc.is_due);
}

// =============================================================================
// Status folding
// =============================================================================

#[test]
fn test_status_folds_enrol_then_opt_out() {
    let history = vec![
        event("emp_fold", EnrolmentEventKind::AutoEnrolled, "2024-01-15", 1),
        event("emp_fold", EnrolmentEventKind::OptedOut, "2024-03-01", 2),
    ];
    let status = build_enrolment_status("emp_fold", &history);
    assert_eq!(status.state, EnrolmentState::OptedOut);
    assert_eq!(status.enrolment_count, 1);
    assert_eq!(status.opt_out_count, 1);
    assert_eq!(status.last_opt_out_date, Some(date("2024-03-01")));
    assert_eq!(status.next_re_enrolment_date, Some(date("2027-03-01")));
}

#[test]
fn test_status_same_day_events_resolve_by_sequence() {
    // Out of order on purpose; the sequence number decides.
    let history = vec![
        event("emp_seq", EnrolmentEventKind::OptedOut, "2024-05-01", 2),
        event("emp_seq", EnrolmentEventKind::AutoEnrolled, "2024-05-01", 1),
    ];
    let status = build_enrolment_status("emp_seq", &history);
    assert_eq!(status.state, EnrolmentState::OptedOut);
}

// =============================================================================
// Whole-record assessment
// =============================================================================

#[test]
fn test_assessment_of_mixed_population() {
    let config = load_config();
    let as_of = date("2025-06-01");

    let mut hostile = base_record("emp_hostile");
    hostile.employee_id = "=SUM(A1:A10)".to_string();
    hostile.gross_pay = decimal("-10");

    let mut too_young = base_record("emp_young");
    too_young.date_of_birth = Some(date("2005-01-01"));

    let records = vec![base_record("emp_clean"), too_young, hostile];
    let history = vec![event(
        "emp_clean",
        EnrolmentEventKind::AutoEnrolled,
        "2024-10-01",
        1,
    )];

    let results = assess_batch(&records, &history, &config, as_of).unwrap();
    assert_eq!(results.len(), 3);

    let clean = &results[0];
    assert!(clean.validation.eligibility.eligible);
    assert_eq!(clean.validation.risk_band, RiskBand::Low);
    assert_eq!(clean.status.state, EnrolmentState::Enrolled);

    let young = &results[1];
    assert!(!young.validation.eligibility.eligible);
    assert!(young.validation.contribution.is_none());

    let flagged = &results[2];
    assert!(flagged
        .validation
        .issues
        .iter()
        .any(|i| i.code == "formula_injection" && i.severity == Severity::Critical));
    assert!(flagged
        .validation
        .issues
        .iter()
        .any(|i| i.code == "non_positive_pay"));
    assert!(flagged.validation.risk_score >= 10);
    assert!(matches!(
        flagged.validation.risk_band,
        RiskBand::High | RiskBand::Critical
    ));
}

#[test]
fn test_assessment_reports_pending_during_waiting_period() {
    let config = load_config();
    let mut record = base_record("emp_pending");
    record.employment_start_date = date("2025-03-15");

    let assessment = assess_employee(&record, &[], &config, date("2025-06-01")).unwrap();
    assert_eq!(assessment.status.state, EnrolmentState::PendingEnrolment);
    assert_eq!(assessment.auto_enrolment.auto_enrolment_date, date("2025-10-01"));
}
