//! Payroll record model and related types.
//!
//! This module defines the PayrollRecord struct and its supporting enums
//! for representing employees in the enrolment assessment pipeline.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Actively employed and being paid.
    Active,
    /// On extended leave (parental, long-term sick, sabbatical).
    OnLeave,
    /// Employment has ended.
    Terminated,
}

/// Represents the contractual arrangement of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Open-ended employment contract.
    Permanent,
    /// Fixed-term employment contract.
    FixedTerm,
    /// Engaged as an independent contractor.
    Contractor,
}

/// How often an employee is paid.
///
/// The frequency determines the number of pay periods per year used to
/// annualise gross pay and to divide annual qualifying earnings back into
/// per-period contribution amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayFrequency {
    /// Paid every week (52 periods per year).
    Weekly,
    /// Paid every two weeks (26 periods per year).
    #[serde(alias = "biweekly")]
    Fortnightly,
    /// Paid every calendar month (12 periods per year).
    Monthly,
    /// Frequency not recognised by the engine.
    ///
    /// Flagged by the validation pipeline; annualisation falls back to
    /// monthly (12 periods per year).
    #[serde(other)]
    Unknown,
}

impl PayFrequency {
    /// Returns the number of pay periods per year for this frequency.
    ///
    /// Unknown frequencies fall back to 12 so that downstream arithmetic
    /// never divides by zero; the validation pipeline reports them
    /// separately.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PayFrequency::Weekly => 52,
            PayFrequency::Fortnightly => 26,
            PayFrequency::Monthly => 12,
            PayFrequency::Unknown => 12,
        }
    }
}

impl std::fmt::Display for PayFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayFrequency::Weekly => write!(f, "weekly"),
            PayFrequency::Fortnightly => write!(f, "fortnightly"),
            PayFrequency::Monthly => write!(f, "monthly"),
            PayFrequency::Unknown => write!(f, "unknown"),
        }
    }
}

/// A typed payroll record for a single employee.
///
/// Records arrive from an external CSV/XLSX parser; the engine treats them
/// as immutable inputs. Either `date_of_birth` or `age` must resolve to a
/// plausible age, which the validation pipeline enforces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// Tax identifier (e.g. national insurance number).
    #[serde(default)]
    pub tax_identifier: Option<String>,
    /// The employee's date of birth, when known.
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// The employee's age in whole years, when the date of birth is unknown.
    #[serde(default)]
    pub age: Option<u32>,
    /// The date the employee started employment.
    pub employment_start_date: NaiveDate,
    /// Current employment status.
    pub employment_status: EmploymentStatus,
    /// Contractual arrangement.
    pub contract_type: ContractType,
    /// Gross pay per pay period.
    pub gross_pay: Decimal,
    /// How often the employee is paid.
    pub pay_frequency: PayFrequency,
    /// National insurance / social security contribution class, when supplied.
    #[serde(default)]
    pub insurance_class: Option<String>,
    /// End date of the pay period this record was drawn from.
    #[serde(default)]
    pub pay_period_end: Option<NaiveDate>,
    /// Whether the employee has opted out of the scheme.
    #[serde(default)]
    pub has_opted_out: bool,
    /// The date of the employee's most recent opt-out, if any.
    #[serde(default)]
    pub prior_opt_out_date: Option<NaiveDate>,
    /// Whether the employee is already a member of a qualifying scheme.
    #[serde(default)]
    pub in_existing_scheme: bool,
    /// ISO 4217 currency code for the pay amounts.
    pub currency: String,
    /// Free-text notes attached to the record.
    #[serde(default)]
    pub notes: Option<String>,
}

impl PayrollRecord {
    /// Resolves the employee's age in whole years as of the given date.
    ///
    /// The date of birth takes precedence over the self-reported `age`
    /// field when both are present. Returns `None` when neither resolves.
    pub fn age_on(&self, as_of: NaiveDate) -> Option<u32> {
        if let Some(dob) = self.date_of_birth {
            let mut years = as_of.year() - dob.year();
            if (as_of.month(), as_of.day()) < (dob.month(), dob.day()) {
                years -= 1;
            }
            return u32::try_from(years).ok();
        }
        self.age
    }

    /// Annualises the per-period gross pay using the record's pay frequency.
    ///
    /// Assumes equal-pay periods; irregular or commission pay is out of
    /// scope for the engine.
    pub fn annualised_pay(&self) -> Decimal {
        self.gross_pay * Decimal::from(self.pay_frequency.periods_per_year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_record() -> PayrollRecord {
        PayrollRecord {
            employee_id: "emp_001".to_string(),
            tax_identifier: Some("AB123456C".to_string()),
            date_of_birth: Some(NaiveDate::from_ymd_opt(1990, 1, 15).unwrap()),
            age: None,
            employment_start_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            employment_status: EmploymentStatus::Active,
            contract_type: ContractType::Permanent,
            gross_pay: dec("2500.00"),
            pay_frequency: PayFrequency::Monthly,
            insurance_class: Some("A".to_string()),
            pay_period_end: Some(NaiveDate::from_ymd_opt(2025, 5, 31).unwrap()),
            has_opted_out: false,
            prior_opt_out_date: None,
            in_existing_scheme: false,
            currency: "GBP".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_deserialize_monthly_record() {
        let json = r#"{
            "employee_id": "emp_001",
            "tax_identifier": "AB123456C",
            "date_of_birth": "1990-01-15",
            "employment_start_date": "2023-06-01",
            "employment_status": "active",
            "contract_type": "permanent",
            "gross_pay": "2500.00",
            "pay_frequency": "monthly",
            "currency": "GBP"
        }"#;

        let record: PayrollRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.employee_id, "emp_001");
        assert_eq!(record.employment_status, EmploymentStatus::Active);
        assert_eq!(record.contract_type, ContractType::Permanent);
        assert_eq!(record.pay_frequency, PayFrequency::Monthly);
        assert_eq!(record.gross_pay, dec("2500.00"));
        assert!(!record.has_opted_out);
        assert!(!record.in_existing_scheme);
        assert!(record.age.is_none());
    }

    #[test]
    fn test_deserialize_biweekly_alias_maps_to_fortnightly() {
        let json = "\"biweekly\"";
        let freq: PayFrequency = serde_json::from_str(json).unwrap();
        assert_eq!(freq, PayFrequency::Fortnightly);
    }

    #[test]
    fn test_deserialize_unrecognised_frequency_maps_to_unknown() {
        let freq: PayFrequency = serde_json::from_str("\"lunar\"").unwrap();
        assert_eq!(freq, PayFrequency::Unknown);
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(PayFrequency::Weekly.periods_per_year(), 52);
        assert_eq!(PayFrequency::Fortnightly.periods_per_year(), 26);
        assert_eq!(PayFrequency::Monthly.periods_per_year(), 12);
        assert_eq!(PayFrequency::Unknown.periods_per_year(), 12);
    }

    #[test]
    fn test_age_on_before_birthday() {
        let record = create_test_record();
        // Born 1990-01-15; on 2025-01-14 the birthday has not yet passed.
        let age = record.age_on(NaiveDate::from_ymd_opt(2025, 1, 14).unwrap());
        assert_eq!(age, Some(34));
    }

    #[test]
    fn test_age_on_birthday() {
        let record = create_test_record();
        let age = record.age_on(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(age, Some(35));
    }

    #[test]
    fn test_age_on_prefers_date_of_birth_over_age_field() {
        let mut record = create_test_record();
        record.age = Some(99);
        let age = record.age_on(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(age, Some(35));
    }

    #[test]
    fn test_age_on_falls_back_to_age_field() {
        let mut record = create_test_record();
        record.date_of_birth = None;
        record.age = Some(41);
        let age = record.age_on(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(age, Some(41));
    }

    #[test]
    fn test_age_on_none_when_unresolvable() {
        let mut record = create_test_record();
        record.date_of_birth = None;
        record.age = None;
        assert_eq!(record.age_on(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()), None);
    }

    #[test]
    fn test_annualised_pay_monthly() {
        let record = create_test_record();
        assert_eq!(record.annualised_pay(), dec("30000.00"));
    }

    #[test]
    fn test_annualised_pay_weekly() {
        let mut record = create_test_record();
        record.pay_frequency = PayFrequency::Weekly;
        record.gross_pay = dec("500.00");
        assert_eq!(record.annualised_pay(), dec("26000.00"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let record = create_test_record();
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: PayrollRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_employment_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EmploymentStatus::Active).unwrap(),
            "\"active\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentStatus::OnLeave).unwrap(),
            "\"on_leave\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentStatus::Terminated).unwrap(),
            "\"terminated\""
        );
    }

    #[test]
    fn test_contract_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ContractType::FixedTerm).unwrap(),
            "\"fixed_term\""
        );
    }

    #[test]
    fn test_pay_frequency_display() {
        assert_eq!(format!("{}", PayFrequency::Weekly), "weekly");
        assert_eq!(format!("{}", PayFrequency::Fortnightly), "fortnightly");
        assert_eq!(format!("{}", PayFrequency::Monthly), "monthly");
        assert_eq!(format!("{}", PayFrequency::Unknown), "unknown");
    }
}
