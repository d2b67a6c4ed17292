//! Data models for the Enrolment Engine.
//!
//! This module contains the core data structures used throughout the engine:
//! payroll records, the append-only enrolment history log, the derived
//! status snapshot, and the per-assessment outcome types.

mod assessment;
mod employee;
mod history;
mod status;

pub use assessment::{
    ContributionBreakdown, EligibilityOutcome, RiskBand, RuleResult, Severity, SeverityTally,
    ValidationSummary,
};
pub use employee::{ContractType, EmploymentStatus, PayFrequency, PayrollRecord};
pub use history::{EnrolmentEvent, EnrolmentEventKind, sort_events};
pub use status::{EnrolmentState, EnrolmentStatus};
