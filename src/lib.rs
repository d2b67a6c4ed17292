//! Pension auto-enrolment eligibility and lifecycle engine.
//!
//! Assesses payroll records against a workplace pension scheme: when an
//! employee must be auto-enrolled, whether they are eligible, what each
//! party contributes per pay period under the escalation schedule, whether
//! an opt-out request is inside its statutory window, when an opted-out
//! employee falls due for re-enrolment, and what their current enrolment
//! status is given an append-only event history.
//!
//! The crate is a pure library. Calculations take a resolved
//! [`config::SchemeConfig`] plus an explicit `as_of` date and return
//! values; nothing here reads the clock or performs I/O beyond the YAML
//! [`config::ConfigLoader`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use enrolment_engine::calculation::resolve_auto_enrolment_date;
//! use enrolment_engine::config::StagingConfig;
//!
//! let staging = StagingConfig::default();
//! let start = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
//! let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//!
//! let resolution = resolve_auto_enrolment_date(start, &staging, as_of);
//! assert_eq!(
//!     resolution.auto_enrolment_date,
//!     NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
//! );
//! ```

#![warn(missing_docs)]

pub mod assessment;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

pub use assessment::{assess_batch, assess_employee, EmployeeAssessment};
pub use error::{EngineError, EngineResult};
