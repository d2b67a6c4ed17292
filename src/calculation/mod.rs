//! Core enrolment lifecycle calculations.
//!
//! Each submodule owns one step of the lifecycle: staging date resolution,
//! auto-enrolment date derivation, eligibility evaluation, contribution
//! escalation, opt-out validation, re-enrolment scheduling, and folding an
//! event history into a current status. All functions here are pure; they
//! take resolved configuration and return values without touching I/O.

pub mod auto_enrolment;
pub mod contributions;
pub mod eligibility;
pub mod opt_out;
pub mod re_enrolment;
pub mod staging_date;
pub mod status_fold;

pub use auto_enrolment::{
    AutoEnrolmentResolution, WAITING_PERIOD_MONTHS, resolve_auto_enrolment_batch,
    resolve_auto_enrolment_date,
};
pub use contributions::calculate_contributions;
pub use eligibility::{OPT_OUT_COOLDOWN_YEARS, evaluate_eligibility};
pub use opt_out::{
    OPT_OUT_WINDOW_MONTHS, OptOutValidation, RE_ENROLMENT_COOLDOWN_YEARS, validate_opt_out,
};
pub use re_enrolment::{
    DueForReEnrolment, ReEnrolmentCalculation, calculate_re_enrolment_date,
    employees_due_for_re_enrolment,
};
pub use staging_date::{StagingDateResult, next_staging_date};
pub use status_fold::build_enrolment_status;
