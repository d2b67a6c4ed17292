//! Payroll record validation: sanitisation, rule pipeline, and risk scoring.

pub mod risk;
pub mod rules;
pub mod sanitize;

pub use risk::{INELIGIBILITY_SURCHARGE, risk_score, summarise};
pub use rules::{
    MAX_PLAUSIBLE_AGE, MIN_PLAUSIBLE_AGE, STALE_PERIOD_MONTHS, run_validation_rules,
};
pub use sanitize::{
    MAX_IDENTIFIER_LENGTH, MAX_TEXT_LENGTH, check_text_field, sanitize_record,
    strip_control_chars,
};
