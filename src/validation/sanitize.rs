//! Input sanitisation and content-safety checks.
//!
//! Payroll files frequently round-trip through spreadsheets, so free-text
//! fields are checked for formula-injection prefixes and script/HTML/SQL
//! metacharacter patterns. Those findings are reported as critical
//! validation failures, never silently stripped. Benign control characters
//! are the exception: they are stripped before the rules run.

use crate::models::{PayrollRecord, RuleResult, Severity};

/// Maximum accepted length for identifier fields.
pub const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Maximum accepted length for free-text fields.
pub const MAX_TEXT_LENGTH: usize = 256;

/// Leading characters a spreadsheet would interpret as a formula.
const FORMULA_PREFIXES: [char; 4] = ['=', '+', '@', '\t'];

/// Substrings that indicate script/HTML/SQL metacharacter content.
const SUSPICIOUS_PATTERNS: [&str; 6] = ["<", ">", "';", "\";", "--", "javascript:"];

/// Strips benign control characters from a text value.
///
/// Tab and carriage return survive: they are formula-injection prefixes
/// and must stay visible to the content checks rather than be laundered
/// away.
pub fn strip_control_chars(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_control() || *c == '\t' || *c == '\r')
        .collect()
}

/// Returns a copy of the record with benign control characters stripped
/// from every text field.
///
/// Run this before the validation rules so that stripped fields are
/// re-validated rather than judged on their raw form.
pub fn sanitize_record(record: &PayrollRecord) -> PayrollRecord {
    let mut clean = record.clone();
    clean.employee_id = strip_control_chars(&record.employee_id);
    clean.tax_identifier = record.tax_identifier.as_deref().map(strip_control_chars);
    clean.insurance_class = record.insurance_class.as_deref().map(strip_control_chars);
    clean.currency = strip_control_chars(&record.currency);
    clean.notes = record.notes.as_deref().map(strip_control_chars);
    clean
}

/// Runs the content-safety checks over one text field.
///
/// Every check is evaluated unconditionally, so a single field can
/// accumulate several findings. All findings are critical: unsafe content
/// is rejected, not repaired.
pub fn check_text_field(field: &str, value: &str, max_length: usize) -> Vec<RuleResult> {
    let mut findings = Vec::new();

    if value
        .chars()
        .next()
        .is_some_and(|c| FORMULA_PREFIXES.contains(&c) || c == '\r')
    {
        findings.push(RuleResult::new(
            "formula_injection",
            format!("{} begins with a spreadsheet formula prefix", field),
            Severity::Critical,
        ));
    }

    if SUSPICIOUS_PATTERNS
        .iter()
        .any(|pattern| value.contains(pattern))
    {
        findings.push(RuleResult::new(
            "suspicious_content",
            format!("{} contains script, HTML, or SQL metacharacters", field),
            Severity::Critical,
        ));
    }

    if value.len() > max_length {
        findings.push(RuleResult::new(
            "field_too_long",
            format!(
                "{} is {} bytes, exceeding the {}-byte ceiling",
                field,
                value.len(),
                max_length
            ),
            Severity::Critical,
        ));
    }

    findings
}
