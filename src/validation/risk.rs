//! Risk scoring over validation findings.
//!
//! The score is the sum of the severity weights of every finding, plus a
//! fixed surcharge when the employee is ineligible. The band is derived
//! from the score alone, so two records with the same findings always land
//! in the same band.

use crate::models::{
    ContributionBreakdown, EligibilityOutcome, RiskBand, RuleResult, SeverityTally,
    ValidationSummary,
};

/// Added to the risk score when the eligibility outcome is negative.
pub const INELIGIBILITY_SURCHARGE: u32 = 2;

/// Computes the severity-weighted risk score for a set of findings.
pub fn risk_score(issues: &[RuleResult], eligible: bool) -> u32 {
    let weighted: u32 = issues.iter().map(|issue| issue.severity.weight()).sum();
    if eligible {
        weighted
    } else {
        weighted + INELIGIBILITY_SURCHARGE
    }
}

/// Folds findings, eligibility and the contribution breakdown into the
/// final validation summary.
pub fn summarise(
    issues: Vec<RuleResult>,
    eligibility: EligibilityOutcome,
    contribution: Option<ContributionBreakdown>,
) -> ValidationSummary {
    let score = risk_score(&issues, eligibility.eligible);
    let severity_tally = SeverityTally::from_issues(&issues);
    ValidationSummary {
        issues,
        eligibility,
        contribution,
        risk_score: score,
        risk_band: RiskBand::from_score(score),
        severity_tally,
    }
}
