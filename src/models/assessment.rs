//! Assessment outcome models.
//!
//! This module contains the derived, per-request outcome types: eligibility
//! outcomes, contribution breakdowns, validation rule results, and the
//! severity-weighted risk summary. None of these are stored; they are
//! recomputed for every assessment.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The outcome of an eligibility evaluation.
///
/// Derived per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    /// Whether the employee currently meets every eligibility criterion.
    pub eligible: bool,
    /// Human-readable reason when the employee is not eligible.
    pub reason: Option<String>,
    /// Whether an opt-out window is open for the employee.
    ///
    /// Only true when the employee is eligible and has not already opted out.
    pub opt_out_window_open: bool,
}

/// The per-period contribution amounts for an employee.
///
/// All components are non-negative and `total` is the exact sum of the
/// three components. Internal arithmetic stays unrounded; call
/// [`ContributionBreakdown::rounded`] at the point of external reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    /// The escalation phase year the rates were drawn from.
    pub phase_year: u32,
    /// Pensionable pay for the period (qualifying earnings / periods per year).
    pub pensionable_pay: Decimal,
    /// The employee's contribution for the period.
    pub employee_amount: Decimal,
    /// The employer's contribution for the period.
    pub employer_amount: Decimal,
    /// The state top-up for the period.
    pub state_amount: Decimal,
    /// The sum of the three contribution components.
    pub total: Decimal,
}

impl ContributionBreakdown {
    /// Returns a copy with every amount rounded to 2 decimal places.
    ///
    /// Rounding happens only at the reporting edge so that repeated
    /// projections over unrounded values do not compound error.
    pub fn rounded(&self) -> Self {
        let round = |d: Decimal| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Self {
            phase_year: self.phase_year,
            pensionable_pay: round(self.pensionable_pay),
            employee_amount: round(self.employee_amount),
            employer_amount: round(self.employer_amount),
            state_amount: round(self.state_amount),
            total: round(self.total),
        }
    }
}

/// Severity of a validation finding.
///
/// The ordering of the variants reflects decreasing severity and drives the
/// risk-score weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The record is unusable or unsafe as supplied.
    Critical,
    /// The record is processable but a compliance obligation is at risk.
    High,
    /// The record should be reviewed.
    Warning,
    /// Informational only; carries no risk weight.
    Info,
}

impl Severity {
    /// Returns the risk-score weight for this severity.
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Critical => 5,
            Severity::High => 3,
            Severity::Warning => 1,
            Severity::Info => 0,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single validation finding for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    /// Stable machine-readable code for the rule that fired (e.g. "non_positive_pay").
    pub code: String,
    /// Human-readable description of the finding.
    pub message: String,
    /// How serious the finding is.
    pub severity: Severity,
}

impl RuleResult {
    /// Creates a rule result from its parts.
    pub fn new(code: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Count of findings per severity level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityTally {
    /// Number of critical findings.
    pub critical: u32,
    /// Number of high findings.
    pub high: u32,
    /// Number of warning findings.
    pub warning: u32,
    /// Number of info findings.
    pub info: u32,
}

impl SeverityTally {
    /// Tallies a list of rule results by severity.
    pub fn from_issues(issues: &[RuleResult]) -> Self {
        let mut tally = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Critical => tally.critical += 1,
                Severity::High => tally.high += 1,
                Severity::Warning => tally.warning += 1,
                Severity::Info => tally.info += 1,
            }
        }
        tally
    }
}

/// The compliance-risk band a record falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// Risk score >= 12.
    Critical,
    /// Risk score >= 8.
    High,
    /// Risk score >= 3.
    Medium,
    /// Risk score below 3.
    Low,
}

impl RiskBand {
    /// Maps a risk score onto its band.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 12 => RiskBand::Critical,
            s if s >= 8 => RiskBand::High,
            s if s >= 3 => RiskBand::Medium,
            _ => RiskBand::Low,
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskBand::Critical => write!(f, "critical"),
            RiskBand::High => write!(f, "high"),
            RiskBand::Medium => write!(f, "medium"),
            RiskBand::Low => write!(f, "low"),
        }
    }
}

/// The full validation summary for one record.
///
/// `issues` is an ordered, deterministic list: the rule pipeline always
/// evaluates every rule in the same order, so repeated runs over the same
/// record produce identical audit output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Every finding, in rule-pipeline order.
    pub issues: Vec<RuleResult>,
    /// The eligibility outcome the score was computed against.
    pub eligibility: EligibilityOutcome,
    /// The contribution breakdown, when the record was calculable.
    pub contribution: Option<ContributionBreakdown>,
    /// Severity-weighted risk score (+2 when ineligible).
    pub risk_score: u32,
    /// The band the risk score falls into.
    pub risk_band: RiskBand,
    /// Finding counts per severity.
    pub severity_tally: SeverityTally,
}
