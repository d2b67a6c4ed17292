//! Configuration types for the Enrolment Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every type carries a
//! `Default` implementation encoding the engine's documented policy
//! defaults, so the engine is usable without any files on disk.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Metadata about the pension scheme.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemeMetadata {
    /// The scheme reference code (e.g. "WPS-2024").
    pub code: String,
    /// The human-readable name of the scheme.
    pub name: String,
    /// The version or effective date of the scheme rules.
    pub version: String,
    /// URL to the official scheme documentation.
    pub source_url: String,
}

impl Default for SchemeMetadata {
    fn default() -> Self {
        Self {
            code: "WPS-DEFAULT".to_string(),
            name: "Workplace Pension Scheme (engine defaults)".to_string(),
            version: "2024-04-06".to_string(),
            source_url: "https://example.com/scheme".to_string(),
        }
    }
}

/// How often an employer processes new auto-enrolments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagingFrequency {
    /// Staging dates fall in every month.
    Monthly,
    /// Staging dates fall in January, April, July, and October.
    Quarterly,
    /// Staging dates fall in January and July.
    BiAnnual,
    /// Staging dates fall in January only.
    Annual,
}

impl StagingFrequency {
    /// Returns the anchor months (1-based) in which staging dates may fall.
    pub fn anchor_months(&self) -> &'static [u32] {
        match self {
            StagingFrequency::Monthly => &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
            StagingFrequency::Quarterly => &[1, 4, 7, 10],
            StagingFrequency::BiAnnual => &[1, 7],
            StagingFrequency::Annual => &[1],
        }
    }
}

/// An employer's staging-date configuration.
///
/// Passed by value into calculations; immutable once referenced. Use
/// [`StagingConfig::resolve`] at the engine boundary so that internal
/// functions never branch on a missing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StagingConfig {
    /// How often staging dates occur.
    pub frequency: StagingFrequency,
    /// Ordered set of candidate days of the month (1-31). Days beyond the
    /// length of a target month clamp to its last day.
    pub days_of_month: Vec<u32>,
    /// The date this configuration takes effect, when bounded.
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
    /// The date this configuration stops applying, when bounded.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
}

impl Default for StagingConfig {
    /// The documented fallback policy: quarterly staging on the 1st.
    fn default() -> Self {
        Self {
            frequency: StagingFrequency::Quarterly,
            days_of_month: vec![1],
            effective_from: None,
            effective_to: None,
        }
    }
}

impl StagingConfig {
    /// Resolves an optional configuration into a concrete one.
    ///
    /// A missing configuration is a policy choice, not an error: it
    /// resolves to the default (quarterly, day 1). Call this once at the
    /// boundary; everything downstream takes `&StagingConfig`.
    pub fn resolve(config: Option<StagingConfig>) -> StagingConfig {
        config.unwrap_or_default()
    }

    /// Eagerly validates the configuration, returning every problem found.
    ///
    /// An empty list means the configuration is usable. Callers must not
    /// invoke calculations against a configuration that failed validation.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.days_of_month.is_empty() {
            errors.push("at least one day_of_month is required".to_string());
        }
        for &day in &self.days_of_month {
            if !(1..=31).contains(&day) {
                errors.push(format!(
                    "day_of_month {} is out of range (must be 1-31)",
                    day
                ));
            }
        }
        if let (Some(from), Some(to)) = (self.effective_from, self.effective_to) {
            if to <= from {
                errors.push(format!(
                    "effective_to {} must be after effective_from {}",
                    to, from
                ));
            }
        }

        errors
    }

    /// Returns the candidate days sorted ascending with duplicates removed.
    pub fn sorted_days(&self) -> Vec<u32> {
        let mut days = self.days_of_month.clone();
        days.sort_unstable();
        days.dedup();
        days
    }
}

/// Age and earnings thresholds for eligibility evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EligibilityThresholds {
    /// Minimum eligible age, inclusive.
    pub min_age: u32,
    /// Maximum eligible age, inclusive.
    pub max_age: u32,
    /// Lower annual earnings threshold, inclusive.
    pub lower_earnings: Decimal,
    /// Upper annual earnings threshold, inclusive.
    pub upper_earnings: Decimal,
}

impl Default for EligibilityThresholds {
    fn default() -> Self {
        Self {
            min_age: 23,
            max_age: 60,
            lower_earnings: Decimal::from(6240),
            upper_earnings: Decimal::from(50270),
        }
    }
}

/// Contribution rates for a single escalation phase year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContributionPhase {
    /// The scheme year this phase applies from (1-based).
    pub year: u32,
    /// Employee contribution rate as a fraction of pensionable pay.
    pub employee_rate: Decimal,
    /// Employer contribution rate as a fraction of pensionable pay.
    pub employer_rate: Decimal,
    /// State top-up rate as a fraction of pensionable pay.
    pub state_rate: Decimal,
}

/// The ordered contribution escalation schedule.
///
/// Rates are non-decreasing by year; a phase year beyond the final entry
/// uses the final (fully escalated) entry. Rates never reset or
/// extrapolate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ScheduleFile")]
pub struct ContributionSchedule {
    phases: Vec<ContributionPhase>,
}

/// On-disk shape of the contribution schedule.
#[derive(Debug, Deserialize)]
struct ScheduleFile {
    phases: Vec<ContributionPhase>,
}

impl From<ScheduleFile> for ContributionSchedule {
    fn from(file: ScheduleFile) -> Self {
        ContributionSchedule::new(file.phases)
    }
}

impl ContributionSchedule {
    /// Creates a schedule, sorting the phases by year ascending.
    pub fn new(phases: Vec<ContributionPhase>) -> Self {
        let mut sorted = phases;
        sorted.sort_by_key(|p| p.year);
        Self { phases: sorted }
    }

    /// Returns the phases in ascending year order.
    pub fn phases(&self) -> &[ContributionPhase] {
        &self.phases
    }

    /// Looks up the phase for a given scheme year.
    ///
    /// Years before the first entry use the first entry; years beyond the
    /// last entry clamp to the last (fully escalated) entry. Returns `None`
    /// only for an empty schedule.
    pub fn phase_for_year(&self, phase_year: u32) -> Option<&ContributionPhase> {
        self.phases
            .iter()
            .rev()
            .find(|p| p.year <= phase_year)
            .or_else(|| self.phases.first())
    }
}

impl Default for ContributionSchedule {
    /// The statutory three-phase escalation used when no schedule is supplied.
    fn default() -> Self {
        fn pct(n: i64) -> Decimal {
            // basis points to a fraction, e.g. 100 -> 0.0100
            Decimal::new(n, 4)
        }
        Self::new(vec![
            ContributionPhase {
                year: 1,
                employee_rate: pct(100),
                employer_rate: pct(100),
                state_rate: pct(25),
            },
            ContributionPhase {
                year: 2,
                employee_rate: pct(300),
                employer_rate: pct(200),
                state_rate: pct(75),
            },
            ContributionPhase {
                year: 3,
                employee_rate: pct(500),
                employer_rate: pct(300),
                state_rate: pct(100),
            },
        ])
    }
}

/// The complete scheme configuration.
///
/// Aggregates everything the engine needs to assess a population: scheme
/// metadata, eligibility thresholds, the contribution escalation schedule,
/// and the employer's staging configuration.
#[derive(Debug, Clone, Default)]
pub struct SchemeConfig {
    metadata: SchemeMetadata,
    thresholds: EligibilityThresholds,
    schedule: ContributionSchedule,
    staging: StagingConfig,
}

impl SchemeConfig {
    /// Creates a new SchemeConfig from its component parts.
    pub fn new(
        metadata: SchemeMetadata,
        thresholds: EligibilityThresholds,
        schedule: ContributionSchedule,
        staging: StagingConfig,
    ) -> Self {
        Self {
            metadata,
            thresholds,
            schedule,
            staging,
        }
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns the eligibility thresholds.
    pub fn thresholds(&self) -> &EligibilityThresholds {
        &self.thresholds
    }

    /// Returns the contribution schedule.
    pub fn schedule(&self) -> &ContributionSchedule {
        &self.schedule
    }

    /// Returns the staging configuration.
    pub fn staging(&self) -> &StagingConfig {
        &self.staging
    }
}
