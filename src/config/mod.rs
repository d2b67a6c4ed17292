//! Configuration loading and types for the Enrolment Engine.
//!
//! This module provides loading of scheme configuration from YAML files
//! and the strongly-typed configuration structures, with built-in policy
//! defaults for running without files.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ContributionPhase, ContributionSchedule, EligibilityThresholds, SchemeConfig, SchemeMetadata,
    StagingConfig, StagingFrequency,
};
