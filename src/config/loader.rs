//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading scheme
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ContributionSchedule, EligibilityThresholds, SchemeConfig, SchemeMetadata, StagingConfig,
};

/// Loads and provides access to scheme configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// validates the staging configuration eagerly, so a loaded configuration
/// is always safe to calculate against.
///
/// # Directory Structure
///
/// ```text
/// config/scheme/
/// ├── scheme.yaml        # Scheme metadata
/// ├── thresholds.yaml    # Age and earnings thresholds
/// ├── contributions.yaml # Contribution escalation schedule
/// └── staging.yaml       # Employer staging configuration
/// ```
///
/// # Example
///
/// ```no_run
/// use enrolment_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/scheme").unwrap();
/// println!("Scheme: {}", loader.scheme().name);
/// println!("Minimum age: {}", loader.config().thresholds().min_age);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SchemeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/scheme")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The staging configuration fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<SchemeMetadata>(&path.join("scheme.yaml"))?;
        let thresholds = Self::load_yaml::<EligibilityThresholds>(&path.join("thresholds.yaml"))?;
        let schedule = Self::load_yaml::<ContributionSchedule>(&path.join("contributions.yaml"))?;
        let staging = Self::load_yaml::<StagingConfig>(&path.join("staging.yaml"))?;

        let staging_errors = staging.validate();
        if !staging_errors.is_empty() {
            return Err(EngineError::InvalidStagingConfig {
                messages: staging_errors,
            });
        }

        Ok(Self {
            config: SchemeConfig::new(metadata, thresholds, schedule, staging),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying scheme configuration.
    pub fn config(&self) -> &SchemeConfig {
        &self.config
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        self.config.scheme()
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> SchemeConfig {
        self.config
    }
}
