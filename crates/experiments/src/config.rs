//! Experiment configuration — named, typed fields with documented defaults,
//! deserializable from the JSON metadata shipped to the page.

use crate::cohort::Cohort;
use serde::{Deserialize, Serialize};
use site_core::{ToolkitError, ToolkitResult};
use std::collections::BTreeMap;

/// Configuration for one multivariate test.
///
/// `name` and `cohorts` are required; every other field has a default.
/// Cohorts live in a `BTreeMap` so the weighted selection pool is built in
/// a fixed (sorted-key) order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultivariateConfig {
    /// Experiment name; the assignment cookie name is derived from it.
    pub name: String,
    /// Cohort-key → cohort definition. May be empty, in which case the
    /// experiment resolves to no assignment and performs no side effects.
    pub cohorts: BTreeMap<String, Cohort>,
    /// Custom-variable slot used when tagging analytics (default 1).
    #[serde(default = "default_custom_var_index")]
    pub custom_var_index: u32,
    /// Run the test as soon as it is built (default true).
    #[serde(default = "default_run_immediately")]
    pub run_immediately: bool,
    /// Weight applied to cohorts that don't set one (default 1).
    #[serde(default = "default_weight")]
    pub default_weight: u32,
    /// Domain hashed into the legacy experiment cookies. Empty hashes as
    /// the fixed legacy value 1.
    #[serde(default)]
    pub ga_domain: String,
    /// External experiment id; when set, each run writes the legacy
    /// `__utmxx` (and, per cohort, `__utmx`) cookies.
    #[serde(default)]
    pub ga_experiment_id: Option<String>,
}

fn default_custom_var_index() -> u32 {
    1
}
fn default_run_immediately() -> bool {
    true
}
fn default_weight() -> u32 {
    1
}

impl MultivariateConfig {
    pub fn new(name: impl Into<String>, cohorts: BTreeMap<String, Cohort>) -> Self {
        Self {
            name: name.into(),
            cohorts,
            custom_var_index: default_custom_var_index(),
            run_immediately: default_run_immediately(),
            default_weight: default_weight(),
            ga_domain: String::new(),
            ga_experiment_id: None,
        }
    }

    /// Parse a configuration from JSON page metadata. Missing `name` or
    /// `cohorts` fields fail here; optional fields take their defaults.
    pub fn from_json(json: &str) -> ToolkitResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the required settings. The cohort map is guaranteed present by
    /// the type; an empty `name` is the missing-option case.
    pub fn validate(&self) -> ToolkitResult<()> {
        if self.name.is_empty() {
            return Err(ToolkitError::MissingOption("name"));
        }
        if self.default_weight == 0 {
            return Err(ToolkitError::Config(
                "default_weight must be a positive integer".to_string(),
            ));
        }
        if let Some((key, _)) = self
            .cohorts
            .iter()
            .find(|(_, cohort)| cohort.weight == Some(0))
        {
            return Err(ToolkitError::Config(format!(
                "cohort {key} has a zero weight"
            )));
        }
        Ok(())
    }
}
