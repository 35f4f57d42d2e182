//! Configuration for lineage traversal defaults and logging.
//!
//! Sources are layered in priority order (highest wins):
//! 1. Environment variables `LINEAGE_*` (nested keys separated by `__`)
//! 2. `lineage.toml` in the working directory, or an explicit file
//! 3. Built-in defaults
//!
//! # Example
//!
//! ```toml
//! [traversal]
//! policy = "specific"
//! parent_depth = 3
//! child_depth = 2
//! max_distance = 6
//! visit_budget = 50000
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```
//!
//! `LINEAGE_TRAVERSAL__VISIT_BUDGET=1000` overrides the budget above.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};
use crate::graph::{DepthPolicy, TraversalContext, TraversalOptions, DEFAULT_VISIT_BUDGET};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "lineage.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LINEAGE_";

/// Policy names accepted in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// See [`DepthPolicy::Nearest`].
    #[default]
    Nearest,
    /// See [`DepthPolicy::Specific`].
    Specific,
    /// See [`DepthPolicy::Multi`].
    Multi,
}

/// Traversal defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalSettings {
    /// Stopping rule for layering.
    pub policy: PolicyKind,
    /// Ancestor levels for the `specific` policy.
    pub parent_depth: usize,
    /// Descendant levels for the `specific` policy.
    pub child_depth: usize,
    /// Distance bound for depth-first enumeration.
    pub max_distance: usize,
    /// Node visits allowed per enumeration.
    pub visit_budget: usize,
}

impl Default for TraversalSettings {
    fn default() -> Self {
        Self {
            policy: PolicyKind::Nearest,
            parent_depth: 1,
            child_depth: 1,
            max_distance: 5,
            visit_budget: DEFAULT_VISIT_BUDGET,
        }
    }
}

impl TraversalSettings {
    /// Returns the configured depth policy.
    #[must_use]
    pub fn policy(&self) -> DepthPolicy {
        match self.policy {
            PolicyKind::Nearest => DepthPolicy::Nearest,
            PolicyKind::Specific => DepthPolicy::Specific {
                parent_depth: self.parent_depth,
                child_depth: self.child_depth,
            },
            PolicyKind::Multi => DepthPolicy::Multi,
        }
    }

    /// Returns layering options for the configured policy.
    #[must_use]
    pub fn options(&self) -> TraversalOptions {
        TraversalOptions::new(self.policy())
    }

    /// Returns a traversal context carrying the configured budget.
    #[must_use]
    pub fn context(&self) -> TraversalContext<'static> {
        TraversalContext::new().with_visit_budget(self.visit_budget)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive: a bare level such as `info`, or per-target
    /// directives such as `warn,lineage_core=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Top-level lineage configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    /// Traversal defaults.
    pub traversal: TraversalSettings,
    /// Logging.
    pub logging: LoggingConfig,
}

impl LineageConfig {
    /// Loads defaults, then `lineage.toml` if present, then `LINEAGE_*` env.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a source cannot be parsed or the result
    /// fails validation.
    pub fn load() -> Result<Self> {
        Self::extract(Self::figment().merge(Toml::file(DEFAULT_CONFIG_FILE)))
    }

    /// Loads defaults, then the given TOML file, then `LINEAGE_*` env.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file is missing, malformed, or the
    /// result fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Self::extract(Self::figment().merge(Toml::file(path)))
    }

    /// Parses a TOML string over the defaults (no env layer).
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the string is malformed or the result fails
    /// validation.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.traversal.visit_budget == 0 {
            return Err(Error::Config(
                "traversal.visit_budget must be greater than 0".to_string(),
            ));
        }
        if let Err(err) = EnvFilter::try_new(&self.logging.level) {
            return Err(Error::Config(format!(
                "logging.level is not a valid filter directive '{}': {err}",
                self.logging.level
            )));
        }
        Ok(())
    }

    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract()?;
        config.validate()?;
        Ok(config)
    }
}
