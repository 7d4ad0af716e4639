// Solver configuration loading and validation.
//
// Settings come from a TOML file; every key is optional and falls back to the
// defaults below.

use super::logging::LoggingConfig;
use crate::domain::{FlagshipPolicy, SolutionStatus, SolverBackend};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Feasibility tolerance handed to the SCIP process
pub const SCIP_FEASIBILITY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Directory for problem dumps and process files
    pub output_dir: PathBuf,
    /// Install directory searched first for external executables
    pub program_path: PathBuf,
    /// File name of the problem dump
    pub lp_filename: String,
    /// Time limit forwarded to the SCIP process, in seconds
    pub time_limit_secs: f64,
    /// Memory limit forwarded to the SCIP process, in megabytes
    pub memory_limit_mb: f64,
    pub scip_executable: String,
    /// Environment variable naming the flagship licence file
    pub license_env_var: String,
    pub default_backend: SolverBackend,
    pub flagship_policy: FlagshipPolicy,
    /// Report feasible, not-proven-optimal integer solutions as `Feasible`
    /// instead of `Unbounded`
    pub distinguish_suboptimal: bool,
    pub logging: LoggingConfig,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            program_path: PathBuf::from("."),
            lp_filename: "CurrentProblem.lp".to_string(),
            time_limit_secs: 3600.0,
            memory_limit_mb: 8192.0,
            scip_executable: "scip".to_string(),
            license_env_var: "ILOG_LICENSE_FILE".to_string(),
            default_backend: SolverBackend::Highs,
            flagship_policy: FlagshipPolicy::default(),
            distinguish_suboptimal: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl SolverSettings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lp_filename.trim().is_empty() {
            return Err(ConfigError::Invalid("lp_filename must not be empty".into()));
        }
        if self.scip_executable.trim().is_empty() {
            return Err(ConfigError::Invalid("scip_executable must not be empty".into()));
        }
        if !(self.time_limit_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time_limit_secs must be positive, got {}",
                self.time_limit_secs
            )));
        }
        if !(self.memory_limit_mb > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "memory_limit_mb must be positive, got {}",
                self.memory_limit_mb
            )));
        }
        Ok(())
    }

    /// Status used for feasible, not-proven-optimal integer solutions
    pub fn suboptimal_status(&self) -> SolutionStatus {
        if self.distinguish_suboptimal {
            SolutionStatus::Feasible
        } else {
            SolutionStatus::Unbounded
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_program_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.program_path = dir.into();
        self
    }

    pub fn with_lp_filename(mut self, name: impl Into<String>) -> Self {
        self.lp_filename = name.into();
        self
    }

    pub fn with_limits(mut self, time_limit_secs: f64, memory_limit_mb: f64) -> Self {
        self.time_limit_secs = time_limit_secs;
        self.memory_limit_mb = memory_limit_mb;
        self
    }

    pub fn with_scip_executable(mut self, name: impl Into<String>) -> Self {
        self.scip_executable = name.into();
        self
    }

    pub fn with_license_env_var(mut self, var: impl Into<String>) -> Self {
        self.license_env_var = var.into();
        self
    }

    pub fn with_default_backend(mut self, backend: SolverBackend) -> Self {
        self.default_backend = backend;
        self
    }

    pub fn with_flagship_policy(mut self, policy: FlagshipPolicy) -> Self {
        self.flagship_policy = policy;
        self
    }

    pub fn with_distinguish_suboptimal(mut self, enabled: bool) -> Self {
        self.distinguish_suboptimal = enabled;
        self
    }
}
