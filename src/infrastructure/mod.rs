// Infrastructure: configuration and logging

pub mod config;
pub mod logging;

pub use config::{ConfigError, SolverSettings, SCIP_FEASIBILITY_TOLERANCE};
pub use logging::LoggingConfig;
