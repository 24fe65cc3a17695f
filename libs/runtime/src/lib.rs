//! Process-level plumbing shared by the StaffDesk binaries: layered
//! configuration, logging initialisation and home directory resolution.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section,
    ServerConfig,
};
