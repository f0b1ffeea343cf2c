//! Process-level plumbing shared by every EventHub binary: layered
//! configuration, home directory resolution and logging setup.

pub mod config;
pub mod home_dir;
pub mod logging;

pub use config::{
    default_logging_config, AppConfig, AuthConfig, CliArgs, DatabaseConfig, LoggingConfig,
    Section, ServerConfig, TokenGrant,
};
