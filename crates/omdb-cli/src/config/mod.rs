//! Application configuration module.
//!
//! Manages the TOML config file holding the OMDb API key.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
