//! Configuration system for quend.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and deployment `quend.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of every layer
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`QUEND_*`)
//! 3. Deployment config (nearest `quend.yaml` above the working directory)
//! 4. User config (`<data_dir>/config.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use quend::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let catalog = config.catalog().unwrap();
//! println!("{} lockable channels", catalog.len());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, DEFAULT_MAXIMUM_LOCK_WAIT_SECONDS};
pub use validator::ConfigValidator;
