//! Shared configuration library for imgwrap.
//!
//! This crate loads the manager-level defaults every image consumer inherits
//! (presentation tags per load status), validates them, and builds an
//! [`imgwrap_core::ImageManager`] from the result. The `imgwrap-check`
//! binary prints the effective configuration and where it came from.

pub mod loader;
pub mod logging;
pub mod models;
pub mod validation;

pub use loader::{CONFIG_JSON_ENV, CONFIG_PATH_ENV, error::ConfigLoadError};
pub use models::{ConfigSource, ManagerConfig};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
