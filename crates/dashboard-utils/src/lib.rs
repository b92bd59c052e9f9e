//! Shared utilities for stock-dashboard
//!
//! This crate provides functionality shared by the dashboard hosts:
//! logging setup and host-level configuration.

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError};
pub use logging::{LogFormat, init_tracing};
