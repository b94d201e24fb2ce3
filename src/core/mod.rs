//! Core module - configuration shared by the commands

pub mod config;

pub use config::{Config, ConfigError};
