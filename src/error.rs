// ABOUTME: Application-wide error types for healthwait.
// ABOUTME: Covers configuration failures surfaced before polling starts.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::{Property, ValidationErrors};

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("{property} must be an integer number of seconds, got '{value}'")]
    InvalidNumber { property: Property, value: String },

    #[error("invalid duration for {property}: {reason}")]
    InvalidDuration { property: Property, reason: String },

    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid configuration: {0}")]
    Validation(ValidationErrors),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
