//! Error types for Dhinchak
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Dhinchak operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, provider interactions, and the interactive
/// chat loop.
#[derive(Error, Debug)]
pub enum DhinchakError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reply fetch errors (network, model, malformed response)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Missing API credential for a provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Dhinchak operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
