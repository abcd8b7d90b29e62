//! Error types for the logger

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring or writing logs.
#[derive(Debug, Error)]
pub enum LogError {
    /// The log directory did not exist and could not be created.
    #[error("Directory \"{}\" was not created: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Opening, locking or writing the log file failed.
    #[error("Failed to write log file \"{}\": {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A severity-style call used a name outside the RFC 5424 set.
    #[error("Invalid log call: no severity named \"{0}\"")]
    UnknownSeverity(String),

    /// A date format string that chrono cannot render.
    #[error("Invalid date format: {0:?}")]
    DateFormat(String),

    /// A structured message could not be converted to a JSON value.
    #[error("Failed to serialize structured message: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Reading a configuration file failed.
    #[error("Failed to read config file \"{}\": {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration document was not valid TOML for the logger options.
    #[error("Failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    /// Redirecting or restoring standard output failed.
    #[error("Output capture failed: {0}")]
    Capture(#[source] io::Error),

    /// `ob_start` was called while a capture was already running.
    #[error("Output capture is already active")]
    CaptureActive,

    /// `ob_end` was called without a running capture.
    #[error("Output capture is not active")]
    CaptureInactive,

    /// Output capture needs file descriptor redirection.
    #[error("Output capture is not supported on this platform")]
    CaptureUnsupported,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LogError>;
