//! Error types for the verification harness
//!
//! The taxonomy distinguishes fatal conditions (fixture write failures,
//! invocation failures, missing required artifacts) from non-fatal assertion
//! mismatches, which are accumulated by the checker rather than propagated.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the verification harness
#[derive(Error, Debug)]
pub enum Error {
    // === Fixture Errors ===
    #[error("failed to write fixture '{path}': {source}")]
    FixtureWrite {
        path: String,
        #[source]
        source: io::Error,
    },

    // === Invocation Errors ===
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' failed ({status})\nstdout: {stdout}\nstderr: {stderr}")]
    Invocation {
        command: String,
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },

    #[error("command '{0}' not found in PATH")]
    CommandNotFound(String),

    // === Host State Errors ===
    #[error("expected artifact '{path}' was not produced")]
    ArtifactMissing { path: String },

    #[error("failed to read '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Configuration Errors ===
    #[error("invalid configuration file: {0}")]
    ConfigParse(String),

    // === Scenario Errors ===
    #[error("unknown scenario '{0}'. Use 'cloudinit-verify list' to see available scenarios")]
    UnknownScenario(String),

    #[error("{failed} of {total} scenarios failed")]
    ScenariosFailed { failed: usize, total: usize },

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a fixture write error for a path
    pub fn fixture_write(path: &std::path::Path, source: io::Error) -> Self {
        Self::FixtureWrite {
            path: path.display().to_string(),
            source,
        }
    }

    /// Create an artifact missing error for a path
    pub fn artifact_missing(path: &std::path::Path) -> Self {
        Self::ArtifactMissing {
            path: path.display().to_string(),
        }
    }
}
