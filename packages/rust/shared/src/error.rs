//! Error types for PitchMatch.
//!
//! Library crates use [`PitchMatchError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.
//!
//! Blast radius is decided by the orchestrator, not here: `Fetch`, `File`,
//! `Schema`, and per-record `Api` failures are caught at its per-item
//! boundary; `Config`, `Io`, and the initial classification `Api` failure
//! abort the run.

use std::path::PathBuf;

/// Top-level error type for all PitchMatch operations.
#[derive(Debug, thiserror::Error)]
pub enum PitchMatchError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error reaching an investor source.
    #[error("fetch error at {url}: {message}")]
    Fetch { url: String, message: String },

    /// Investor spreadsheet unreadable (missing file or stream error).
    #[error("file error: {0}")]
    File(String),

    /// Investor spreadsheet missing a required column.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Reasoning API unreachable or returned a malformed envelope.
    #[error("reasoning API error: {0}")]
    Api(String),

    /// Filesystem I/O error (pitch input or result output).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PitchMatchError>;

impl PitchMatchError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a fetch error carrying the source URL and underlying cause.
    pub fn fetch(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Create a schema error from any displayable message.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = PitchMatchError::config("missing API key");
        assert_eq!(err.to_string(), "config error: missing API key");

        let err = PitchMatchError::fetch("https://example.com/investor/x", "HTTP 404");
        assert!(err.to_string().contains("https://example.com/investor/x"));
        assert!(err.to_string().contains("HTTP 404"));

        let err = PitchMatchError::schema("missing required column `focus`");
        assert!(err.to_string().contains("focus"));
    }
}
