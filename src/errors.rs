//! Error types for loading and configuring an analysis.
//!
//! The scoring engine itself has no failure modes: missing subjects, empty
//! Module 1 data, unknown question ids and missing historical data all
//! resolve to policy defaults. Errors only come from the edges (files,
//! JSON, TOML, input validation).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dsat-whatif operations
#[derive(Debug, Error)]
pub enum WhatIfError {
    /// File system related errors
    #[error("File system error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Malformed or incomplete JSON input
    #[error("Invalid input in {}: {message}", display_path(.path))]
    Json {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Input that parses but breaks a data contract
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<inline>".to_string())
}

impl WhatIfError {
    /// Create a file system error with path context
    pub fn io_with_path(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::Io {
            message: format!("cannot read {}: {}", path.display(), source),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Create a JSON error, optionally tied to the file it came from
    pub fn json(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        Self::Json {
            message: source.to_string(),
            path,
            source: Some(source),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, WhatIfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_names_the_file() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = WhatIfError::json(source, Some(PathBuf::from("data/stu1.json")));
        let rendered = err.to_string();
        assert!(rendered.starts_with("Invalid input in data/stu1.json"), "{rendered}");
        assert!(matches!(err, WhatIfError::Json { path: Some(_), .. }));
    }

    #[test]
    fn inline_json_error_has_placeholder_path() {
        let source = serde_json::from_str::<u32>("{").unwrap_err();
        let err = WhatIfError::json(source, None);
        assert!(err.to_string().contains("<inline>"));
    }

    #[test]
    fn io_error_keeps_path_and_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = WhatIfError::io_with_path(source, "scores.json");
        assert!(err.to_string().contains("scores.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
