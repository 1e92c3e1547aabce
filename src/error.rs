use std::path::PathBuf;

use thiserror::Error;

/// Library errors using thiserror for structured error handling.
///
/// Matching and rendering never fail for well-formed input; these errors
/// only surface at ingestion and pipeline-stage boundaries.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    #[error("Fixture field is required: {0}")]
    MissingField(&'static str),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Fixture request failed: HTTP {status}. Body: {body}")]
    Status { status: u16, body: String },

    #[error("Fixture request failed: {0}")]
    Transport(String),

    #[error("Failed to read fixture response body")]
    Body(#[source] std::io::Error),

    #[error("Fixture response is not valid JSON")]
    InvalidBody(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No DNS access (offline?)")]
    Offline,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Template not found: {}", path.display())]
    TemplateMissing { path: PathBuf },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to write report {}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

impl PipelineError {
    /// Configuration problems abort the run before anything is fetched
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            PipelineError::Config(_) | PipelineError::TemplateMissing { .. }
        )
    }
}

/// Returned by a pipeline run when the cancellation token fired.
///
/// Cancellation is not a reported failure; it is the only error a run
/// propagates instead of folding into `RunResult`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Operation cancelled")]
pub struct Cancelled;

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = FixtureError::MissingField("homeName");
        assert_eq!(err.to_string(), "Fixture field is required: homeName");

        let err = FetchError::Status {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Fixture request failed: HTTP 503. Body: down"
        );

        assert_eq!(PipelineError::Offline.to_string(), "No DNS access (offline?)");
    }

    #[test]
    fn test_error_source_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let config_err = ConfigError::ReadFailed {
            path: PathBuf::from("/test/favorites_clubs.json"),
            source: io_err,
        };

        assert!(config_err.source().is_some());
        assert_eq!(
            config_err.to_string(),
            "Failed to read /test/favorites_clubs.json"
        );
    }

    #[test]
    fn test_config_errors_classified() {
        let err = PipelineError::from(ConfigError::MissingSetting("api_key"));
        assert!(err.is_config());
        assert!(!PipelineError::Offline.is_config());
    }
}
