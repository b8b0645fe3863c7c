//! Error types shared across Cappy crates.

use std::path::PathBuf;

/// Top-level error type for Cappy operations.
///
/// The view core itself never fails; these errors come from the edges
/// (configuration files, replay scripts, command-line input).
#[derive(Debug, thiserror::Error)]
pub enum CappyError {
    #[error("Capture error: {message}")]
    Capture { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CappyError.
pub type CappyResult<T> = Result<T, CappyError>;

impl CappyError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn script(line: usize, msg: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: msg.into(),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_error_mentions_line() {
        let err = CappyError::script(7, "unknown variant `jump`");
        assert_eq!(
            err.to_string(),
            "Script error on line 7: unknown variant `jump`"
        );
    }

    #[test]
    fn io_errors_convert_transparently() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CappyError = io.into();
        assert!(matches!(err, CappyError::Io(_)));
        assert_eq!(err.to_string(), "gone");
    }

    #[test]
    fn anyhow_errors_land_in_other() {
        let err: CappyError = anyhow::anyhow!("host clipboard unavailable").into();
        assert!(matches!(err, CappyError::Other(_)));
        assert_eq!(err.to_string(), "host clipboard unavailable");
    }
}
