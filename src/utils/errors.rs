use anyhow;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failure taxonomy for the client. API calls fail with exactly one of
/// `Network` (transport), `Http` (non-2xx status), or `Decode` (2xx with an
/// unreadable body), so callers can tell retryable from terminal failures.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Transport failures and server-side (5xx) statuses are plausibly
    /// transient; client-side statuses and decode failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Network(_) => true,
            AppError::Http { status } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_status() {
        let err = AppError::Http { status: 404 };
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn server_errors_are_retryable() {
        assert!(AppError::Http { status: 500 }.is_retryable());
        assert!(AppError::Http { status: 503 }.is_retryable());
    }

    #[test]
    fn client_errors_are_terminal() {
        assert!(!AppError::Http { status: 404 }.is_retryable());
        assert!(!AppError::Http { status: 422 }.is_retryable());
    }

    #[test]
    fn decode_errors_are_terminal() {
        let err = serde_json::from_str::<i64>("not json").unwrap_err();
        assert!(!AppError::Decode(err).is_retryable());
    }
}
