use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV ingest and export
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Record that cannot be interpreted at all (e.g. wrong column count)
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    /// Narrative summary collaborator
    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),
}

/// Narrative-summary service errors
///
/// Split into transient failures (retried with backoff) and fatal ones
/// (surfaced immediately). See [`SummaryError::is_retryable`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// HTTP 429
    #[error("Rate limited by summary service")]
    RateLimited,

    /// HTTP 5xx
    #[error("Summary service error (HTTP {status})")]
    Server { status: u16 },

    /// Connection refused, DNS failure, reset, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 401
    #[error("Summary service rejected the credentials")]
    Unauthorized,

    /// HTTP 403
    #[error("Access to the summary service is forbidden")]
    Forbidden,

    /// HTTP 404
    #[error("Summary endpoint not found")]
    NotFound,

    /// Any other 4xx
    #[error("Summary request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Body could not be decoded into a summary
    #[error("Invalid response from summary service: {0}")]
    InvalidResponse(String),

    /// Service disabled in configuration
    #[error("Summary service is not configured")]
    NotConfigured,

    /// Transient failures persisted past the retry budget
    #[error("Summary service still failing after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: usize, last_error: String },
}

impl SummaryError {
    /// Classify an HTTP status code; `None` for success codes
    pub fn from_status(status: u16, message: impl Into<String>) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            429 => Some(Self::RateLimited),
            500..=599 => Some(Self::Server { status }),
            _ => Some(Self::Rejected {
                status,
                message: message.into(),
            }),
        }
    }

    /// Transient failures are retried; everything else is returned immediately
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::Server { .. } | Self::Network(_)
        )
    }

    /// Message suitable for showing in place of the summary
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited => {
                "The summary service is busy right now. Please try again in a minute.".to_string()
            }
            Self::Server { .. } | Self::Network(_) | Self::MaxRetriesExceeded { .. } => {
                "The summary service is temporarily unavailable. Please try again later."
                    .to_string()
            }
            Self::Unauthorized | Self::Forbidden => {
                "Summary generation is not authorised. Check the configured API key and its permissions."
                    .to_string()
            }
            Self::NotFound => {
                "The summary endpoint could not be found. Check summary.endpoint in config.toml."
                    .to_string()
            }
            Self::Rejected { status, .. } => {
                format!("The summary request was rejected (HTTP {}).", status)
            }
            Self::InvalidResponse(_) => {
                "The summary service returned an unreadable response.".to_string()
            }
            Self::NotConfigured => {
                "Summaries are disabled. Set summary.endpoint to enable them.".to_string()
            }
        }
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for summary operations
pub type SummaryResult<T> = Result<T, SummaryError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
