use std::time::Duration;

use crate::config::RetryConfig;

/// Failure of a single HTTP request.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Why a match produced a placeholder commentary record.
#[derive(Debug, thiserror::Error)]
pub enum CommentaryError {
    #[error("no scorecard link")]
    MissingScorecardLink,
    #[error("could not extract match id from {0:?}")]
    MissingMatchId(String),
    #[error("all {attempts} attempts failed, last error: {last}")]
    RetriesExhausted { attempts: u32, last: FetchError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub timeout_delay: Duration,
}

impl RetryPolicy {
    pub fn delay_for(&self, err: &FetchError) -> Duration {
        match err {
            FetchError::Timeout => self.timeout_delay,
            FetchError::Status(_) | FetchError::Decode(_) | FetchError::Transport(_) => {
                self.retry_delay
            }
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            timeout_delay: Duration::from_millis(config.timeout_delay_ms),
        }
    }
}
