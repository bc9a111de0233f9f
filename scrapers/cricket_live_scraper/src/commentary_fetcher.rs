use serde_json::Value;
use std::thread;
use tracing::{error, info, warn};

use crate::{
    config::ScraperConfig,
    error::{CommentaryError, FetchError, RetryPolicy},
    http::Fetcher,
};

/// Runs `operation` until it succeeds or the policy's attempts are used up,
/// sleeping between attempts according to the kind of failure.
pub fn retry_with_policy<T, Op>(policy: &RetryPolicy, mut operation: Op) -> Result<T, CommentaryError>
where
    Op: FnMut(u32) -> Result<T, FetchError>,
{
    let mut attempt = 1;

    loop {
        match operation(attempt) {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt >= policy.max_attempts {
                    return Err(CommentaryError::RetriesExhausted {
                        attempts: attempt,
                        last: e,
                    });
                }
                let delay = policy.delay_for(&e);
                warn!(
                    "Attempt {} failed: {}; retrying in {:.1}s",
                    attempt,
                    e,
                    delay.as_secs_f64()
                );
                thread::sleep(delay);
                attempt += 1;
            }
        }
    }
}

/// Downloads the full-commentary document for one innings of a match.
pub fn fetch_commentary<F: Fetcher>(
    fetcher: &F,
    config: &ScraperConfig,
    match_id: &str,
    innings_id: &str,
) -> Result<Value, CommentaryError> {
    let policy = RetryPolicy::from(&config.retry);
    let url = config.endpoints.commentary_url(match_id, innings_id);

    let result = retry_with_policy(&policy, |attempt| {
        info!("Attempting API call (attempt {}): {}", attempt, url);
        fetcher.get_json(&url, config.scraping.fetch_timeout())
    });

    match &result {
        Ok(_) => info!("Got commentary data for match {}", match_id),
        Err(e) => error!("Giving up on commentary for match {}: {}", match_id, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn instant_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            retry_delay: Duration::ZERO,
            timeout_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_retry_stops_at_first_success() {
        let mut calls = 0;
        let result = retry_with_policy(&instant_policy(3), |attempt| {
            calls += 1;
            if attempt < 2 {
                Err(FetchError::Timeout)
            } else {
                Ok(attempt)
            }
        });
        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_retry_reports_last_error() {
        let mut calls = 0;
        let result: Result<(), _> = retry_with_policy(&instant_policy(3), |attempt| {
            calls += 1;
            Err(FetchError::Status(500 + attempt as u16))
        });
        assert_eq!(calls, 3);
        match result {
            Err(CommentaryError::RetriesExhausted { attempts, last }) => {
                assert_eq!(attempts, 3);
                assert!(matches!(last, FetchError::Status(503)));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
