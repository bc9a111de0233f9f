use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointsConfig {
    /// Site the HTML listing and scorecard pages are served from.
    pub site_base: String,
    pub listing_path: String,
    /// Prefix of the `{match_id}/full-commentary/{innings}` JSON API.
    pub commentary_api_base: String,
    pub referer: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            site_base: "https://www.cricbuzz.com".to_string(),
            listing_path: "/cricket-match/live-scores".to_string(),
            commentary_api_base: "https://m.cricbuzz.com/api/mcenter".to_string(),
            referer: "https://m.cricbuzz.com/".to_string(),
        }
    }
}

impl EndpointsConfig {
    pub fn listing_url(&self) -> String {
        format!("{}{}", self.site_base, self.listing_path)
    }

    pub fn scorecard_url(&self, scorecard_link: &str) -> String {
        format!("{}{}", self.site_base, scorecard_link)
    }

    pub fn commentary_url(&self, match_id: &str, innings_id: &str) -> String {
        format!(
            "{}/{}/full-commentary/{}",
            self.commentary_api_base, match_id, innings_id
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub user_agent: String,
    pub probe_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    pub page_timeout_secs: u64,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            probe_timeout_secs: 10,
            fetch_timeout_secs: 15,
            page_timeout_secs: 10,
        }
    }
}

impl ScrapingConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    pub timeout_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_ms: 2_000,
            timeout_delay_ms: 3_000,
        }
    }
}

/// Politeness delays between matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PacingConfig {
    pub base_delay_ms: u64,
    pub step_delay_ms: u64,
    pub max_delay_ms: u64,
    pub scorecard_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 3_000,
            step_delay_ms: 500,
            max_delay_ms: 10_000,
            scorecard_delay_ms: 1_000,
        }
    }
}

impl PacingConfig {
    /// Delay after the match at `index`: grows by one step per match, then caps.
    pub fn match_delay(&self, index: usize) -> Duration {
        let grown = self
            .base_delay_ms
            .saturating_add(self.step_delay_ms.saturating_mul(index as u64));
        Duration::from_millis(grown.min(self.max_delay_ms))
    }

    pub fn scorecard_delay(&self) -> Duration {
        Duration::from_millis(self.scorecard_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    pub data_dir: PathBuf,
    pub matches_file: String,
    pub scorecard_file: String,
    pub commentary_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            matches_file: "matches.json".to_string(),
            scorecard_file: "scorecard.json".to_string(),
            commentary_file: "full_commentary.json".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join(&self.matches_file)
    }

    pub fn scorecard_path(&self) -> PathBuf {
        self.data_dir.join(&self.scorecard_file)
    }

    pub fn commentary_path(&self) -> PathBuf {
        self.data_dir.join(&self.commentary_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScraperConfig {
    pub endpoints: EndpointsConfig,
    pub scraping: ScrapingConfig,
    pub retry: RetryConfig,
    pub pacing: PacingConfig,
    pub output: OutputConfig,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse::<T>().ok())
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = env::var("CRICKET_SITE_BASE") {
            config.endpoints.site_base = base;
        }
        if let Ok(base) = env::var("CRICKET_COMMENTARY_API_BASE") {
            config.endpoints.commentary_api_base = base;
        }
        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Some(timeout) = env_parse::<u64>("SCRAPER_FETCH_TIMEOUT_SECS") {
            config.scraping.fetch_timeout_secs = timeout;
        }
        if let Some(timeout) = env_parse::<u64>("SCRAPER_PROBE_TIMEOUT_SECS") {
            config.scraping.probe_timeout_secs = timeout;
        }
        if let Some(attempts) = env_parse::<u32>("SCRAPER_MAX_ATTEMPTS") {
            config.retry.max_attempts = attempts.max(1);
        }
        if let Some(delay) = env_parse::<u64>("SCRAPER_BASE_DELAY_MS") {
            config.pacing.base_delay_ms = delay;
        }
        if let Ok(dir) = env::var("CRICKET_DATA_DIR") {
            config.output.data_dir = PathBuf::from(dir);
        }

        config
    }

    /// Same configuration with every sleep set to zero.
    pub fn without_delays(mut self) -> Self {
        self.retry.retry_delay_ms = 0;
        self.retry.timeout_delay_ms = 0;
        self.pacing.base_delay_ms = 0;
        self.pacing.step_delay_ms = 0;
        self.pacing.max_delay_ms = 0;
        self.pacing.scorecard_delay_ms = 0;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_delay_grows_then_caps() {
        let pacing = PacingConfig::default();
        assert_eq!(pacing.match_delay(0), Duration::from_millis(3_000));
        assert_eq!(pacing.match_delay(1), Duration::from_millis(3_500));
        assert_eq!(pacing.match_delay(13), Duration::from_millis(9_500));
        assert_eq!(pacing.match_delay(14), Duration::from_millis(10_000));
        assert_eq!(pacing.match_delay(500), Duration::from_millis(10_000));
    }

    #[test]
    fn test_commentary_url() {
        let endpoints = EndpointsConfig::default();
        assert_eq!(
            endpoints.commentary_url("105778", "2"),
            "https://m.cricbuzz.com/api/mcenter/105778/full-commentary/2"
        );
    }

    #[test]
    fn test_output_paths_follow_data_dir() {
        let mut output = OutputConfig::default();
        output.data_dir = PathBuf::from("data");
        assert_eq!(output.commentary_path(), PathBuf::from("data/full_commentary.json"));
        assert_eq!(output.matches_path(), PathBuf::from("data/matches.json"));
    }
}
