#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    time::Duration,
};

use cricket_live_scraper::{config::ScraperConfig, error::FetchError, http::Fetcher};

/// Fetcher that replays queued responses per URL and records every request.
/// Unscripted URLs answer with HTTP 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: RefCell<HashMap<String, VecDeque<Result<String, FetchError>>>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, url: &str, response: Result<String, FetchError>) -> Self {
        self.responses
            .borrow_mut()
            .entry(url.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn respond_json(self, url: &str, body: serde_json::Value) -> Self {
        self.respond(url, Ok(body.to_string()))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Fetcher for ScriptedFetcher {
    fn get(&self, url: &str, _timeout: Duration) -> Result<String, FetchError> {
        self.calls.borrow_mut().push(url.to_string());
        self.responses
            .borrow_mut()
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Err(FetchError::Status(404)))
    }
}

pub fn test_config() -> ScraperConfig {
    ScraperConfig::default().without_delays()
}

pub fn commentary_url(match_id: &str, innings: &str) -> String {
    test_config().endpoints.commentary_url(match_id, innings)
}
