use anyhow::{Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, REFERER},
    StatusCode,
};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{config::ScraperConfig, error::FetchError};

/// Blocking GET access to the remote site.
///
/// `get` must fail with [`FetchError::Status`] for any non-success status so
/// that callers can tell it apart from timeouts and undecodable bodies.
pub trait Fetcher {
    fn get(&self, url: &str, timeout: Duration) -> Result<String, FetchError>;

    fn get_json(&self, url: &str, timeout: Duration) -> Result<Value, FetchError> {
        let body = self.get(url, timeout)?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn get(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        (**self).get(url, timeout)
    }

    fn get_json(&self, url: &str, timeout: Duration) -> Result<Value, FetchError> {
        (**self).get_json(url, timeout)
    }
}

pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            REFERER,
            HeaderValue::from_str(&config.endpoints.referer).context("Invalid referer header")?,
        );

        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.scraping.user_agent)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<String, FetchError> {
        let response = request.send()?;
        let status = response.status();
        // Only a plain 200 carries a usable body.
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.text()?;
        debug!("Received {} bytes (HTTP {})", body.len(), status);
        Ok(body)
    }
}

impl Fetcher for HttpClient {
    fn get(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        self.send(self.client.get(url).timeout(timeout))
    }

    fn get_json(&self, url: &str, timeout: Duration) -> Result<Value, FetchError> {
        let body = self.send(
            self.client
                .get(url)
                .header(ACCEPT, "application/json")
                .timeout(timeout),
        )?;
        Ok(serde_json::from_str(&body)?)
    }
}
