use serde_json::Value;
use tracing::{info, warn};

use crate::{config::ScraperConfig, http::Fetcher};

/// Innings numbers tried in order; the latest innings with commentary wins.
pub const INNINGS_CANDIDATES: [u32; 4] = [4, 3, 2, 1];
pub const DEFAULT_INNINGS_ID: &str = "1";

/// Finds the innings id of the most recent innings that has commentary.
///
/// Every candidate failure (network, status, body, shape) only moves the
/// probe on to the next candidate. Falls back to [`DEFAULT_INNINGS_ID`].
pub fn discover_innings_id<F: Fetcher>(fetcher: &F, config: &ScraperConfig, match_id: &str) -> String {
    INNINGS_CANDIDATES
        .iter()
        .find_map(|&innings| probe_innings(fetcher, config, match_id, innings))
        .unwrap_or_else(|| {
            info!("No valid innings found for match {}, using default '{}'", match_id, DEFAULT_INNINGS_ID);
            DEFAULT_INNINGS_ID.to_string()
        })
}

fn probe_innings<F: Fetcher>(
    fetcher: &F,
    config: &ScraperConfig,
    match_id: &str,
    innings: u32,
) -> Option<String> {
    let url = config.endpoints.commentary_url(match_id, &innings.to_string());
    info!("Trying innings {}: {}", innings, url);

    let document = match fetcher.get_json(&url, config.scraping.probe_timeout()) {
        Ok(document) => document,
        Err(e) => {
            warn!("Error trying innings {}: {}", innings, e);
            return None;
        }
    };

    let Some(first) = document
        .get("commentary")
        .and_then(Value::as_array)
        .and_then(|commentary| commentary.first())
    else {
        info!("No commentary found for innings {}", innings);
        return None;
    };

    let innings_id = first.get("inningsId").and_then(truthy_id);
    if let Some(id) = &innings_id {
        info!("Found innings id {} for match {}", id, match_id);
    }
    innings_id
}

/// String form of an id value, or `None` for empty/zero/false/null ids.
fn truthy_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) if id.as_f64() != Some(0.0) => Some(id.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthy_id() {
        assert_eq!(truthy_id(&json!(2)), Some("2".to_string()));
        assert_eq!(truthy_id(&json!("3")), Some("3".to_string()));
        assert_eq!(truthy_id(&json!(0)), None);
        assert_eq!(truthy_id(&json!("")), None);
        assert_eq!(truthy_id(&Value::Null), None);
        assert_eq!(truthy_id(&json!(true)), Some("True".to_string()));
        assert_eq!(truthy_id(&json!(false)), None);
    }
}
