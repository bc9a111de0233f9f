use serde_json::Value;
use tracing::{info, warn};

use crate::types::{ball_number, Delivery, EventKind, EventSummary};

/// Number of most recent deliveries kept in a summary.
pub const EVENT_WINDOW: usize = 12;

/// Reduces a full-commentary document to the latest over and the last
/// [`EVENT_WINDOW`] deliveries, oldest first. Never fails: anything that is
/// not a usable document gives an empty summary.
///
/// Only `commentary[0].commentaryList` is read. Items without a positive
/// `ballNbr` are dropped before any other field is looked at.
pub fn reduce(document: Option<&Value>) -> EventSummary {
    let Some(commentary) = document.and_then(|doc| doc.get("commentary")) else {
        info!("No commentary data found");
        return EventSummary::default();
    };

    let Some(innings) = commentary.as_array().and_then(|innings| innings.first()) else {
        warn!("Commentary array is empty");
        return EventSummary::default();
    };

    let deliveries: Vec<Delivery> = innings
        .get("commentaryList")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| ball_number(item).is_some_and(|ball| ball > 0))
                .map(Delivery::from_value)
                .collect()
        })
        .unwrap_or_default();

    summarize(&deliveries)
}

pub fn summarize(deliveries: &[Delivery]) -> EventSummary {
    let mut balls: Vec<(i64, &Delivery)> = deliveries
        .iter()
        .filter_map(|delivery| delivery.legal_ball().map(|ball| (ball, delivery)))
        .collect();
    // Stable, so equal ball numbers keep their feed order.
    balls.sort_by(|a, b| b.0.cmp(&a.0));

    let window = &balls[..balls.len().min(EVENT_WINDOW)];
    let latest_over = window
        .iter()
        .find_map(|(_, delivery)| delivery.over_number.clone());

    let mut events: Vec<String> = window
        .iter()
        .map(|(_, delivery)| format_delivery(delivery))
        .collect();
    events.reverse();

    EventSummary { latest_over, events }
}

pub fn format_delivery(delivery: &Delivery) -> String {
    let outcome = match delivery.kind() {
        EventKind::Wicket => "W".to_string(),
        EventKind::Six => "6".to_string(),
        EventKind::Four => "4".to_string(),
        // Total runs, so wides and byes show up too.
        EventKind::Other => delivery.total_runs.unwrap_or(0).to_string(),
    };

    let text = delivery.comm_text.as_deref().unwrap_or_default().trim();
    if text.is_empty() {
        outcome
    } else {
        format!("{}, {}", outcome, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Number};

    fn ball(ball_number: i64, over: f64, event: &str, runs: i64, text: &str) -> Value {
        json!({
            "ballNbr": ball_number,
            "overNumber": over,
            "event": event,
            "totalRuns": runs,
            "commText": text,
        })
    }

    fn document(deliveries: Vec<Value>) -> Value {
        json!({"commentary": [{"inningsId": 1, "commentaryList": deliveries}]})
    }

    #[test]
    fn test_last_ball_six() {
        let doc = document(vec![
            ball(1, 0.1, "NONE", 0, ""),
            ball(2, 0.2, "NONE", 1, ""),
            ball(3, 0.3, "NONE", 0, ""),
            ball(4, 0.4, "NONE", 2, ""),
            ball(5, 0.5, "SIX", 6, ""),
        ]);
        let summary = reduce(Some(&doc));
        assert_eq!(summary.latest_over, Number::from_f64(0.5));
        assert_eq!(summary.events, vec!["0", "1", "0", "2", "6"]);
    }

    #[test]
    fn test_formats_each_event_kind() {
        let doc = document(vec![
            ball(4, 0.4, "NONE", 5, "  wide, runs away to fine leg  "),
            ball(3, 0.3, "FOUR", 4, "driven through covers"),
            ball(2, 0.2, "WICKET", 0, "bowled him!"),
            ball(1, 0.1, "SIX", 6, ""),
        ]);
        let summary = reduce(Some(&doc));
        assert_eq!(
            summary.events,
            vec![
                "6",
                "W, bowled him!",
                "4, driven through covers",
                "5, wide, runs away to fine leg",
            ]
        );
    }

    #[test]
    fn test_keeps_only_last_twelve_in_order() {
        let deliveries = (1..=20)
            .map(|n| ball(n, n as f64 / 10.0, "NONE", n, ""))
            .collect();
        let summary = reduce(Some(&document(deliveries)));
        let expected: Vec<String> = (9..=20).map(|n| n.to_string()).collect();
        assert_eq!(summary.events, expected);
        assert_eq!(summary.latest_over, Number::from_f64(2.0));
    }

    #[test]
    fn test_skips_non_deliveries() {
        let doc = document(vec![
            json!({"ballNbr": 0, "commText": "Innings break", "overNumber": 20.0}),
            json!({"commText": "Drinks"}),
            ball(7, 1.1, "NONE", 1, "pushed to mid-on"),
        ]);
        let summary = reduce(Some(&doc));
        assert_eq!(summary.events, vec!["1, pushed to mid-on"]);
        assert_eq!(summary.latest_over, Number::from_f64(1.1));
    }

    #[test]
    fn test_missing_fields_default() {
        let doc = document(vec![json!({"ballNbr": 3})]);
        let summary = reduce(Some(&doc));
        assert_eq!(summary.events, vec!["0"]);
        assert_eq!(summary.latest_over, None);
    }

    #[test]
    fn test_unusable_documents_are_empty() {
        assert_eq!(reduce(None), EventSummary::default());
        assert_eq!(reduce(Some(&json!({"matchHeader": {}}))), EventSummary::default());
        assert_eq!(reduce(Some(&json!({"commentary": []}))), EventSummary::default());
        assert_eq!(reduce(Some(&json!({"commentary": "n/a"}))), EventSummary::default());
    }

    #[test]
    fn test_odd_fields_on_breaks_are_ignored() {
        let doc = document(vec![
            json!({"ballNbr": 0, "overNumber": "", "totalRuns": "-"}),
            json!({"ballNbr": 1, "overNumber": 0.1, "event": "FOUR", "totalRuns": 4, "commText": "x"}),
        ]);
        let summary = reduce(Some(&doc));
        assert_eq!(summary.events, vec!["4, x"]);
        assert_eq!(summary.latest_over, Number::from_f64(0.1));
    }

    #[test]
    fn test_only_first_innings_entry_is_read() {
        let doc = json!({"commentary": [
            {"inningsId": 2, "commentaryList": [ball(1, 0.1, "SIX", 6, "")]},
            {"inningsId": 1, "commentaryList": null},
            {"inningsId": "x", "commentaryList": [{"ballNbr": "bad"}]},
        ]});
        let summary = reduce(Some(&doc));
        assert_eq!(summary.events, vec!["6"]);
        assert_eq!(summary.latest_over, Number::from_f64(0.1));
    }

    #[test]
    fn test_null_commentary_list_is_empty() {
        let doc = json!({"commentary": [{"inningsId": 1, "commentaryList": null}]});
        assert_eq!(reduce(Some(&doc)), EventSummary::default());
    }

    #[test]
    fn test_odd_field_on_a_ball_only_loses_that_field() {
        let doc = document(vec![
            json!({"ballNbr": 2, "overNumber": 0.2, "event": "NONE", "totalRuns": "-", "commText": "appeal"}),
            ball(3, 0.3, "NONE", 1, ""),
        ]);
        let summary = reduce(Some(&doc));
        assert_eq!(summary.events, vec!["0, appeal", "1"]);
        assert_eq!(summary.latest_over, Number::from_f64(0.3));
    }

    #[test]
    fn test_equal_ball_numbers_keep_feed_order() {
        let doc = document(vec![
            ball(5, 0.5, "NONE", 1, "first"),
            ball(5, 0.5, "NONE", 1, "second"),
            ball(6, 0.6, "NONE", 0, ""),
        ]);
        let summary = reduce(Some(&doc));
        assert_eq!(summary.events, vec!["1, second", "1, first", "0"]);
    }

    #[test]
    fn test_event_count_matches_legal_balls() {
        for legal in [0usize, 1, 11, 12, 13, 30] {
            let mut deliveries: Vec<Value> = (1..=legal as i64)
                .map(|n| ball(n, 0.1, "NONE", 0, ""))
                .collect();
            deliveries.push(json!({"ballNbr": 0}));
            let summary = reduce(Some(&document(deliveries)));
            assert_eq!(summary.events.len(), legal.min(EVENT_WINDOW));
        }
    }
}
