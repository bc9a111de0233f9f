use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// One row of `matches.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchListing {
    #[serde(rename = "match", default = "unknown_match")]
    pub match_name: String,
    pub status: String,
    pub date_stadium: String,
    pub live_score: String,
    pub scorecard_links: String,
    pub commentary: String,
    pub teams: Teams,
}

fn unknown_match() -> String {
    "Unknown Match".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Teams {
    pub team1: String,
    pub team2: String,
    pub score1: String,
    pub score2: String,
    pub match_status: String,
}

/// One entry of `scorecard.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    #[serde(rename = "match")]
    pub match_name: String,
    pub innings: Vec<Innings>,
}

impl Scorecard {
    pub fn empty(match_name: &str) -> Self {
        Self {
            match_name: match_name.to_string(),
            innings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Innings {
    pub innings_name: String,
    pub batters: Vec<Batter>,
    pub extras: String,
    pub total: String,
    pub yet_to_bat: Vec<String>,
    pub fall_of_wickets: Vec<String>,
    pub bowlers: Vec<Bowler>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batter {
    pub name: String,
    pub status: String,
    pub runs: String,
    pub balls: String,
    #[serde(rename = "4s")]
    pub fours: String,
    #[serde(rename = "6s")]
    pub sixes: String,
    pub strike_rate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bowler {
    pub bowler_name: String,
    pub overs: String,
    pub maiden: String,
    pub runs: String,
    pub wickets: String,
    pub no_balls: String,
    pub wide_balls: String,
    pub economy: String,
}

/// One entry of `full_commentary.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentaryRecord {
    #[serde(rename = "match")]
    pub match_name: String,
    /// Written as the API's over number, or `""` when unknown.
    #[serde(
        serialize_with = "serialize_over",
        deserialize_with = "deserialize_over",
        default
    )]
    pub latest_over: Option<Number>,
    pub events: Vec<String>,
}

impl CommentaryRecord {
    pub fn placeholder(match_name: &str) -> Self {
        Self {
            match_name: match_name.to_string(),
            latest_over: None,
            events: Vec::new(),
        }
    }

    pub fn from_summary(match_name: &str, summary: EventSummary) -> Self {
        Self {
            match_name: match_name.to_string(),
            latest_over: summary.latest_over,
            events: summary.events,
        }
    }
}

fn serialize_over<S: Serializer>(over: &Option<Number>, serializer: S) -> Result<S::Ok, S::Error> {
    match over {
        Some(number) => number.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

fn deserialize_over<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Number>, D::Error> {
    Ok(over_number(&Value::deserialize(deserializer)?))
}

/// Result of reducing one commentary document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSummary {
    pub latest_over: Option<Number>,
    pub events: Vec<String>,
}

/// One item of a `commentaryList`, read field by field so that an odd value
/// only loses that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delivery {
    pub ball_number: Option<i64>,
    pub over_number: Option<Number>,
    pub event: Option<String>,
    pub comm_text: Option<String>,
    pub total_runs: Option<i64>,
}

impl Delivery {
    pub fn from_value(item: &Value) -> Self {
        let text = |key: &str| item.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            ball_number: ball_number(item),
            over_number: item.get("overNumber").and_then(over_number),
            event: text("event"),
            comm_text: text("commText"),
            total_runs: item.get("totalRuns").and_then(Value::as_i64),
        }
    }

    pub fn kind(&self) -> EventKind {
        EventKind::classify(self.event.as_deref())
    }

    /// Ball number when this is an ordinary delivery.
    pub fn legal_ball(&self) -> Option<i64> {
        self.ball_number.filter(|ball| *ball > 0)
    }
}

/// `ballNbr` of a raw commentary item, if it carries a numeric one.
pub fn ball_number(item: &Value) -> Option<i64> {
    item.get("ballNbr").and_then(Value::as_i64)
}

fn over_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(number) => Some(number.clone()),
        Value::String(text) => serde_json::from_str::<Number>(text.trim()).ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Wicket,
    Six,
    Four,
    Other,
}

impl EventKind {
    pub fn classify(event: Option<&str>) -> Self {
        match event {
            Some("WICKET") => EventKind::Wicket,
            Some("SIX") => EventKind::Six,
            Some("FOUR") => EventKind::Four,
            _ => EventKind::Other,
        }
    }
}
