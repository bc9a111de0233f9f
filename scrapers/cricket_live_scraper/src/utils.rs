use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::OnceLock;

/// Pulls the numeric match id out of a scorecard link such as
/// `/live-cricket-scorecard/105778/ind-vs-aus-2nd-test`.
pub fn extract_match_id(scorecard_link: &str) -> Option<&str> {
    scorecard_link
        .split('/')
        .find(|part| part.len() > 4 && part.chars().all(|c| c.is_ascii_digit()))
}

/// Trimmed text content of an element and all of its descendants.
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn first_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(|el| element_text(&el))
}

/// Text of the `nth` match of `selector`, or empty when there are fewer matches.
pub fn nth_text(elements: &[ElementRef], nth: usize) -> String {
    elements.get(nth).map(element_text).unwrap_or_default()
}

/// Drops `&nbsp;` runs that the listing page leaves in match numbers.
pub fn strip_nbsp_entity(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&nbsp;\S*").unwrap())
        .replace_all(text, "")
        .into_owned()
}

/// Drops non-breaking-space runs, e.g. the venue suffix after the date.
pub fn strip_nbsp_runs(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x{a0}\S*").unwrap())
        .replace_all(text, "")
        .into_owned()
}

/// Removes parenthesised annotations such as `(c)` or `(wk)` from player names.
pub fn strip_parenthesised(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\([^)]*\)").unwrap())
        .replace_all(text, "")
        .trim()
        .to_string()
}

pub fn progress_bar(len: usize, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let template = format!("[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {} ({{eta}})", unit);
    if let Ok(style) = ProgressStyle::default_bar().template(&template) {
        pb.set_style(style);
    }
    pb
}
