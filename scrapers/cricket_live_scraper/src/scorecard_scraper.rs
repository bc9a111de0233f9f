use scraper::{ElementRef, Html, Selector};
use std::thread;
use tracing::{error, info, warn};

use crate::{
    config::ScraperConfig,
    http::Fetcher,
    types::{Batter, Bowler, Innings, MatchListing, Scorecard},
    utils::{element_text, first_text, nth_text, progress_bar, strip_parenthesised},
};

pub struct ScorecardScraper<F: Fetcher> {
    fetcher: F,
    config: ScraperConfig,
}

impl<F: Fetcher> ScorecardScraper<F> {
    pub fn new(fetcher: F, config: ScraperConfig) -> Self {
        Self { fetcher, config }
    }

    /// Scrapes the scorecard of every listed match that has a scorecard link.
    /// Matches without one are skipped; fetch failures give an empty scorecard.
    pub fn run(&self, matches: &[MatchListing]) -> Vec<Scorecard> {
        let progress = progress_bar(matches.len(), "scorecards");
        let mut scorecards = Vec::new();

        for listing in matches {
            progress.inc(1);
            if listing.scorecard_links.is_empty() {
                info!("No scorecard link for match: {}", listing.match_name);
                continue;
            }

            let url = self.config.endpoints.scorecard_url(&listing.scorecard_links);
            info!("Processing scorecard for: {}", url);

            match self.fetcher.get(&url, self.config.scraping.page_timeout()) {
                Ok(html) => scorecards.push(parse_scorecard(&html, &listing.match_name)),
                Err(e) => {
                    error!("Error processing scorecard for match {}: {}", listing.match_name, e);
                    scorecards.push(Scorecard::empty(&listing.match_name));
                    continue;
                }
            }

            thread::sleep(self.config.pacing.scorecard_delay());
        }

        progress.finish_and_clear();
        scorecards
    }
}

pub fn parse_scorecard(html: &str, fallback_name: &str) -> Scorecard {
    let document = Html::parse_document(html);
    let title_selector = Selector::parse(".cb-nav-hdr.cb-font-18.line-ht24").unwrap();
    let innings_selector = Selector::parse("[id^=\"innings_\"]").unwrap();

    let match_name = document
        .select(&title_selector)
        .next()
        .map(|title| {
            let text = element_text(&title);
            text.split('-').next().unwrap_or_default().to_string()
        })
        .unwrap_or_else(|| fallback_name.to_string());
    info!("Processing match: {}", match_name);

    let innings = document
        .select(&innings_selector)
        .map(|div| parse_innings(&div))
        .collect();

    Scorecard { match_name, innings }
}

fn parse_innings(innings_div: &ElementRef) -> Innings {
    let header_selector = Selector::parse(".cb-scrd-hdr-rw span").unwrap();
    let item_selector = Selector::parse(".cb-scrd-itms").unwrap();
    let wicket_selector = Selector::parse(".cb-col.cb-col-100.cb-col-rt.cb-font-13").unwrap();
    let extras_selector = Selector::parse(".cb-col.cb-col-8.text-bold.cb-text-black.text-right").unwrap();
    let total_selector = Selector::parse(".cb-col.cb-col-8.text-bold.text-black.text-right").unwrap();

    let innings_name = first_text(innings_div, &header_selector).unwrap_or_else(|| "Unknown Team".to_string());
    let items: Vec<ElementRef> = innings_div.select(&item_selector).collect();

    let fall_of_wickets = innings_div
        .select(&wicket_selector)
        .map(|wicket| element_text(&wicket))
        .filter(|text| !text.is_empty())
        .collect();

    let innings = Innings {
        innings_name,
        batters: items.iter().filter_map(parse_batter).collect(),
        extras: summary_row(&items, &extras_selector),
        total: summary_row(&items, &total_selector),
        yet_to_bat: yet_to_bat(&items),
        fall_of_wickets,
        bowlers: items.iter().filter_map(parse_bowler).collect(),
    };

    if innings.batters.is_empty() && innings.bowlers.is_empty() {
        warn!("Innings {} has no batting or bowling rows", innings.innings_name);
    }
    innings
}

/// Player link inside the first `column` element of a row, skipping the
/// Extras and Total rows that share the same layout.
fn player_name(item: &ElementRef, column: &Selector) -> Option<String> {
    let link_selector = Selector::parse("a").unwrap();
    let name = item
        .select(column)
        .next()?
        .select(&link_selector)
        .next()
        .map(|a| element_text(&a))?;

    match name.as_str() {
        "Extras" | "Total" => None,
        _ => Some(name),
    }
}

fn parse_batter(item: &ElementRef) -> Option<Batter> {
    let name_selector = Selector::parse(".cb-col-25").unwrap();
    let status_selector = Selector::parse(".cb-col-33").unwrap();
    let runs_selector = Selector::parse(".cb-col-8.text-right.text-bold").unwrap();
    let stat_selector = Selector::parse(".cb-col-8.text-right").unwrap();

    let name = player_name(item, &name_selector)?;
    let stats: Vec<ElementRef> = item.select(&stat_selector).collect();

    Some(Batter {
        name: strip_parenthesised(&name),
        status: first_text(item, &status_selector).unwrap_or_default(),
        runs: first_text(item, &runs_selector).unwrap_or_default(),
        balls: nth_text(&stats, 1),
        fours: nth_text(&stats, 2),
        sixes: nth_text(&stats, 3),
        strike_rate: nth_text(&stats, 4),
    })
}

fn parse_bowler(item: &ElementRef) -> Option<Bowler> {
    let name_selector = Selector::parse(".cb-col-38").unwrap();
    let narrow_selector = Selector::parse(".cb-col-8.text-right").unwrap();
    let wide_selector = Selector::parse(".cb-col-10.text-right").unwrap();

    let bowler_name = player_name(item, &name_selector)?;
    let narrow: Vec<ElementRef> = item.select(&narrow_selector).collect();
    let wide: Vec<ElementRef> = item.select(&wide_selector).collect();

    Some(Bowler {
        bowler_name,
        overs: nth_text(&narrow, 0),
        maiden: nth_text(&narrow, 1),
        runs: nth_text(&wide, 0),
        wickets: nth_text(&narrow, 2),
        no_balls: nth_text(&narrow, 3),
        wide_balls: nth_text(&narrow, 4),
        economy: nth_text(&wide, 1),
    })
}

/// Value plus breakdown of the first row containing `value_selector`,
/// e.g. `"12"` + `"(b 1, lb 4, w 7)"`.
fn summary_row(items: &[ElementRef], value_selector: &Selector) -> String {
    let breakdown_selector = Selector::parse(".cb-col-32.cb-col").unwrap();

    items
        .iter()
        .find_map(|item| {
            let value = first_text(item, value_selector)?;
            let breakdown = first_text(item, &breakdown_selector).unwrap_or_default();
            Some(value + &breakdown)
        })
        .unwrap_or_default()
}

fn yet_to_bat(items: &[ElementRef]) -> Vec<String> {
    let player_selector = Selector::parse(".cb-col-73.cb-col").unwrap();

    items
        .iter()
        .flat_map(|item| item.select(&player_selector))
        .map(|player| element_text(&player))
        .filter(|text| !text.is_empty() && text != "Yet to Bat")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_falls_back_to_listing_name() {
        let scorecard = parse_scorecard("<html><body></body></html>", "SA vs WI");
        assert_eq!(scorecard.match_name, "SA vs WI");
        assert!(scorecard.innings.is_empty());
    }

    #[test]
    fn test_title_is_cut_at_first_dash() {
        let html = r#"<div class="cb-nav-hdr cb-font-18 line-ht24"> India vs England, 1st T20I - Live Cricket Score</div>"#;
        let scorecard = parse_scorecard(html, "fallback");
        assert_eq!(scorecard.match_name, "India vs England, 1st T20I ");
    }
}
