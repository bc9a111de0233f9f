use scraper::{ElementRef, Html, Selector};
use tracing::{error, info, warn};

use crate::{
    config::ScraperConfig,
    http::Fetcher,
    types::{MatchListing, Teams},
    utils::{first_text, nth_text, strip_nbsp_entity, strip_nbsp_runs},
};

/// Fetches the live-scores page and parses its match cards.
/// A failed fetch is logged and gives an empty listing.
pub fn scrape_listing<F: Fetcher>(fetcher: &F, config: &ScraperConfig) -> Vec<MatchListing> {
    let url = config.endpoints.listing_url();
    info!("Fetching match listing from {}", url);

    match fetcher.get(&url, config.scraping.page_timeout()) {
        Ok(html) => {
            let matches = parse_listing(&html);
            info!("Found {} matches", matches.len());
            matches
        }
        Err(e) => {
            error!("Failed to fetch match listing: {}", e);
            Vec::new()
        }
    }
}

pub fn parse_listing(html: &str) -> Vec<MatchListing> {
    let document = Html::parse_document(html);
    let container_selector = Selector::parse("div.cb-col.cb-col-100.cb-bg-white").unwrap();
    let card_selector = Selector::parse("div.cb-mtch-lst.cb-col.cb-col-100.cb-tms-itm").unwrap();

    let Some(container) = document.select(&container_selector).next() else {
        warn!("No container found for matches");
        return Vec::new();
    };

    container.select(&card_selector).map(|card| parse_card(&card)).collect()
}

fn parse_card(card: &ElementRef) -> MatchListing {
    let title_selector = Selector::parse("a.text-hvr-underline.text-bold").unwrap();
    let number_selector = Selector::parse("span.text-gray").unwrap();
    let venue_selector = Selector::parse("div.text-gray").unwrap();

    MatchListing {
        match_name: first_text(card, &title_selector).unwrap_or_default(),
        status: first_text(card, &number_selector)
            .map(|text| strip_nbsp_entity(&text))
            .unwrap_or_default(),
        date_stadium: first_text(card, &venue_selector)
            .map(|text| strip_nbsp_runs(&text))
            .unwrap_or_default(),
        live_score: link_href(card, "Live Score"),
        scorecard_links: link_href(card, "Scorecard"),
        commentary: link_href(card, "Full Commentary"),
        teams: parse_teams(card),
    }
}

/// `href` of the anchor with the given `title`, or empty.
fn link_href(card: &ElementRef, title: &str) -> String {
    let selector = Selector::parse(&format!("a[title=\"{}\"]", title)).unwrap();
    card.select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .unwrap_or_default()
        .to_string()
}

fn parse_teams(card: &ElementRef) -> Teams {
    let match_status = ["div.cb-text-live", "div.cb-text-complete", "span.cb-text-preview"]
        .iter()
        .find_map(|css| first_text(card, &Selector::parse(css).unwrap()))
        .unwrap_or_default();

    let overview_selector = Selector::parse("div.cb-ovr-flo").unwrap();
    let overview: Vec<ElementRef> = card.select(&overview_selector).collect();

    Teams {
        team1: nth_text(&overview, 1),
        team2: nth_text(&overview, 3),
        score1: nth_text(&overview, 2),
        score2: nth_text(&overview, 4),
        match_status,
    }
}
