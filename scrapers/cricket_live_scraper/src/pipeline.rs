use anyhow::Result;
use tracing::{info, warn};

use crate::{
    commentary_driver::CommentaryDriver,
    config::ScraperConfig,
    http::Fetcher,
    match_listing::scrape_listing,
    output::{read_json, write_json},
    scorecard_scraper::ScorecardScraper,
    types::MatchListing,
};

/// Scrapes the listing and every scorecard, writing `matches.json` and
/// `scorecard.json`. Nothing is written when no matches are listed.
pub fn run_matches_pass<F: Fetcher>(fetcher: &F, config: &ScraperConfig) -> Result<Vec<MatchListing>> {
    info!("Scraping matches data...");
    let matches = scrape_listing(fetcher, config);
    if matches.is_empty() {
        warn!("No matches data found");
        return Ok(matches);
    }
    write_json(&config.output.matches_path(), &matches)?;
    info!("Saved {} matches", matches.len());

    info!("Scraping scorecard data...");
    let scorecards = ScorecardScraper::new(fetcher, config.clone()).run(&matches);
    write_json(&config.output.scorecard_path(), &scorecards)?;
    info!("Saved {} scorecards", scorecards.len());

    Ok(matches)
}

/// Reads `matches.json` and writes one commentary record per match to
/// `full_commentary.json`. Failing to read the input is the only error.
pub fn run_commentary_pass<F: Fetcher>(fetcher: &F, config: &ScraperConfig) -> Result<usize> {
    let matches: Vec<MatchListing> = read_json(&config.output.matches_path())?;
    info!("Loaded {} matches", matches.len());

    let records = CommentaryDriver::new(fetcher, config.clone()).run(&matches);
    if records.is_empty() {
        warn!("No commentary data found");
        return Ok(0);
    }

    write_json(&config.output.commentary_path(), &records)?;
    info!("Saved {} commentary records", records.len());
    Ok(records.len())
}
