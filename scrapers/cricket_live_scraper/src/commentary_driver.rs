use std::thread;
use tracing::{info, warn};

use crate::{
    commentary_fetcher::fetch_commentary,
    config::ScraperConfig,
    error::CommentaryError,
    event_reducer::reduce,
    http::Fetcher,
    innings_prober::discover_innings_id,
    types::{CommentaryRecord, MatchListing},
    utils::{extract_match_id, progress_bar},
};

/// Produces one commentary record per listed match, in input order.
pub struct CommentaryDriver<F: Fetcher> {
    fetcher: F,
    config: ScraperConfig,
}

impl<F: Fetcher> CommentaryDriver<F> {
    pub fn new(fetcher: F, config: ScraperConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn run(&self, matches: &[MatchListing]) -> Vec<CommentaryRecord> {
        let total = matches.len();
        let progress = progress_bar(total, "matches");
        let mut records = Vec::with_capacity(total);

        for (index, listing) in matches.iter().enumerate() {
            info!("Processing match {}/{}: {}", index + 1, total, listing.match_name);

            let outcome = self.process_match(listing);
            let requested = !matches!(
                outcome,
                Err(CommentaryError::MissingScorecardLink) | Err(CommentaryError::MissingMatchId(_))
            );

            let record = match outcome {
                Ok(record) => {
                    info!(
                        "Commentary for {}: latest over {:?}, {} events",
                        listing.match_name,
                        record.latest_over,
                        record.events.len()
                    );
                    record
                }
                Err(e) => {
                    warn!("No commentary for {}: {}", listing.match_name, e);
                    CommentaryRecord::placeholder(&listing.match_name)
                }
            };
            records.push(record);
            progress.inc(1);

            if requested && index + 1 < total {
                let delay = self.config.pacing.match_delay(index);
                info!("Waiting {:.1} seconds before next request...", delay.as_secs_f64());
                thread::sleep(delay);
            }
        }

        progress.finish_and_clear();
        records
    }

    /// Probe, fetch and reduce for a single match.
    pub fn process_match(&self, listing: &MatchListing) -> Result<CommentaryRecord, CommentaryError> {
        if listing.scorecard_links.is_empty() {
            return Err(CommentaryError::MissingScorecardLink);
        }
        let match_id = extract_match_id(&listing.scorecard_links)
            .ok_or_else(|| CommentaryError::MissingMatchId(listing.scorecard_links.clone()))?;
        info!("Extracted match id: {}", match_id);

        let innings_id = discover_innings_id(&self.fetcher, &self.config, match_id);
        info!("Using innings id: {}", innings_id);

        let document = fetch_commentary(&self.fetcher, &self.config, match_id, &innings_id)?;
        let summary = reduce(Some(&document));
        Ok(CommentaryRecord::from_summary(&listing.match_name, summary))
    }
}
