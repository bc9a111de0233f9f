pub mod commentary_driver;
pub mod commentary_fetcher;
pub mod config;
pub mod error;
pub mod event_reducer;
pub mod http;
pub mod innings_prober;
pub mod match_listing;
pub mod output;
pub mod pipeline;
pub mod scorecard_scraper;
pub mod types;
pub mod utils;
