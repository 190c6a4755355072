//! Surf break scraper library.
//!
//! Pulls break pages linked from a surf-forecast.com listing, extracts
//! coordinates, break type, region and description, and exports the
//! results as the JSON point file the poster renderer reads (plus CSV).

pub mod error;
pub mod export;
pub mod fetch;
pub mod parse;

pub use error::{ScrapeError, ScrapeResult};
pub use export::{save_csv, save_json};
pub use fetch::{scrape_limit, ScraperConfig, SurfScraper};
pub use parse::{break_name_from_url, extract_links, BreakPageParser, SurfBreak};
