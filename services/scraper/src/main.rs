//! Florida surf break scraper.
//!
//! Reads a surf-forecast.com listing page, scrapes each linked break page
//! and writes the point file consumed by the poster renderer:
//! - Sequential requests with a 1s pause
//! - Optional robots.txt preview
//! - JSON and CSV output

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use surf_scraper::fetch::DEFAULT_BASE_URL;
use surf_scraper::{save_csv, save_json, ScraperConfig, SurfScraper};

#[derive(Parser, Debug)]
#[command(name = "surf-scraper")]
#[command(about = "Scrape Florida surf break locations for poster generation")]
struct Args {
    /// Listing page with links to break pages (local file or URL)
    #[arg(short, long, default_value = "listings.html")]
    listing: String,

    /// Scrape at most this many breaks; 0 scrapes every break
    #[arg(short, long)]
    max_breaks: Option<usize>,

    /// JSON output path
    #[arg(long, env = "POSTER_DATA_PATH", default_value = "florida_surf_breaks.json")]
    json_out: PathBuf,

    /// CSV output path
    #[arg(long, default_value = "florida_surf_breaks.csv")]
    csv_out: PathBuf,

    /// Site root used to resolve break links
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Seconds to wait between page requests
    #[arg(long, default_value = "1")]
    delay_secs: u64,

    /// Skip the robots.txt preview
    #[arg(long)]
    skip_robots: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);
    if args.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    info!(listing = %args.listing, "Starting surf break scraper");

    let config = ScraperConfig {
        base_url: args.base_url.clone(),
        request_delay: Duration::from_secs(args.delay_secs),
        ..Default::default()
    };
    let scraper = SurfScraper::new(config).context("Failed to create scraper")?;

    if !args.skip_robots {
        scraper.preview_robots().await;
    }

    let links = scraper
        .load_listing(&args.listing)
        .await
        .with_context(|| format!("Failed to read listing {}", args.listing))?;
    if links.is_empty() {
        anyhow::bail!("No break URLs found in {}", args.listing);
    }

    let breaks = scraper.scrape_all(&links, args.max_breaks).await;
    if breaks.is_empty() {
        anyhow::bail!("No breaks could be scraped");
    }

    let missing = breaks.iter().filter(|b| !b.has_coordinates()).count();
    if missing > 0 {
        warn!(missing, "Some breaks have no coordinates and will not be plotted");
    }

    save_json(&breaks, &args.json_out)
        .with_context(|| format!("Failed to write {}", args.json_out.display()))?;
    save_csv(&breaks, &args.csv_out)
        .with_context(|| format!("Failed to write {}", args.csv_out.display()))?;

    info!(count = breaks.len(), "Scraping complete");
    Ok(())
}
