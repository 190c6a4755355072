//! Polite sequential fetching of break pages.

use std::path::Path;
use std::time::Duration;

use reqwest::{header, Client};
use tracing::{info, instrument, warn};

use crate::error::ScrapeResult;
use crate::parse::{break_name_from_url, extract_links, BreakPageParser, SurfBreak};

pub const DEFAULT_BASE_URL: &str = "https://www.surf-forecast.com";

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:91.0) Gecko/20100101 Firefox/91.0";

/// How many characters of robots.txt to log.
const ROBOTS_PREVIEW_CHARS: usize = 500;

/// Number of links to scrape out of `total`. A limit of zero means no limit.
pub fn scrape_limit(total: usize, max_breaks: Option<usize>) -> usize {
    max_breaks
        .filter(|&limit| limit > 0)
        .map_or(total, |limit| limit.min(total))
}

/// Scraper configuration.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Pause between page requests
    pub request_delay: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            request_delay: Duration::from_secs(1),
        }
    }
}

/// Fetches break pages one at a time with browser-like headers.
pub struct SurfScraper {
    client: Client,
    config: ScraperConfig,
    parser: BreakPageParser,
}

impl SurfScraper {
    pub fn new(config: ScraperConfig) -> ScrapeResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US,en;q=0.5"),
        );
        headers.insert(
            header::CONNECTION,
            header::HeaderValue::from_static("keep-alive"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            parser: BreakPageParser::new()?,
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Fetch robots.txt and log the start of it. Failures only warn.
    pub async fn preview_robots(&self) -> Option<String> {
        let url = format!("{}/robots.txt", self.config.base_url.trim_end_matches('/'));
        info!(url = %url, "Checking robots.txt");

        let body = match self.fetch_text(&url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "Could not fetch robots.txt");
                return None;
            }
        };

        let preview: String = body.chars().take(ROBOTS_PREVIEW_CHARS).collect();
        info!(preview = %preview, "robots.txt content");
        Some(preview)
    }

    /// Read a listing page from a local file or an `http(s)` URL and return
    /// its break links.
    pub async fn load_listing(&self, source: &str) -> ScrapeResult<Vec<String>> {
        let html = if source.starts_with("http://") || source.starts_with("https://") {
            self.fetch_text(source).await?
        } else {
            tokio::fs::read_to_string(Path::new(source)).await?
        };
        extract_links(&html, &self.config.base_url)
    }

    /// Scrape one break page.
    #[instrument(skip(self, url), fields(url = %url))]
    pub async fn scrape_break(&self, url: &str, name: &str) -> ScrapeResult<SurfBreak> {
        info!("Scraping break");
        let html = self.fetch_text(url).await?;
        Ok(self.parser.parse_break_page(&html, url, name))
    }

    /// Scrape every link in order, up to `max_breaks`. Failed pages are
    /// logged and skipped.
    pub async fn scrape_all(&self, links: &[String], max_breaks: Option<usize>) -> Vec<SurfBreak> {
        let limit = scrape_limit(links.len(), max_breaks);
        if limit < links.len() {
            info!(limit, total = links.len(), "Limiting breaks to scrape");
        }

        let mut breaks = Vec::with_capacity(limit);
        for (i, url) in links.iter().take(limit).enumerate() {
            let name = break_name_from_url(url);
            match self.scrape_break(url, &name).await {
                Ok(surf_break) => {
                    info!(index = i + 1, total = limit, name = %name, "Scraped break");
                    breaks.push(surf_break);
                }
                Err(e) => {
                    warn!(index = i + 1, total = limit, name = %name, error = %e, "Failed to scrape break");
                }
            }

            if i + 1 < limit {
                tokio::time::sleep(self.config.request_delay).await;
            }
        }

        breaks
    }

    async fn fetch_text(&self, url: &str) -> ScrapeResult<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
