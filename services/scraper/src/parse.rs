//! HTML extraction for listing and break pages.
//!
//! Everything here is pure: pages come in as strings so the extraction
//! rules can be tested against saved HTML.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{ScrapeError, ScrapeResult};

/// Plausible latitude range for Florida breaks.
pub const FLORIDA_LAT_RANGE: (f64, f64) = (24.0, 31.0);

/// Plausible longitude range for Florida breaks.
pub const FLORIDA_LON_RANGE: (f64, f64) = (-87.0, -80.0);

pub const MAX_DESCRIPTION_CHARS: usize = 500;

pub const DEFAULT_BREAK_TYPE: &str = "Beach Break";

/// One scraped break. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfBreak {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub break_type: Option<String>,
    pub region: Option<String>,
    pub url: String,
    pub description: Option<String>,
}

impl SurfBreak {
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

fn selector(css: &str) -> ScrapeResult<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{}: {:?}", css, e)))
}

/// Absolute URLs of every `/breaks/` link on a listing page, de-duplicated
/// in first-seen order.
pub fn extract_links(html: &str, base_url: &str) -> ScrapeResult<Vec<String>> {
    let base = Url::parse(base_url)?;
    let anchors = selector("a[href]")?;
    let document = Html::parse_document(html);

    let mut links: Vec<String> = Vec::new();
    for anchor in document.select(&anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.starts_with("/breaks/") {
            continue;
        }
        let full = base.join(href)?.to_string();
        if !links.contains(&full) {
            links.push(full);
        }
    }

    info!(count = links.len(), "Found unique surf break links");
    Ok(links)
}

/// Break name from the last URL path segment, with `-` and `_` as spaces.
pub fn break_name_from_url(url: &str) -> String {
    let segment = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    segment.replace(['-', '_'], " ")
}

/// Capitalise the first letter of every word and lowercase the rest. A
/// word starts after any non-alphabetic character.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

/// Guess a break type from keywords in the name and description.
pub fn infer_break_type(name: &str, description: Option<&str>) -> &'static str {
    let name = name.to_lowercase();
    let desc = description.unwrap_or_default().to_lowercase();

    if name.contains("pier") || desc.contains("pier") {
        "Pier"
    } else if name.contains("jetty") || desc.contains("jetty") {
        "Jetty"
    } else if name.contains("inlet") || desc.contains("inlet") {
        "Inlet"
    } else if name.contains("reef") || desc.contains("reef break") {
        "Reef"
    } else if name.contains("point") || desc.contains("point break") {
        "Point Break"
    } else if desc.contains("sandbar") {
        "Sandbar"
    } else {
        // "beach" in the name or "beach break" in the text also lands here
        DEFAULT_BREAK_TYPE
    }
}

fn in_florida_lat(lat: f64) -> bool {
    (FLORIDA_LAT_RANGE.0..=FLORIDA_LAT_RANGE.1).contains(&lat)
}

fn in_florida_lon(lon: f64) -> bool {
    (FLORIDA_LON_RANGE.0..=FLORIDA_LON_RANGE.1).contains(&lon)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Compiled selectors and patterns for break pages.
pub struct BreakPageParser {
    region: Selector,
    info_table: Selector,
    cell: Selector,
    image: Selector,
    summary: Selector,
    script: Selector,
    anchor: Selector,
    type_icon: Regex,
    lat_key: Regex,
    lon_key: Regex,
    center: Regex,
    maps_link: Regex,
    maps_coords: Regex,
}

impl BreakPageParser {
    pub fn new() -> ScrapeResult<Self> {
        Ok(Self {
            region: selector("h2.h1add.tab")?,
            info_table: selector("table.guide-header__information")?,
            cell: selector("td")?,
            image: selector("img")?,
            summary: selector("div.guide-header__summary__text p")?,
            script: selector("script")?,
            anchor: selector("a[href]")?,
            type_icon: Regex::new(r"guide-header__type-icon.*break")?,
            lat_key: Regex::new(r#"(?i)lat[itude]*["']?\s*[:=]\s*["']?([-+]?\d+\.?\d*)"#)?,
            lon_key: Regex::new(r#"(?i)l(ng|on)[itude]*["']?\s*[:=]\s*["']?([-+]?\d+\.?\d*)"#)?,
            center: Regex::new(
                r#"(?i)center["']?\s*:\s*\[\s*([-+]?\d+\.?\d*)\s*,\s*([-+]?\d+\.?\d*)\s*\]"#,
            )?,
            maps_link: Regex::new(r"maps\.google|google\.com/maps")?,
            maps_coords: Regex::new(r"([-+]?\d+\.?\d*),([-+]?\d+\.?\d*)")?,
        })
    }

    /// Extract everything known about a break from its page.
    pub fn parse_break_page(&self, html: &str, url: &str, name: &str) -> SurfBreak {
        let document = Html::parse_document(html);

        let region = self.region(&document);
        let description = self.description(&document);
        let break_type = self
            .break_type(&document)
            .unwrap_or_else(|| infer_break_type(name, description.as_deref()).to_string());
        let (latitude, longitude) = self.coordinates(&document);

        let surf_break = SurfBreak {
            name: title_case(&name.replace(['-', '_'], " ")),
            latitude,
            longitude,
            break_type: Some(break_type),
            region,
            url: url.to_string(),
            description,
        };

        info!(
            name = %surf_break.name,
            break_type = surf_break.break_type.as_deref().unwrap_or_default(),
            region = surf_break.region.as_deref().unwrap_or("unknown"),
            has_coordinates = surf_break.has_coordinates(),
            "Extracted break"
        );
        surf_break
    }

    /// `"(Gulf Coast, Florida, USA)"` becomes `"Gulf Coast, Florida"`.
    fn region(&self, document: &Html) -> Option<String> {
        let heading = document.select(&self.region).next()?;
        let region = element_text(heading)
            .replace(['(', ')'], "")
            .replace(", USA", "");
        Some(region)
    }

    fn break_type(&self, document: &Html) -> Option<String> {
        let table = document.select(&self.info_table).next()?;
        table.select(&self.cell).find_map(|cell| {
            // The icon marker may be one class or split across several
            let has_icon = cell.select(&self.image).any(|img| {
                let element = img.value();
                element.classes().any(|class| self.type_icon.is_match(class))
                    || element
                        .attr("class")
                        .is_some_and(|classes| self.type_icon.is_match(classes))
            });
            if !has_icon {
                return None;
            }
            let text = element_text(cell);
            (!text.is_empty()).then_some(text)
        })
    }

    fn description(&self, document: &Html) -> Option<String> {
        let paragraph = document.select(&self.summary).next()?;
        Some(
            element_text(paragraph)
                .chars()
                .take(MAX_DESCRIPTION_CHARS)
                .collect(),
        )
    }

    /// Coordinates from inline scripts, falling back to a Google Maps link.
    pub(crate) fn coordinates(&self, document: &Html) -> (Option<f64>, Option<f64>) {
        let mut lat: Option<f64> = None;
        let mut lon: Option<f64> = None;

        for script in document.select(&self.script) {
            let source: String = script.text().collect();
            if source.trim().is_empty() {
                continue;
            }

            if lat.is_none() {
                lat = first_capture(&self.lat_key, &source, 1).filter(|v| in_florida_lat(*v));
            }
            if lon.is_none() {
                lon = first_capture(&self.lon_key, &source, 2).filter(|v| in_florida_lon(*v));
            }
            if lat.is_none() || lon.is_none() {
                if let Some((clat, clon)) = capture_pair(&self.center, &source) {
                    if in_florida_lat(clat) && in_florida_lon(clon) {
                        lat = Some(clat);
                        lon = Some(clon);
                    }
                }
            }
        }

        if lat.is_none() || lon.is_none() {
            let maps_coords = document
                .select(&self.anchor)
                .filter_map(|a| a.value().attr("href"))
                .filter(|href| self.maps_link.is_match(href))
                .filter_map(|href| capture_pair(&self.maps_coords, href))
                .find(|(a, b)| in_florida_lat(*a) && in_florida_lon(*b));

            if let Some((mlat, mlon)) = maps_coords {
                debug!(lat = mlat, lon = mlon, "Found coordinates from Google Maps link");
                lat = Some(mlat);
                lon = Some(mlon);
            }
        }

        (lat, lon)
    }
}

fn first_capture(pattern: &Regex, text: &str, group: usize) -> Option<f64> {
    pattern
        .captures(text)?
        .get(group)?
        .as_str()
        .parse::<f64>()
        .ok()
}

fn capture_pair(pattern: &Regex, text: &str) -> Option<(f64, f64)> {
    let caps = pattern.captures(text)?;
    let a = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let b = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("cocoa beach pier"), "Cocoa Beach Pier");
        assert_eq!(title_case("NEW SMYRNA"), "New Smyrna");
        assert_eq!(title_case("o'neill's reef"), "O'Neill'S Reef");
    }

    #[test]
    fn test_break_name_from_url() {
        assert_eq!(
            break_name_from_url("https://www.surf-forecast.com/breaks/Sebastian-Inlet"),
            "Sebastian Inlet"
        );
        assert_eq!(
            break_name_from_url("https://www.surf-forecast.com/breaks/Ponce_Inlet/"),
            "Ponce Inlet"
        );
    }

    #[test]
    fn test_infer_break_type_priority() {
        assert_eq!(infer_break_type("Jetty Park Pier", None), "Pier");
        assert_eq!(infer_break_type("Ponce Inlet", Some("a jetty")), "Jetty");
        assert_eq!(infer_break_type("Spot", Some("A fun Point Break")), "Point Break");
        assert_eq!(infer_break_type("Spot", Some("shifting sandbar peaks")), "Sandbar");
        assert_eq!(infer_break_type("Spot", Some("a reef nearby")), "Beach Break");
        assert_eq!(infer_break_type("Anywhere", None), DEFAULT_BREAK_TYPE);
    }
}
