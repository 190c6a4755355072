//! Extraction and export tests against saved HTML fixtures.

use std::time::Duration;

use poster_common::PointStore;
use surf_scraper::parse::{infer_break_type, MAX_DESCRIPTION_CHARS};
use surf_scraper::{
    break_name_from_url, extract_links, save_csv, save_json, scrape_limit, BreakPageParser,
    ScraperConfig, SurfBreak, SurfScraper,
};

const BASE: &str = "https://www.surf-forecast.com";

const LISTING: &str = r#"
<html><body>
  <a href="/breaks/Cocoa-Beach-Pier">Cocoa Beach Pier</a>
  <a href="/countries/USA">USA</a>
  <a href="/breaks/Sebastian-Inlet">Sebastian Inlet</a>
  <a href="/breaks/Cocoa-Beach-Pier">Cocoa again</a>
  <a href="https://elsewhere.com/breaks/Nope">external</a>
  <a>no href</a>
  <a href="/breaks/Ponce_Inlet/forecasts/latest">Ponce</a>
</body></html>
"#;

fn break_page(script: &str, extra: &str) -> String {
    format!(
        r#"<html><head><script>{script}</script></head><body>
  <h2 class="h1add tab">(Atlantic Coast, Florida, USA)</h2>
  <table class="guide-header__information"><tr>
    <td>Exposed</td>
    <td><img class="guide-header__type-icon guide-header__type-icon--break" src="t.png"> Beach/pier </td>
  </tr></table>
  <div class="guide-header__summary__text"><p>  A consistent pier break south of the Cape.  </p></div>
  {extra}
</body></html>"#
    )
}

fn sample_break(name: &str, coords: Option<(f64, f64)>, break_type: &str) -> SurfBreak {
    SurfBreak {
        name: name.to_string(),
        latitude: coords.map(|c| c.0),
        longitude: coords.map(|c| c.1),
        break_type: Some(break_type.to_string()),
        region: Some("Atlantic Coast, Florida".to_string()),
        url: format!("{}/breaks/{}", BASE, name.replace(' ', "-")),
        description: None,
    }
}

// ============================================================================
// Listing pages
// ============================================================================

#[test]
fn test_extract_links_dedup_in_order() {
    let links = extract_links(LISTING, BASE).unwrap();
    assert_eq!(
        links,
        vec![
            "https://www.surf-forecast.com/breaks/Cocoa-Beach-Pier",
            "https://www.surf-forecast.com/breaks/Sebastian-Inlet",
            "https://www.surf-forecast.com/breaks/Ponce_Inlet/forecasts/latest",
        ]
    );
}

#[test]
fn test_extract_links_empty_page() {
    let links = extract_links("<html><body><p>nothing</p></body></html>", BASE).unwrap();
    assert!(links.is_empty());
}

#[test]
fn test_extract_links_invalid_base() {
    assert!(extract_links(LISTING, "not a url").is_err());
}

#[test]
fn test_break_name_from_listing_links() {
    let links = extract_links(LISTING, BASE).unwrap();
    assert_eq!(break_name_from_url(&links[0]), "Cocoa Beach Pier");
    assert_eq!(break_name_from_url(&links[2]), "latest");
}

// ============================================================================
// Break pages
// ============================================================================

#[test]
fn test_parse_break_page_fields() {
    let parser = BreakPageParser::new().unwrap();
    let html = break_page("var map = { lat: 28.3676, lng: -80.6012 };", "");
    let url = format!("{}/breaks/Cocoa-Beach-Pier", BASE);

    let surf_break = parser.parse_break_page(&html, &url, "cocoa beach pier");

    assert_eq!(surf_break.name, "Cocoa Beach Pier");
    assert_eq!(surf_break.region.as_deref(), Some("Atlantic Coast, Florida"));
    assert_eq!(surf_break.break_type.as_deref(), Some("Beach/pier"));
    assert_eq!(
        surf_break.description.as_deref(),
        Some("A consistent pier break south of the Cape.")
    );
    assert_eq!(surf_break.latitude, Some(28.3676));
    assert_eq!(surf_break.longitude, Some(-80.6012));
    assert_eq!(surf_break.url, url);
}

#[test]
fn test_parse_break_page_json_keys() {
    let parser = BreakPageParser::new().unwrap();
    let html = break_page(r#"window.spot = {"latitude": "27.86", "lon": "-80.45"};"#, "");

    let surf_break = parser.parse_break_page(&html, "u", "Sebastian-Inlet");
    assert_eq!(surf_break.name, "Sebastian Inlet");
    assert_eq!(surf_break.latitude, Some(27.86));
    assert_eq!(surf_break.longitude, Some(-80.45));
}

#[test]
fn test_parse_break_page_center_array() {
    let parser = BreakPageParser::new().unwrap();
    let html = break_page("initMap({ center: [29.2283, -81.0076], zoom: 12 });", "");

    let surf_break = parser.parse_break_page(&html, "u", "Daytona");
    assert_eq!(surf_break.latitude, Some(29.2283));
    assert_eq!(surf_break.longitude, Some(-81.0076));
}

#[test]
fn test_parse_break_page_rejects_coordinates_outside_florida() {
    let parser = BreakPageParser::new().unwrap();
    let html = break_page("var spot = { lat: 40.58, lng: -73.81 };", "");

    let surf_break = parser.parse_break_page(&html, "u", "Rockaway");
    assert_eq!(surf_break.latitude, None);
    assert_eq!(surf_break.longitude, None);
    assert!(!surf_break.has_coordinates());
}

#[test]
fn test_parse_break_page_google_maps_fallback() {
    let parser = BreakPageParser::new().unwrap();
    let html = break_page(
        "console.log('no coordinates here');",
        r#"<a href="https://maps.google.com/?q=26.7153,-80.0347">Map</a>"#,
    );

    let surf_break = parser.parse_break_page(&html, "u", "Palm Beach");
    assert_eq!(surf_break.latitude, Some(26.7153));
    assert_eq!(surf_break.longitude, Some(-80.0347));
}

#[test]
fn test_parse_break_page_truncates_description() {
    let parser = BreakPageParser::new().unwrap();
    let long = "x".repeat(MAX_DESCRIPTION_CHARS + 250);
    let html = format!(
        r#"<html><body><div class="guide-header__summary__text"><p>{}</p></div></body></html>"#,
        long
    );

    let surf_break = parser.parse_break_page(&html, "u", "Somewhere");
    assert_eq!(
        surf_break.description.map(|d| d.chars().count()),
        Some(MAX_DESCRIPTION_CHARS)
    );
}

#[test]
fn test_parse_break_page_type_icon_split_classes() {
    let parser = BreakPageParser::new().unwrap();
    let html = r#"<html><body>
  <table class="guide-header__information"><tr>
    <td><img class="guide-header__type-icon break" src="t.png"> Reef </td>
  </tr></table>
</body></html>"#;

    let surf_break = parser.parse_break_page(html, &format!("{}/breaks/X", BASE), "x");
    assert_eq!(surf_break.break_type.as_deref(), Some("Reef"));
}

#[test]
fn test_parse_break_page_infers_type_without_icon() {
    let parser = BreakPageParser::new().unwrap();
    let html = r#"<html><body>
        <div class="guide-header__summary__text"><p>Waves wrap around the north jetty.</p></div>
    </body></html>"#;

    let surf_break = parser.parse_break_page(html, "u", "ponce-inlet");
    // "inlet" in the name loses to "jetty" in the description
    assert_eq!(surf_break.break_type.as_deref(), Some("Jetty"));
    assert_eq!(surf_break.region, None);
}

#[test]
fn test_parse_empty_page_defaults() {
    let parser = BreakPageParser::new().unwrap();
    let surf_break = parser.parse_break_page("", "u", "nowhere");

    assert_eq!(surf_break.name, "Nowhere");
    assert_eq!(surf_break.break_type.as_deref(), Some("Beach Break"));
    assert_eq!(surf_break.description, None);
    assert!(!surf_break.has_coordinates());
}

#[test]
fn test_infer_break_type_keywords() {
    assert_eq!(infer_break_type("Juno Pier", None), "Pier");
    assert_eq!(infer_break_type("Sebastian Inlet", None), "Inlet");
    assert_eq!(infer_break_type("Dry Tortugas Reef", None), "Reef");
    assert_eq!(infer_break_type("Spot", Some("A shallow reef break")), "Reef");
    assert_eq!(infer_break_type("Rocky Point", None), "Point Break");
    assert_eq!(infer_break_type("Vilano Beach", None), "Beach Break");
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_save_json_loads_as_point_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("breaks.json");
    let breaks = vec![
        sample_break("Cocoa Beach Pier", Some((28.368, -80.601)), "Beach/pier"),
        sample_break("Mystery Spot", None, "Beach Break"),
        sample_break("Sebastian Inlet", Some((27.86, -80.445)), "Beach/jetty"),
    ];

    save_json(&breaks, &path).unwrap();

    let store = PointStore::load(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.points()[0].name(), "Cocoa Beach Pier");
    assert_eq!(store.points()[0].category(), "Beach/pier");
    assert_eq!(store.points()[1].name(), "Sebastian Inlet");
}

#[test]
fn test_save_json_is_pretty_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("breaks.json");
    save_json(&[sample_break("Juno Pier", None, "Pier")], &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n"));
    let parsed: Vec<SurfBreak> = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed[0].latitude, None);
    assert_eq!(parsed[0].break_type.as_deref(), Some("Pier"));
}

#[test]
fn test_save_csv_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("breaks.csv");
    let breaks = vec![
        sample_break("Cocoa Beach Pier", Some((28.368, -80.601)), "Beach/pier"),
        sample_break("Mystery Spot", None, "Beach Break"),
    ];

    assert!(save_csv(&breaks, &path).unwrap());

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("name,latitude,longitude,break_type,region,url,description")
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("Cocoa Beach Pier,28.368,-80.601,Beach/pier,"));
    let second = lines.next().unwrap();
    assert!(second.starts_with("Mystery Spot,,,Beach Break,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_save_csv_empty_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("breaks.csv");

    assert!(!save_csv(&[], &path).unwrap());
    assert!(!path.exists());
}

// ============================================================================
// Fetching
// ============================================================================

#[test]
fn test_scrape_limit() {
    assert_eq!(scrape_limit(3, None), 3);
    assert_eq!(scrape_limit(3, Some(2)), 2);
    assert_eq!(scrape_limit(3, Some(10)), 3);
    // Zero disables the limit
    assert_eq!(scrape_limit(3, Some(0)), 3);
    assert_eq!(scrape_limit(0, Some(5)), 0);
}

#[tokio::test]
async fn test_load_listing_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("listings.html");
    std::fs::write(&path, LISTING).unwrap();

    let scraper = SurfScraper::new(ScraperConfig::default()).unwrap();
    let links = scraper.load_listing(path.to_str().unwrap()).await.unwrap();
    assert_eq!(links.len(), 3);
}

#[tokio::test]
async fn test_load_listing_missing_file() {
    let scraper = SurfScraper::new(ScraperConfig::default()).unwrap();
    assert!(scraper.load_listing("/nonexistent/listings.html").await.is_err());
}

#[tokio::test]
async fn test_scrape_all_skips_failed_pages() {
    let config = ScraperConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        request_timeout: Duration::from_secs(2),
        request_delay: Duration::ZERO,
    };
    let scraper = SurfScraper::new(config).unwrap();
    let links = vec![
        "http://127.0.0.1:9/breaks/One".to_string(),
        "http://127.0.0.1:9/breaks/Two".to_string(),
        "http://127.0.0.1:9/breaks/Three".to_string(),
    ];

    let breaks = scraper.scrape_all(&links, Some(2)).await;
    assert!(breaks.is_empty());
    assert!(scraper.preview_robots().await.is_none());
}
