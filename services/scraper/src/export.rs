//! JSON and CSV export of scraped breaks.

use std::path::Path;

use tracing::{info, warn};

use crate::error::ScrapeResult;
use crate::parse::SurfBreak;

/// Write breaks as a pretty-printed JSON array, the point file format.
pub fn save_json(breaks: &[SurfBreak], path: &Path) -> ScrapeResult<()> {
    let json = serde_json::to_string_pretty(breaks)?;
    std::fs::write(path, json)?;
    info!(count = breaks.len(), path = %path.display(), "Saved surf breaks to JSON");
    Ok(())
}

/// Write breaks as CSV with a header row. Returns `false` without creating
/// a file when there is nothing to write.
pub fn save_csv(breaks: &[SurfBreak], path: &Path) -> ScrapeResult<bool> {
    if breaks.is_empty() {
        warn!("No data to save to CSV");
        return Ok(false);
    }

    let mut writer = csv::Writer::from_path(path)?;
    for surf_break in breaks {
        writer.serialize(surf_break)?;
    }
    writer.flush()?;

    info!(count = breaks.len(), path = %path.display(), "Saved surf breaks to CSV");
    Ok(true)
}
