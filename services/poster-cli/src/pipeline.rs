//! AI map to finished poster pipeline.
//!
//! Each job generates a base map through the map generator, then overlays
//! the surf breaks with the poster renderer. Jobs run one at a time.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mapgen::{GenerationOptions, MapGenError, MapGenerator, MapStyle, Model};
use poster_common::{BoundingBox, PointStore, PosterError, PosterResult};
use renderer::{save_poster, PosterRenderer, RenderOptions, StyleId};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::config::JobConfig;

pub const TEMPLATES_DIR: &str = "ai_generated_templates";
pub const POSTERS_DIR: &str = "ai_generated_posters";

pub const DEFAULT_COLLECTION_NAME: &str = "Florida Surf Collection";

/// Overlay style used for maps of each generated style.
pub fn poster_style_for(map_style: MapStyle) -> StyleId {
    match map_style {
        MapStyle::Classic | MapStyle::Watercolor | MapStyle::Botanical => StyleId::Classic,
        MapStyle::Vintage | MapStyle::Retro | MapStyle::ArtDeco => StyleId::Vintage,
        MapStyle::Minimalist => StyleId::Minimalist,
    }
}

/// `"<collection> - <Style> Edition"`, e.g. `"Surf - Art_Deco Edition"`.
pub fn edition_title(collection: &str, map_style: MapStyle) -> String {
    format!("{} - {} Edition", collection, title_word(map_style.as_str()))
}

/// Uppercase every letter that follows a non-letter.
fn title_word(text: &str) -> String {
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

fn map_error(e: MapGenError) -> PosterError {
    match e {
        MapGenError::Io(io) => PosterError::Io(io),
        other => PosterError::Network(other.to_string()),
    }
}

/// Directory and count summary printed by `status`.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStatus {
    pub templates_directory: PathBuf,
    pub output_directory: PathBuf,
    pub available_ai_styles: Vec<&'static str>,
    pub available_poster_styles: Vec<&'static str>,
    pub available_models: Vec<&'static str>,
    pub templates_generated: usize,
    pub posters_generated: usize,
}

impl PipelineStatus {
    /// Inspect the pipeline directories under `root`. Missing directories
    /// count as empty.
    pub fn collect(root: &Path) -> Self {
        let templates_directory = root.join(TEMPLATES_DIR);
        let output_directory = root.join(POSTERS_DIR);

        Self {
            templates_generated: count_png(&templates_directory),
            posters_generated: count_png(&output_directory),
            templates_directory,
            output_directory,
            available_ai_styles: MapStyle::ALL.iter().map(MapStyle::as_str).collect(),
            available_poster_styles: StyleId::ALL.iter().map(StyleId::as_str).collect(),
            available_models: Model::ALL.iter().map(Model::name).collect(),
        }
    }
}

fn count_png(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("png"))
        })
        .count()
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub posters: Vec<PathBuf>,
    pub failed: usize,
}

pub struct AiPosterPipeline {
    generator: MapGenerator,
    renderer: PosterRenderer,
    points: PointStore,
    bbox: BoundingBox,
    templates_dir: PathBuf,
    output_dir: PathBuf,
}

impl AiPosterPipeline {
    /// Create the pipeline and its template and poster directories under
    /// `root`.
    pub fn new(
        generator: MapGenerator,
        renderer: PosterRenderer,
        points: PointStore,
        bbox: BoundingBox,
        root: &Path,
    ) -> PosterResult<Self> {
        let templates_dir = root.join(TEMPLATES_DIR);
        let output_dir = root.join(POSTERS_DIR);
        std::fs::create_dir_all(&templates_dir)?;
        std::fs::create_dir_all(&output_dir)?;

        info!(
            templates = %templates_dir.display(),
            posters = %output_dir.display(),
            points = points.len(),
            "AI poster pipeline initialized"
        );

        Ok(Self {
            generator,
            renderer,
            points,
            bbox,
            templates_dir,
            output_dir,
        })
    }

    /// Generate a map in `map_style` and overlay the breaks. The poster
    /// style defaults through [`poster_style_for`]; the output name defaults
    /// to `ai_poster_<style>`.
    #[instrument(skip(self, map_style, title, output_name, poster_style, options), fields(style = %map_style))]
    pub async fn generate_single(
        &self,
        map_style: MapStyle,
        title: &str,
        output_name: Option<&str>,
        poster_style: Option<StyleId>,
        options: &GenerationOptions,
    ) -> PosterResult<PathBuf> {
        let output_name = output_name
            .map(str::to_string)
            .unwrap_or_else(|| format!("ai_poster_{}", map_style));
        let template_path = self
            .templates_dir
            .join(format!("template_{}.png", map_style));

        info!("Generating AI map template");
        let map_path = self
            .generator
            .generate(map_style, options, Some(&template_path))
            .await
            .map_err(map_error)?;

        let poster_style = poster_style.unwrap_or_else(|| poster_style_for(map_style));
        let poster_path = self.output_dir.join(format!("{}.png", output_name));
        self.overlay(&map_path, &poster_path, poster_style, title)?;

        info!(path = %poster_path.display(), "AI poster complete");
        Ok(poster_path)
    }

    /// Generate one poster per style, titled `"<name> - <Style> Edition"`.
    /// Failed styles are logged and left out of the result.
    pub async fn generate_collection(
        &self,
        collection_name: &str,
        styles: &[MapStyle],
        options: &GenerationOptions,
    ) -> BTreeMap<&'static str, PathBuf> {
        let styles = if styles.is_empty() {
            &MapStyle::ALL[..]
        } else {
            styles
        };
        info!(collection = collection_name, count = styles.len(), "Generating poster collection");

        let mut posters = BTreeMap::new();
        for &style in styles {
            let title = edition_title(collection_name, style);
            let output_name = format!("collection_{}_poster", style);

            match self
                .generate_single(style, &title, Some(&output_name), None, options)
                .await
            {
                Ok(path) => {
                    posters.insert(style.as_str(), path);
                }
                Err(e) => {
                    error!(style = %style, error = %e, code = e.code(), "Failed to generate collection poster");
                }
            }
        }

        info!(generated = posters.len(), "Collection complete");
        posters
    }

    /// Generate a map from a free-form prompt and overlay the breaks.
    #[instrument(skip(self, prompt, title, options))]
    pub async fn generate_custom(
        &self,
        prompt: &str,
        title: &str,
        output_name: &str,
        poster_style: StyleId,
        options: &GenerationOptions,
    ) -> PosterResult<PathBuf> {
        let template_path = self
            .templates_dir
            .join(format!("custom_{}_template.png", output_name));

        let map_path = self
            .generator
            .generate_custom(prompt, output_name, options, Some(&template_path))
            .await
            .map_err(map_error)?;

        let poster_path = self.output_dir.join(format!("custom_{}.png", output_name));
        self.overlay(&map_path, &poster_path, poster_style, title)?;

        info!(path = %poster_path.display(), "Custom poster complete");
        Ok(poster_path)
    }

    /// Run every job in order. A failed job is logged and skipped.
    pub async fn run_batch(&self, jobs: &[JobConfig]) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, job) in jobs.iter().enumerate() {
            let title = job
                .title
                .clone()
                .unwrap_or_else(|| edition_title(renderer::poster::DEFAULT_LEGEND_TITLE, job.map_style));
            let output_name = job.output_name();

            let result = self
                .generate_single(
                    job.map_style,
                    &title,
                    Some(&output_name),
                    Some(job.poster_style()),
                    &job.generation_options(),
                )
                .await;

            match result {
                Ok(path) => report.posters.push(path),
                Err(e) => {
                    error!(index, style = %job.map_style, error = %e, code = e.code(), "Batch job failed");
                    report.failed += 1;
                }
            }
        }

        info!(
            succeeded = report.posters.len(),
            failed = report.failed,
            "Batch complete"
        );
        report
    }

    fn overlay(
        &self,
        map_path: &Path,
        poster_path: &Path,
        style: StyleId,
        title: &str,
    ) -> PosterResult<()> {
        let options = RenderOptions {
            title: Some(title.to_string()),
            ..Default::default()
        };
        let poster =
            self.renderer
                .render_file(map_path, &self.points, &self.bbox, style.as_str(), &options)?;
        save_poster(&poster.image, poster_path)?;
        Ok(())
    }
}
