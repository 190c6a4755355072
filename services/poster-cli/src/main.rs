//! Surf break poster command line.
//!
//! Renders posters from a point file and a base map, and drives the AI
//! pipeline end to end:
//! - `render`: overlay breaks on an existing base map
//! - `generate-map`: generate AI base maps only
//! - `pipeline`, `custom`, `collection`, `batch`: AI map plus overlay
//! - `status`: pipeline directories and counts

mod config;
mod pipeline;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use mapgen::{GenerationOptions, MapGenerator, MapStyle, Model};
use poster_common::{BoundingBox, PointStore};
use renderer::poster::DEFAULT_LEGEND_TITLE;
use renderer::{save_poster, FsFontProvider, PosterRenderer, RenderOptions, StyleId};

use config::BatchConfig;
use pipeline::{AiPosterPipeline, PipelineStatus, DEFAULT_COLLECTION_NAME, TEMPLATES_DIR};

#[derive(Parser, Debug)]
#[command(name = "poster")]
#[command(about = "Florida surf break poster generator")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Surf break point file (JSON)
    #[arg(long, global = true, env = "POSTER_DATA_PATH", default_value = "florida_surf_breaks.json")]
    data: PathBuf,

    /// Extra directory searched for style fonts
    #[arg(long, global = true, env = "POSTER_FONT_DIR")]
    font_dir: Option<PathBuf>,

    /// Map extent as min_lat,max_lat,min_lon,max_lon
    #[arg(long, global = true)]
    bbox: Option<String>,

    /// Replicate API token
    #[arg(long, global = true, env = "REPLICATE_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Overlay surf breaks on an existing base map
    Render {
        /// Base map image
        #[arg(long, default_value = "florida.png")]
        base: PathBuf,

        /// Output poster path; format follows the extension
        #[arg(short, long, default_value = "florida_surf_breaks_poster.png")]
        output: PathBuf,

        /// Poster style
        #[arg(short, long, default_value = "classic")]
        style: StyleId,

        /// Title drawn across the top
        #[arg(short, long)]
        title: Option<String>,

        /// Legend heading
        #[arg(long, default_value = DEFAULT_LEGEND_TITLE)]
        legend_title: String,

        /// Seed for the noise effect
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate AI base maps without overlays
    GenerateMap {
        /// Map style; every style when omitted
        #[arg(short, long)]
        style: Option<MapStyle>,

        #[command(flatten)]
        generation: GenerationArgs,

        /// Output path for a single map
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate an AI map and overlay the breaks
    Pipeline {
        #[arg(short, long, default_value = "classic")]
        map_style: MapStyle,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(long)]
        output_name: Option<String>,

        /// Override the overlay style picked for the map style
        #[arg(long)]
        poster_style: Option<StyleId>,

        #[command(flatten)]
        generation: GenerationArgs,
    },

    /// Generate a map from a custom prompt and overlay the breaks
    Custom {
        #[arg(short, long)]
        prompt: String,

        #[arg(short, long)]
        title: String,

        #[arg(long)]
        output_name: String,

        #[arg(long, default_value = "classic")]
        poster_style: StyleId,

        #[command(flatten)]
        generation: GenerationArgs,
    },

    /// Generate one poster per map style
    Collection {
        #[arg(short, long, default_value = DEFAULT_COLLECTION_NAME)]
        name: String,

        /// Comma-separated map styles; every style when omitted
        #[arg(long, value_delimiter = ',')]
        styles: Vec<MapStyle>,

        #[command(flatten)]
        generation: GenerationArgs,
    },

    /// Run pipeline jobs from a YAML file
    Batch {
        #[arg(short, long, default_value = "jobs.yaml")]
        config: PathBuf,
    },

    /// Show pipeline directories and generated file counts
    Status,
}

#[derive(clap::Args, Debug)]
struct GenerationArgs {
    #[arg(long, default_value = "1024")]
    width: u32,

    #[arg(long, default_value = "1024")]
    height: u32,

    #[arg(long, default_value = "flux-schnell")]
    model: Model,
}

impl GenerationArgs {
    fn options(&self) -> GenerationOptions {
        GenerationOptions {
            width: self.width,
            height: self.height,
            model: self.model,
        }
    }
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
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder().with_max_level(level);
    if args.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    let bbox = match &args.bbox {
        Some(s) => BoundingBox::from_arg_string(s).context("Invalid --bbox")?,
        None => BoundingBox::FLORIDA,
    };

    match &args.command {
        Command::Render {
            base,
            output,
            style,
            title,
            legend_title,
            seed,
        } => {
            let options = RenderOptions {
                title: title.clone(),
                legend_title: legend_title.clone(),
                noise_seed: *seed,
            };
            render(&args, &bbox, base, output, *style, &options)
        }

        Command::GenerateMap {
            style,
            generation,
            output,
        } => {
            let generator = map_generator(&args)?;
            let options = generation.options();
            match style {
                Some(style) => {
                    let path = generator
                        .generate(*style, &options, output.as_deref())
                        .await?;
                    info!(path = %path.display(), "Map saved");
                }
                None => {
                    if output.is_some() {
                        warn!("--output is ignored when generating every style");
                    }
                    let maps = generator
                        .generate_all(Path::new(TEMPLATES_DIR), &options)
                        .await?;
                    for (style, path) in &maps {
                        info!(style, path = %path.display(), "Map saved");
                    }
                }
            }
            Ok(())
        }

        Command::Pipeline {
            map_style,
            title,
            output_name,
            poster_style,
            generation,
        } => {
            let pipeline = ai_pipeline(&args, bbox)?;
            let title = title
                .clone()
                .unwrap_or_else(|| pipeline::edition_title(DEFAULT_LEGEND_TITLE, *map_style));
            let path = pipeline
                .generate_single(
                    *map_style,
                    &title,
                    output_name.as_deref(),
                    *poster_style,
                    &generation.options(),
                )
                .await?;
            info!(path = %path.display(), "Poster saved");
            Ok(())
        }

        Command::Custom {
            prompt,
            title,
            output_name,
            poster_style,
            generation,
        } => {
            let pipeline = ai_pipeline(&args, bbox)?;
            let path = pipeline
                .generate_custom(prompt, title, output_name, *poster_style, &generation.options())
                .await?;
            info!(path = %path.display(), "Poster saved");
            Ok(())
        }

        Command::Collection {
            name,
            styles,
            generation,
        } => {
            let pipeline = ai_pipeline(&args, bbox)?;
            let posters = pipeline
                .generate_collection(name, styles, &generation.options())
                .await;
            for (style, path) in &posters {
                info!(style, path = %path.display(), "Poster saved");
            }
            if posters.is_empty() {
                anyhow::bail!("No posters were generated");
            }
            Ok(())
        }

        Command::Batch { config } => {
            let batch = BatchConfig::load(config)?;
            if batch.jobs.is_empty() {
                warn!(path = %config.display(), "Batch file has no jobs");
                return Ok(());
            }
            let pipeline = ai_pipeline(&args, bbox)?;
            let report = pipeline.run_batch(&batch.jobs).await;
            if report.posters.is_empty() {
                anyhow::bail!("All {} batch jobs failed", report.failed);
            }
            Ok(())
        }

        Command::Status => {
            let status = PipelineStatus::collect(Path::new("."));
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        }
    }
}

fn poster_renderer(args: &Args) -> PosterRenderer {
    let fonts = FsFontProvider::with_system_dirs(args.font_dir.clone());
    PosterRenderer::new(fonts)
}

fn map_generator(args: &Args) -> Result<MapGenerator> {
    MapGenerator::new(args.api_token.clone()).context(
        "A Replicate API token is required: set REPLICATE_API_TOKEN or pass --api-token",
    )
}

fn load_points(args: &Args) -> Result<PointStore> {
    let points = PointStore::load(&args.data)
        .with_context(|| format!("Failed to load surf breaks from {}", args.data.display()))?;
    if points.is_empty() {
        warn!(path = %args.data.display(), "No valid surf breaks; the poster will have no markers");
    }
    Ok(points)
}

fn ai_pipeline(args: &Args, bbox: BoundingBox) -> Result<AiPosterPipeline> {
    let pipeline = AiPosterPipeline::new(
        map_generator(args)?,
        poster_renderer(args),
        load_points(args)?,
        bbox,
        Path::new("."),
    )?;
    Ok(pipeline)
}

fn render(
    args: &Args,
    bbox: &BoundingBox,
    base: &Path,
    output: &Path,
    style: StyleId,
    options: &RenderOptions,
) -> Result<()> {
    let points = load_points(args)?;
    let renderer = poster_renderer(args);

    info!(style = %style, base = %base.display(), points = points.len(), "Rendering poster");
    let poster = renderer.render_file(base, &points, bbox, style.as_str(), options)?;
    save_poster(&poster.image, output)
        .with_context(|| format!("Failed to save poster to {}", output.display()))?;

    info!(
        path = %output.display(),
        placed = poster.summary.placed,
        skipped = poster.summary.skipped,
        "Poster saved"
    );
    Ok(())
}
