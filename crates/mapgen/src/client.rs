//! Replicate predictions client.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::{error, info, instrument, warn};

use crate::error::{MapGenError, MapGenResult};
use crate::model::Model;
use crate::prompt::{build_custom_prompt, build_prompt, MapStyle};

/// Environment variable holding the API token.
pub const API_TOKEN_ENV: &str = "REPLICATE_API_TOKEN";

pub const DEFAULT_API_BASE: &str = "https://api.replicate.com/v1";

/// Timeout for downloading the generated image.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// `Prefer: wait` holds the request open until the prediction finishes, so
/// the API call itself gets a generous timeout.
const PREDICTION_TIMEOUT: Duration = Duration::from_secs(300);

const OUTPUT_QUALITY: u32 = 95;
const GUIDANCE: f32 = 7.5;

/// Size and model of a generated map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub width: u32,
    pub height: u32,
    pub model: Model,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            model: Model::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
    num_outputs: u32,
    quality: u32,
    guidance: f32,
}

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    input: PredictionInput<'a>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// First image URL in a prediction output: either a list of URLs or a
/// single URL string.
pub fn parse_output_url(output: &Value) -> Option<String> {
    let url = match output {
        Value::Array(items) => items.first().and_then(Value::as_str),
        Value::String(url) => Some(url.as_str()),
        _ => None,
    }?;
    let url = url.trim();
    (!url.is_empty()).then(|| url.to_string())
}

/// Generates Florida base maps through the Replicate API. Requests are
/// sent one at a time with no retry.
pub struct MapGenerator {
    client: Client,
    api_token: String,
    api_base: String,
}

impl MapGenerator {
    /// Use `api_token` if given, otherwise `REPLICATE_API_TOKEN`.
    pub fn new(api_token: Option<String>) -> MapGenResult<Self> {
        let token = api_token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| std::env::var(API_TOKEN_ENV).ok())
            .filter(|t| !t.trim().is_empty())
            .ok_or(MapGenError::MissingToken)?;

        let client = Client::builder()
            .timeout(PREDICTION_TIMEOUT)
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        let preview: String = token.chars().take(4).collect();
        info!(token_prefix = %preview, "Map generator ready");

        Ok(Self {
            client,
            api_token: token,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Point the client at another API root, e.g. a local mock.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn available_models(&self) -> Vec<&'static str> {
        Model::ALL.iter().map(Model::name).collect()
    }

    pub fn available_styles(&self) -> Vec<&'static str> {
        MapStyle::ALL.iter().map(MapStyle::as_str).collect()
    }

    /// Generate a map in `style` and save it to `save_path`, or to
    /// `florida_map_<style>.png` in the working directory.
    #[instrument(skip(self, style, options, save_path), fields(style = %style, model = %options.model))]
    pub async fn generate(
        &self,
        style: MapStyle,
        options: &GenerationOptions,
        save_path: Option<&Path>,
    ) -> MapGenResult<PathBuf> {
        let prompt = build_prompt(style);
        let path = save_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(style.default_file_name()));

        info!(width = options.width, height = options.height, "Generating map");
        match self.run_prediction(&prompt, options, &path).await {
            Ok(path) => {
                info!(path = %path.display(), "Generated map");
                Ok(path)
            }
            Err(e) => {
                error!(error = %e, "Map generation failed");
                Err(e)
            }
        }
    }

    /// Generate a map from a free-form prompt. `name` names the default
    /// output file.
    #[instrument(skip(self, prompt, options, save_path), fields(model = %options.model))]
    pub async fn generate_custom(
        &self,
        prompt: &str,
        name: &str,
        options: &GenerationOptions,
        save_path: Option<&Path>,
    ) -> MapGenResult<PathBuf> {
        let prompt = build_custom_prompt(prompt);
        let path = save_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(format!("florida_map_{}.png", name)));

        info!("Generating custom map");
        self.run_prediction(&prompt, options, &path).await
    }

    /// Generate every style into `output_dir`, skipping styles that fail.
    pub async fn generate_all(
        &self,
        output_dir: &Path,
        options: &GenerationOptions,
    ) -> MapGenResult<BTreeMap<&'static str, PathBuf>> {
        fs::create_dir_all(output_dir).await?;

        let mut generated = BTreeMap::new();
        for style in MapStyle::ALL {
            let path = output_dir.join(style.default_file_name());
            match self.generate(style, options, Some(&path)).await {
                Ok(path) => {
                    generated.insert(style.as_str(), path);
                }
                Err(e) => {
                    warn!(style = %style, error = %e, "Skipping style");
                }
            }
        }

        info!(
            count = generated.len(),
            dir = %output_dir.display(),
            "Generated map templates"
        );
        Ok(generated)
    }

    async fn run_prediction(
        &self,
        prompt: &str,
        options: &GenerationOptions,
        save_path: &Path,
    ) -> MapGenResult<PathBuf> {
        let url = self.prediction_url(options.model);
        let body = PredictionRequest {
            version: options.model.version(),
            input: PredictionInput {
                prompt,
                width: options.width,
                height: options.height,
                num_outputs: 1,
                quality: OUTPUT_QUALITY,
                guidance: GUIDANCE,
            },
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MapGenError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let prediction: Prediction = response.json().await?;
        if let Some(err) = prediction.error.filter(|e| !e.is_null()) {
            return Err(MapGenError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            });
        }

        let image_url = prediction
            .output
            .as_ref()
            .and_then(parse_output_url)
            .ok_or_else(|| {
                warn!(status = ?prediction.status, "Prediction finished without output");
                MapGenError::EmptyOutput
            })?;

        self.download_image(&image_url, save_path).await?;
        Ok(save_path.to_path_buf())
    }

    fn prediction_url(&self, model: Model) -> String {
        match model.version() {
            Some(_) => format!("{}/predictions", self.api_base),
            None => format!("{}/models/{}/predictions", self.api_base, model.model_path()),
        }
    }

    async fn download_image(&self, url: &str, save_path: &Path) -> MapGenResult<()> {
        let response = self
            .client
            .get(url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;

        if let Some(parent) = save_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(save_path, &bytes).await?;

        info!(path = %save_path.display(), bytes = bytes.len(), "Downloaded map image");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn generator() -> MapGenerator {
        MapGenerator::new(Some("r8_test_token".to_string())).unwrap()
    }

    #[test]
    fn test_parse_output_list() {
        let output = json!(["https://example.com/a.png", "https://example.com/b.png"]);
        assert_eq!(
            parse_output_url(&output).as_deref(),
            Some("https://example.com/a.png")
        );
    }

    #[test]
    fn test_parse_output_string() {
        let output = json!("https://example.com/only.png");
        assert_eq!(
            parse_output_url(&output).as_deref(),
            Some("https://example.com/only.png")
        );
    }

    #[test]
    fn test_parse_output_empty() {
        assert_eq!(parse_output_url(&json!([])), None);
        assert_eq!(parse_output_url(&json!("")), None);
        assert_eq!(parse_output_url(&Value::Null), None);
        assert_eq!(parse_output_url(&json!({"url": "x"})), None);
    }

    #[test]
    fn test_prediction_urls() {
        let gen = generator().with_api_base("http://localhost:9000/v1/");
        assert_eq!(
            gen.prediction_url(Model::FluxSchnell),
            "http://localhost:9000/v1/models/black-forest-labs/flux-schnell/predictions"
        );
        assert_eq!(
            gen.prediction_url(Model::Sdxl),
            "http://localhost:9000/v1/predictions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = PredictionRequest {
            version: Model::FluxDev.version(),
            input: PredictionInput {
                prompt: "map",
                width: 512,
                height: 768,
                num_outputs: 1,
                quality: OUTPUT_QUALITY,
                guidance: GUIDANCE,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("version").is_none());
        assert_eq!(value["input"]["width"], 512);
        assert_eq!(value["input"]["quality"], 95);
        assert_eq!(value["input"]["guidance"], 7.5);
        assert_eq!(value["input"]["num_outputs"], 1);
    }

    #[test]
    fn test_explicit_token_wins() {
        let gen = generator();
        assert_eq!(gen.api_token, "r8_test_token");
        assert_eq!(gen.available_styles().len(), 7);
        assert_eq!(gen.available_models(), vec!["flux-schnell", "flux-dev", "sdxl"]);
    }
}
