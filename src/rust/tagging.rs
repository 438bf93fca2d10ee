use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;

use crate::classifier::Tag;
use crate::config::ServiceConfig;
use crate::upload::ImageUpload;

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, thiserror::Error)]
pub enum TaggingError {
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Service returned {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// The generated caption for an image
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Caption {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub confidence: f32,
}

/// Everything the classifier and presenters need from one analyze call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageAnalysis {
    /// Tags in the order the service returned them
    pub tags: Vec<Tag>,
    pub caption: Option<Caption>,
    pub request_id: Option<String>,
    pub model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    description: Option<AnalyzeDescription>,
    #[serde(default)]
    request_id: Option<String>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeDescription {
    #[serde(default)]
    captions: Vec<Caption>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Error bodies come either wrapped as `{"error": {...}}` or flat.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Wrapped { error: ErrorDetail },
    Flat(ErrorDetail),
}

/// Parses a successful analyze response body
pub fn parse_analysis(body: &str) -> Result<ImageAnalysis, TaggingError> {
    let response: AnalyzeResponse = serde_json::from_str(body)
        .map_err(|e| TaggingError::InvalidResponse(e.to_string()))?;

    Ok(ImageAnalysis {
        tags: response.tags,
        caption: response
            .description
            .and_then(|d| d.captions.into_iter().next()),
        request_id: response.request_id,
        model_version: response.model_version,
    })
}

/// Extracts a readable message from an error body, falling back to the raw text
fn api_error_message(body: &str) -> String {
    let detail = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody::Wrapped { error }) => error,
        Ok(ErrorBody::Flat(detail)) => detail,
        Err(_) => return body.trim().to_string(),
    };

    match (detail.code, detail.message) {
        (Some(code), Some(message)) => format!("{} ({})", message, code),
        (None, Some(message)) => message,
        (Some(code), None) => code,
        (None, None) => body.trim().to_string(),
    }
}

/// Client for the remote image tagging service
#[derive(Debug, Clone)]
pub struct TaggingClient {
    config: ServiceConfig,
    client: Client,
}

impl TaggingClient {
    pub fn new(config: ServiceConfig) -> Result<Self, TaggingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        log::info!("Tagging client ready for {}", config.analyze_url());
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Submits the raw image bytes and returns the detected tags and caption
    pub async fn analyze(&self, image: &ImageUpload) -> Result<ImageAnalysis, TaggingError> {
        let url = self.config.analyze_url();
        log::info!("Submitting '{}' ({} bytes) to {}", image.file_name(), image.len(), url);

        let response = self
            .client
            .post(&url)
            .query(&[("visualFeatures", self.config.visual_features.as_str())])
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.api_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image.bytes().to_vec())
            .send()
            .await?;

        let status = response.status();
        log::info!("Tagging response status: {}", status);
        let body = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body);
            log::error!("Tagging service error {}: {}", status, message);
            return Err(TaggingError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let analysis = parse_analysis(&body)?;
        log::debug!(
            "Received {} tags (request id {:?}, model {:?})",
            analysis.tags.len(),
            analysis.request_id,
            analysis.model_version
        );
        Ok(analysis)
    }
}
