use reqwest::Url;
use serde::Deserialize;
use snapnsee_config::ApiConfig;
use snapnsee_models::RecognitionResult;
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::error::RecognitionError;
use crate::jpeg::encode_jpeg;
use crate::transport::{FilePart, HttpTransport};

const NOT_FOUND_FALLBACK: &str = "Could not identify the media";

/// Body the service attaches to a 404
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: String,
}

/// Sends captured images to the recognition endpoint.
///
/// Stateless: every call is a single attempt and concurrent calls do not
/// interact.
#[derive(Clone)]
pub struct RecognitionClient {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
}

impl RecognitionClient {
    pub fn new(api: &ApiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            endpoint: api.recognize_endpoint(),
        }
    }

    pub async fn recognize(&self, image_bytes: &[u8]) -> Result<RecognitionResult, RecognitionError> {
        let jpeg = encode_jpeg(image_bytes).map_err(RecognitionError::InvalidImage)?;
        let url = Url::parse(&self.endpoint)
            .map_err(|_| RecognitionError::InvalidUrl(self.endpoint.clone()))?;

        let file = FilePart {
            field_name: "file".to_string(),
            file_name: "image.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: jpeg,
        };
        debug!(endpoint = %url, bytes = file.bytes.len(), "Uploading image for recognition");

        let response = self.transport.post_file(&url, file).await?;

        match response.status {
            200 => {
                let result: RecognitionResult =
                    serde_json::from_slice(&response.body).map_err(RecognitionError::Decode)?;
                info!(
                    media_id = %result.media_id,
                    confidence = result.match_confidence,
                    "Recognized media"
                );
                Ok(result)
            }
            404 => {
                let detail = serde_json::from_slice::<ApiErrorBody>(&response.body)
                    .map(|body| body.detail)
                    .unwrap_or_else(|_| NOT_FOUND_FALLBACK.to_string());
                debug!(detail = %detail, "Recognition found no match");
                Err(RecognitionError::NotFound(detail))
            }
            status => {
                warn!(status, "Recognition request failed");
                Err(RecognitionError::Server(status))
            }
        }
    }
}
