use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use snapnsee_config::ApiConfig;
use snapnsee_models::{Availability, MediaType};
use std::sync::Arc;
use tracing::{debug, warn};
use crate::transport::HttpTransport;

/// Body of a 200 from the providers endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderResponse {
    pub available: bool,
    pub providers: Vec<String>,
    pub country: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// Something that can answer "where can I stream this?"
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    async fn fetch_availability(&self, media_id: &str, media_type: MediaType, country: &str) -> Availability;
}

/// Uncached lookups against `/api/v1/providers/{media_type}/{media_id}`
#[derive(Clone)]
pub struct ProvidersClient {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
}

impl ProvidersClient {
    pub fn new(api: &ApiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            endpoint: api.providers_endpoint(),
        }
    }

    fn lookup_url(&self, media_id: &str, media_type: MediaType, country: &str) -> Option<Url> {
        let raw = format!(
            "{}/{}/{}",
            self.endpoint,
            media_type.as_str(),
            urlencoding::encode(media_id)
        );
        let mut url = Url::parse(&raw).ok()?;
        url.query_pairs_mut().append_pair("country", country);
        Some(url)
    }
}

#[async_trait]
impl AvailabilitySource for ProvidersClient {
    async fn fetch_availability(&self, media_id: &str, media_type: MediaType, country: &str) -> Availability {
        let Some(url) = self.lookup_url(media_id, media_type, country) else {
            return Availability::Error("Invalid URL".to_string());
        };

        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(media_id, error = %e, "Provider lookup failed");
                return Availability::Unknown;
            }
        };

        match response.status {
            200 => {}
            404 => return Availability::Unavailable,
            status => return Availability::Error(format!("HTTP {}", status)),
        }

        let body: ProviderResponse = match serde_json::from_slice(&response.body) {
            Ok(body) => body,
            Err(e) => {
                warn!(media_id, error = %e, "Provider response could not be decoded");
                return Availability::Unknown;
            }
        };

        if !body.available || body.providers.is_empty() {
            debug!(media_id, country = %body.country, "No providers");
            return Availability::Unavailable;
        }

        debug!(media_id, providers = body.providers.len(), "Providers found");
        Availability::Available(body.providers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use serde_json::json;

    fn client(transport: Arc<ScriptedTransport>) -> ProvidersClient {
        let api = ApiConfig { base_url: "http://localhost:8000".to_string() };
        ProvidersClient::new(&api, transport)
    }

    #[tokio::test]
    async fn test_available_returns_provider_ids() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(200, json!({"available": true, "providers": ["netflix", "hulu"], "country": "US"}));

        let availability = client(transport.clone())
            .fetch_availability("42", MediaType::Movie, "US")
            .await;

        assert_eq!(availability, Availability::Available(vec!["netflix".to_string(), "hulu".to_string()]));
        assert_eq!(
            transport.requests()[0].url,
            "http://localhost:8000/api/v1/providers/movie/42?country=US"
        );
    }

    #[tokio::test]
    async fn test_not_available_or_empty_is_unavailable() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_json(200, json!({"available": false, "providers": [], "country": "US"}));
        transport.push_json(200, json!({"available": true, "providers": [], "country": "US"}));
        let client = client(transport);

        assert_eq!(client.fetch_availability("1", MediaType::Tv, "US").await, Availability::Unavailable);
        assert_eq!(client.fetch_availability("1", MediaType::Tv, "US").await, Availability::Unavailable);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(404, "");
        transport.push_response(503, "");
        let client = client(transport);

        assert_eq!(client.fetch_availability("1", MediaType::Movie, "US").await, Availability::Unavailable);
        assert_eq!(
            client.fetch_availability("1", MediaType::Movie, "US").await,
            Availability::Error("HTTP 503".to_string())
        );
    }

    #[tokio::test]
    async fn test_transport_and_decode_failures_are_unknown() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_failure("connection reset");
        transport.push_response(200, "<html>");
        let client = client(transport);

        assert_eq!(client.fetch_availability("1", MediaType::Movie, "US").await, Availability::Unknown);
        assert_eq!(client.fetch_availability("1", MediaType::Movie, "US").await, Availability::Unknown);
    }

    #[tokio::test]
    async fn test_media_id_and_country_are_encoded() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_response(404, "");

        client(transport.clone())
            .fetch_availability("a b/c", MediaType::Tv, "GB")
            .await;

        assert_eq!(
            transport.requests()[0].url,
            "http://localhost:8000/api/v1/providers/tv/a%20b%2Fc?country=GB"
        );
    }

    #[tokio::test]
    async fn test_malformed_endpoint_is_error() {
        let transport = Arc::new(ScriptedTransport::new());
        let api = ApiConfig { base_url: "::nope".to_string() };
        let client = ProvidersClient::new(&api, transport.clone());

        assert_eq!(
            client.fetch_availability("1", MediaType::Movie, "US").await,
            Availability::Error("Invalid URL".to_string())
        );
        assert_eq!(transport.request_count(), 0);
    }
}
