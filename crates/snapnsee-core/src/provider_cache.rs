use chrono::{DateTime, Duration, Utc};
use snapnsee_client::AvailabilitySource;
use snapnsee_models::{Availability, MediaType};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use crate::clock::Clock;

/// How long a positive provider lookup stays valid
pub const CACHE_TTL_DAYS: i64 = 7;

struct CacheEntry {
    provider_ids: Vec<String>,
    cached_at: DateTime<Utc>,
}

/// In-memory, process-lifetime cache in front of an [`AvailabilitySource`].
///
/// Only `Available` results are cached; `Unavailable`, `Unknown` and `Error`
/// are re-queried on every lookup. Entries are keyed by media id alone, so a
/// hit ignores the media type and country of the request. Expired entries are
/// evicted when they are next read.
///
/// The map lock is never held across a fetch. Two lookups racing on the same
/// cold key both go to the network; the later insert wins.
pub struct ProviderAvailabilityCache {
    source: Arc<dyn AvailabilitySource>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ProviderAvailabilityCache {
    pub fn new(source: Arc<dyn AvailabilitySource>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            clock,
            ttl: Duration::days(CACHE_TTL_DAYS),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub async fn lookup(&self, media_id: &str, media_type: MediaType, country: &str) -> Availability {
        if let Some(provider_ids) = self.cached(media_id).await {
            debug!(media_id, "Provider cache hit");
            return Availability::Available(provider_ids);
        }

        debug!(media_id, media_type = %media_type, country, "Provider cache miss");
        let availability = self.source.fetch_availability(media_id, media_type, country).await;

        if let Availability::Available(provider_ids) = &availability {
            let entry = CacheEntry {
                provider_ids: provider_ids.clone(),
                cached_at: self.clock.now(),
            };
            self.entries.lock().await.insert(media_id.to_string(), entry);
        }

        availability
    }

    /// Valid cached providers for `media_id`; drops the entry if it has expired
    pub async fn cached(&self, media_id: &str) -> Option<Vec<String>> {
        let mut entries = self.entries.lock().await;
        let entry = entries.get(media_id)?;

        if self.clock.now() - entry.cached_at < self.ttl {
            return Some(entry.provider_ids.clone());
        }

        debug!(media_id, cached_at = %entry.cached_at, "Provider cache entry expired");
        entries.remove(media_id);
        None
    }

    pub async fn clear_cache(&self) {
        self.entries.lock().await.clear();
    }

    /// Number of entries held, expired ones included until they are read
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use serde_json::json;
    use snapnsee_client::testing::ScriptedTransport;
    use snapnsee_client::ProvidersClient;
    use snapnsee_config::ApiConfig;

    struct Harness {
        transport: Arc<ScriptedTransport>,
        clock: Arc<ManualClock>,
        cache: ProviderAvailabilityCache,
    }

    fn harness() -> Harness {
        let transport = Arc::new(ScriptedTransport::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let api = ApiConfig { base_url: "http://localhost:8000".to_string() };
        let source = Arc::new(ProvidersClient::new(&api, transport.clone()));
        let cache = ProviderAvailabilityCache::new(source, clock.clone());
        Harness { transport, clock, cache }
    }

    fn available(providers: &[&str]) -> serde_json::Value {
        json!({"available": true, "providers": providers, "country": "US"})
    }

    #[tokio::test]
    async fn test_hit_skips_network() {
        let h = harness();
        h.transport.push_json(200, available(&["netflix"]));

        let first = h.cache.lookup("42", MediaType::Movie, "US").await;
        let second = h.cache.lookup("42", MediaType::Movie, "US").await;

        assert_eq!(first, Availability::Available(vec!["netflix".to_string()]));
        assert_eq!(second, first);
        assert_eq!(h.transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_entry_valid_until_seven_days() {
        let h = harness();
        h.transport.push_json(200, available(&["hulu"]));
        h.cache.lookup("42", MediaType::Movie, "US").await;

        h.clock.advance(Duration::days(CACHE_TTL_DAYS) - Duration::seconds(1));
        assert!(h.cache.lookup("42", MediaType::Movie, "US").await.is_available());
        assert_eq!(h.transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_entry_expires_at_seven_days() {
        let h = harness();
        h.transport.push_json(200, available(&["hulu"]));
        h.transport.push_json(200, available(&["prime"]));
        h.cache.lookup("42", MediaType::Movie, "US").await;

        h.clock.advance(Duration::days(CACHE_TTL_DAYS));
        let refreshed = h.cache.lookup("42", MediaType::Movie, "US").await;

        assert_eq!(refreshed, Availability::Available(vec!["prime".to_string()]));
        assert_eq!(h.transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_expired_entry_is_evicted_on_read() {
        let h = harness();
        h.transport.push_json(200, available(&["hulu"]));
        h.cache.lookup("42", MediaType::Movie, "US").await;
        assert_eq!(h.cache.len().await, 1);

        h.clock.advance(Duration::days(CACHE_TTL_DAYS + 1));
        assert_eq!(h.cache.len().await, 1);
        assert!(h.cache.cached("42").await.is_none());
        assert!(h.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_unavailable_is_not_cached() {
        let h = harness();
        h.transport.push_json(200, json!({"available": false, "providers": [], "country": "US"}));
        h.transport.push_json(200, json!({"available": false, "providers": [], "country": "US"}));

        assert_eq!(h.cache.lookup("7", MediaType::Tv, "US").await, Availability::Unavailable);
        assert!(h.cache.is_empty().await);
        assert_eq!(h.cache.lookup("7", MediaType::Tv, "US").await, Availability::Unavailable);
        assert_eq!(h.transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_unknown_is_not_cached() {
        let h = harness();
        h.transport.push_failure("offline");
        h.transport.push_json(200, available(&["starz"]));

        assert_eq!(h.cache.lookup("7", MediaType::Tv, "US").await, Availability::Unknown);
        assert!(h.cache.is_empty().await);
        assert!(h.cache.lookup("7", MediaType::Tv, "US").await.is_available());
        assert_eq!(h.transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_error_is_not_cached() {
        let h = harness();
        h.transport.push_response(500, "");

        assert_eq!(
            h.cache.lookup("7", MediaType::Tv, "US").await,
            Availability::Error("HTTP 500".to_string())
        );
        assert!(h.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_key_ignores_media_type_and_country() {
        let h = harness();
        h.transport.push_json(200, available(&["netflix"]));
        h.cache.lookup("42", MediaType::Movie, "US").await;

        let other_context = h.cache.lookup("42", MediaType::Tv, "GB").await;
        assert_eq!(other_context, Availability::Available(vec!["netflix".to_string()]));
        assert_eq!(h.transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let h = harness();
        h.transport.push_json(200, available(&["netflix"]));
        h.transport.push_json(200, available(&["netflix"]));
        h.cache.lookup("42", MediaType::Movie, "US").await;

        h.cache.clear_cache().await;
        assert!(h.cache.is_empty().await);
        h.cache.lookup("42", MediaType::Movie, "US").await;
        assert_eq!(h.transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_lookups_for_different_keys() {
        let h = harness();
        for _ in 0..5 {
            h.transport.push_json(200, available(&["netflix"]));
        }

        let ids: Vec<String> = (0..5).map(|i| i.to_string()).collect();
        let results = futures::future::join_all(
            ids.iter().map(|id| h.cache.lookup(id, MediaType::Movie, "US")),
        )
        .await;

        assert!(results.iter().all(Availability::is_available));
        assert_eq!(h.cache.len().await, 5);
    }
}
