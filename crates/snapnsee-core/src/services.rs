use snapnsee_client::{HttpTransport, ProvidersClient, RecognitionClient};
use snapnsee_config::{Config, PathManager};
use snapnsee_models::{annotate_providers, AnnotatedProvider, Availability, MediaType};
use std::sync::Arc;
use crate::clock::{Clock, SystemClock};
use crate::error::PersistenceError;
use crate::preferences::PreferencesStore;
use crate::provider_cache::ProviderAvailabilityCache;
use crate::storage::JsonFileStorage;
use crate::watchlist::WatchlistStore;

/// Everything the presentation layer talks to, constructed once per process
pub struct Services {
    pub recognition: RecognitionClient,
    pub providers: Arc<ProviderAvailabilityCache>,
    pub watchlist: Arc<WatchlistStore>,
    pub preferences: Arc<PreferencesStore>,
}

/// Availability for one title, with provider badges for the user's services
#[derive(Debug, Clone)]
pub struct ProviderSummary {
    pub country: String,
    pub availability: Availability,
    pub providers: Vec<AnnotatedProvider>,
}

impl Services {
    pub fn open(config: &Config, paths: &PathManager, transport: Arc<dyn HttpTransport>) -> Result<Self, PersistenceError> {
        Self::open_with_clock(config, paths, transport, Arc::new(SystemClock))
    }

    pub fn open_with_clock(
        config: &Config,
        paths: &PathManager,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PersistenceError> {
        let recognition = RecognitionClient::new(&config.api, transport.clone());
        let source = Arc::new(ProvidersClient::new(&config.api, transport));
        let providers = ProviderAvailabilityCache::new(source, clock.clone());

        let watchlist = WatchlistStore::open(JsonFileStorage::new(paths.watchlist_file()), clock.clone())?;
        let preferences = PreferencesStore::open(JsonFileStorage::new(paths.preferences_file()), clock)?
            .with_default_country(&config.providers.country);

        Ok(Self {
            recognition,
            providers: Arc::new(providers),
            watchlist: Arc::new(watchlist),
            preferences: Arc::new(preferences),
        })
    }

    /// Look up where a title streams. Without an explicit country the
    /// user's preferred country is used, which starts out as the configured
    /// `[providers] country`.
    pub async fn provider_summary(
        &self,
        media_id: &str,
        media_type: MediaType,
        country: Option<&str>,
    ) -> Result<ProviderSummary, PersistenceError> {
        let preferences = self.preferences.get()?;
        let country = country.map(str::to_string).unwrap_or_else(|| preferences.country.clone());

        let availability = self.providers.lookup(media_id, media_type, &country).await;
        let providers = annotate_providers(availability.providers(), &preferences);

        Ok(ProviderSummary {
            country,
            availability,
            providers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapnsee_client::testing::{sample_png, ScriptedTransport};
    use snapnsee_models::{NewWatchlistEntry, WatchingStatus};
    use serde_json::json;

    fn setup() -> (tempfile::TempDir, Arc<ScriptedTransport>, Services) {
        setup_with(Config::default())
    }

    fn setup_with(mut config: Config) -> (tempfile::TempDir, Arc<ScriptedTransport>, Services) {
        let dir = tempfile::tempdir().unwrap();
        let paths = PathManager::from_base(dir.path().to_path_buf());
        config.api.base_url = "http://localhost:8000".to_string();

        let transport = Arc::new(ScriptedTransport::new());
        let services = Services::open(&config, &paths, transport.clone()).unwrap();
        (dir, transport, services)
    }

    #[tokio::test]
    async fn test_recognize_add_and_watch() {
        let (_dir, transport, services) = setup();
        transport.push_json(
            200,
            json!({
                "method": "text_extraction",
                "extracted_title": "Example Movie",
                "identified_media_id": "42",
                "media_type": "movie",
                "match_confidence": 0.87,
                "tmdb_match": {
                    "id": 42,
                    "title": "Example Movie",
                    "release_date": "2021-05-01",
                    "poster_path": "/poster.jpg"
                }
            }),
        );

        let result = services.recognition.recognize(&sample_png()).await.unwrap();
        assert_eq!(result.media_id, "42");
        assert_eq!(result.match_confidence, 0.87);

        let added = services
            .watchlist
            .add(NewWatchlistEntry::from_recognition(&result), WatchingStatus::ToWatch)
            .unwrap();
        assert!(added);
        assert!(services.watchlist.is_in_watchlist("42"));

        assert!(services.watchlist.mark_as_watched("42").unwrap());

        let watched = services.watchlist.watched();
        assert_eq!(watched.len(), 1);
        assert_eq!(watched[0].id, "42");
        assert_eq!(watched[0].title, "Example Movie");
        assert!(watched[0].watched_at.is_some());
    }

    #[tokio::test]
    async fn test_provider_summary_marks_subscribed_services() {
        let (_dir, transport, services) = setup();
        services.preferences.toggle_service("netflix").unwrap();
        services.preferences.set_country("gb").unwrap();
        transport.push_json(
            200,
            json!({"available": true, "providers": ["netflix", "hulu", "unlisted"], "country": "GB"}),
        );

        let summary = services.provider_summary("42", MediaType::Movie, None).await.unwrap();

        assert_eq!(summary.country, "GB");
        assert!(summary.availability.is_available());
        let badges: Vec<_> = summary.providers.iter().map(|p| (p.service.id, p.subscribed)).collect();
        assert_eq!(badges, vec![("netflix", true), ("hulu", false)]);
        assert!(transport.requests()[0].url.ends_with("/movie/42?country=GB"));
    }

    #[tokio::test]
    async fn test_provider_summary_explicit_country_and_unavailable() {
        let (_dir, transport, services) = setup();
        transport.push_json(200, json!({"available": false, "providers": [], "country": "DE"}));

        let summary = services
            .provider_summary("7", MediaType::Tv, Some("DE"))
            .await
            .unwrap();

        assert_eq!(summary.availability, Availability::Unavailable);
        assert!(summary.providers.is_empty());
        assert!(transport.requests()[0].url.ends_with("/tv/7?country=DE"));
    }

    #[tokio::test]
    async fn test_configured_country_is_default_lookup_country() {
        let mut config = Config::default();
        config.providers.country = "GB".to_string();
        let (_dir, transport, services) = setup_with(config);
        transport.push_json(200, json!({"available": true, "providers": ["netflix"], "country": "GB"}));

        let summary = services.provider_summary("42", MediaType::Movie, None).await.unwrap();

        assert_eq!(summary.country, "GB");
        assert!(transport.requests()[0].url.ends_with("/movie/42?country=GB"));
        assert_eq!(services.preferences.get().unwrap().country, "GB");
    }

    #[tokio::test]
    async fn test_preferred_country_overrides_configured_country() {
        let mut config = Config::default();
        config.providers.country = "GB".to_string();
        let (_dir, transport, services) = setup_with(config);
        services.preferences.set_country("DE").unwrap();
        transport.push_json(200, json!({"available": false, "providers": [], "country": "DE"}));

        let summary = services.provider_summary("42", MediaType::Movie, None).await.unwrap();

        assert_eq!(summary.country, "DE");
        assert!(transport.requests()[0].url.ends_with("?country=DE"));
    }
}
