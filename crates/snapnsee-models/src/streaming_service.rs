use serde::Serialize;
use crate::preferences::UserPreferences;

/// A streaming platform the client knows how to badge
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StreamingService {
    pub id: &'static str,
    pub name: &'static str,
    /// Brand color as a hex string without the leading '#'
    pub color: &'static str,
}

pub const STREAMING_SERVICES: &[StreamingService] = &[
    StreamingService { id: "netflix", name: "Netflix", color: "E50914" },
    StreamingService { id: "hulu", name: "Hulu", color: "1CE783" },
    StreamingService { id: "hbo", name: "HBO Max", color: "B31CF8" },
    StreamingService { id: "disney", name: "Disney+", color: "113CCF" },
    StreamingService { id: "prime", name: "Prime Video", color: "00A8E1" },
    StreamingService { id: "apple", name: "Apple TV+", color: "000000" },
    StreamingService { id: "paramount", name: "Paramount+", color: "0064FF" },
    StreamingService { id: "peacock", name: "Peacock", color: "000000" },
    StreamingService { id: "showtime", name: "Showtime", color: "D6182E" },
    StreamingService { id: "starz", name: "Starz", color: "000000" },
];

impl StreamingService {
    pub fn find(id: &str) -> Option<&'static StreamingService> {
        STREAMING_SERVICES.iter().find(|service| service.id == id)
    }
}

/// A provider badge: the service plus whether the user subscribes to it
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AnnotatedProvider {
    pub service: &'static StreamingService,
    pub subscribed: bool,
}

/// Match provider ids against the catalog and the user's selected services.
///
/// Ids missing from the catalog are dropped; order follows `provider_ids`.
pub fn annotate_providers(provider_ids: &[String], preferences: &UserPreferences) -> Vec<AnnotatedProvider> {
    provider_ids
        .iter()
        .filter_map(|id| StreamingService::find(id))
        .map(|service| AnnotatedProvider {
            service,
            subscribed: preferences.has_service(service.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_find_known_service() {
        assert_eq!(StreamingService::find("disney").map(|s| s.name), Some("Disney+"));
        assert!(StreamingService::find("betamax").is_none());
    }

    #[test]
    fn test_annotate_marks_subscribed_and_skips_unknown() {
        let mut prefs = UserPreferences::with_defaults(Utc::now());
        prefs.toggle_service("hulu");

        let providers = vec!["netflix".to_string(), "mubi".to_string(), "hulu".to_string()];
        let annotated = annotate_providers(&providers, &prefs);

        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].service.id, "netflix");
        assert!(!annotated[0].subscribed);
        assert_eq!(annotated[1].service.id, "hulu");
        assert!(annotated[1].subscribed);
    }
}
