use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_NOTIFICATION_HOUR: u8 = 19;

/// Per-installation user settings. Exactly one record is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    pub id: Uuid,
    /// Provider ids such as "netflix", in the order they were selected
    #[serde(default)]
    pub selected_service_ids: Vec<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_notification_hour")]
    pub notification_hour: u8,
    #[serde(default = "default_true")]
    pub weekly_digest_enabled: bool,
    pub last_updated: DateTime<Utc>,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_notification_hour() -> u8 {
    DEFAULT_NOTIFICATION_HOUR
}

fn default_true() -> bool {
    true
}

impl UserPreferences {
    pub fn with_defaults(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            selected_service_ids: Vec::new(),
            country: default_country(),
            notification_hour: default_notification_hour(),
            weekly_digest_enabled: default_true(),
            last_updated: now,
        }
    }

    /// Add the service if absent, remove it if present
    pub fn toggle_service(&mut self, service_id: &str) {
        if self.has_service(service_id) {
            self.selected_service_ids.retain(|id| id != service_id);
        } else {
            self.selected_service_ids.push(service_id.to_string());
        }
    }

    pub fn has_service(&self, service_id: &str) -> bool {
        self.selected_service_ids.iter().any(|id| id == service_id)
    }

    pub fn has_any_services(&self) -> bool {
        !self.selected_service_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = UserPreferences::with_defaults(Utc::now());
        assert_eq!(prefs.country, "US");
        assert_eq!(prefs.notification_hour, 19);
        assert!(prefs.weekly_digest_enabled);
        assert!(!prefs.has_any_services());
    }

    #[test]
    fn test_toggle_service_keeps_selection_order() {
        let mut prefs = UserPreferences::with_defaults(Utc::now());
        prefs.toggle_service("netflix");
        prefs.toggle_service("hulu");
        prefs.toggle_service("hbo");
        prefs.toggle_service("hulu");
        assert_eq!(prefs.selected_service_ids, vec!["netflix", "hbo"]);
        assert!(prefs.has_service("hbo"));
        assert!(!prefs.has_service("hulu"));
    }
}
