use snapnsee_models::preferences::DEFAULT_COUNTRY;
use snapnsee_models::UserPreferences;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{info, warn};
use crate::clock::Clock;
use crate::error::{PersistenceError, PreferencesError};
use crate::storage::RecordStorage;

/// The single preferences record for this installation.
///
/// Storage may hold more than one record (older builds could write duplicates);
/// the first one is always the one in use. When storage is empty a default
/// record is created and persisted on first access, with its country taken
/// from [`PreferencesStore::with_default_country`].
pub struct PreferencesStore {
    storage: Box<dyn RecordStorage<UserPreferences>>,
    clock: Arc<dyn Clock>,
    default_country: String,
    records: Mutex<Vec<UserPreferences>>,
    revision: watch::Sender<u64>,
}

impl PreferencesStore {
    pub fn open(
        storage: impl RecordStorage<UserPreferences> + 'static,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PersistenceError> {
        let records = storage.load()?;
        let (revision, _) = watch::channel(0);
        Ok(Self {
            storage: Box::new(storage),
            clock,
            default_country: DEFAULT_COUNTRY.to_string(),
            records: Mutex::new(records),
            revision,
        })
    }

    /// Country given to the record created on first access. Existing records
    /// keep their own country.
    pub fn with_default_country(mut self, code: &str) -> Self {
        match normalize_country(code) {
            Some(code) => self.default_country = code,
            None => warn!("Ignoring invalid default country '{}', using {}", code, DEFAULT_COUNTRY),
        }
        self
    }

    fn new_record(&self) -> UserPreferences {
        let mut record = UserPreferences::with_defaults(self.clock.now());
        record.country = self.default_country.clone();
        record
    }

    fn lock(&self) -> MutexGuard<'_, Vec<UserPreferences>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current preferences, creating the defaults if none exist yet
    pub fn get(&self) -> Result<UserPreferences, PersistenceError> {
        let mut records = self.lock();
        if let Some(first) = records.first() {
            return Ok(first.clone());
        }

        let defaults = self.new_record();
        self.storage.save(std::slice::from_ref(&defaults))?;
        records.push(defaults.clone());
        info!(id = %defaults.id, "Created default preferences");
        Ok(defaults)
    }

    pub fn toggle_service(&self, service_id: &str) -> Result<UserPreferences, PersistenceError> {
        self.update(|prefs| prefs.toggle_service(service_id))
    }

    pub fn set_weekly_digest(&self, enabled: bool) -> Result<UserPreferences, PersistenceError> {
        self.update(|prefs| prefs.weekly_digest_enabled = enabled)
    }

    pub fn set_notification_hour(&self, hour: u8) -> Result<UserPreferences, PreferencesError> {
        if hour > 23 {
            return Err(PreferencesError::InvalidNotificationHour(hour));
        }
        Ok(self.update(|prefs| prefs.notification_hour = hour)?)
    }

    /// Accepts any two-letter code and stores it uppercased
    pub fn set_country(&self, code: &str) -> Result<UserPreferences, PreferencesError> {
        let code = normalize_country(code).ok_or_else(|| PreferencesError::InvalidCountry(code.trim().to_string()))?;
        Ok(self.update(|prefs| prefs.country = code)?)
    }

    /// Revision counter bumped after each committed mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn update<F>(&self, change: F) -> Result<UserPreferences, PersistenceError>
    where
        F: FnOnce(&mut UserPreferences),
    {
        let mut records = self.lock();

        let mut next = records.clone();
        if next.is_empty() {
            next.push(self.new_record());
        }
        change(&mut next[0]);
        next[0].last_updated = self.clock.now();

        self.storage.save(&next)?;
        let updated = next[0].clone();
        *records = next;
        self.revision.send_modify(|revision| *revision += 1);

        info!(
            services = ?updated.selected_service_ids,
            country = %updated.country,
            notification_hour = updated.notification_hour,
            weekly_digest = updated.weekly_digest_enabled,
            "Updated preferences"
        );
        Ok(updated)
    }
}

/// Two ASCII letters, uppercased
fn normalize_country(code: &str) -> Option<String> {
    let code = code.trim();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::JsonFileStorage;
    use chrono::{Duration, Utc};
    use std::path::Path;

    fn open_store(path: &Path, clock: Arc<ManualClock>) -> PreferencesStore {
        PreferencesStore::open(JsonFileStorage::new(path), clock).unwrap()
    }

    fn setup() -> (tempfile::TempDir, Arc<ManualClock>, PreferencesStore) {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = open_store(&dir.path().join("preferences.json"), clock.clone());
        (dir, clock, store)
    }

    #[test]
    fn test_get_returns_same_record() {
        let (_dir, _clock, store) = setup();
        let first = store.get().unwrap();
        let second = store.get().unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.country, "US");
        assert_eq!(first.notification_hour, 19);
        assert!(first.weekly_digest_enabled);
        assert!(!first.has_any_services());
    }

    #[test]
    fn test_defaults_are_persisted_on_first_access() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let clock = Arc::new(ManualClock::new(Utc::now()));

        let id = open_store(&path, clock.clone()).get().unwrap().id;
        assert!(path.exists());
        assert_eq!(open_store(&path, clock).get().unwrap().id, id);
    }

    #[test]
    fn test_toggle_service_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let clock = Arc::new(ManualClock::new(Utc::now()));

        {
            let store = open_store(&path, clock.clone());
            store.toggle_service("netflix").unwrap();
            store.toggle_service("hulu").unwrap();
            store.toggle_service("netflix").unwrap();
        }

        let prefs = open_store(&path, clock).get().unwrap();
        assert_eq!(prefs.selected_service_ids, vec!["hulu"]);
    }

    #[test]
    fn test_mutations_update_last_updated() {
        let (_dir, clock, store) = setup();
        let created = store.get().unwrap().last_updated;

        clock.advance(Duration::minutes(5));
        let updated = store.set_weekly_digest(false).unwrap();

        assert!(!updated.weekly_digest_enabled);
        assert_eq!(updated.last_updated - created, Duration::minutes(5));
    }

    #[test]
    fn test_invalid_hour_is_rejected_without_persisting() {
        let (_dir, _clock, store) = setup();
        store.set_notification_hour(7).unwrap();
        let mut revisions = store.subscribe();

        let err = store.set_notification_hour(24).unwrap_err();
        assert!(matches!(err, PreferencesError::InvalidNotificationHour(24)));
        assert_eq!(store.get().unwrap().notification_hour, 7);
        assert!(!revisions.has_changed().unwrap());
        assert_eq!(*revisions.borrow_and_update(), 1);
    }

    #[test]
    fn test_notification_hour_accepts_last_hour_of_day() {
        let (_dir, _clock, store) = setup();
        assert_eq!(store.set_notification_hour(23).unwrap().notification_hour, 23);
        assert_eq!(store.set_notification_hour(0).unwrap().notification_hour, 0);
        assert_eq!(store.get().unwrap().notification_hour, 0);
    }

    #[test]
    fn test_persistence_failure_is_surfaced_and_state_kept() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let store = open_store(&blocker.join("preferences.json"), Arc::new(ManualClock::new(Utc::now())));
        let revisions = store.subscribe();

        assert!(matches!(store.get(), Err(PersistenceError::Write { .. })));
        assert!(matches!(
            store.set_notification_hour(8),
            Err(PreferencesError::Persistence(PersistenceError::Write { .. }))
        ));
        assert!(matches!(store.toggle_service("netflix"), Err(PersistenceError::Write { .. })));
        assert!(!revisions.has_changed().unwrap());

        // Nothing was committed, so no record exists to read back either
        assert!(store.get().is_err());
    }

    #[test]
    fn test_default_country_seeds_new_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let clock = Arc::new(ManualClock::new(Utc::now()));

        let store = open_store(&path, clock.clone()).with_default_country("gb");
        assert_eq!(store.get().unwrap().country, "GB");

        // An existing record keeps its country
        let reopened = open_store(&path, clock).with_default_country("DE");
        assert_eq!(reopened.get().unwrap().country, "GB");
    }

    #[test]
    fn test_invalid_default_country_falls_back_to_us() {
        let (_dir, _clock, store) = setup();
        let store = store.with_default_country("Great Britain");
        assert_eq!(store.get().unwrap().country, "US");
    }

    #[test]
    fn test_default_country_applies_when_first_access_is_a_mutation() {
        let (_dir, _clock, store) = setup();
        let store = store.with_default_country("FR");
        let updated = store.set_weekly_digest(false).unwrap();
        assert_eq!(updated.country, "FR");
    }

    #[test]
    fn test_set_country() {
        let (_dir, _clock, store) = setup();
        assert_eq!(store.set_country("gb").unwrap().country, "GB");
        assert!(matches!(
            store.set_country("GBR"),
            Err(PreferencesError::InvalidCountry(_))
        ));
        assert_eq!(store.get().unwrap().country, "GB");
    }

    #[test]
    fn test_first_record_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let now = Utc::now();
        let mut first = UserPreferences::with_defaults(now);
        first.country = "DE".to_string();
        let second = UserPreferences::with_defaults(now);
        JsonFileStorage::new(&path).save(&[first.clone(), second]).unwrap();

        let store = open_store(&path, Arc::new(ManualClock::new(now)));
        assert_eq!(store.get().unwrap().id, first.id);
        assert_eq!(store.toggle_service("max").unwrap().id, first.id);
    }
}
