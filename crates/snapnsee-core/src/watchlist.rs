use snapnsee_models::{NewWatchlistEntry, WatchingStatus, WatchlistEntry};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{info, warn};
use crate::clock::Clock;
use crate::error::PersistenceError;
use crate::storage::RecordStorage;

/// The user's saved media, backed by durable storage.
///
/// Reads are served from an in-memory projection ordered newest first. Every
/// mutation persists the full collection, re-reads it into the projection and
/// only then bumps the revision observers are watching. The whole sequence
/// runs under one lock, so readers see either the previous or the new
/// committed state. If persisting fails the projection is left untouched and
/// the error is returned.
pub struct WatchlistStore {
    storage: Box<dyn RecordStorage<WatchlistEntry>>,
    clock: Arc<dyn Clock>,
    items: Mutex<Vec<WatchlistEntry>>,
    revision: watch::Sender<u64>,
}

fn sort_newest_first(items: &mut [WatchlistEntry]) {
    items.sort_by(|a, b| b.added_at.cmp(&a.added_at));
}

impl WatchlistStore {
    pub fn open(
        storage: impl RecordStorage<WatchlistEntry> + 'static,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, PersistenceError> {
        let mut items = storage.load()?;
        sort_newest_first(&mut items);
        info!("Opened watchlist with {} items", items.len());

        let (revision, _) = watch::channel(0);
        Ok(Self {
            storage: Box::new(storage),
            clock,
            items: Mutex::new(items),
            revision,
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<WatchlistEntry>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist `next`, then refresh the projection from storage
    fn commit(
        &self,
        items: &mut MutexGuard<'_, Vec<WatchlistEntry>>,
        next: Vec<WatchlistEntry>,
    ) -> Result<(), PersistenceError> {
        self.storage.save(&next)?;

        let mut refreshed = match self.storage.load() {
            Ok(refreshed) => refreshed,
            Err(e) => {
                warn!("Saved watchlist but could not re-read it, using written state: {}", e);
                next
            }
        };
        sort_newest_first(&mut refreshed);
        **items = refreshed;

        self.revision.send_modify(|revision| *revision += 1);
        Ok(())
    }

    /// Save a new entry. Returns `false` without touching storage when an
    /// entry with the same id already exists.
    pub fn add(&self, fields: NewWatchlistEntry, status: WatchingStatus) -> Result<bool, PersistenceError> {
        let mut items = self.lock();
        if items.iter().any(|item| item.id == fields.id) {
            return Ok(false);
        }

        let id = fields.id.clone();
        let entry = fields.into_entry(status, self.clock.now());
        let mut next = items.clone();
        next.push(entry);
        self.commit(&mut items, next)?;

        info!(id = %id, status = %status, "Added to watchlist");
        Ok(true)
    }

    /// Delete by id. Returns `false` if nothing was stored under it.
    pub fn remove(&self, id: &str) -> Result<bool, PersistenceError> {
        let mut items = self.lock();
        if !items.iter().any(|item| item.id == id) {
            return Ok(false);
        }

        let next = items.iter().filter(|item| item.id != id).cloned().collect();
        self.commit(&mut items, next)?;

        info!(id, "Removed from watchlist");
        Ok(true)
    }

    /// `watched_at` is stamped on the first transition into watched and kept
    /// on repeated calls.
    pub fn mark_as_watched(&self, id: &str) -> Result<bool, PersistenceError> {
        let now = self.clock.now();
        self.update(id, |entry| {
            if entry.status != WatchingStatus::Watched || entry.watched_at.is_none() {
                entry.watched_at = Some(now);
            }
            entry.status = WatchingStatus::Watched;
        })
    }

    pub fn mark_as_to_watch(&self, id: &str) -> Result<bool, PersistenceError> {
        self.update(id, |entry| {
            entry.status = WatchingStatus::ToWatch;
            entry.watched_at = None;
        })
    }

    pub fn mark_as_watching_now(&self, id: &str) -> Result<bool, PersistenceError> {
        self.update(id, |entry| {
            entry.status = WatchingStatus::WatchingNow;
        })
    }

    /// Apply `change` to the entry with `id`. Returns `false` if there is no
    /// such entry; an unchanged entry is not written again.
    fn update<F>(&self, id: &str, change: F) -> Result<bool, PersistenceError>
    where
        F: FnOnce(&mut WatchlistEntry),
    {
        let mut items = self.lock();
        let Some(position) = items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };

        let mut updated = items[position].clone();
        change(&mut updated);
        if updated == items[position] {
            return Ok(true);
        }

        let status = updated.status;
        let mut next = items.clone();
        next[position] = updated;
        self.commit(&mut items, next)?;

        info!(id, status = %status, "Updated watchlist status");
        Ok(true)
    }

    pub fn is_in_watchlist(&self, id: &str) -> bool {
        self.lock().iter().any(|item| item.id == id)
    }

    pub fn get(&self, id: &str) -> Option<WatchlistEntry> {
        self.lock().iter().find(|item| item.id == id).cloned()
    }

    /// All entries, newest first
    pub fn items(&self) -> Vec<WatchlistEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn filtered(&self, keep: impl Fn(&WatchlistEntry) -> bool) -> Vec<WatchlistEntry> {
        self.lock().iter().filter(|item| keep(item)).cloned().collect()
    }

    /// Everything not yet watched, including entries being watched now
    pub fn unwatched(&self) -> Vec<WatchlistEntry> {
        self.filtered(|item| !item.is_watched())
    }

    pub fn watched(&self) -> Vec<WatchlistEntry> {
        self.filtered(WatchlistEntry::is_watched)
    }

    pub fn watching_now(&self) -> Vec<WatchlistEntry> {
        self.filtered(WatchlistEntry::is_watching_now)
    }

    pub fn to_watch(&self) -> Vec<WatchlistEntry> {
        self.filtered(WatchlistEntry::is_to_watch)
    }

    /// Revision counter bumped after each committed mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
