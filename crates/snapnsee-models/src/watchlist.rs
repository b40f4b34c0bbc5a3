use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::media::MediaType;
use crate::recognition::RecognitionResult;
use crate::status::WatchingStatus;

/// A media item the user saved, with its viewing status.
///
/// `id` is the recognized media id and is unique within a watchlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    pub id: String,
    pub media_type: MediaType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub watched_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: WatchingStatus,

    // Provenance, kept for a future sync backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_confidence: Option<f64>,
}

impl WatchlistEntry {
    pub fn is_watched(&self) -> bool {
        self.status == WatchingStatus::Watched
    }

    pub fn is_watching_now(&self) -> bool {
        self.status == WatchingStatus::WatchingNow
    }

    pub fn is_to_watch(&self) -> bool {
        self.status == WatchingStatus::ToWatch
    }
}

/// Fields supplied by the caller when saving a new entry
#[derive(Debug, Clone, PartialEq)]
pub struct NewWatchlistEntry {
    pub id: String,
    pub media_type: MediaType,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
    pub source_provider: Option<String>,
    pub scan_confidence: Option<f64>,
}

impl NewWatchlistEntry {
    pub fn new(id: impl Into<String>, media_type: MediaType, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            media_type,
            title: title.into(),
            poster_path: None,
            overview: None,
            vote_average: None,
            release_date: None,
            source_provider: None,
            scan_confidence: None,
        }
    }

    pub fn from_recognition(result: &RecognitionResult) -> Self {
        let details = &result.media_details;
        Self {
            id: result.media_id.clone(),
            media_type: result.media_type_or_unknown(),
            title: details.display_title().to_string(),
            poster_path: details.poster_path.clone(),
            overview: details.overview.clone(),
            vote_average: details.vote_average,
            release_date: details.display_date().map(str::to_string),
            source_provider: result.method.map(|method| method.as_str().to_string()),
            scan_confidence: Some(result.match_confidence),
        }
    }

    /// Materialize into a stored entry created at `added_at`
    pub fn into_entry(self, status: WatchingStatus, added_at: DateTime<Utc>) -> WatchlistEntry {
        let watched_at = (status == WatchingStatus::Watched).then_some(added_at);
        WatchlistEntry {
            id: self.id,
            media_type: self.media_type,
            title: self.title,
            poster_path: self.poster_path,
            overview: self.overview,
            vote_average: self.vote_average,
            release_date: self.release_date,
            added_at,
            watched_at,
            status,
            source_provider: self.source_provider,
            scan_confidence: self.scan_confidence,
        }
    }
}
