use serde::{Deserialize, Serialize};
use std::fmt;

/// Viewing status of a watchlist entry.
///
/// Persisted as its raw string (`watching_now`, `to_watch`, `watched`).
/// Records written by older builds may carry values this enum no longer
/// knows; those fall back to `ToWatch`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "String", into = "String")]
pub enum WatchingStatus {
    WatchingNow,
    #[default]
    ToWatch,
    Watched,
}

impl WatchingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchingStatus::WatchingNow => "watching_now",
            WatchingStatus::ToWatch => "to_watch",
            WatchingStatus::Watched => "watched",
        }
    }

    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "watching_now" => WatchingStatus::WatchingNow,
            "to_watch" => WatchingStatus::ToWatch,
            "watched" => WatchingStatus::Watched,
            _ => WatchingStatus::default(),
        }
    }
}

impl From<String> for WatchingStatus {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<WatchingStatus> for String {
    fn from(status: WatchingStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for WatchingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
