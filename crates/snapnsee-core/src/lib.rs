pub mod clock;
pub mod error;
pub mod preferences;
pub mod provider_cache;
pub mod services;
pub mod storage;
pub mod watchlist;

pub use clock::{Clock, SystemClock};
pub use error::{PersistenceError, PreferencesError};
pub use preferences::PreferencesStore;
pub use provider_cache::{ProviderAvailabilityCache, CACHE_TTL_DAYS};
pub use services::{ProviderSummary, Services};
pub use storage::{JsonFileStorage, RecordStorage};
pub use watchlist::WatchlistStore;
