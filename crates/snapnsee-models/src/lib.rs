pub mod availability;
pub mod media;
pub mod preferences;
pub mod recognition;
pub mod status;
pub mod streaming_service;
pub mod watchlist;

pub use availability::Availability;
pub use media::{MediaType, RecognitionMethod};
pub use preferences::UserPreferences;
pub use recognition::{Genre, MediaDetails, RecognitionResult};
pub use status::WatchingStatus;
pub use streaming_service::{annotate_providers, AnnotatedProvider, StreamingService, STREAMING_SERVICES};
pub use watchlist::{NewWatchlistEntry, WatchlistEntry};
