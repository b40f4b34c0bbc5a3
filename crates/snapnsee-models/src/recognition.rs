use serde::{Deserialize, Serialize};
use crate::media::{MediaType, RecognitionMethod};

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p";
const UNKNOWN_TITLE: &str = "Unknown";

/// Outcome of a successful recognition request.
///
/// Field names follow the recognition service's JSON body; only
/// `identified_media_id`, `match_confidence` and `tmdb_match.id` are required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecognitionResult {
    #[serde(default)]
    pub method: Option<RecognitionMethod>,
    #[serde(default)]
    pub extracted_title: Option<String>,
    #[serde(rename = "identified_media_id")]
    pub media_id: String,
    #[serde(default)]
    pub media_type: Option<MediaType>,
    pub match_confidence: f64,
    #[serde(rename = "tmdb_match")]
    pub media_details: MediaDetails,
}

impl RecognitionResult {
    /// Media type reported by the service, `Unknown` when it sent none
    pub fn media_type_or_unknown(&self) -> MediaType {
        self.media_type.unwrap_or(MediaType::Unknown)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    /// Minutes, movies only
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

impl MediaDetails {
    /// Movie title, series name, or "Unknown"
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(UNKNOWN_TITLE)
    }

    pub fn display_date(&self) -> Option<&str> {
        self.release_date.as_deref().or(self.first_air_date.as_deref())
    }

    /// Runtime formatted as "2h 5m" or "45m"
    pub fn display_runtime(&self) -> Option<String> {
        let runtime = self.runtime.filter(|minutes| *minutes > 0)?;
        let hours = runtime / 60;
        let minutes = runtime % 60;
        if hours > 0 {
            Some(format!("{}h {}m", hours, minutes))
        } else {
            Some(format!("{}m", minutes))
        }
    }

    /// Full poster URL for a TMDB image size such as "w200" or "w500"
    pub fn poster_url(&self, size: &str) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|path| format!("{}/{}{}", POSTER_BASE_URL, size, path))
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres
            .as_ref()
            .map(|genres| genres.iter().map(|genre| genre.name.as_str()).collect())
            .unwrap_or_default()
    }
}
