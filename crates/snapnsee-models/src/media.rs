use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media the recognition service matched.
///
/// Stored and transmitted as a lowercase string. Values this client does not
/// know decode as `Unknown` instead of failing the whole record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    Movie,
    Tv,
    Unknown,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Unknown => "unknown",
        }
    }

    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "movie" => MediaType::Movie,
            "tv" => MediaType::Tv,
            _ => MediaType::Unknown,
        }
    }
}

impl From<String> for MediaType {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<MediaType> for String {
    fn from(media_type: MediaType) -> Self {
        media_type.as_str().to_string()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the recognition service arrived at its match
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum RecognitionMethod {
    TextExtraction,
    VisualMatch,
    Unknown,
}

impl RecognitionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecognitionMethod::TextExtraction => "text_extraction",
            RecognitionMethod::VisualMatch => "visual_match",
            RecognitionMethod::Unknown => "unknown",
        }
    }

    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "text_extraction" => RecognitionMethod::TextExtraction,
            "visual_match" => RecognitionMethod::VisualMatch,
            _ => RecognitionMethod::Unknown,
        }
    }
}

impl From<String> for RecognitionMethod {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<RecognitionMethod> for String {
    fn from(method: RecognitionMethod) -> Self {
        method.as_str().to_string()
    }
}
