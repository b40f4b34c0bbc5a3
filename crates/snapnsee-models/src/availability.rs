use serde::{Deserialize, Serialize};

/// Outcome of a provider lookup for one media item in one country.
///
/// `Unknown` means the client could not determine availability (transport or
/// decoding failure); `Error` carries a message derived from an unexpected
/// server status. Callers render both as "no badge" but must not conflate them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Availability {
    Available(Vec<String>),
    Unavailable,
    Unknown,
    Error(String),
}

impl Availability {
    pub fn providers(&self) -> &[String] {
        match self {
            Availability::Available(providers) => providers,
            _ => &[],
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }
}
