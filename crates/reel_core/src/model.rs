use std::fmt;

/// Opaque identifier of a title in the remote database (an IMDb id in practice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One entry of a search result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
}

/// Full record for one title, fetched lazily when a summary is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
    pub runtime_minutes: Option<u32>,
    pub rating: Option<f32>,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

/// Parses a free-text runtime such as `"142 min"` into minutes.
///
/// Only the leading whitespace-separated token is considered; `"N/A"` and
/// anything non-numeric yield `None`.
pub fn parse_runtime_minutes(raw: &str) -> Option<u32> {
    raw.split_whitespace().next()?.parse().ok()
}

/// Parses a textual rating such as `"8.5"`; `"N/A"` yields `None`.
pub fn parse_rating(raw: &str) -> Option<f32> {
    let value: f32 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Normalizes the remote API's placeholder for absent values.
pub fn non_placeholder(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("N/A") {
        None
    } else {
        Some(trimmed.to_string())
    }
}
