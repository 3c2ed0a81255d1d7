use crate::{MovieDetail, MovieSummary};

/// Queries shorter than this (after trimming) never reach the network.
pub const MIN_QUERY_CHARS: usize = 2;

/// Returns the search term to send, or `None` when the query is too short.
pub fn searchable_query(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        None
    } else {
        Some(trimmed)
    }
}

/// Observable result of the most recent non-superseded search attempt.
///
/// Always rebuilt from scratch through the constructors below, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchState {
    pub items: Vec<MovieSummary>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Exactly one phase describes any `FetchState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Loading,
    Loaded,
    /// Settled with nothing to show: the guard reset or an empty success.
    Empty,
    Failed,
}

impl FetchState {
    /// No search in progress and nothing to show.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A search is in flight; any prior error is cleared.
    pub fn loading() -> Self {
        Self {
            items: Vec::new(),
            is_loading: true,
            error: None,
        }
    }

    pub fn loaded(items: Vec<MovieSummary>) -> Self {
        Self {
            items,
            is_loading: false,
            error: None,
        }
    }

    /// Failed attempts clear the result list.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: Some(message.into()),
        }
    }

    pub fn phase(&self) -> FetchPhase {
        if self.is_loading {
            FetchPhase::Loading
        } else if self.error.is_some() {
            FetchPhase::Failed
        } else if !self.items.is_empty() {
            FetchPhase::Loaded
        } else {
            FetchPhase::Empty
        }
    }
}

/// Observable state of the selected title's detail fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailState {
    pub detail: Option<MovieDetail>,
    pub is_loading: bool,
}

impl DetailState {
    pub fn loading() -> Self {
        Self {
            detail: None,
            is_loading: true,
        }
    }

    pub fn loaded(detail: MovieDetail) -> Self {
        Self {
            detail: Some(detail),
            is_loading: false,
        }
    }
}
