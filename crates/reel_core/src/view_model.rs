use crate::{FetchPhase, MovieDetail, MovieId, WatchedSummary};

#[derive(Debug, Clone, PartialEq)]
pub struct AppViewModel {
    pub query: String,
    pub results: Vec<MovieRowView>,
    pub result_count: usize,
    pub search_phase: FetchPhase,
    pub is_loading: bool,
    pub error: Option<String>,
    pub selected: Option<MovieId>,
    pub detail: Option<MovieDetail>,
    pub detail_loading: bool,
    pub user_rating: Option<u8>,
    pub watched: Vec<WatchedRowView>,
    pub summary: WatchedSummary,
    /// Feedback for a rejected user action.
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRowView {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchedRowView {
    pub title: String,
    pub external_rating: f32,
    pub user_rating: u8,
    pub runtime_minutes: u32,
}
