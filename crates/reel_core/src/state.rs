use reel_logging::{reel_debug, reel_info};

use crate::view_model::{AppViewModel, MovieRowView, WatchedRowView};
use crate::{
    summarize, DetailState, FetchState, MovieId, UserRating, WatchedItem, WatchedItemError,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    query: String,
    search: FetchState,
    selected: Option<MovieId>,
    detail: DetailState,
    user_rating: Option<UserRating>,
    // Append-only; the same title may appear more than once.
    watched: Vec<WatchedItem>,
    notice: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let detail = self
            .detail
            .detail
            .as_ref()
            .filter(|detail| Some(&detail.id) == self.selected.as_ref())
            .cloned();

        AppViewModel {
            query: self.query.clone(),
            results: self
                .search
                .items
                .iter()
                .map(|item| MovieRowView {
                    id: item.id.clone(),
                    title: item.title.clone(),
                    year: item.year.clone(),
                    selected: Some(&item.id) == self.selected.as_ref(),
                })
                .collect(),
            result_count: self.search.items.len(),
            search_phase: self.search.phase(),
            is_loading: self.search.is_loading,
            error: self.search.error.clone(),
            selected: self.selected.clone(),
            detail_loading: self.detail.is_loading,
            detail,
            user_rating: self.user_rating.map(UserRating::value),
            watched: self
                .watched
                .iter()
                .map(|item| WatchedRowView {
                    title: item.title.clone(),
                    external_rating: item.external_rating,
                    user_rating: item.user_rating,
                    runtime_minutes: item.runtime_minutes,
                })
                .collect(),
            summary: summarize(&self.watched),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> Option<&MovieId> {
        self.selected.as_ref()
    }

    pub fn watched(&self) -> &[WatchedItem] {
        &self.watched
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Stores the query; returns false when it is unchanged.
    pub(crate) fn set_query(&mut self, query: String) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query;
        self.mark_dirty();
        true
    }

    pub(crate) fn apply_search(&mut self, search: FetchState) {
        if self.search != search {
            self.search = search;
            self.mark_dirty();
        }
    }

    /// Toggles the selection: the open id closes, any other id replaces it.
    pub(crate) fn select_movie(&mut self, id: MovieId) -> Option<MovieId> {
        self.selected = if self.selected.as_ref() == Some(&id) {
            None
        } else {
            Some(id)
        };
        self.user_rating = None;
        self.notice = None;
        self.mark_dirty();
        self.selected.clone()
    }

    /// Clears the selection; returns false when nothing was open.
    pub(crate) fn close_movie(&mut self) -> bool {
        self.user_rating = None;
        if self.selected.take().is_some() {
            self.mark_dirty();
            true
        } else {
            false
        }
    }

    pub(crate) fn apply_detail(&mut self, detail: DetailState) {
        if let Some(loaded) = detail.detail.as_ref() {
            if self.selected.as_ref() != Some(&loaded.id) {
                reel_debug!("dropping detail for {} (selection moved on)", loaded.id);
                return;
            }
        }
        if self.detail != detail {
            self.detail = detail;
            self.mark_dirty();
        }
    }

    pub(crate) fn rate(&mut self, rating: UserRating) {
        self.user_rating = Some(rating);
        self.notice = None;
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.mark_dirty();
    }

    /// Appends the open title to the watched list and closes it.
    pub(crate) fn add_watched(&mut self) -> Result<(), AddWatchedError> {
        let detail = self
            .detail
            .detail
            .as_ref()
            .filter(|detail| Some(&detail.id) == self.selected.as_ref())
            .ok_or(AddWatchedError::NothingOpen)?;
        let rating = self.user_rating.ok_or(AddWatchedError::NotRated)?;
        let item = WatchedItem::from_detail(detail, rating)?;

        reel_info!(
            "watched {} ({}) rated {}",
            item.title,
            item.id,
            item.user_rating
        );
        self.watched.push(item);
        self.close_movie();
        self.notice = None;
        self.mark_dirty();
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum AddWatchedError {
    #[error("Open a movie before adding it to the watched list.")]
    NothingOpen,
    #[error("Rate the movie before adding it to the watched list.")]
    NotRated,
    #[error(
        "Cannot add this movie: {0}. Only titles with an IMDb rating and a runtime can be added to the watched list."
    )]
    Incomplete(#[from] WatchedItemError),
}
