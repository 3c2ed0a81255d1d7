//! Reel core: domain types, the observer cell and the pure app state machine.
mod cell;
mod effect;
mod model;
mod msg;
mod search;
mod state;
mod update;
mod view_model;
mod watched;

pub use cell::{Cleanup, CleanupReason, InputCell, SubscriptionId};
pub use effect::Effect;
pub use model::{
    non_placeholder, parse_rating, parse_runtime_minutes, MovieDetail, MovieId, MovieSummary,
};
pub use msg::Msg;
pub use search::{searchable_query, DetailState, FetchPhase, FetchState, MIN_QUERY_CHARS};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, MovieRowView, WatchedRowView};
pub use watched::{
    summarize, RatingError, UserRating, WatchedItem, WatchedItemError, WatchedSummary,
    MAX_USER_RATING,
};
