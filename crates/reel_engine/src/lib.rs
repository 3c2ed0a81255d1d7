//! Reel engine: remote movie database access and the cancellable fetch controllers.
mod api;
mod config;
mod controller;
mod engine;
mod error;

pub use api::{MovieApi, OmdbClient};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use controller::{DetailController, SearchController};
pub use engine::{Engine, EngineError};
pub use error::{FetchError, NETWORK_MESSAGE, NO_RESULTS_MESSAGE};
