use std::sync::Arc;

use reel_logging::reel_info;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime};

use crate::{ApiConfig, DetailController, FetchError, MovieApi, OmdbClient, SearchController};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

/// Owns the async runtime the fetches run on and hands out controllers.
///
/// The front end stays on its own thread; controllers only spawn onto this runtime.
pub struct Engine {
    runtime: Runtime,
    api: Arc<dyn MovieApi>,
}

impl Engine {
    pub fn new(config: ApiConfig) -> Result<Self, EngineError> {
        reel_info!("engine starting against {}", config.base_url);
        let api: Arc<dyn MovieApi> = Arc::new(OmdbClient::new(config)?);
        Self::with_api(api)
    }

    /// Engine over any `MovieApi`, e.g. a canned one for demos.
    pub fn with_api(api: Arc<dyn MovieApi>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("reel-fetch")
            .enable_all()
            .build()?;
        Ok(Self { runtime, api })
    }

    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }

    pub fn search_controller(&self) -> SearchController {
        SearchController::new(self.api.clone(), self.handle())
    }

    pub fn detail_controller(&self) -> DetailController {
        DetailController::new(self.api.clone(), self.handle())
    }
}
