use reel_core::{DetailState, Effect, FetchState, InputCell, MovieId, Msg};
use reel_engine::{DetailController, Engine, SearchController};
use reel_logging::reel_debug;
use tokio::sync::watch;

/// Owns the UI input cells and the controllers observing them.
///
/// Effects from `update` land in the cells; controller output comes back as `Msg`s.
pub struct EffectRunner {
    query: InputCell<String>,
    selection: InputCell<Option<MovieId>>,
    search_rx: watch::Receiver<FetchState>,
    detail_rx: watch::Receiver<DetailState>,
    // Kept alive for the lifetime of the subscriptions.
    _search: SearchController,
    _detail: DetailController,
}

impl EffectRunner {
    pub fn new(engine: &Engine) -> Self {
        let search = engine.search_controller();
        let detail = engine.detail_controller();

        let mut query = InputCell::new(String::new());
        let mut selection = InputCell::new(None);
        search.observe(&mut query);
        detail.observe(&mut selection);

        Self {
            query,
            selection,
            search_rx: search.state(),
            detail_rx: detail.state(),
            _search: search,
            _detail: detail,
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PublishQuery(query) => {
                    reel_debug!("PublishQuery len={}", query.len());
                    self.query.set(query);
                }
                Effect::PublishSelection(selection) => {
                    reel_debug!("PublishSelection {:?}", selection);
                    self.selection.set(selection);
                }
            }
        }
    }

    /// Collects controller output that changed since the last poll.
    pub fn poll(&mut self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        if self.search_rx.has_changed().unwrap_or(false) {
            inbox.push(Msg::SearchUpdated(self.search_rx.borrow_and_update().clone()));
        }
        if self.detail_rx.has_changed().unwrap_or(false) {
            inbox.push(Msg::DetailUpdated(self.detail_rx.borrow_and_update().clone()));
        }
        inbox
    }
}
