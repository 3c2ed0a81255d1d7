//! Input-driven fetch controllers.
//!
//! Each controller subscribes to one `InputCell`. Every change of the cell
//! starts a new attempt with its own `CancellationToken`; the cleanup handed
//! back to the cell signals that token, so the next change (or teardown)
//! cancels whatever is still in flight. On a re-run the next attempt replaces
//! the state in one step; only teardown resolves `is_loading` in place.
//! Publication goes through a
//! generation-checked slot: only the newest attempt may write the observable
//! state, whatever order responses arrive in.

use std::sync::{Arc, Mutex, PoisonError};

use futures_util::future::BoxFuture;
use reel_core::{
    searchable_query, Cleanup, CleanupReason, DetailState, FetchState, InputCell, MovieDetail, MovieId,
    MovieSummary, SubscriptionId,
};
use reel_logging::{reel_debug, reel_trace, reel_warn};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{FetchError, MovieApi};

/// Observable value with a loading flag that can be resolved in place.
trait Settle {
    fn settle(&mut self) -> bool;
}

impl Settle for FetchState {
    fn settle(&mut self) -> bool {
        std::mem::replace(&mut self.is_loading, false)
    }
}

impl Settle for DetailState {
    fn settle(&mut self) -> bool {
        std::mem::replace(&mut self.is_loading, false)
    }
}

/// Latest-wins publication slot shared by a controller and its attempts.
struct Slot<T> {
    generation: Mutex<u64>,
    tx: watch::Sender<T>,
}

impl<T> Slot<T> {
    fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            generation: Mutex::new(0),
            tx,
        }
    }

    /// Starts a new attempt: older generations lose the right to publish.
    fn begin(&self, value: T) -> u64 {
        let mut generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        *generation += 1;
        self.tx.send_replace(value);
        *generation
    }

    fn publish_if_current(&self, attempt: u64, value: T) -> bool {
        let generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        if *generation != attempt {
            return false;
        }
        self.tx.send_replace(value);
        true
    }
}

impl<T: Settle> Slot<T> {
    fn settle_if_current(&self, attempt: u64) {
        let generation = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        if *generation == attempt {
            self.tx.send_if_modified(T::settle);
        }
    }
}

/// Spawns one attempt and returns the cleanup that cancels it.
fn launch<T, R>(
    runtime: &Handle,
    slot: &Arc<Slot<T>>,
    attempt: u64,
    label: String,
    fetch: BoxFuture<'static, Result<R, FetchError>>,
    finish: fn(Result<R, FetchError>, &str) -> T,
) -> Cleanup
where
    T: Settle + Send + Sync + 'static,
    R: Send + 'static,
{
    let token = CancellationToken::new();
    let task_token = token.clone();
    let task_slot = slot.clone();

    runtime.spawn(async move {
        let result = tokio::select! {
            biased;
            _ = task_token.cancelled() => Err(FetchError::Cancelled),
            result = fetch => result,
        };
        if task_token.is_cancelled() || result.as_ref().is_err_and(FetchError::is_cancelled) {
            reel_trace!("{} cancelled", label);
            return;
        }
        let next = finish(result, &label);
        if !task_slot.publish_if_current(attempt, next) {
            reel_debug!("{} settled after being superseded; result dropped", label);
        }
    });

    let slot = slot.clone();
    Box::new(move |reason: CleanupReason| {
        token.cancel();
        if reason == CleanupReason::Teardown {
            slot.settle_if_current(attempt);
        }
    })
}

/// Search controller: `{items, is_loading, error}` for the latest query.
pub struct SearchController {
    api: Arc<dyn MovieApi>,
    runtime: Handle,
    slot: Arc<Slot<FetchState>>,
}

impl SearchController {
    pub fn new(api: Arc<dyn MovieApi>, runtime: Handle) -> Self {
        Self {
            api,
            runtime,
            slot: Arc::new(Slot::new(FetchState::idle())),
        }
    }

    /// Read-only view of the latest emitted state.
    pub fn state(&self) -> watch::Receiver<FetchState> {
        self.slot.tx.subscribe()
    }

    pub fn current(&self) -> FetchState {
        self.slot.tx.borrow().clone()
    }

    /// Registers the controller against the query cell.
    pub fn observe(&self, query: &mut InputCell<String>) -> SubscriptionId {
        let api = self.api.clone();
        let runtime = self.runtime.clone();
        let slot = self.slot.clone();
        query.subscribe(move |text: &String| start_search(&api, &runtime, &slot, text))
    }
}

fn start_search(
    api: &Arc<dyn MovieApi>,
    runtime: &Handle,
    slot: &Arc<Slot<FetchState>>,
    query: &str,
) -> Option<Cleanup> {
    let Some(term) = searchable_query(query) else {
        reel_trace!("query {:?} below search threshold", query);
        slot.begin(FetchState::idle());
        return None;
    };

    let term = term.to_string();
    let attempt = slot.begin(FetchState::loading());
    let api = api.clone();
    let label = format!("search #{attempt} {term:?}");
    let fetch: BoxFuture<'static, Result<Vec<MovieSummary>, FetchError>> =
        Box::pin(async move { api.search(&term).await });

    Some(launch(runtime, slot, attempt, label, fetch, finish_search))
}

fn finish_search(result: Result<Vec<MovieSummary>, FetchError>, label: &str) -> FetchState {
    match result {
        Ok(items) => {
            reel_debug!("{} returned {} items", label, items.len());
            FetchState::loaded(items)
        }
        Err(err) => {
            reel_warn!("{} failed: {}", label, err);
            FetchState::failed(err.user_message())
        }
    }
}

/// Detail controller: full record for the selected title.
pub struct DetailController {
    api: Arc<dyn MovieApi>,
    runtime: Handle,
    slot: Arc<Slot<DetailState>>,
}

impl DetailController {
    pub fn new(api: Arc<dyn MovieApi>, runtime: Handle) -> Self {
        Self {
            api,
            runtime,
            slot: Arc::new(Slot::new(DetailState::default())),
        }
    }

    pub fn state(&self) -> watch::Receiver<DetailState> {
        self.slot.tx.subscribe()
    }

    pub fn current(&self) -> DetailState {
        self.slot.tx.borrow().clone()
    }

    /// Registers the controller against the selection cell.
    pub fn observe(&self, selection: &mut InputCell<Option<MovieId>>) -> SubscriptionId {
        let api = self.api.clone();
        let runtime = self.runtime.clone();
        let slot = self.slot.clone();
        selection.subscribe(move |selected: &Option<MovieId>| {
            start_detail(&api, &runtime, &slot, selected.as_ref())
        })
    }
}

fn start_detail(
    api: &Arc<dyn MovieApi>,
    runtime: &Handle,
    slot: &Arc<Slot<DetailState>>,
    selected: Option<&MovieId>,
) -> Option<Cleanup> {
    let Some(id) = selected.cloned() else {
        slot.begin(DetailState::default());
        return None;
    };

    let attempt = slot.begin(DetailState::loading());
    let api = api.clone();
    let label = format!("detail #{attempt} {id}");
    let fetch: BoxFuture<'static, Result<MovieDetail, FetchError>> =
        Box::pin(async move { api.detail(&id).await });

    Some(launch(runtime, slot, attempt, label, fetch, finish_detail))
}

// Failures are tolerated: the detail stays cleared and loading resolves.
fn finish_detail(result: Result<MovieDetail, FetchError>, label: &str) -> DetailState {
    match result {
        Ok(detail) => DetailState::loaded(detail),
        Err(err) => {
            reel_warn!("{} failed: {}", label, err);
            DetailState::default()
        }
    }
}
