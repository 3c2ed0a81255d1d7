#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use reel_core::{MovieDetail, MovieId, MovieSummary};
use reel_engine::{FetchError, MovieApi};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(reel_logging::initialize_for_tests);
}

pub fn summary(id: &str, title: &str) -> MovieSummary {
    MovieSummary {
        id: MovieId::new(id),
        title: title.to_string(),
        year: "1989".to_string(),
        poster: None,
    }
}

pub fn detail(id: &str, title: &str) -> MovieDetail {
    MovieDetail {
        id: MovieId::new(id),
        title: title.to_string(),
        year: "1989".to_string(),
        poster: None,
        runtime_minutes: Some(126),
        rating: Some(7.5),
        plot: String::new(),
        released: String::new(),
        actors: String::new(),
        director: String::new(),
        genre: String::new(),
    }
}

/// `MovieApi` whose responses are held back until the test releases them.
#[derive(Default)]
pub struct GatedApi {
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    searches: HashMap<String, Result<Vec<MovieSummary>, FetchError>>,
    details: HashMap<String, Result<MovieDetail, FetchError>>,
    calls: AtomicUsize,
}

impl GatedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_result(
        mut self,
        query: &str,
        result: Result<Vec<MovieSummary>, FetchError>,
    ) -> Self {
        self.searches.insert(query.to_string(), result);
        self
    }

    pub fn detail_result(mut self, id: &str, result: Result<MovieDetail, FetchError>) -> Self {
        self.details.insert(id.to_string(), result);
        self
    }

    pub fn release(&self, key: &str) {
        self.gate(key).notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn gate(&self, key: &str) -> Arc<Notify> {
        self.gates
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .clone()
    }
}

#[async_trait::async_trait]
impl MovieApi for GatedApi {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate(query).notified().await;
        self.searches
            .get(query)
            .cloned()
            .unwrap_or(Err(FetchError::NoResults))
    }

    async fn detail(&self, id: &MovieId) -> Result<MovieDetail, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate(id.as_str()).notified().await;
        self.details
            .get(id.as_str())
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound(id.to_string())))
    }
}

/// Waits until the observed state satisfies `done`.
pub async fn wait_until<T: Clone>(rx: &mut watch::Receiver<T>, done: impl FnMut(&T) -> bool) -> T {
    tokio::time::timeout(Duration::from_secs(2), rx.wait_for(done))
        .await
        .expect("state settled in time")
        .expect("controller alive")
        .clone()
}

/// Gives spawned tasks a chance to run to completion.
pub async fn let_tasks_run() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

/// Records every value sent on `rx` from a separate task.
pub fn record_states<T>(mut rx: watch::Receiver<T>) -> (Arc<Mutex<Vec<T>>>, JoinHandle<()>)
where
    T: Clone + Send + Sync + 'static,
{
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let task = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let value = rx.borrow_and_update().clone();
            sink.lock().unwrap().push(value);
        }
    });
    (seen, task)
}
