mod common;

use std::sync::Arc;

use common::{init_logging, wait_until};
use pretty_assertions::assert_eq;
use reel_core::{update, AppState, Effect, FetchState, InputCell, MovieId, Msg};
use reel_engine::{ApiConfig, MovieApi, OmdbClient, SearchController};
use serde_json::json;
use tokio::runtime::Handle;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("s", "ba"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Response": "True",
            "Search": [{"Title": "Batman", "Year": "1989", "imdbID": "tt1"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("s", "zzzzz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Response": "False"})))
        .mount(&server)
        .await;
    server
}

fn search_controller(server: &MockServer) -> SearchController {
    let config = ApiConfig::new("k").with_base_url(format!("{}/", server.uri()));
    let api: Arc<dyn MovieApi> = Arc::new(OmdbClient::new(config).expect("client builds"));
    SearchController::new(api, Handle::current())
}

#[tokio::test]
async fn query_then_clear() {
    init_logging();
    let server = server().await;
    let controller = search_controller(&server);
    let mut query = InputCell::new(String::new());
    controller.observe(&mut query);
    let mut rx = controller.state();

    query.set("ba".to_string());
    let state = wait_until(&mut rx, |s| !s.is_loading).await;
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, MovieId::new("tt1"));
    assert_eq!(state.error, None);

    query.set(String::new());
    assert_eq!(controller.current(), FetchState::idle());
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn no_results_sets_error() {
    init_logging();
    let server = server().await;
    let controller = search_controller(&server);
    let mut query = InputCell::new(String::new());
    controller.observe(&mut query);
    let mut rx = controller.state();

    query.set("zzzzz".to_string());
    let state = wait_until(&mut rx, |s| !s.is_loading).await;
    assert!(state.error.as_deref().is_some_and(|e| !e.is_empty()));
    assert!(state.items.is_empty());
}

#[tokio::test]
async fn app_state_follows_controller() {
    init_logging();
    let server = server().await;
    let controller = search_controller(&server);
    let mut query = InputCell::new(String::new());
    controller.observe(&mut query);
    let mut rx = controller.state();

    let (state, effects) = update(AppState::new(), Msg::QueryEdited("ba".to_string()));
    for effect in effects {
        if let Effect::PublishQuery(text) = effect {
            query.set(text);
        }
    }
    let search = wait_until(&mut rx, |s| !s.is_loading).await;
    let (state, _) = update(state, Msg::SearchUpdated(search));

    let view = state.view();
    assert_eq!(view.result_count, 1);
    assert_eq!(view.results[0].title, "Batman");
    assert!(!view.is_loading);
}
