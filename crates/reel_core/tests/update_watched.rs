use std::sync::Once;

use pretty_assertions::assert_eq;
use reel_core::{update, AppState, DetailState, Effect, MovieDetail, MovieId, Msg};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(reel_logging::initialize_for_tests);
}

fn detail(id: &str, rating: Option<f32>, runtime: Option<u32>) -> MovieDetail {
    MovieDetail {
        id: MovieId::new(id),
        title: format!("Title {id}"),
        year: "1999".to_string(),
        poster: Some(format!("https://img.example/{id}.jpg")),
        runtime_minutes: runtime,
        rating,
        plot: "plot".to_string(),
        released: "01 Jan 1999".to_string(),
        actors: "someone".to_string(),
        director: "someone else".to_string(),
        genre: "Drama".to_string(),
    }
}

fn open(state: AppState, detail: MovieDetail) -> AppState {
    let (state, _) = update(state, Msg::MovieClicked(detail.id.clone()));
    let (state, _) = update(state, Msg::DetailUpdated(DetailState::loaded(detail)));
    state
}

fn watch(state: AppState, detail: MovieDetail, rating: u8) -> (AppState, Vec<Effect>) {
    let state = open(state, detail);
    let (state, _) = update(state, Msg::UserRated(rating));
    update(state, Msg::AddWatchedClicked)
}

#[test]
fn add_appends_and_closes_detail() {
    init_logging();
    let (state, effects) = watch(AppState::new(), detail("tt1", Some(8.0), Some(120)), 9);

    assert_eq!(effects, vec![Effect::PublishSelection(None)]);
    assert_eq!(state.selected(), None);
    assert_eq!(state.watched().len(), 1);
    let view = state.view();
    assert_eq!(view.watched[0].title, "Title tt1");
    assert_eq!(view.watched[0].user_rating, 9);
    assert_eq!(view.notice, None);
}

#[test]
fn summary_tracks_watched_items() {
    init_logging();
    let (state, _) = watch(AppState::new(), detail("tt1", Some(8.0), Some(120)), 9);
    let (state, _) = watch(state, detail("tt2", Some(6.0), Some(90)), 7);

    let summary = state.view().summary;
    assert_eq!(summary.count, 2);
    assert_eq!(summary.avg_external_rating, Some(7.0));
    assert_eq!(summary.avg_user_rating, Some(8.0));
    assert_eq!(summary.avg_runtime, Some(105.0));
}

#[test]
fn empty_summary_has_no_averages() {
    let summary = AppState::new().view().summary;
    assert_eq!(summary.count, 0);
    assert_eq!(summary.avg_external_rating, None);
    assert_eq!(summary.avg_user_rating, None);
    assert_eq!(summary.avg_runtime, None);
}

#[test]
fn same_title_added_twice_is_kept_twice() {
    init_logging();
    let (state, _) = watch(AppState::new(), detail("tt1", Some(8.0), Some(120)), 9);
    let (state, _) = watch(state, detail("tt1", Some(8.0), Some(120)), 5);
    assert_eq!(state.watched().len(), 2);
}

#[test]
fn add_without_rating_is_rejected() {
    init_logging();
    let state = open(AppState::new(), detail("tt1", Some(8.0), Some(120)));
    let (state, effects) = update(state, Msg::AddWatchedClicked);

    assert!(effects.is_empty());
    assert!(state.watched().is_empty());
    assert_eq!(state.selected(), Some(&MovieId::new("tt1")));
    assert!(state.view().notice.is_some());
}

#[test]
fn add_without_open_detail_is_rejected() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::AddWatchedClicked);
    assert!(effects.is_empty());
    assert!(state.watched().is_empty());
    assert!(state.view().notice.is_some());
}

#[test]
fn add_with_missing_runtime_is_rejected() {
    init_logging();
    let (state, effects) = watch(AppState::new(), detail("tt1", Some(8.0), None), 6);
    assert!(effects.is_empty());
    assert!(state.watched().is_empty());
    assert!(state.view().notice.unwrap().contains("runtime"));
}

#[test]
fn add_with_missing_rating_explains_the_policy() {
    init_logging();
    let (state, effects) = watch(AppState::new(), detail("tt1", None, Some(120)), 6);
    assert!(effects.is_empty());
    assert!(state.watched().is_empty());
    assert_eq!(
        state.view().notice.as_deref(),
        Some(
            "Cannot add this movie: Title tt1 has no numeric rating. Only titles with an IMDb rating \
             and a runtime can be added to the watched list."
        )
    );
}

#[test]
fn out_of_range_rating_sets_notice() {
    init_logging();
    let state = open(AppState::new(), detail("tt1", Some(8.0), Some(100)));
    let (state, _) = update(state, Msg::UserRated(0));
    let view = state.view();
    assert_eq!(view.user_rating, None);
    assert!(view.notice.is_some());

    let (state, _) = update(state, Msg::UserRated(7));
    let view = state.view();
    assert_eq!(view.user_rating, Some(7));
    assert_eq!(view.notice, None);
}

#[test]
fn rating_is_reset_when_selection_changes() {
    init_logging();
    let state = open(AppState::new(), detail("tt1", Some(8.0), Some(100)));
    let (state, _) = update(state, Msg::UserRated(7));
    let (state, _) = update(state, Msg::MovieClicked(MovieId::new("tt2")));
    assert_eq!(state.view().user_rating, None);
}
