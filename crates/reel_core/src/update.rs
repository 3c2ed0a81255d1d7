use reel_logging::reel_debug;

use crate::{AppState, Effect, Msg, UserRating};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryEdited(query) => {
            if state.set_query(query.clone()) {
                vec![Effect::PublishQuery(query)]
            } else {
                Vec::new()
            }
        }
        Msg::SearchUpdated(search) => {
            state.apply_search(search);
            Vec::new()
        }
        Msg::MovieClicked(id) => {
            let selection = state.select_movie(id);
            vec![Effect::PublishSelection(selection)]
        }
        Msg::MovieClosed => {
            if state.close_movie() {
                vec![Effect::PublishSelection(None)]
            } else {
                Vec::new()
            }
        }
        Msg::DetailUpdated(detail) => {
            state.apply_detail(detail);
            Vec::new()
        }
        Msg::UserRated(value) => {
            if state.selected().is_none() {
                state.set_notice("Open a movie before rating it.");
            } else {
                match UserRating::new(value) {
                    Ok(rating) => state.rate(rating),
                    Err(err) => state.set_notice(format!("Invalid rating: {err}.")),
                }
            }
            Vec::new()
        }
        Msg::AddWatchedClicked => match state.add_watched() {
            Ok(()) => vec![Effect::PublishSelection(None)],
            Err(err) => {
                reel_debug!("add to watched rejected: {}", err);
                state.set_notice(err.to_string());
                Vec::new()
            }
        },
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
