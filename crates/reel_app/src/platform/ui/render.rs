use std::fmt;

use reel_core::{AppViewModel, FetchPhase, MovieDetail, WatchedSummary, MAX_USER_RATING};

/// Renders the whole view as plain text.
pub fn render(view: &AppViewModel) -> String {
    Screen(view).to_string()
}

struct Screen<'a>(&'a AppViewModel);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(out, "\n=== reel ==========================================")?;
        writeln!(
            out,
            "Search: {:?}   Found {} results",
            view.query, view.result_count
        )?;
        write_results(out, view)?;
        writeln!(out, "---------------------------------------------------")?;
        if view.selected.is_some() {
            write_detail(out, view)?;
        } else {
            write_watched(out, view)?;
        }
        if let Some(notice) = &view.notice {
            writeln!(out, "! {notice}")?;
        }
        Ok(())
    }
}

fn write_results(out: &mut fmt::Formatter<'_>, view: &AppViewModel) -> fmt::Result {
    match view.search_phase {
        FetchPhase::Loading => writeln!(out, "Loading..."),
        FetchPhase::Failed => {
            let message = view.error.as_deref().unwrap_or_default();
            writeln!(out, "[error] {message}")
        }
        FetchPhase::Empty => Ok(()),
        FetchPhase::Loaded => {
            for (index, row) in view.results.iter().enumerate() {
                let marker = if row.selected { '>' } else { ' ' };
                writeln!(out, "{marker}{:>3}. {} ({})", index + 1, row.title, row.year)?;
            }
            Ok(())
        }
    }
}

fn write_detail(out: &mut fmt::Formatter<'_>, view: &AppViewModel) -> fmt::Result {
    if view.detail_loading {
        return writeln!(out, "Loading...");
    }
    let Some(detail) = &view.detail else {
        return writeln!(out, "No details available.");
    };
    write_detail_body(out, detail)?;
    match view.user_rating {
        Some(rating) => writeln!(out, "Your rating: {rating}/{MAX_USER_RATING}   (:add to save)"),
        None => writeln!(out, "Rate it with :rate 1-{MAX_USER_RATING}"),
    }
}

fn write_detail_body(out: &mut fmt::Formatter<'_>, detail: &MovieDetail) -> fmt::Result {
    writeln!(out, "{} ({})", detail.title, detail.year)?;
    let runtime = detail
        .runtime_minutes
        .map(|minutes| format!("{minutes} min"))
        .unwrap_or_else(|| "runtime unknown".to_string());
    writeln!(out, "{} | {}", detail.released, runtime)?;
    writeln!(out, "{}", detail.genre)?;
    let rating = detail
        .rating
        .map(|rating| format!("{rating:.1}"))
        .unwrap_or_else(|| "-".to_string());
    writeln!(out, "IMDb rating: {rating}")?;
    writeln!(out, "{}", detail.plot)?;
    writeln!(out, "Starring {}", detail.actors)?;
    writeln!(out, "Directed by {}", detail.director)
}

fn write_watched(out: &mut fmt::Formatter<'_>, view: &AppViewModel) -> fmt::Result {
    writeln!(out, "Movies you watched")?;
    writeln!(out, "{}", summary_line(&view.summary))?;
    for row in &view.watched {
        writeln!(
            out,
            "  {}  imdb {:.1}  you {}  {} min",
            row.title, row.external_rating, row.user_rating, row.runtime_minutes
        )?;
    }
    Ok(())
}

pub fn summary_line(summary: &WatchedSummary) -> String {
    format!(
        "{} movies | imdb {} | you {} | {} min",
        summary.count,
        average(summary.avg_external_rating, 2),
        average(summary.avg_user_rating, 2),
        average(summary.avg_runtime, 0),
    )
}

fn average(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|value| format!("{value:.decimals$}"))
        .unwrap_or_else(|| "-".to_string())
}
