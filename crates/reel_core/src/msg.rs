#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the search box.
    QueryEdited(String),
    /// Search controller emitted a new view.
    SearchUpdated(crate::FetchState),
    /// User clicked a result row. Clicking the open title closes it.
    MovieClicked(crate::MovieId),
    /// User closed the detail view.
    MovieClosed,
    /// Detail controller emitted a new view.
    DetailUpdated(crate::DetailState),
    /// User picked a rating for the open title.
    UserRated(u8),
    /// User confirmed "add to watched" for the open title.
    AddWatchedClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
