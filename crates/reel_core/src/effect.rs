use crate::MovieId;

/// Side effects requested by `update`; the front end applies them to the input cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Push the edited query into the cell the search controller observes.
    PublishQuery(String),
    /// Push the selection into the cell the detail controller observes.
    PublishSelection(Option<MovieId>),
}
