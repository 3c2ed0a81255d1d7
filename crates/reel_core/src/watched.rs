use thiserror::Error;

use crate::{MovieDetail, MovieId};

pub const MAX_USER_RATING: u8 = 10;

/// Rating the user assigns to a title, `1..=MAX_USER_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserRating(u8);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("rating must be between 1 and {max}, got {got}")]
    OutOfRange { got: u8, max: u8 },
}

impl UserRating {
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (1..=MAX_USER_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange {
                got: value,
                max: MAX_USER_RATING,
            })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// A title the user marked as watched.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedItem {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
    pub external_rating: f32,
    pub user_rating: u8,
    pub runtime_minutes: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WatchedItemError {
    #[error("{title} has no numeric rating")]
    MissingRating { title: String },
    #[error("{title} has no runtime")]
    MissingRuntime { title: String },
}

impl WatchedItem {
    /// Single mapping from a fetched detail plus the user's rating.
    pub fn from_detail(detail: &MovieDetail, rating: UserRating) -> Result<Self, WatchedItemError> {
        let external_rating = detail.rating.ok_or_else(|| WatchedItemError::MissingRating {
            title: detail.title.clone(),
        })?;
        let runtime_minutes =
            detail
                .runtime_minutes
                .ok_or_else(|| WatchedItemError::MissingRuntime {
                    title: detail.title.clone(),
                })?;

        Ok(Self {
            id: detail.id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster: detail.poster.clone(),
            external_rating,
            user_rating: rating.value(),
            runtime_minutes,
        })
    }
}

/// Derived statistics over the watched collection.
///
/// Averages are `None` for an empty collection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_external_rating: Option<f64>,
    pub avg_user_rating: Option<f64>,
    pub avg_runtime: Option<f64>,
}

pub fn summarize(items: &[WatchedItem]) -> WatchedSummary {
    WatchedSummary {
        count: items.len(),
        avg_external_rating: mean(items.iter().map(|item| f64::from(item.external_rating))),
        avg_user_rating: mean(items.iter().map(|item| f64::from(item.user_rating))),
        avg_runtime: mean(items.iter().map(|item| f64::from(item.runtime_minutes))),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
