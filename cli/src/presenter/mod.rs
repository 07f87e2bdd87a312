//! Controllers turning user events and model notifications into view updates.

mod board;
mod filter;
mod new_point;
mod point;
mod trip_info;

pub use board::{BoardState, EditingTarget, TripPresenter};
pub use filter::FilterPresenter;
pub use new_point::NewPointPresenter;
pub use point::PointPresenter;
pub use trip_info::TripInfoPresenter;

use tripboard_core::{Point, PointId, ValidationError};

use crate::model::TripError;

/// What a user interaction ended up doing
#[derive(Debug)]
pub enum Outcome {
    /// Not applicable in the current state
    Ignored,
    /// Refused because a request is in flight
    Blocked,
    /// Local-only change such as opening a form or switching sort
    Applied,
    /// Submitted form matched the stored point; nothing was sent
    Unchanged,
    Saved(Point),
    Created(Point),
    Deleted(PointId),
    Rejected(ValidationError),
    Failed(TripError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Rejected(_) | Outcome::Failed(_))
    }
}
