mod filter_model;
mod observers;
mod trip_model;

pub use filter_model::{FilterEvent, FilterModel};
pub use observers::{ObserverId, Observers};
pub use trip_model::{LoadState, ModelEvent, ModelPayload, TripError, TripModel};
