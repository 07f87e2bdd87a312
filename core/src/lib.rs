#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

pub mod error;
pub mod filter;
pub mod form;
pub mod format;
pub mod models;
pub mod sort;
pub mod summary;
pub mod wire;

// Re-export commonly used types
pub use error::{CoreError, ValidationError};
pub use filter::FilterType;
pub use form::{FormAction, FormChanges, FormState, PointDraft};
pub use models::{
    Catalog, Destination, DestinationId, Destinations, EventType, NewPoint, Offer, OfferCatalog,
    OfferId, Picture, Point, PointId, UpdateType,
};
pub use sort::SortType;
pub use summary::TripInfo;
pub use wire::{ServerDestination, ServerOffer, ServerOfferGroup, ServerPicture, ServerPoint};
