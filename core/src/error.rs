use thiserror::Error;

/// Errors raised while bringing server data into the domain model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("unknown event type '{0}'")]
    UnknownEventType(String),
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
    #[error("point {0} ends before it starts")]
    InvertedDates(String),
    #[error("point received without an id")]
    MissingId,
}

/// Reasons a point form submit is rejected before reaching the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("destination is not selected")]
    MissingDestination,
    #[error("start date is not set")]
    MissingDateFrom,
    #[error("end date is not set")]
    MissingDateTo,
    #[error("price cannot be negative")]
    NegativePrice,
    #[error("price is too large")]
    PriceTooLarge,
    #[error("end date precedes start date")]
    EndsBeforeStart,
}
