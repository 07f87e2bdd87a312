//! Point form state as an immutable snapshot plus a reducer.
//!
//! Every field handler produces a new [`FormState`] and a [`FormChanges`]
//! describing which parts of the rendered form need refreshing.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::ValidationError;
use crate::models::{Catalog, DestinationId, EventType, NewPoint, OfferId, Point, PointId};

/// Gap enforced between the start and the earliest allowed end
pub const MIN_GAP_MINUTES: i64 = 1;
/// Duration given to a point whose end had to be moved after its start changed
pub const DEFAULT_DURATION_HOURS: i64 = 1;

/// Editable point data; fields may be unset while the user is typing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointDraft {
    pub id: Option<PointId>,
    pub event_type: EventType,
    pub destination_id: Option<DestinationId>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub base_price: i64,
    pub offers: Vec<OfferId>,
    pub is_favorite: bool,
}

impl PointDraft {
    /// Draft backing the creation form
    pub fn blank() -> Self {
        PointDraft {
            id: None,
            event_type: EventType::default(),
            destination_id: None,
            date_from: None,
            date_to: None,
            base_price: 0,
            offers: vec![],
            is_favorite: false,
        }
    }

    pub fn from_point(point: &Point) -> Self {
        PointDraft {
            id: Some(point.id.clone()),
            event_type: point.event_type,
            destination_id: Some(point.destination_id.clone()),
            date_from: Some(point.date_from),
            date_to: Some(point.date_to),
            base_price: i64::from(point.base_price),
            offers: point.offers.clone(),
            is_favorite: point.is_favorite,
        }
    }

    /// Check the submit rules and produce the unsaved point data
    pub fn validate(&self) -> Result<NewPoint, ValidationError> {
        let destination_id = self
            .destination_id
            .clone()
            .ok_or(ValidationError::MissingDestination)?;
        let date_from = self.date_from.ok_or(ValidationError::MissingDateFrom)?;
        let date_to = self.date_to.ok_or(ValidationError::MissingDateTo)?;

        if self.base_price < 0 {
            return Err(ValidationError::NegativePrice);
        }
        let base_price =
            u32::try_from(self.base_price).map_err(|_| ValidationError::PriceTooLarge)?;
        if date_to < date_from {
            return Err(ValidationError::EndsBeforeStart);
        }

        Ok(NewPoint {
            event_type: self.event_type,
            destination_id,
            date_from,
            date_to,
            base_price,
            offers: self.offers.clone(),
            is_favorite: self.is_favorite,
        })
    }

    /// Earliest end the date picker accepts
    pub fn date_to_lower_bound(&self) -> Option<DateTime<Utc>> {
        self.date_from
            .map(|from| from + Duration::minutes(MIN_GAP_MINUTES))
    }
}

/// A single user interaction with the form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SelectType(EventType),
    /// Destination typed or picked by name
    SelectDestination(String),
    SetDateFrom(Option<DateTime<Utc>>),
    SetDateTo(Option<DateTime<Utc>>),
    /// Raw text of the price input
    InputPrice(String),
    ToggleOffer { id: OfferId, checked: bool },
}

/// Parts of the form a reduction touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FormChanges {
    pub event_type: bool,
    pub destination: bool,
    pub dates: bool,
    pub price: bool,
    pub offers: bool,
    pub controls: bool,
}

impl FormChanges {
    pub fn is_empty(&self) -> bool {
        *self == FormChanges::default()
    }

    pub fn all() -> Self {
        FormChanges {
            event_type: true,
            destination: true,
            dates: true,
            price: true,
            offers: true,
            controls: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub draft: PointDraft,
    pub is_saving: bool,
    pub is_deleting: bool,
}

impl FormState {
    pub fn new(draft: PointDraft) -> Self {
        FormState {
            draft,
            is_saving: false,
            is_deleting: false,
        }
    }

    /// Controls are disabled while a request is in flight
    pub fn is_busy(&self) -> bool {
        self.is_saving || self.is_deleting
    }

    pub fn reduce(&self, action: FormAction, catalog: &Catalog) -> (FormState, FormChanges) {
        let mut next = self.clone();
        let mut changes = FormChanges::default();
        let draft = &mut next.draft;

        match action {
            FormAction::SelectType(event_type) => {
                if draft.event_type != event_type {
                    draft.event_type = event_type;
                    draft.offers.clear();
                    changes.event_type = true;
                    changes.offers = true;
                }
            }
            FormAction::SelectDestination(name) => {
                let selected = catalog
                    .destinations
                    .find_by_name(name.trim())
                    .map(|d| d.id.clone());
                if draft.destination_id != selected {
                    draft.destination_id = selected;
                    changes.destination = true;
                }
            }
            FormAction::SetDateFrom(date_from) => {
                if draft.date_from != date_from {
                    draft.date_from = date_from;
                    changes.dates = true;

                    if let (Some(bound), Some(to)) = (draft.date_to_lower_bound(), draft.date_to) {
                        if to < bound {
                            draft.date_to =
                                date_from.map(|from| from + Duration::hours(DEFAULT_DURATION_HOURS));
                        }
                    }
                }
            }
            FormAction::SetDateTo(date_to) => {
                let below_bound = match (date_to, draft.date_to_lower_bound()) {
                    (Some(to), Some(bound)) => to < bound,
                    _ => false,
                };
                if !below_bound && draft.date_to != date_to {
                    draft.date_to = date_to;
                    changes.dates = true;
                }
            }
            FormAction::InputPrice(raw) => {
                let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
                let price = if raw.trim().is_empty() {
                    Some(0)
                } else {
                    digits.parse::<i64>().ok()
                };
                if let Some(price) = price {
                    if draft.base_price != price {
                        draft.base_price = price;
                        changes.price = true;
                    }
                }
            }
            FormAction::ToggleOffer { id, checked } => {
                let known = catalog
                    .offers
                    .offers_for(draft.event_type)
                    .iter()
                    .any(|o| o.id == id);
                let selected = draft.offers.contains(&id);

                if known && checked && !selected {
                    draft.offers.push(id);
                    changes.offers = true;
                } else if selected && !checked {
                    draft.offers.retain(|o| o != &id);
                    changes.offers = true;
                }
            }
        }

        (next, changes)
    }

    pub fn with_saving(&self, is_saving: bool) -> (FormState, FormChanges) {
        let next = FormState {
            draft: self.draft.clone(),
            is_saving,
            is_deleting: self.is_deleting && !is_saving,
        };
        let changes = FormChanges {
            controls: next != *self,
            ..FormChanges::default()
        };
        (next, changes)
    }

    pub fn with_deleting(&self, is_deleting: bool) -> (FormState, FormChanges) {
        let next = FormState {
            draft: self.draft.clone(),
            is_saving: self.is_saving && !is_deleting,
            is_deleting,
        };
        let changes = FormChanges {
            controls: next != *self,
            ..FormChanges::default()
        };
        (next, changes)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::{Destination, Destinations, Offer, OfferCatalog};

    fn catalog() -> Catalog {
        let destinations = Destinations::new(vec![Destination {
            id: DestinationId::from("gva"),
            name: "Geneva".to_string(),
            description: "Lake".to_string(),
            pictures: vec![],
        }]);
        let offers = OfferCatalog::from_groups(vec![
            (
                "flight",
                vec![Offer {
                    id: OfferId::from("meal"),
                    title: "Add meal".to_string(),
                    price: 15,
                }],
            ),
            ("bus", vec![]),
        ]);
        Catalog::new(destinations, offers)
    }

    fn ts(value: &str) -> DateTime<Utc> {
        value.parse().unwrap()
    }

    #[test]
    fn test_blank_draft_is_rejected_until_complete() {
        let catalog = catalog();
        let state = FormState::new(PointDraft::blank());
        assert_eq!(
            state.draft.validate(),
            Err(ValidationError::MissingDestination)
        );

        let (state, _) = state.reduce(FormAction::SelectDestination("Geneva".into()), &catalog);
        assert_eq!(state.draft.validate(), Err(ValidationError::MissingDateFrom));

        let (state, _) = state.reduce(
            FormAction::SetDateFrom(Some(ts("2025-01-01T10:00:00Z"))),
            &catalog,
        );
        assert_eq!(state.draft.validate(), Err(ValidationError::MissingDateTo));

        let (state, _) = state.reduce(
            FormAction::SetDateTo(Some(ts("2025-01-01T12:00:00Z"))),
            &catalog,
        );
        let point = state.draft.validate().unwrap();
        assert_eq!(point.destination_id, DestinationId::from("gva"));
        assert_eq!(point.event_type, EventType::Flight);
    }

    #[test]
    fn test_negative_price_and_inverted_dates_are_rejected() {
        let mut draft = PointDraft::blank();
        draft.destination_id = Some(DestinationId::from("gva"));
        draft.date_from = Some(ts("2025-01-02T10:00:00Z"));
        draft.date_to = Some(ts("2025-01-01T10:00:00Z"));
        assert_eq!(draft.validate(), Err(ValidationError::EndsBeforeStart));

        draft.date_to = Some(ts("2025-01-03T10:00:00Z"));
        draft.base_price = -1;
        assert_eq!(draft.validate(), Err(ValidationError::NegativePrice));
    }

    #[test]
    fn test_price_beyond_u32_is_rejected_not_clamped() {
        let catalog = catalog();
        let mut draft = PointDraft::blank();
        draft.destination_id = Some(DestinationId::from("gva"));
        draft.date_from = Some(ts("2025-01-01T10:00:00Z"));
        draft.date_to = Some(ts("2025-01-01T11:00:00Z"));

        let (state, _) = FormState::new(draft)
            .reduce(FormAction::InputPrice("5000000000".into()), &catalog);
        assert_eq!(state.draft.base_price, 5_000_000_000);
        assert_eq!(state.draft.validate(), Err(ValidationError::PriceTooLarge));

        let (state, _) = state.reduce(FormAction::InputPrice("4294967295".into()), &catalog);
        assert_eq!(state.draft.validate().unwrap().base_price, u32::MAX);
    }

    #[test]
    fn test_type_change_clears_offers() {
        let catalog = catalog();
        let state = FormState::new(PointDraft::blank());
        let (state, changes) = state.reduce(
            FormAction::ToggleOffer {
                id: OfferId::from("meal"),
                checked: true,
            },
            &catalog,
        );
        assert!(changes.offers);
        assert_eq!(state.draft.offers, vec![OfferId::from("meal")]);

        let (state, changes) = state.reduce(FormAction::SelectType(EventType::Bus), &catalog);
        assert!(changes.event_type && changes.offers);
        assert!(!changes.destination);
        assert!(state.draft.offers.is_empty());
    }

    #[test]
    fn test_unknown_offer_is_ignored() {
        let (state, changes) = FormState::new(PointDraft::blank()).reduce(
            FormAction::ToggleOffer {
                id: OfferId::from("spa"),
                checked: true,
            },
            &catalog(),
        );
        assert!(changes.is_empty());
        assert!(state.draft.offers.is_empty());
    }

    #[test]
    fn test_unknown_destination_unsets_selection() {
        let catalog = catalog();
        let (state, _) = FormState::new(PointDraft::blank())
            .reduce(FormAction::SelectDestination("Geneva".into()), &catalog);
        let (state, changes) = state.reduce(FormAction::SelectDestination("Atlantis".into()), &catalog);

        assert!(changes.destination);
        assert_eq!(state.draft.destination_id, None);
    }

    #[test]
    fn test_moving_start_past_end_pushes_end() {
        let catalog = catalog();
        let mut draft = PointDraft::blank();
        draft.date_from = Some(ts("2025-01-01T10:00:00Z"));
        draft.date_to = Some(ts("2025-01-01T11:00:00Z"));
        let state = FormState::new(draft);

        let (state, changes) = state.reduce(
            FormAction::SetDateFrom(Some(ts("2025-01-01T12:00:00Z"))),
            &catalog,
        );
        assert!(changes.dates);
        assert_eq!(state.draft.date_to, Some(ts("2025-01-01T13:00:00Z")));

        // The picker refuses an end below start + 1 minute
        let (state, changes) = state.reduce(
            FormAction::SetDateTo(Some(ts("2025-01-01T12:00:30Z"))),
            &catalog,
        );
        assert!(changes.is_empty());
        assert_eq!(state.draft.date_to, Some(ts("2025-01-01T13:00:00Z")));
    }

    #[test]
    fn test_price_input_keeps_digits() {
        let catalog = catalog();
        let state = FormState::new(PointDraft::blank());

        let (state, _) = state.reduce(FormAction::InputPrice("1a2".into()), &catalog);
        assert_eq!(state.draft.base_price, 12);

        let (state, changes) = state.reduce(FormAction::InputPrice("abc".into()), &catalog);
        assert!(changes.is_empty());
        assert_eq!(state.draft.base_price, 12);

        let (state, _) = state.reduce(FormAction::InputPrice("".into()), &catalog);
        assert_eq!(state.draft.base_price, 0);
    }

    #[test]
    fn test_saving_and_deleting_are_exclusive() {
        let state = FormState::new(PointDraft::blank());
        let (state, changes) = state.with_deleting(true);
        assert!(changes.controls);
        assert!(state.is_busy());

        let (state, _) = state.with_saving(true);
        assert!(state.is_saving && !state.is_deleting);

        let (state, changes) = state.with_saving(true);
        assert!(!changes.controls);
        assert!(state.is_busy());
    }
}
