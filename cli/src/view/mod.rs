//! Rendering surface seen by the presenters.
//!
//! Presenters never format output themselves. They hand data-only fragments
//! to a surface and keep the returned handles to patch them in place later.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tripboard_core::{
    format, Catalog, Destination, EventType, FilterType, FormChanges, FormState, Offer, Point,
    PointId, SortType, TripInfo,
};

mod screen;

pub use screen::{Screen, SharedScreen};

/// Identity of a fragment mounted in the point list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FragmentHandle(u64);

impl FragmentHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Start,
    End,
}

/// View-mode projection of a point with its joins resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointCard {
    pub id: PointId,
    pub event_type: EventType,
    pub destination: String,
    pub date_from: DateTime<Utc>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub base_price: u32,
    pub offers: Vec<Offer>,
    pub is_favorite: bool,
}

impl PointCard {
    pub fn new(point: &Point, catalog: &Catalog) -> Self {
        PointCard {
            id: point.id.clone(),
            event_type: point.event_type,
            destination: catalog.destination_for(point).name.clone(),
            date_from: point.date_from,
            date: format::card_date(&point.date_from),
            start_time: format::clock_time(&point.date_from),
            end_time: format::clock_time(&point.date_to),
            duration: format::duration_label(point.duration()),
            base_price: point.base_price,
            offers: catalog.offers_for(point).into_iter().cloned().collect(),
            is_favorite: point.is_favorite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormKind {
    Edit,
    Create,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferChoice {
    pub offer: Offer,
    pub checked: bool,
}

/// Everything needed to draw a point form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub kind: FormKind,
    pub state: FormState,
    pub destination: Destination,
    pub destination_names: Vec<String>,
    pub offers: Vec<OfferChoice>,
    pub date_from: String,
    pub date_to: String,
    pub date_to_min: Option<DateTime<Utc>>,
    pub submit_label: &'static str,
    pub reset_label: &'static str,
    pub controls_disabled: bool,
}

impl FormView {
    pub fn new(kind: FormKind, state: &FormState, catalog: &Catalog) -> Self {
        let draft = &state.draft;
        let destination = draft
            .destination_id
            .as_ref()
            .map(|id| catalog.destinations.get(id).clone())
            .unwrap_or_else(|| Destination {
                id: "".into(),
                name: String::new(),
                description: String::new(),
                pictures: vec![],
            });

        let offers = catalog
            .offers
            .offers_for(draft.event_type)
            .iter()
            .map(|offer| OfferChoice {
                offer: offer.clone(),
                checked: draft.offers.contains(&offer.id),
            })
            .collect();

        let submit_label = if state.is_saving { "Saving..." } else { "Save" };
        let reset_label = match kind {
            FormKind::Create => "Cancel",
            FormKind::Edit if state.is_deleting => "Deleting...",
            FormKind::Edit => "Delete",
        };

        FormView {
            kind,
            state: state.clone(),
            destination,
            destination_names: catalog.destinations.iter().map(|d| d.name.clone()).collect(),
            offers,
            date_from: draft.date_from.as_ref().map(format::form_datetime).unwrap_or_default(),
            date_to: draft.date_to.as_ref().map(format::form_datetime).unwrap_or_default(),
            date_to_min: draft.date_to_lower_bound(),
            submit_label,
            reset_label,
            controls_disabled: state.is_busy(),
        }
    }
}

/// Single message occupying the list area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoardMessage {
    Loading,
    Error,
    Empty(FilterType),
}

impl BoardMessage {
    pub fn text(&self) -> String {
        match self {
            BoardMessage::Loading => "Loading...".to_string(),
            BoardMessage::Error => "Failed to load latest route information".to_string(),
            BoardMessage::Empty(filter) => filter.empty_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Fragment {
    Point(PointCard),
    Form(FormView),
    Message(BoardMessage),
}

/// The point list area plus the board-level controls
pub trait BoardView {
    fn insert(&mut self, position: Position, fragment: Fragment) -> FragmentHandle;

    /// Swap the fragment behind `handle`, keeping its place among siblings
    fn replace(&mut self, handle: FragmentHandle, fragment: Fragment);

    /// Refresh only the parts of a mounted form listed in `changes`
    fn update_form(&mut self, handle: FragmentHandle, form: FormView, changes: FormChanges);

    fn remove(&mut self, handle: FragmentHandle);

    /// Transient failure signal on a fragment
    fn shake(&mut self, handle: FragmentHandle);

    fn render_sort(&mut self, current: SortType);

    fn set_new_event_enabled(&mut self, enabled: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterItem {
    pub filter: FilterType,
    pub is_checked: bool,
    pub is_disabled: bool,
}

pub trait FilterView {
    fn render_filters(&mut self, items: Vec<FilterItem>);
}

pub trait TripInfoView {
    fn render_trip_info(&mut self, info: Option<TripInfo>);
}
