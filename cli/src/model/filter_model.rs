use std::cell::Cell;

use tracing::debug;
use tripboard_core::{FilterType, UpdateType};

use super::observers::{ObserverId, Observers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterEvent {
    pub update_type: UpdateType,
    pub filter: FilterType,
}

/// Holds the active filter criterion and announces changes
#[derive(Default)]
pub struct FilterModel {
    filter: Cell<FilterType>,
    observers: Observers<FilterEvent>,
}

impl FilterModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> FilterType {
        self.filter.get()
    }

    /// Switch the filter; returns false and stays silent if it is already active
    pub fn set_filter(&self, update_type: UpdateType, filter: FilterType) -> bool {
        if self.filter.get() == filter {
            return false;
        }

        debug!("Filter changed to {}", filter);
        self.filter.set(filter);
        self.observers.notify(&FilterEvent {
            update_type,
            filter,
        });
        true
    }

    pub fn add_observer(&self, observer: impl Fn(&FilterEvent) + 'static) -> ObserverId {
        self.observers.add(observer)
    }

    pub fn remove_observer(&self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }
}
