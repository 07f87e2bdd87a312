use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::Utc;
use tracing::debug;
use tripboard_core::{FilterType, UpdateType};

use crate::model::{FilterModel, ObserverId, TripModel};
use crate::view::{FilterItem, FilterView};

/// Renders the filter tabs and forwards tab selection to the filter state
pub struct FilterPresenter<V: FilterView + 'static> {
    model: Rc<TripModel>,
    filter_model: Rc<FilterModel>,
    view: Rc<RefCell<V>>,
    observers: Option<(ObserverId, ObserverId)>,
}

impl<V: FilterView + 'static> FilterPresenter<V> {
    pub fn new(model: Rc<TripModel>, filter_model: Rc<FilterModel>, view: V) -> Self {
        Self {
            model,
            filter_model,
            view: Rc::new(RefCell::new(view)),
            observers: None,
        }
    }

    /// Render once and re-render on every model or filter change
    pub fn init(&mut self) {
        if self.observers.is_some() {
            return;
        }

        let rerender = {
            let model = Rc::downgrade(&self.model);
            let filter_model = Rc::downgrade(&self.filter_model);
            let view = Rc::clone(&self.view);
            move || render(&model, &filter_model, &view)
        };

        let on_filter = rerender.clone();
        let model_observer = self.model.add_observer(move |_| rerender());
        let filter_observer = self.filter_model.add_observer(move |_| on_filter());
        self.observers = Some((model_observer, filter_observer));

        self.render();
    }

    pub fn render(&self) {
        render(
            &Rc::downgrade(&self.model),
            &Rc::downgrade(&self.filter_model),
            &self.view,
        );
    }

    /// Select a tab; disabled or already active tabs are ignored
    pub fn handle_filter_change(&self, filter: FilterType) -> bool {
        if !is_available(&self.model, filter) {
            debug!("Filter {} has no points", filter);
            return false;
        }
        self.filter_model.set_filter(UpdateType::Major, filter)
    }
}

impl<V: FilterView + 'static> Drop for FilterPresenter<V> {
    fn drop(&mut self) {
        if let Some((model_observer, filter_observer)) = self.observers.take() {
            self.model.remove_observer(model_observer);
            self.filter_model.remove_observer(filter_observer);
        }
    }
}

fn is_available(model: &TripModel, filter: FilterType) -> bool {
    filter.is_available(&model.all_points(), Utc::now())
}

fn render<V: FilterView>(
    model: &Weak<TripModel>,
    filter_model: &Weak<FilterModel>,
    view: &RefCell<V>,
) {
    let (Some(model), Some(filter_model)) = (model.upgrade(), filter_model.upgrade()) else {
        return;
    };

    let current = filter_model.filter();
    let items = FilterType::ALL
        .into_iter()
        .map(|filter| FilterItem {
            filter,
            is_checked: filter == current,
            is_disabled: !is_available(&model, filter),
        })
        .collect();

    view.borrow_mut().render_filters(items);
}
