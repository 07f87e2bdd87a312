use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tripboard_core::TripInfo;

use crate::model::{ObserverId, TripModel};
use crate::view::TripInfoView;

/// Keeps the route / dates / cost header in step with the model
pub struct TripInfoPresenter<V: TripInfoView + 'static> {
    model: Rc<TripModel>,
    view: Rc<RefCell<V>>,
    observer: Option<ObserverId>,
}

impl<V: TripInfoView + 'static> TripInfoPresenter<V> {
    pub fn new(model: Rc<TripModel>, view: V) -> Self {
        Self {
            model,
            view: Rc::new(RefCell::new(view)),
            observer: None,
        }
    }

    pub fn init(&mut self) {
        if self.observer.is_some() {
            return;
        }

        let model = Rc::downgrade(&self.model);
        let view = Rc::clone(&self.view);
        self.observer = Some(self.model.add_observer(move |_| render(&model, &view)));

        render(&Rc::downgrade(&self.model), &self.view);
    }
}

impl<V: TripInfoView + 'static> Drop for TripInfoPresenter<V> {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            self.model.remove_observer(observer);
        }
    }
}

fn render<V: TripInfoView>(model: &Weak<TripModel>, view: &RefCell<V>) {
    let Some(model) = model.upgrade() else {
        return;
    };
    let info = TripInfo::compute(&model.all_points(), &model.catalog());
    view.borrow_mut().render_trip_info(info);
}
