use std::rc::Rc;

use tracing::{debug, warn};
use tripboard_core::{Catalog, FormAction, FormChanges, FormState, PointDraft, UpdateType};

use super::Outcome;
use crate::blocker::UiBlocker;
use crate::model::TripModel;
use crate::view::{BoardView, FormKind, FormView, Fragment, FragmentHandle, Position};

struct OpenForm {
    handle: FragmentHandle,
    state: FormState,
    catalog: Rc<Catalog>,
}

/// Creation form mounted at the head of the point list
#[derive(Default)]
pub struct NewPointPresenter {
    form: Option<OpenForm>,
}

impl NewPointPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn form_state(&self) -> Option<&FormState> {
        self.form.as_ref().map(|form| &form.state)
    }

    pub fn open(&mut self, catalog: Rc<Catalog>, view: &mut dyn BoardView) {
        if self.form.is_some() {
            return;
        }

        let state = FormState::new(PointDraft::blank());
        let handle = view.insert(
            Position::Start,
            Fragment::Form(FormView::new(FormKind::Create, &state, &catalog)),
        );
        self.form = Some(OpenForm {
            handle,
            state,
            catalog,
        });
    }

    pub fn input(&mut self, action: FormAction, view: &mut dyn BoardView) {
        let Some(form) = &self.form else {
            return;
        };
        if form.state.is_busy() {
            return;
        }

        let catalog = Rc::clone(&form.catalog);
        self.set_form(view, |state| state.reduce(action, &catalog));
    }

    pub async fn submit(
        &mut self,
        model: &TripModel,
        blocker: &UiBlocker,
        view: &mut dyn BoardView,
    ) -> Outcome {
        let (handle, candidate) = match &self.form {
            Some(form) if !form.state.is_busy() => (form.handle, form.state.draft.validate()),
            _ => return Outcome::Ignored,
        };

        let candidate = match candidate {
            Ok(candidate) => candidate,
            Err(e) => {
                debug!("Rejected new point: {}", e);
                view.shake(handle);
                return Outcome::Rejected(e);
            }
        };

        blocker.block();
        self.set_form(view, |state| state.with_saving(true));
        let result = model.add_point(UpdateType::Minor, candidate).await;
        blocker.unblock().await;

        match result {
            Ok(created) => {
                self.destroy(view);
                Outcome::Created(created)
            }
            Err(e) => {
                warn!("Creating point failed: {}", e);
                self.set_form(view, |state| state.with_saving(false));
                view.shake(handle);
                Outcome::Failed(e)
            }
        }
    }

    pub fn destroy(&mut self, view: &mut dyn BoardView) {
        if let Some(form) = self.form.take() {
            view.remove(form.handle);
        }
    }

    fn set_form(
        &mut self,
        view: &mut dyn BoardView,
        step: impl FnOnce(&FormState) -> (FormState, FormChanges),
    ) {
        let Some(form) = &mut self.form else {
            return;
        };

        let (next, changes) = step(&form.state);
        form.state = next;
        if !changes.is_empty() {
            view.update_form(
                form.handle,
                FormView::new(FormKind::Create, &form.state, &form.catalog),
                changes,
            );
        }
    }
}
