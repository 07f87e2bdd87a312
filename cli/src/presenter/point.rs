use std::rc::Rc;

use tracing::{debug, warn};
use tripboard_core::{
    Catalog, FormAction, FormChanges, FormState, Point, PointDraft, PointId, UpdateType,
};

use super::Outcome;
use crate::blocker::UiBlocker;
use crate::model::TripModel;
use crate::view::{BoardView, FormKind, FormView, Fragment, FragmentHandle, PointCard, Position};

/// Which of the two representations currently occupies the point's place
#[derive(Debug)]
enum Slot {
    Viewing { card: FragmentHandle },
    Editing { form: FragmentHandle, state: FormState },
    Detached,
}

/// Controller for a single point: its card, its edit form and the swap between them
pub struct PointPresenter {
    point: Point,
    catalog: Rc<Catalog>,
    slot: Slot,
}

impl PointPresenter {
    pub fn new(
        point: Point,
        catalog: Rc<Catalog>,
        view: &mut dyn BoardView,
        position: Position,
    ) -> Self {
        let card = view.insert(position, Fragment::Point(PointCard::new(&point, &catalog)));
        Self {
            point,
            catalog,
            slot: Slot::Viewing { card },
        }
    }

    pub fn id(&self) -> &PointId {
        &self.point.id
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.slot, Slot::Editing { .. })
    }

    pub fn is_mounted(&self) -> bool {
        !matches!(self.slot, Slot::Detached)
    }

    /// Current form snapshot while editing
    pub fn form_state(&self) -> Option<&FormState> {
        match &self.slot {
            Slot::Editing { state, .. } => Some(state),
            _ => None,
        }
    }

    pub fn open_editor(&mut self, view: &mut dyn BoardView) {
        let Slot::Viewing { card } = self.slot else {
            return;
        };

        let state = FormState::new(PointDraft::from_point(&self.point));
        view.replace(
            card,
            Fragment::Form(FormView::new(FormKind::Edit, &state, &self.catalog)),
        );
        self.slot = Slot::Editing { form: card, state };
    }

    /// Drop any pending edits and show the card again
    pub fn close_editor(&mut self, view: &mut dyn BoardView) {
        let Slot::Editing { form, .. } = self.slot else {
            return;
        };

        view.replace(form, self.card());
        self.slot = Slot::Viewing { card: form };
    }

    pub fn input(&mut self, action: FormAction, view: &mut dyn BoardView) {
        let Slot::Editing { state, .. } = &self.slot else {
            return;
        };
        if state.is_busy() {
            return;
        }

        let catalog = Rc::clone(&self.catalog);
        self.set_form(view, |state| state.reduce(action, &catalog));
    }

    pub async fn submit(
        &mut self,
        model: &TripModel,
        blocker: &UiBlocker,
        view: &mut dyn BoardView,
    ) -> Outcome {
        let (form, candidate) = match &self.slot {
            Slot::Editing { form, state } if !state.is_busy() => (*form, state.draft.validate()),
            _ => return Outcome::Ignored,
        };

        let candidate = match candidate {
            Ok(candidate) => candidate.with_id(self.point.id.clone()),
            Err(e) => {
                debug!("Rejected edit of {}: {}", self.point.id, e);
                view.shake(form);
                return Outcome::Rejected(e);
            }
        };

        if candidate == self.point {
            self.close_editor(view);
            return Outcome::Unchanged;
        }

        blocker.block();
        self.set_form(view, |state| state.with_saving(true));
        let result = model.update_point(UpdateType::Minor, candidate).await;
        blocker.unblock().await;

        match result {
            Ok(updated) => {
                self.point = updated.clone();
                self.close_editor(view);
                Outcome::Saved(updated)
            }
            Err(e) => {
                warn!("Saving point {} failed: {}", self.point.id, e);
                self.set_form(view, |state| state.with_saving(false));
                view.shake(form);
                Outcome::Failed(e)
            }
        }
    }

    pub async fn delete(
        &mut self,
        model: &TripModel,
        blocker: &UiBlocker,
        view: &mut dyn BoardView,
    ) -> Outcome {
        let form = match &self.slot {
            Slot::Editing { form, state } if !state.is_busy() => *form,
            _ => return Outcome::Ignored,
        };

        blocker.block();
        self.set_form(view, |state| state.with_deleting(true));
        let result = model.delete_point(UpdateType::Minor, &self.point.id).await;
        blocker.unblock().await;

        match result {
            Ok(()) => {
                self.destroy(view);
                Outcome::Deleted(self.point.id.clone())
            }
            Err(e) => {
                warn!("Deleting point {} failed: {}", self.point.id, e);
                self.set_form(view, |state| state.with_deleting(false));
                view.shake(form);
                Outcome::Failed(e)
            }
        }
    }

    /// Flip the favorite flag straight from the card, without the blocker.
    ///
    /// The card itself is refreshed by [`PointPresenter::update_point`] once
    /// the PATCH notification reaches the board.
    pub async fn toggle_favorite(&mut self, model: &TripModel, view: &mut dyn BoardView) -> Outcome {
        let Slot::Viewing { card } = self.slot else {
            return Outcome::Ignored;
        };

        match model
            .update_point(UpdateType::Patch, self.point.toggled_favorite())
            .await
        {
            Ok(updated) => Outcome::Saved(updated),
            Err(e) => {
                warn!("Toggling favorite on {} failed: {}", self.point.id, e);
                view.shake(card);
                Outcome::Failed(e)
            }
        }
    }

    /// Take a newer version of the point, re-rendering the card in place.
    ///
    /// An open form keeps its draft; the new data shows once it closes.
    pub fn update_point(&mut self, point: Point, view: &mut dyn BoardView) {
        self.point = point;
        if let Slot::Viewing { card } = self.slot {
            view.replace(card, self.card());
        }
    }

    pub fn destroy(&mut self, view: &mut dyn BoardView) {
        match std::mem::replace(&mut self.slot, Slot::Detached) {
            Slot::Viewing { card } => view.remove(card),
            Slot::Editing { form, .. } => view.remove(form),
            Slot::Detached => {}
        }
    }

    fn card(&self) -> Fragment {
        Fragment::Point(PointCard::new(&self.point, &self.catalog))
    }

    fn set_form(
        &mut self,
        view: &mut dyn BoardView,
        step: impl FnOnce(&FormState) -> (FormState, FormChanges),
    ) {
        let Slot::Editing { form, state } = &mut self.slot else {
            return;
        };

        let (next, changes) = step(state);
        *state = next;
        if !changes.is_empty() {
            view.update_form(
                *form,
                FormView::new(FormKind::Edit, state, &self.catalog),
                changes,
            );
        }
    }
}
