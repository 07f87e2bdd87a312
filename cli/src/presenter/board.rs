use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, warn};
use tripboard_core::{FilterType, FormAction, PointId, SortType, UpdateType};

use super::{NewPointPresenter, Outcome, PointPresenter};
use crate::blocker::UiBlocker;
use crate::model::{FilterEvent, FilterModel, ModelEvent, ModelPayload, ObserverId, TripModel};
use crate::view::{BoardMessage, BoardView, Fragment, FragmentHandle, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    Loading,
    Error,
    Ready,
}

/// The single form allowed open on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditingTarget {
    Point(PointId),
    NewPoint,
}

#[derive(Debug)]
enum BoardEvent {
    Model(ModelEvent),
    Filter(FilterEvent),
}

type Inbox = Rc<RefCell<VecDeque<BoardEvent>>>;

/// Owns the point list: one [`PointPresenter`] per visible point, the
/// creation form, the sort control and the list-level messages.
///
/// Model and filter notifications are queued and handled by
/// [`TripPresenter::process_events`] once the operation that caused them
/// has returned, so a presenter awaiting the model is never torn down
/// underneath itself.
pub struct TripPresenter<V: BoardView> {
    model: Rc<TripModel>,
    filter_model: Rc<FilterModel>,
    blocker: Rc<UiBlocker>,
    view: V,
    state: BoardState,
    sort: SortType,
    point_presenters: Vec<PointPresenter>,
    new_point: NewPointPresenter,
    editing: Option<EditingTarget>,
    message: Option<(FragmentHandle, BoardMessage)>,
    inbox: Inbox,
    model_observer: ObserverId,
    filter_observer: ObserverId,
}

impl<V: BoardView> TripPresenter<V> {
    pub fn new(
        model: Rc<TripModel>,
        filter_model: Rc<FilterModel>,
        blocker: Rc<UiBlocker>,
        view: V,
    ) -> Self {
        let inbox: Inbox = Rc::default();

        let queue = Rc::clone(&inbox);
        let model_observer = model.add_observer(move |event| {
            queue.borrow_mut().push_back(BoardEvent::Model(event.clone()));
        });
        let queue = Rc::clone(&inbox);
        let filter_observer = filter_model.add_observer(move |event| {
            queue.borrow_mut().push_back(BoardEvent::Filter(*event));
        });

        Self {
            model,
            filter_model,
            blocker,
            view,
            state: BoardState::Loading,
            sort: SortType::default(),
            point_presenters: Vec::new(),
            new_point: NewPointPresenter::new(),
            editing: None,
            message: None,
            inbox,
            model_observer,
            filter_observer,
        }
    }

    /// Show the loading state until the model reports INIT
    pub fn init(&mut self) {
        self.state = BoardState::Loading;
        self.view.set_new_event_enabled(false);
        self.show_message(BoardMessage::Loading);
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn sort(&self) -> SortType {
        self.sort
    }

    pub fn editing(&self) -> Option<&EditingTarget> {
        self.editing.as_ref()
    }

    pub fn presenters(&self) -> &[PointPresenter] {
        &self.point_presenters
    }

    pub fn new_point(&self) -> &NewPointPresenter {
        &self.new_point
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Handle every queued notification in arrival order
    pub fn process_events(&mut self) {
        loop {
            let Some(event) = self.inbox.borrow_mut().pop_front() else {
                break;
            };

            match event {
                BoardEvent::Model(event) => self.handle_model_event(event),
                BoardEvent::Filter(event) => self.handle_filter_event(event),
            }
        }
    }

    fn handle_model_event(&mut self, event: ModelEvent) {
        match (event.update_type, event.payload) {
            (_, ModelPayload::Init { is_error: true }) => {
                self.state = BoardState::Error;
                self.clear_board();
                self.view.set_new_event_enabled(false);
                self.show_message(BoardMessage::Error);
            }
            (_, ModelPayload::Init { is_error: false }) => {
                self.state = BoardState::Ready;
                self.view.render_sort(self.sort);
                self.view.set_new_event_enabled(true);
                self.rebuild();
            }
            _ if self.state != BoardState::Ready => {
                debug!("Ignoring model event before the board is ready");
            }
            (UpdateType::Patch, ModelPayload::Point(point)) => {
                match self
                    .point_presenters
                    .iter_mut()
                    .find(|presenter| presenter.id() == &point.id)
                {
                    Some(presenter) => presenter.update_point(point, &mut self.view),
                    None => debug!("Point {} is not on the board", point.id),
                }
            }
            (UpdateType::Major, _) => {
                self.reset_sort();
                self.rebuild();
            }
            _ => self.rebuild(),
        }
    }

    fn handle_filter_event(&mut self, event: FilterEvent) {
        if self.state != BoardState::Ready {
            return;
        }
        if event.update_type == UpdateType::Major {
            self.reset_sort();
        }
        self.rebuild();
    }

    pub fn handle_sort_change(&mut self, sort: SortType) -> Outcome {
        if self.state != BoardState::Ready || !sort.is_enabled() || sort == self.sort {
            return Outcome::Ignored;
        }

        debug!("Sorting by {}", sort);
        self.sort = sort;
        self.view.render_sort(sort);
        self.rebuild();
        Outcome::Applied
    }

    pub fn handle_edit_click(&mut self, id: &PointId) -> Outcome {
        if self.blocker.is_blocked() {
            return Outcome::Blocked;
        }
        if self.editing.as_ref() == Some(&EditingTarget::Point(id.clone())) {
            return Outcome::Ignored;
        }
        if !self.point_presenters.iter().any(|p| p.id() == id) {
            return Outcome::Ignored;
        }

        self.close_editor();
        if let Some(presenter) = self.point_presenters.iter_mut().find(|p| p.id() == id) {
            presenter.open_editor(&mut self.view);
        }
        self.editing = Some(EditingTarget::Point(id.clone()));
        Outcome::Applied
    }

    pub fn handle_form_input(&mut self, action: FormAction) -> Outcome {
        if self.blocker.is_blocked() {
            return Outcome::Blocked;
        }

        match &self.editing {
            Some(EditingTarget::Point(id)) => {
                if let Some(presenter) = self.point_presenters.iter_mut().find(|p| p.id() == id) {
                    presenter.input(action, &mut self.view);
                }
            }
            Some(EditingTarget::NewPoint) => self.new_point.input(action, &mut self.view),
            None => return Outcome::Ignored,
        }
        Outcome::Applied
    }

    pub async fn handle_submit(&mut self) -> Outcome {
        if self.blocker.is_blocked() {
            return Outcome::Blocked;
        }

        let outcome = match self.editing.clone() {
            Some(EditingTarget::Point(id)) => {
                let Some(presenter) = self.point_presenters.iter_mut().find(|p| p.id() == &id)
                else {
                    return Outcome::Ignored;
                };
                presenter
                    .submit(&self.model, &self.blocker, &mut self.view)
                    .await
            }
            Some(EditingTarget::NewPoint) => {
                self.new_point
                    .submit(&self.model, &self.blocker, &mut self.view)
                    .await
            }
            None => return Outcome::Ignored,
        };

        match outcome {
            Outcome::Saved(_) | Outcome::Unchanged => self.editing = None,
            Outcome::Created(_) => {
                self.editing = None;
                self.view.set_new_event_enabled(true);
            }
            _ => {}
        }

        self.process_events();
        outcome
    }

    /// Delete on the edit form, Cancel on the creation form
    pub async fn handle_delete(&mut self) -> Outcome {
        if self.blocker.is_blocked() {
            return Outcome::Blocked;
        }

        match self.editing.clone() {
            Some(EditingTarget::Point(id)) => {
                let Some(index) = self.point_presenters.iter().position(|p| p.id() == &id) else {
                    return Outcome::Ignored;
                };
                let outcome = self.point_presenters[index]
                    .delete(&self.model, &self.blocker, &mut self.view)
                    .await;

                if let Outcome::Deleted(_) = outcome {
                    self.point_presenters.remove(index);
                    self.editing = None;
                }

                self.process_events();
                outcome
            }
            Some(EditingTarget::NewPoint) => {
                self.close_editor();
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    /// Close button of the edit form and the global Escape key
    pub fn handle_close(&mut self) -> Outcome {
        if self.blocker.is_blocked() {
            return Outcome::Blocked;
        }
        if self.editing.is_none() {
            return Outcome::Ignored;
        }

        self.close_editor();
        Outcome::Applied
    }

    pub async fn handle_favorite(&mut self, id: &PointId) -> Outcome {
        let Some(presenter) = self.point_presenters.iter_mut().find(|p| p.id() == id) else {
            return Outcome::Ignored;
        };

        let outcome = presenter.toggle_favorite(&self.model, &mut self.view).await;
        self.process_events();
        outcome
    }

    pub fn handle_new_event(&mut self) -> Outcome {
        if self.blocker.is_blocked() {
            return Outcome::Blocked;
        }
        if self.state != BoardState::Ready || self.new_point.is_open() {
            return Outcome::Ignored;
        }

        self.filter_model
            .set_filter(UpdateType::Major, FilterType::Everything);
        self.process_events();
        if self.sort != SortType::Day {
            self.reset_sort();
            self.rebuild();
        }

        self.close_editor();
        self.remove_message();
        self.new_point.open(self.model.catalog(), &mut self.view);
        self.view.set_new_event_enabled(false);
        self.editing = Some(EditingTarget::NewPoint);
        Outcome::Applied
    }

    fn close_editor(&mut self) {
        match self.editing.take() {
            Some(EditingTarget::Point(id)) => {
                if let Some(presenter) = self.point_presenters.iter_mut().find(|p| p.id() == &id) {
                    presenter.close_editor(&mut self.view);
                }
            }
            Some(EditingTarget::NewPoint) => {
                self.new_point.destroy(&mut self.view);
                self.view.set_new_event_enabled(true);
                if self.point_presenters.is_empty() && self.state == BoardState::Ready {
                    self.show_message(BoardMessage::Empty(self.filter_model.filter()));
                }
            }
            None => {}
        }
    }

    fn reset_sort(&mut self) {
        self.sort = SortType::Day;
        self.view.render_sort(self.sort);
    }

    /// Destroy every presenter and render the visible points from scratch
    fn rebuild(&mut self) {
        self.clear_board();

        let mut points = self.model.visible_points();
        self.sort.sort(&mut points);

        if points.is_empty() {
            self.show_message(BoardMessage::Empty(self.filter_model.filter()));
            return;
        }

        let catalog = self.model.catalog();
        for point in points {
            let presenter =
                PointPresenter::new(point, Rc::clone(&catalog), &mut self.view, Position::End);
            self.point_presenters.push(presenter);
        }
    }

    fn clear_board(&mut self) {
        for presenter in &mut self.point_presenters {
            presenter.destroy(&mut self.view);
        }
        self.point_presenters.clear();

        if self.new_point.is_open() {
            self.new_point.destroy(&mut self.view);
            self.view.set_new_event_enabled(self.state == BoardState::Ready);
        }
        self.editing = None;
        self.remove_message();
    }

    fn show_message(&mut self, message: BoardMessage) {
        self.remove_message();
        let handle = self.view.insert(Position::End, Fragment::Message(message));
        self.message = Some((handle, message));
    }

    fn remove_message(&mut self) {
        if let Some((handle, _)) = self.message.take() {
            self.view.remove(handle);
        }
    }

    pub fn message(&self) -> Option<BoardMessage> {
        self.message.map(|(_, message)| message)
    }
}

impl<V: BoardView> Drop for TripPresenter<V> {
    fn drop(&mut self) {
        if !self.model.remove_observer(self.model_observer) {
            warn!("Board observer was already removed from the trip model");
        }
        self.filter_model.remove_observer(self.filter_observer);
    }
}
