use std::rc::Rc;

use tracing::debug;
use tripboard_core::{FilterType, FormAction, PointId, SortType};

use crate::blocker::{TimeLimit, UiBlocker};
use crate::gateway::Gateway;
use crate::model::{FilterModel, TripModel};
use crate::presenter::{FilterPresenter, Outcome, TripInfoPresenter, TripPresenter};
use crate::view::{BoardView, FilterView, TripInfoView};

/// Everything a user can do on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    EditClick(PointId),
    FavoriteClick(PointId),
    Input(FormAction),
    Submit,
    /// Delete on an edit form, Cancel on the creation form
    Delete,
    Close,
    Escape,
    NewEvent,
    FilterChange(FilterType),
    SortChange(SortType),
}

/// Wires the models and presenters onto one surface
pub struct App<V>
where
    V: BoardView + FilterView + TripInfoView + Clone + 'static,
{
    model: Rc<TripModel>,
    blocker: Rc<UiBlocker>,
    board: TripPresenter<V>,
    filters: FilterPresenter<V>,
    trip_info: TripInfoPresenter<V>,
}

impl<V> App<V>
where
    V: BoardView + FilterView + TripInfoView + Clone + 'static,
{
    pub fn new(gateway: impl Gateway + 'static, limits: TimeLimit, view: V) -> Self {
        let filter_model = Rc::new(FilterModel::new());
        let model = Rc::new(TripModel::new(gateway, Rc::clone(&filter_model)));
        let blocker = Rc::new(UiBlocker::new(limits));

        let trip_info = TripInfoPresenter::new(Rc::clone(&model), view.clone());
        let filters = FilterPresenter::new(Rc::clone(&model), Rc::clone(&filter_model), view.clone());
        let board = TripPresenter::new(
            Rc::clone(&model),
            filter_model,
            Rc::clone(&blocker),
            view,
        );

        Self {
            model,
            blocker,
            board,
            filters,
            trip_info,
        }
    }

    /// Mount the presenters and load the trip
    pub async fn start(&mut self) {
        self.trip_info.init();
        self.filters.init();
        self.board.init();

        self.model.init().await;
        self.board.process_events();
    }

    pub async fn dispatch(&mut self, event: UiEvent) -> Outcome {
        debug!("Dispatching {:?}", event);

        match event {
            UiEvent::EditClick(id) => self.board.handle_edit_click(&id),
            UiEvent::FavoriteClick(id) => self.board.handle_favorite(&id).await,
            UiEvent::Input(action) => self.board.handle_form_input(action),
            UiEvent::Submit => self.board.handle_submit().await,
            UiEvent::Delete => self.board.handle_delete().await,
            UiEvent::Close | UiEvent::Escape => self.board.handle_close(),
            UiEvent::NewEvent => self.board.handle_new_event(),
            UiEvent::FilterChange(filter) => {
                let changed = self.filters.handle_filter_change(filter);
                self.board.process_events();
                if changed {
                    Outcome::Applied
                } else {
                    Outcome::Ignored
                }
            }
            UiEvent::SortChange(sort) => self.board.handle_sort_change(sort),
        }
    }

    pub fn model(&self) -> &TripModel {
        &self.model
    }

    pub fn board(&self) -> &TripPresenter<V> {
        &self.board
    }

    pub fn blocker(&self) -> &UiBlocker {
        &self.blocker
    }
}
