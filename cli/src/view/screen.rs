use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use serde::Serialize;
use termcolor::{Color, ColorSpec, WriteColor};
use tracing::warn;
use tripboard_core::{FormChanges, SortType, TripInfo};

use super::{
    BoardView, FilterItem, FilterView, FormView, Fragment, FragmentHandle, PointCard, Position,
    TripInfoView,
};

/// Retained model of everything the presenters have rendered.
///
/// Stands in for the DOM: fragments keep their identity and order until a
/// presenter replaces or removes them.
#[derive(Debug, Default, Serialize)]
pub struct Screen {
    #[serde(skip)]
    pub(crate) next_handle: u64,
    pub trip_info: Option<TripInfo>,
    pub filters: Vec<FilterItem>,
    pub sort: Option<SortType>,
    pub new_event_enabled: bool,
    pub list: Vec<(FragmentHandle, Fragment)>,
    /// Fragments shaken since the last draw
    #[serde(skip)]
    pub shaken: Vec<FragmentHandle>,
    /// Last partial form refresh, for inspection
    #[serde(skip)]
    pub last_form_changes: Option<FormChanges>,
}

impl Screen {
    pub fn fragment(&self, handle: FragmentHandle) -> Option<&Fragment> {
        self.list
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, fragment)| fragment)
    }

    pub fn cards(&self) -> Vec<&PointCard> {
        self.list
            .iter()
            .filter_map(|(_, fragment)| match fragment {
                Fragment::Point(card) => Some(card),
                _ => None,
            })
            .collect()
    }

    pub fn forms(&self) -> Vec<&FormView> {
        self.list
            .iter()
            .filter_map(|(_, fragment)| match fragment {
                Fragment::Form(form) => Some(form),
                _ => None,
            })
            .collect()
    }

    pub fn message(&self) -> Option<String> {
        self.list.iter().find_map(|(_, fragment)| match fragment {
            Fragment::Message(message) => Some(message.text()),
            _ => None,
        })
    }

    fn position(&self, handle: FragmentHandle) -> Option<usize> {
        self.list.iter().position(|(h, _)| *h == handle)
    }

    /// Draw the whole board; `blocked` dims the controls like the overlay does
    pub fn draw(&mut self, out: &mut dyn WriteColor, blocked: bool) -> io::Result<()> {
        if let Some(info) = &self.trip_info {
            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(out, "{}", info.title)?;
            out.reset()?;
            writeln!(out, "  {}  Total: €{}", info.dates, info.cost)?;
        }

        if !self.filters.is_empty() {
            for item in &self.filters {
                draw_toggle(out, item.filter.label(), item.is_checked, item.is_disabled)?;
            }
            writeln!(out)?;
        }

        if let Some(current) = self.sort {
            for sort in SortType::ALL {
                draw_toggle(out, sort.label(), sort == current, !sort.is_enabled())?;
            }
            writeln!(out)?;
        }

        draw_toggle(out, "+ New event", false, blocked || !self.new_event_enabled)?;
        writeln!(out)?;
        writeln!(out)?;

        for (handle, fragment) in &self.list {
            let shaken = self.shaken.contains(handle);
            match fragment {
                Fragment::Point(card) => draw_card(out, card, shaken)?,
                Fragment::Form(form) => draw_form(out, form, shaken, blocked)?,
                Fragment::Message(message) => writeln!(out, "{}", message.text())?,
            }
        }

        self.shaken.clear();
        out.flush()
    }
}

fn draw_toggle(out: &mut dyn WriteColor, label: &str, checked: bool, disabled: bool) -> io::Result<()> {
    let mut spec = ColorSpec::new();
    if disabled {
        spec.set_dimmed(true);
    } else if checked {
        spec.set_fg(Some(Color::Yellow)).set_bold(true);
    }
    out.set_color(&spec)?;
    if checked {
        write!(out, "[{}] ", label)?;
    } else {
        write!(out, " {}  ", label)?;
    }
    out.reset()
}

fn draw_card(out: &mut dyn WriteColor, card: &PointCard, shaken: bool) -> io::Result<()> {
    if shaken {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(out, "! ")?;
        out.reset()?;
    }

    write!(
        out,
        "{:<7} {} {:<22} {} — {} ({:>11})  €{}",
        card.date,
        card.event_type.label(),
        card.destination,
        card.start_time,
        card.end_time,
        card.duration,
        card.base_price
    )?;

    if card.is_favorite {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, " ★")?;
        out.reset()?;
    }

    out.set_color(ColorSpec::new().set_dimmed(true))?;
    writeln!(out, "  [{}]", card.id)?;
    out.reset()?;

    for offer in &card.offers {
        writeln!(out, "          + {} €{}", offer.title, offer.price)?;
    }
    Ok(())
}

fn draw_form(out: &mut dyn WriteColor, form: &FormView, shaken: bool, blocked: bool) -> io::Result<()> {
    let mut frame = ColorSpec::new();
    frame.set_fg(Some(if shaken { Color::Red } else { Color::Cyan }));

    out.set_color(&frame)?;
    writeln!(out, "┌ {:?} point{}", form.kind, if shaken { "  (rejected)" } else { "" })?;
    out.reset()?;

    let draft = &form.state.draft;
    writeln!(out, "│ type:        {}", draft.event_type.label())?;
    writeln!(out, "│ destination: {}", form.destination.name)?;
    writeln!(out, "│ from:        {}", form.date_from)?;
    writeln!(out, "│ to:          {}", form.date_to)?;
    writeln!(out, "│ price:       €{}", draft.base_price)?;

    for choice in &form.offers {
        writeln!(
            out,
            "│ [{}] {} +€{}  ({})",
            if choice.checked { "x" } else { " " },
            choice.offer.title,
            choice.offer.price,
            choice.offer.id
        )?;
    }

    if form.destination.has_details() {
        writeln!(out, "│ {}", form.destination.description)?;
    }

    let disabled = blocked || form.controls_disabled;
    out.set_color(&frame)?;
    write!(out, "└ ")?;
    out.reset()?;
    draw_toggle(out, form.submit_label, false, disabled)?;
    draw_toggle(out, form.reset_label, false, disabled)?;
    writeln!(out)
}

/// Cloneable handle so several presenters can render onto one screen
#[derive(Clone, Default)]
pub struct SharedScreen(Rc<RefCell<Screen>>);

impl SharedScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn borrow(&self) -> std::cell::Ref<'_, Screen> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, Screen> {
        self.0.borrow_mut()
    }
}

impl BoardView for SharedScreen {
    fn insert(&mut self, position: Position, fragment: Fragment) -> FragmentHandle {
        let mut screen = self.0.borrow_mut();
        let handle = FragmentHandle::new(screen.next_handle);
        screen.next_handle += 1;

        match position {
            Position::Start => screen.list.insert(0, (handle, fragment)),
            Position::End => screen.list.push((handle, fragment)),
        }
        handle
    }

    fn replace(&mut self, handle: FragmentHandle, fragment: Fragment) {
        let mut screen = self.0.borrow_mut();
        match screen.position(handle) {
            Some(index) => screen.list[index].1 = fragment,
            None => warn!("Replacing unmounted fragment {:?}", handle),
        }
    }

    fn update_form(&mut self, handle: FragmentHandle, form: FormView, changes: FormChanges) {
        let mut screen = self.0.borrow_mut();
        match screen.position(handle) {
            Some(index) => {
                screen.list[index].1 = Fragment::Form(form);
                screen.last_form_changes = Some(changes);
            }
            None => warn!("Updating unmounted form {:?}", handle),
        }
    }

    fn remove(&mut self, handle: FragmentHandle) {
        let mut screen = self.0.borrow_mut();
        screen.list.retain(|(h, _)| *h != handle);
        screen.shaken.retain(|h| *h != handle);
    }

    fn shake(&mut self, handle: FragmentHandle) {
        self.0.borrow_mut().shaken.push(handle);
    }

    fn render_sort(&mut self, current: SortType) {
        self.0.borrow_mut().sort = Some(current);
    }

    fn set_new_event_enabled(&mut self, enabled: bool) {
        self.0.borrow_mut().new_event_enabled = enabled;
    }
}

impl FilterView for SharedScreen {
    fn render_filters(&mut self, items: Vec<FilterItem>) {
        self.0.borrow_mut().filters = items;
    }
}

impl TripInfoView for SharedScreen {
    fn render_trip_info(&mut self, info: Option<TripInfo>) {
        self.0.borrow_mut().trip_info = info;
    }
}
