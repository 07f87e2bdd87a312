use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned on registration, used to unregister
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback<E> = Rc<dyn Fn(&E)>;

/// Registration list of callbacks, notified synchronously in registration order
pub struct Observers<E> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ObserverId, Callback<E>)>>,
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<E> Observers<E> {
    pub fn add(&self, observer: impl Fn(&E) + 'static) -> ObserverId {
        let id = ObserverId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    /// Returns false when the id was not registered
    pub fn remove(&self, id: ObserverId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub fn notify(&self, event: &E) {
        // Snapshot so callbacks may (un)register without a borrow conflict
        let callbacks: Vec<Callback<E>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
