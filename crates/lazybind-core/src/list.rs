//! Observable list store.

use std::cell::RefCell;
use std::rc::Rc;

use crate::observer::{DataObservable, DataObserver};

/// Single-threaded observable `Vec`, emitting a fine-grained structural
/// change event after each mutation.
///
/// Mutations complete before observers run, so an observer reading
/// [`len`](ObservableList::len) from inside a callback always sees the
/// post-event count.
pub struct ObservableList<T> {
    items: RefCell<Vec<T>>,
    observable: DataObservable,
}

impl<T> ObservableList<T> {
    pub fn new() -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            observable: DataObservable::new(),
        }
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: RefCell::new(items),
            observable: DataObservable::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Runs `f` against the item at `index`.
    ///
    /// Panics if `index` is out of bounds. The list must not be mutated
    /// from inside `f`.
    pub fn with_item<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> R {
        f(&self.items.borrow()[index])
    }

    pub fn push(&self, item: T) {
        let position = {
            let mut items = self.items.borrow_mut();
            items.push(item);
            items.len() - 1
        };
        self.observable.notify_item_range_inserted(position, 1);
    }

    pub fn insert(&self, index: usize, item: T) {
        self.items.borrow_mut().insert(index, item);
        self.observable.notify_item_range_inserted(index, 1);
    }

    /// Appends every item from `new_items`, announcing them as one range.
    pub fn extend(&self, new_items: impl IntoIterator<Item = T>) {
        let (position, count) = {
            let mut items = self.items.borrow_mut();
            let position = items.len();
            items.extend(new_items);
            (position, items.len() - position)
        };
        if count > 0 {
            self.observable.notify_item_range_inserted(position, count);
        }
    }

    pub fn remove(&self, index: usize) -> T {
        let item = self.items.borrow_mut().remove(index);
        self.observable.notify_item_range_removed(index, 1);
        item
    }

    /// Replaces the item at `index`, returning the previous value.
    pub fn set(&self, index: usize, item: T) -> T {
        let previous = std::mem::replace(&mut self.items.borrow_mut()[index], item);
        self.observable.notify_item_range_changed(index, 1);
        previous
    }

    /// Moves the item at `from` so that it ends up at index `to`.
    pub fn move_item(&self, from: usize, to: usize) {
        if from == to {
            return;
        }
        {
            let mut items = self.items.borrow_mut();
            let item = items.remove(from);
            items.insert(to, item);
        }
        self.observable.notify_item_range_moved(from, to, 1);
    }

    /// Swaps the whole contents, announced as a full reset.
    pub fn replace_all(&self, items: Vec<T>) {
        *self.items.borrow_mut() = items;
        self.observable.notify_changed();
    }

    pub fn clear(&self) {
        let count = {
            let mut items = self.items.borrow_mut();
            let count = items.len();
            items.clear();
            count
        };
        if count > 0 {
            self.observable.notify_item_range_removed(0, count);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observable.observer_count()
    }

    pub fn register_observer(&self, observer: Rc<dyn DataObserver>) {
        self.observable.register(observer);
    }

    pub fn unregister_observer(&self, observer: &Rc<dyn DataObserver>) {
        self.observable.unregister(observer);
    }
}

impl<T> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}
