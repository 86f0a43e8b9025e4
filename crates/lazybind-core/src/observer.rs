//! Structural change observation.

use std::cell::RefCell;
use std::rc::Rc;

/// Receives fine-grained structural change events from an item source.
///
/// Positions are indices into the source at the moment the event fires;
/// by the time an observer runs, the source's `item_count` already
/// reflects the change being announced.
pub trait DataObserver {
    /// The data set changed in a way too coarse to describe; consumers
    /// must re-query everything.
    fn on_changed(&self);

    fn on_item_range_changed(&self, position: usize, count: usize);

    fn on_item_range_inserted(&self, position: usize, count: usize);

    fn on_item_range_removed(&self, position: usize, count: usize);

    fn on_item_range_moved(&self, from_position: usize, to_position: usize, count: usize);
}

/// Registration set plus notification fan-out for [`DataObserver`]s.
///
/// Observers are identity-keyed; registering the same `Rc` twice or
/// unregistering one that was never registered is a caller bug and
/// panics. Fan-out snapshots the set first, so observers may unregister
/// from inside a callback.
#[derive(Default)]
pub struct DataObservable {
    observers: RefCell<Vec<Rc<dyn DataObserver>>>,
}

impl DataObservable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn register(&self, observer: Rc<dyn DataObserver>) {
        let mut observers = self.observers.borrow_mut();
        if observers
            .iter()
            .any(|existing| Rc::ptr_eq(existing, &observer))
        {
            panic!("observer is already registered");
        }
        observers.push(observer);
    }

    pub fn unregister(&self, observer: &Rc<dyn DataObserver>) {
        let mut observers = self.observers.borrow_mut();
        match observers
            .iter()
            .position(|existing| Rc::ptr_eq(existing, observer))
        {
            Some(index) => {
                observers.remove(index);
            }
            None => panic!("observer is not registered"),
        }
    }

    fn snapshot(&self) -> Vec<Rc<dyn DataObserver>> {
        self.observers.borrow().clone()
    }

    pub fn notify_changed(&self) {
        for observer in self.snapshot() {
            observer.on_changed();
        }
    }

    pub fn notify_item_range_changed(&self, position: usize, count: usize) {
        for observer in self.snapshot() {
            observer.on_item_range_changed(position, count);
        }
    }

    pub fn notify_item_range_inserted(&self, position: usize, count: usize) {
        for observer in self.snapshot() {
            observer.on_item_range_inserted(position, count);
        }
    }

    pub fn notify_item_range_removed(&self, position: usize, count: usize) {
        for observer in self.snapshot() {
            observer.on_item_range_removed(position, count);
        }
    }

    pub fn notify_item_range_moved(&self, from_position: usize, to_position: usize, count: usize) {
        for observer in self.snapshot() {
            observer.on_item_range_moved(from_position, to_position, count);
        }
    }
}
