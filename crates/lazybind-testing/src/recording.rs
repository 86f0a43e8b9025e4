//! Recording observers for the structural change stream.

use std::cell::RefCell;
use std::rc::Rc;

use lazybind_core::DataObserver;

/// One upstream data event, as received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataEvent {
    Changed,
    RangeChanged {
        position: usize,
        count: usize,
    },
    RangeInserted {
        position: usize,
        count: usize,
    },
    RangeRemoved {
        position: usize,
        count: usize,
    },
    RangeMoved {
        from_position: usize,
        to_position: usize,
        count: usize,
    },
}

/// [`DataObserver`] that appends every event to a log.
#[derive(Default)]
pub struct RecordingDataObserver {
    events: RefCell<Vec<DataEvent>>,
}

impl RecordingDataObserver {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Events received so far, oldest first.
    pub fn events(&self) -> Vec<DataEvent> {
        self.events.borrow().clone()
    }

    /// Drains and returns the recorded events.
    pub fn take_events(&self) -> Vec<DataEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl DataObserver for RecordingDataObserver {
    fn on_changed(&self) {
        self.events.borrow_mut().push(DataEvent::Changed);
    }

    fn on_item_range_changed(&self, position: usize, count: usize) {
        self.events
            .borrow_mut()
            .push(DataEvent::RangeChanged { position, count });
    }

    fn on_item_range_inserted(&self, position: usize, count: usize) {
        self.events
            .borrow_mut()
            .push(DataEvent::RangeInserted { position, count });
    }

    fn on_item_range_removed(&self, position: usize, count: usize) {
        self.events
            .borrow_mut()
            .push(DataEvent::RangeRemoved { position, count });
    }

    fn on_item_range_moved(&self, from_position: usize, to_position: usize, count: usize) {
        self.events.borrow_mut().push(DataEvent::RangeMoved {
            from_position,
            to_position,
            count,
        });
    }
}
