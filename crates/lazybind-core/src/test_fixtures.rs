//! In-crate fixtures for unit tests.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::rc::Rc;

use crate::binder::{Binder, NO_ID};
use crate::holder::Holder;
use crate::item::{item_as, TypeChain, ViewItem};
use crate::observer::DataObserver;
use crate::view::{View, ViewParent};

/// Root of the fixture item hierarchy.
pub(crate) struct Base {
    pub(crate) id: i64,
}

impl ViewItem for Base {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_chain(&self) -> TypeChain {
        TypeChain::of::<Base>()
    }
}

/// Extends [`Base`] by composition.
pub(crate) struct Derived {
    pub(crate) base: Base,
    pub(crate) flag: bool,
}

impl ViewItem for Derived {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_chain(&self) -> TypeChain {
        TypeChain::of::<Derived>().extending::<Base>()
    }

    fn as_type(&self, id: TypeId) -> Option<&dyn Any> {
        if id == TypeId::of::<Derived>() {
            Some(self)
        } else if id == TypeId::of::<Base>() {
            Some(&self.base)
        } else {
            None
        }
    }
}

/// Item outside the fixture hierarchy.
pub(crate) struct Unrelated;

impl ViewItem for Unrelated {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_chain(&self) -> TypeChain {
        TypeChain::of::<Unrelated>()
    }
}

/// View produced by [`RecordingBinder`], labeled by its constructor.
pub(crate) struct RecordedView {
    pub(crate) label: &'static str,
    pub(crate) bound_position: Option<usize>,
}

impl RecordedView {
    pub(crate) fn labeled(label: &'static str) -> Self {
        Self {
            label,
            bound_position: None,
        }
    }
}

impl View for RecordedView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Container handle for unit tests.
pub(crate) struct NullParent;

impl ViewParent for NullParent {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Binder that labels its views and records every bind call.
pub(crate) struct RecordingBinder {
    label: &'static str,
    stable_ids: bool,
    binds: RefCell<Vec<usize>>,
}

impl RecordingBinder {
    pub(crate) fn new(label: &'static str) -> Rc<Self> {
        Rc::new(Self {
            label,
            stable_ids: false,
            binds: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn with_stable_ids(label: &'static str) -> Rc<Self> {
        Rc::new(Self {
            label,
            stable_ids: true,
            binds: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn bound_positions(&self) -> Vec<usize> {
        self.binds.borrow().clone()
    }
}

impl Binder for RecordingBinder {
    fn new_view(&self, _parent: &mut dyn ViewParent) -> Box<dyn View> {
        Box::new(RecordedView::labeled(self.label))
    }

    fn bind_view(&self, _item: &dyn ViewItem, view: &mut dyn View, holder: &dyn Holder) {
        let position = holder.position();
        self.binds.borrow_mut().push(position);
        if let Some(view) = view.as_any_mut().downcast_mut::<RecordedView>() {
            view.bound_position = Some(position);
        }
    }

    fn has_stable_ids(&self) -> bool {
        self.stable_ids
    }

    fn item_id(&self, item: &dyn ViewItem) -> i64 {
        item_as::<Base>(item).map_or(NO_ID, |base| base.id)
    }
}

/// One received data event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum RecordedEvent {
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
pub(crate) struct RecordingObserver {
    events: RefCell<Vec<RecordedEvent>>,
}

impl RecordingObserver {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn take_events(&self) -> Vec<RecordedEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl DataObserver for RecordingObserver {
    fn on_changed(&self) {
        self.events.borrow_mut().push(RecordedEvent::Changed);
    }

    fn on_item_range_changed(&self, position: usize, count: usize) {
        self.events
            .borrow_mut()
            .push(RecordedEvent::RangeChanged { position, count });
    }

    fn on_item_range_inserted(&self, position: usize, count: usize) {
        self.events
            .borrow_mut()
            .push(RecordedEvent::RangeInserted { position, count });
    }

    fn on_item_range_removed(&self, position: usize, count: usize) {
        self.events
            .borrow_mut()
            .push(RecordedEvent::RangeRemoved { position, count });
    }

    fn on_item_range_moved(&self, from_position: usize, to_position: usize, count: usize) {
        self.events.borrow_mut().push(RecordedEvent::RangeMoved {
            from_position,
            to_position,
            count,
        });
    }
}
