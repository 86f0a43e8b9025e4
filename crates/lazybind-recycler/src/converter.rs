//! Change-notification bridge for recycler-style hosts.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use lazybind_core::{DataObserver, Holder, ItemSource, View, ViewParent, ViewType};

use crate::interner::ViewTypeInterner;

/// The host's notification surface.
///
/// Equivalent in meaning to [`DataObserver`] but stricter: moves are
/// single-item only, and the host assumes every notification is
/// consistent with the adapter's reported item count.
pub trait HostObserver {
    fn on_data_set_changed(&self);
    fn on_item_range_changed(&self, position: usize, count: usize);
    fn on_item_range_inserted(&self, position: usize, count: usize);
    fn on_item_range_removed(&self, position: usize, count: usize);
    fn on_item_moved(&self, from_position: usize, to_position: usize);
}

struct BridgeState {
    host_observers: Vec<Rc<dyn HostObserver>>,
    /// Item count implied by the event stream so far.
    shadow_count: usize,
    view_types: ViewTypeInterner<ViewType>,
}

impl BridgeState {
    fn snapshot_observers(&self) -> Vec<Rc<dyn HostObserver>> {
        self.host_observers.clone()
    }

    /// Compares the shadow count against the source's live count and
    /// fails fast on disagreement, before a notification can
    /// desynchronize the host's recycling bookkeeping.
    fn validate(&self, source: &dyn ItemSource) {
        let live = source.item_count();
        if self.shadow_count != live {
            panic!(
                "inconsistency detected: expected item count {} but the source reports {live}",
                self.shadow_count
            );
        }
    }
}

/// Adapter presenting an [`ItemSource`] to a host that requires integer
/// view types and primitive change notifications.
///
/// One upstream subscription exists exactly while at least one
/// [`HostObserver`] is registered; it snapshots the source's count when
/// opened and is torn down when the last observer leaves.
pub struct ConverterAdapter {
    source: Rc<dyn ItemSource>,
    state: Rc<RefCell<BridgeState>>,
    upstream: RefCell<Option<Rc<dyn DataObserver>>>,
}

impl ConverterAdapter {
    pub fn new(source: Rc<dyn ItemSource>) -> Self {
        Self {
            source,
            state: Rc::new(RefCell::new(BridgeState {
                host_observers: Vec::new(),
                shadow_count: 0,
                view_types: ViewTypeInterner::new(),
            })),
            upstream: RefCell::new(None),
        }
    }

    pub fn item_count(&self) -> usize {
        self.source.item_count()
    }

    pub fn has_stable_ids(&self) -> bool {
        self.source.has_stable_ids()
    }

    pub fn item_id(&self, position: usize) -> i64 {
        self.source.item_id(position)
    }

    /// The dense integer view type of the item at `position`.
    pub fn item_view_type(&self, position: usize) -> usize {
        let token = self.source.item_view_type(position);
        self.state.borrow_mut().view_types.intern(token)
    }

    /// Constructs a view for an integer view type previously returned by
    /// [`item_view_type`](ConverterAdapter::item_view_type).
    ///
    /// Panics on an integer this adapter never assigned.
    pub fn create_view(&self, parent: &mut dyn ViewParent, view_type: usize) -> Box<dyn View> {
        let token = self.state.borrow().view_types.resolve(view_type).clone();
        self.source.new_view(parent, &token)
    }

    pub fn bind_view(&self, view: &mut dyn View, holder: &dyn Holder) {
        self.source.bind_view(view, holder);
    }

    pub fn observer_count(&self) -> usize {
        self.state.borrow().host_observers.len()
    }

    /// Registers a host observer. The first registration snapshots the
    /// source's count and opens the upstream subscription.
    ///
    /// Panics if `observer` is already registered.
    pub fn register_host_observer(&self, observer: Rc<dyn HostObserver>) {
        {
            let mut state = self.state.borrow_mut();
            if state
                .host_observers
                .iter()
                .any(|existing| Rc::ptr_eq(existing, &observer))
            {
                panic!("host observer is already registered");
            }
            state.host_observers.push(observer);
        }
        if self.observer_count() == 1 {
            self.subscribe();
        }
    }

    /// Unregisters a host observer; removing the last one tears down the
    /// upstream subscription and resets the shadow count.
    pub fn unregister_host_observer(&self, observer: &Rc<dyn HostObserver>) {
        let removed = {
            let mut state = self.state.borrow_mut();
            match state
                .host_observers
                .iter()
                .position(|existing| Rc::ptr_eq(existing, observer))
            {
                Some(index) => {
                    state.host_observers.remove(index);
                    true
                }
                None => false,
            }
        };
        if !removed {
            log::warn!("attempted to unregister a host observer that was never registered");
            return;
        }
        if self.observer_count() == 0 {
            self.unsubscribe();
        }
    }

    fn subscribe(&self) {
        self.state.borrow_mut().shadow_count = self.source.item_count();
        let observer: Rc<dyn DataObserver> = Rc::new(SourceObserver {
            source: Rc::downgrade(&self.source),
            state: Rc::clone(&self.state),
        });
        self.source.register_data_observer(Rc::clone(&observer));
        *self.upstream.borrow_mut() = Some(observer);
    }

    fn unsubscribe(&self) {
        if let Some(observer) = self.upstream.borrow_mut().take() {
            self.source.unregister_data_observer(&observer);
        }
        self.state.borrow_mut().shadow_count = 0;
    }
}

impl Drop for ConverterAdapter {
    fn drop(&mut self) {
        if self.upstream.borrow().is_some() {
            self.unsubscribe();
        }
    }
}

/// Upstream observer translating source events into host notifications.
struct SourceObserver {
    source: Weak<dyn ItemSource>,
    state: Rc<RefCell<BridgeState>>,
}

impl DataObserver for SourceObserver {
    fn on_changed(&self) {
        let Some(source) = self.source.upgrade() else {
            return;
        };
        let observers = {
            let mut state = self.state.borrow_mut();
            state.shadow_count = source.item_count();
            state.snapshot_observers()
        };
        for observer in observers {
            observer.on_data_set_changed();
        }
    }

    fn on_item_range_changed(&self, position: usize, count: usize) {
        let Some(source) = self.source.upgrade() else {
            return;
        };
        let observers = {
            let state = self.state.borrow();
            state.validate(source.as_ref());
            state.snapshot_observers()
        };
        for observer in observers {
            observer.on_item_range_changed(position, count);
        }
    }

    fn on_item_range_inserted(&self, position: usize, count: usize) {
        let Some(source) = self.source.upgrade() else {
            return;
        };
        let observers = {
            let mut state = self.state.borrow_mut();
            state.shadow_count += count;
            state.validate(source.as_ref());
            state.snapshot_observers()
        };
        for observer in observers {
            observer.on_item_range_inserted(position, count);
        }
    }

    fn on_item_range_removed(&self, position: usize, count: usize) {
        let Some(source) = self.source.upgrade() else {
            return;
        };
        let observers = {
            let mut state = self.state.borrow_mut();
            state.shadow_count = match state.shadow_count.checked_sub(count) {
                Some(remaining) => remaining,
                None => panic!(
                    "inconsistency detected: {count} items removed but only {} were expected",
                    state.shadow_count
                ),
            };
            state.validate(source.as_ref());
            state.snapshot_observers()
        };
        for observer in observers {
            observer.on_item_range_removed(position, count);
        }
    }

    fn on_item_range_moved(&self, from_position: usize, to_position: usize, count: usize) {
        let Some(source) = self.source.upgrade() else {
            return;
        };
        let observers = {
            let state = self.state.borrow();
            state.validate(source.as_ref());
            state.snapshot_observers()
        };
        if count == 1 {
            for observer in observers {
                observer.on_item_moved(from_position, to_position);
            }
        } else {
            // No safe decomposition of a range move into the host's
            // primitive calls is known.
            // TODO: emit `count` successive single-item moves if that can be
            // shown equivalent for overlapping ranges.
            log::debug!("translating a {count}-item range move into a full reset");
            for observer in observers {
                observer.on_data_set_changed();
            }
        }
    }
}
