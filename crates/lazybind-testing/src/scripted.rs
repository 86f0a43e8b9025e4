//! Scripted item source for bridge tests.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lazybind_core::{
    DataObservable, DataObserver, Holder, ItemSource, View, ViewParent, ViewType,
};

/// [`ItemSource`] whose count and event stream are driven directly by the
/// test, including streams that deliberately disagree with the count.
pub struct ScriptedSource {
    count: Cell<usize>,
    view_types: RefCell<Vec<ViewType>>,
    observable: DataObservable,
}

impl ScriptedSource {
    pub fn new(count: usize) -> Rc<Self> {
        Rc::new(Self {
            count: Cell::new(count),
            view_types: RefCell::new(Vec::new()),
            observable: DataObservable::new(),
        })
    }

    /// Sets the live count without emitting any event.
    pub fn set_count(&self, count: usize) {
        self.count.set(count);
    }

    /// Per-position view-type tokens; positions beyond the script fall
    /// back to a shared default token.
    pub fn script_view_types(&self, view_types: Vec<ViewType>) {
        *self.view_types.borrow_mut() = view_types;
    }

    /// The raw observable, for emitting event streams that deliberately
    /// disagree with the live count.
    pub fn observable(&self) -> &DataObservable {
        &self.observable
    }

    /// Consistent full reset to `count` items.
    pub fn reset(&self, count: usize) {
        self.count.set(count);
        self.observable.notify_changed();
    }

    /// Consistent range insertion.
    pub fn insert(&self, position: usize, count: usize) {
        self.count.set(self.count.get() + count);
        self.observable.notify_item_range_inserted(position, count);
    }

    /// Consistent range removal.
    pub fn remove(&self, position: usize, count: usize) {
        self.count.set(self.count.get() - count);
        self.observable.notify_item_range_removed(position, count);
    }

    /// Range change notification; the count is unaffected.
    pub fn change(&self, position: usize, count: usize) {
        self.observable.notify_item_range_changed(position, count);
    }

    /// Range move notification; the count is unaffected.
    pub fn move_range(&self, from_position: usize, to_position: usize, count: usize) {
        self.observable
            .notify_item_range_moved(from_position, to_position, count);
    }
}

impl ItemSource for ScriptedSource {
    fn item_count(&self) -> usize {
        self.count.get()
    }

    fn item_view_type(&self, position: usize) -> ViewType {
        self.view_types
            .borrow()
            .get(position)
            .cloned()
            .unwrap_or_else(|| ViewType::of_key(0))
    }

    fn new_view(&self, _parent: &mut dyn ViewParent, view_type: &ViewType) -> Box<dyn View> {
        Box::new(ScriptedView {
            view_type: view_type.clone(),
        })
    }

    fn bind_view(&self, _view: &mut dyn View, _holder: &dyn Holder) {}

    fn register_data_observer(&self, observer: Rc<dyn DataObserver>) {
        self.observable.register(observer);
    }

    fn unregister_data_observer(&self, observer: &Rc<dyn DataObserver>) {
        self.observable.unregister(observer);
    }
}

/// View constructed by [`ScriptedSource`], carrying the token it was
/// created for.
#[derive(Debug)]
pub struct ScriptedView {
    pub view_type: ViewType,
}

impl View for ScriptedView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
