//! Simple binders and views for tests.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use lazybind_core::{item_as, Binder, Holder, View, ViewItem, ViewParent, NO_ID};

use crate::items::Note;

/// View produced by test binders, carrying the label of the binder (or
/// layout) that constructed it.
#[derive(Debug)]
pub struct TestView {
    pub label: &'static str,
    pub bound_position: Option<usize>,
}

impl TestView {
    pub fn labeled(label: &'static str) -> Self {
        Self {
            label,
            bound_position: None,
        }
    }
}

impl View for TestView {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Container handle for tests.
#[derive(Debug, Default)]
pub struct TestParent;

impl ViewParent for TestParent {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Binder that labels its views and records every bind call.
///
/// Item IDs come from the [`Note`] level of the bound item's ancestry, so
/// the stable-ID variant works for every type in the test hierarchy.
pub struct StubBinder {
    label: &'static str,
    stable_ids: bool,
    binds: RefCell<Vec<usize>>,
}

impl StubBinder {
    pub fn new(label: &'static str) -> Rc<Self> {
        Rc::new(Self {
            label,
            stable_ids: false,
            binds: RefCell::new(Vec::new()),
        })
    }

    pub fn with_stable_ids(label: &'static str) -> Rc<Self> {
        Rc::new(Self {
            label,
            stable_ids: true,
            binds: RefCell::new(Vec::new()),
        })
    }

    /// Positions bound through this binder, in call order.
    pub fn bound_positions(&self) -> Vec<usize> {
        self.binds.borrow().clone()
    }
}

impl Binder for StubBinder {
    fn new_view(&self, _parent: &mut dyn ViewParent) -> Box<dyn View> {
        Box::new(TestView::labeled(self.label))
    }

    fn bind_view(&self, _item: &dyn ViewItem, view: &mut dyn View, holder: &dyn Holder) {
        let position = holder.position();
        self.binds.borrow_mut().push(position);
        if let Some(view) = view.as_any_mut().downcast_mut::<TestView>() {
            view.bound_position = Some(position);
        }
    }

    fn has_stable_ids(&self) -> bool {
        self.stable_ids
    }

    fn item_id(&self, item: &dyn ViewItem) -> i64 {
        item_as::<Note>(item).map_or(NO_ID, |note| note.id)
    }
}
