//! Binders construct and populate item views.

use std::rc::Rc;

use crate::holder::Holder;
use crate::item::ViewItem;
use crate::view::{Layout, View, ViewParent};

/// Identity value reported by sources without stable per-item IDs.
pub const NO_ID: i64 = -1;

/// A rendering strategy for one family of item types.
///
/// Binders are immutable and identity-compared; the same `Rc<dyn Binder>`
/// may back any number of registry rules. Aside from their construct and
/// bind effects they must be side-effect free.
pub trait Binder {
    /// Constructs a fresh, unbound view inside `parent`.
    fn new_view(&self, parent: &mut dyn ViewParent) -> Box<dyn View>;

    /// Populates `view` with `item`'s data. `holder` reads the item's
    /// live position.
    fn bind_view(&self, item: &dyn ViewItem, view: &mut dyn View, holder: &dyn Holder);

    /// Whether [`item_id`](Binder::item_id) returns identities that
    /// survive structural changes.
    fn has_stable_ids(&self) -> bool {
        false
    }

    /// Stable identity of `item`, meaningful only when
    /// [`has_stable_ids`](Binder::has_stable_ids) is true.
    fn item_id(&self, item: &dyn ViewItem) -> i64 {
        let _ = item;
        NO_ID
    }
}

/// Pointer identity of a shared binder, independent of its vtable.
pub(crate) fn binder_identity(binder: &Rc<dyn Binder>) -> usize {
    Rc::as_ptr(binder) as *const () as usize
}

/// Decorates a binder, replacing only its view construction.
///
/// Everything else, including binding and stable-ID behavior, delegates to
/// the wrapped binder.
pub struct BinderWrapper {
    inner: Rc<dyn Binder>,
    layout: Layout,
}

impl BinderWrapper {
    pub fn new(inner: Rc<dyn Binder>, layout: Layout) -> Self {
        Self { inner, layout }
    }
}

impl Binder for BinderWrapper {
    fn new_view(&self, parent: &mut dyn ViewParent) -> Box<dyn View> {
        self.layout.inflate(parent)
    }

    fn bind_view(&self, item: &dyn ViewItem, view: &mut dyn View, holder: &dyn Holder) {
        self.inner.bind_view(item, view, holder);
    }

    fn has_stable_ids(&self) -> bool {
        self.inner.has_stable_ids()
    }

    fn item_id(&self, item: &dyn ViewItem) -> i64 {
        self.inner.item_id(item)
    }
}

/// Returns `binder` with its view construction swapped for `layout`.
///
/// `None` leaves the binder untouched.
pub fn override_layout(binder: Rc<dyn Binder>, layout: Option<Layout>) -> Rc<dyn Binder> {
    match layout {
        Some(layout) => Rc::new(BinderWrapper::new(binder, layout)),
        None => binder,
    }
}
