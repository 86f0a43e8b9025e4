//! The adapter contract between data and a lazy list host.

use std::rc::Rc;

use crate::binder::{binder_identity, Binder, NO_ID};
use crate::holder::Holder;
use crate::observer::DataObserver;
use crate::view::{View, ViewParent};

/// Opaque token grouping items that share a rendering strategy.
///
/// Hosts pool recycled views per token. Tokens compare structurally;
/// binder-backed sources derive them from binder identity, hand-rolled
/// sources pick their own keys.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ViewType(Repr);

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
enum Repr {
    Binder(usize),
    Key(u64),
}

impl ViewType {
    /// Token derived from a binder's identity.
    pub fn of_binder(binder: &Rc<dyn Binder>) -> Self {
        ViewType(Repr::Binder(binder_identity(binder)))
    }

    /// Token derived from a source-chosen key.
    pub fn of_key(key: u64) -> Self {
        ViewType(Repr::Key(key))
    }
}

/// A positional item source consumable by a lazy list host.
///
/// All methods run synchronously on the thread that owns the host view
/// system; implementations announce every structural change through the
/// registered [`DataObserver`]s, after the change has been applied.
pub trait ItemSource {
    fn item_count(&self) -> usize;

    fn has_stable_ids(&self) -> bool {
        false
    }

    /// Stable identity of the item at `position`, meaningful only when
    /// [`has_stable_ids`](ItemSource::has_stable_ids) is true.
    fn item_id(&self, position: usize) -> i64 {
        let _ = position;
        NO_ID
    }

    fn item_view_type(&self, position: usize) -> ViewType;

    fn new_view(&self, parent: &mut dyn ViewParent, view_type: &ViewType) -> Box<dyn View>;

    fn bind_view(&self, view: &mut dyn View, holder: &dyn Holder);

    fn register_data_observer(&self, observer: Rc<dyn DataObserver>);

    fn unregister_data_observer(&self, observer: &Rc<dyn DataObserver>);
}
