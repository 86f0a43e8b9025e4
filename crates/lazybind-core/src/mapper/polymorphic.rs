//! Direct type-to-binder registry.

use std::any::{Any, TypeId};
use std::rc::Rc;

use crate::binder::{override_layout, Binder};
use crate::collections::map::HashMap;
use crate::item::ViewItem;
use crate::view::Layout;

use super::{dedup_binders, ChainCache, Mapper};

/// Registry mapping each declared item type to a single binder.
///
/// Resolution walks the item's ancestry from the concrete type upward and
/// returns the binder of the first registered type, so a binder registered
/// for an ancestor covers every descendant without its own binding.
pub struct PolymorphicMapper {
    binders: HashMap<TypeId, Rc<dyn Binder>>,
    all_binders: Vec<Rc<dyn Binder>>,
    chains: ChainCache,
}

impl PolymorphicMapper {
    pub fn builder() -> PolymorphicMapperBuilder {
        PolymorphicMapperBuilder::new()
    }
}

impl Mapper for PolymorphicMapper {
    fn binder_for(&self, item: &dyn ViewItem, _position: usize) -> Option<Rc<dyn Binder>> {
        let chain = self.chains.chain_for(item);
        for entry in chain.iter() {
            if let Some(binder) = self.binders.get(&entry.id) {
                return Some(Rc::clone(binder));
            }
        }
        log::trace!("no binder registered for {}", chain.concrete().name);
        None
    }

    fn all_binders(&self) -> &[Rc<dyn Binder>] {
        &self.all_binders
    }
}

/// Builder for [`PolymorphicMapper`].
///
/// Binding the same type twice replaces the earlier binder.
#[derive(Default)]
pub struct PolymorphicMapperBuilder {
    binders: HashMap<TypeId, Rc<dyn Binder>>,
}

impl PolymorphicMapperBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps item type `T` to `binder`.
    pub fn bind<T: Any>(&mut self, binder: Rc<dyn Binder>) -> &mut Self {
        self.binders.insert(TypeId::of::<T>(), binder);
        self
    }

    /// Maps item type `T` to `binder`, overriding the view it constructs
    /// with `layout` while keeping its binding behavior.
    pub fn bind_with_layout<T: Any>(&mut self, layout: Layout, binder: Rc<dyn Binder>) -> &mut Self {
        self.bind::<T>(override_layout(binder, Some(layout)))
    }

    /// Snapshots the current bindings into an immutable registry. The
    /// builder stays usable and later mutation never reaches registries
    /// already built.
    pub fn build(&self) -> PolymorphicMapper {
        let binders = self.binders.clone();
        let all_binders = dedup_binders(binders.values());
        PolymorphicMapper {
            binders,
            all_binders,
            chains: ChainCache::new(),
        }
    }
}
