//! Binder registries: resolve an item instance to the binder that renders
//! it.
//!
//! Two registry forms exist. [`PolymorphicMapper`] keeps a single binder
//! per declared type and resolves purely by ancestry. [`RuleMapper`]
//! (built by [`MapperBuilder`]) keeps an ordered rule list per type, so
//! several binders can compete for one declared type with per-instance
//! predicates breaking the tie.
//!
//! Both walk the item's [`TypeChain`](crate::TypeChain) from the concrete
//! type upward and stop at the first match; both are immutable snapshots
//! once built.

mod polymorphic;
mod rules;

pub use polymorphic::*;
pub use rules::*;

use std::any::TypeId;
use std::cell::RefCell;
use std::rc::Rc;

use crate::binder::{binder_identity, Binder};
use crate::collections::map::{HashMap, HashSet};
use crate::item::{TypeChain, ViewItem};

/// Resolves items to binders.
pub trait Mapper {
    /// The binder rendering `item` at `position`, or `None` when nothing
    /// in the registry covers the item's ancestry.
    fn binder_for(&self, item: &dyn ViewItem, position: usize) -> Option<Rc<dyn Binder>>;

    /// Every distinct binder this mapper can return, exactly once each,
    /// however many rules reference it.
    fn all_binders(&self) -> &[Rc<dyn Binder>];

    /// Whether item IDs issued through this mapper's binders are stable
    /// across structural changes.
    fn has_stable_ids(&self) -> bool {
        default_stable_ids(self.all_binders())
    }
}

/// Default stable-ID policy: several distinct binders cannot guarantee
/// identity uniqueness across item types, so only a lone stable-ID binder
/// qualifies.
pub(crate) fn default_stable_ids(binders: &[Rc<dyn Binder>]) -> bool {
    match binders {
        [binder] => binder.has_stable_ids(),
        _ => false,
    }
}

/// Collects every distinct binder once, in first-seen order.
pub(crate) fn dedup_binders<'a, I>(binders: I) -> Vec<Rc<dyn Binder>>
where
    I: IntoIterator<Item = &'a Rc<dyn Binder>>,
{
    let mut seen = HashSet::default();
    let mut all = Vec::new();
    for binder in binders {
        if seen.insert(binder_identity(binder)) {
            all.push(Rc::clone(binder));
        }
    }
    all
}

/// Caches each concrete item type's declared ancestry after its first
/// resolution, so the walk is a plain lookup from then on.
pub(crate) struct ChainCache {
    chains: RefCell<HashMap<TypeId, TypeChain>>,
}

impl ChainCache {
    pub(crate) fn new() -> Self {
        Self {
            chains: RefCell::new(HashMap::default()),
        }
    }

    pub(crate) fn chain_for(&self, item: &dyn ViewItem) -> TypeChain {
        let concrete = item.as_any().type_id();
        if let Some(chain) = self.chains.borrow().get(&concrete) {
            return chain.clone();
        }
        let chain = item.type_chain();
        if chain.concrete().id != concrete {
            log::warn!(
                "type chain of {} does not start with the item's concrete type",
                chain.concrete().name
            );
        }
        self.chains.borrow_mut().insert(concrete, chain.clone());
        chain
    }
}
