//! Rule-based registry with per-instance predicates.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

use crate::binder::{override_layout, Binder};
use crate::collections::map::HashMap;
use crate::item::{item_as, ViewItem};
use crate::view::Layout;

use super::{dedup_binders, default_stable_ids, ChainCache, Mapper};

/// Boolean test over item instances.
#[derive(Clone)]
pub struct Predicate {
    test: Rc<dyn Fn(&dyn ViewItem) -> bool>,
}

impl Predicate {
    /// Accepts every item.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    pub fn new(test: impl Fn(&dyn ViewItem) -> bool + 'static) -> Self {
        Self {
            test: Rc::new(test),
        }
    }

    /// Typed test; rejects items that cannot be viewed as `T`.
    pub fn of_type<T: Any>(test: impl Fn(&T) -> bool + 'static) -> Self {
        Self::new(move |item| item_as::<T>(item).is_some_and(&test))
    }

    pub fn apply(&self, item: &dyn ViewItem) -> bool {
        (self.test)(item)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}

#[derive(Clone)]
struct Rule {
    predicate: Predicate,
    binder: Rc<dyn Binder>,
}

/// Fluent builder for [`RuleMapper`].
///
/// Every `bind` variant appends a rule; rules for one type accumulate in
/// registration order and that order decides ties at resolution time.
pub struct MapperBuilder {
    rules: HashMap<TypeId, Vec<Rule>>,
    stable_ids: Option<bool>,
}

impl MapperBuilder {
    pub fn new() -> Self {
        Self {
            rules: HashMap::default(),
            stable_ids: None,
        }
    }

    /// Appends a rule mapping `T` to `binder` unconditionally.
    pub fn bind<T: Any>(&mut self, binder: Rc<dyn Binder>) -> &mut Self {
        self.bind_rule::<T>(None, binder, Predicate::always())
    }

    /// Appends a rule mapping `T` to `binder` for the instances accepted
    /// by `predicate`.
    pub fn bind_when<T: Any>(&mut self, binder: Rc<dyn Binder>, predicate: Predicate) -> &mut Self {
        self.bind_rule::<T>(None, binder, predicate)
    }

    /// Appends an unconditional rule whose binder constructs `layout`
    /// instead of its own view.
    pub fn bind_with_layout<T: Any>(&mut self, layout: Layout, binder: Rc<dyn Binder>) -> &mut Self {
        self.bind_rule::<T>(Some(layout), binder, Predicate::always())
    }

    /// The most general form: layout override plus per-instance predicate.
    pub fn bind_with_layout_when<T: Any>(
        &mut self,
        layout: Layout,
        binder: Rc<dyn Binder>,
        predicate: Predicate,
    ) -> &mut Self {
        self.bind_rule::<T>(Some(layout), binder, predicate)
    }

    fn bind_rule<T: Any>(
        &mut self,
        layout: Option<Layout>,
        binder: Rc<dyn Binder>,
        predicate: Predicate,
    ) -> &mut Self {
        let binder = override_layout(binder, layout);
        self.rules
            .entry(TypeId::of::<T>())
            .or_default()
            .push(Rule { predicate, binder });
        self
    }

    /// Overrides the stable-ID answer of built registries. `Some` forces
    /// the value; `None` defers to the default single-binder policy.
    pub fn stable_ids(&mut self, stable_ids: Option<bool>) -> &mut Self {
        self.stable_ids = stable_ids;
        self
    }

    /// Snapshots the current rules into an immutable registry. The
    /// builder stays usable and later mutation never reaches registries
    /// already built.
    pub fn build(&self) -> RuleMapper {
        let rules = self.rules.clone();
        let all_binders = dedup_binders(rules.values().flatten().map(|rule| &rule.binder));
        RuleMapper {
            rules,
            all_binders,
            stable_ids: self.stable_ids,
            chains: ChainCache::new(),
        }
    }
}

impl Default for MapperBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry evaluating ordered per-type rule lists along each item's
/// ancestry.
///
/// At each ancestry level the rules registered for that type run in
/// registration order; the first accepting rule wins. A level whose rules
/// all reject is treated like an unregistered type and resolution falls
/// through to the next ancestor.
pub struct RuleMapper {
    rules: HashMap<TypeId, Vec<Rule>>,
    all_binders: Vec<Rc<dyn Binder>>,
    stable_ids: Option<bool>,
    chains: ChainCache,
}

impl Mapper for RuleMapper {
    fn binder_for(&self, item: &dyn ViewItem, _position: usize) -> Option<Rc<dyn Binder>> {
        let chain = self.chains.chain_for(item);
        for entry in chain.iter() {
            if let Some(rules) = self.rules.get(&entry.id) {
                for rule in rules {
                    if rule.predicate.apply(item) {
                        return Some(Rc::clone(&rule.binder));
                    }
                }
            }
        }
        log::trace!("no rule matched {}", chain.concrete().name);
        None
    }

    fn all_binders(&self) -> &[Rc<dyn Binder>] {
        &self.all_binders
    }

    fn has_stable_ids(&self) -> bool {
        match self.stable_ids {
            Some(stable_ids) => stable_ids,
            None => default_stable_ids(self.all_binders()),
        }
    }
}
