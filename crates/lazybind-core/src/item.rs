//! Items and their declared type ancestry.
//!
//! Rust has no class hierarchy to reflect over, so item types declare an
//! explicit, ordered ancestry of type identifiers instead. Registries walk
//! that chain from the most-derived type upward when resolving a binder,
//! which recovers subtype-style dispatch for types built by composition.

use std::any::{Any, TypeId};

use smallvec::SmallVec;

/// One level of a [`TypeChain`]: a type identifier plus its name for
/// diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct TypeEntry {
    pub id: TypeId,
    pub name: &'static str,
}

/// Ordered list of type identifiers, most-derived first.
///
/// The chain always starts with the item's concrete type; [`extending`]
/// appends ancestors in order of increasing generality. Chains compare by
/// their identifiers only.
///
/// [`extending`]: TypeChain::extending
#[derive(Clone, Debug)]
pub struct TypeChain {
    entries: SmallVec<[TypeEntry; 4]>,
}

impl TypeChain {
    /// A chain containing only the concrete type `T`.
    pub fn of<T: Any>() -> Self {
        let mut entries = SmallVec::new();
        entries.push(TypeEntry {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        });
        Self { entries }
    }

    /// Appends ancestor type `P` to the chain.
    pub fn extending<P: Any>(mut self) -> Self {
        self.entries.push(TypeEntry {
            id: TypeId::of::<P>(),
            name: std::any::type_name::<P>(),
        });
        self
    }

    /// The concrete (most-derived) type entry.
    pub fn concrete(&self) -> TypeEntry {
        self.entries[0]
    }

    /// Iterates the chain from the concrete type to the root ancestor.
    pub fn iter(&self) -> impl Iterator<Item = TypeEntry> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for TypeChain {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a.id == b.id)
    }
}

impl Eq for TypeChain {}

/// An item renderable by a lazy list host.
///
/// Implementations are plain data objects; the only obligations are an
/// [`Any`] escape hatch and the item's [`TypeChain`]. Types that extend an
/// ancestor by composition additionally override [`as_type`] so binders
/// and predicates written against the ancestor can see the embedded value.
///
/// [`as_type`]: ViewItem::as_type
pub trait ViewItem: Any {
    fn as_any(&self) -> &dyn Any;

    /// The item's ancestry, most-derived first. Must start with the
    /// concrete type of `self`.
    fn type_chain(&self) -> TypeChain;

    /// Views this item as one of the types in its chain.
    ///
    /// The default covers the concrete type only; composed hierarchies
    /// return the embedded ancestor value for ancestor identifiers.
    fn as_type(&self, id: TypeId) -> Option<&dyn Any> {
        if id == self.as_any().type_id() {
            Some(self.as_any())
        } else {
            None
        }
    }
}

/// Boxed heterogeneous item, the element type of bound lists.
pub type BoxedItem = Box<dyn ViewItem>;

/// Downcasts an item to `T`, looking through its declared ancestry.
pub fn item_as<T: Any>(item: &dyn ViewItem) -> Option<&T> {
    item.as_type(TypeId::of::<T>())
        .and_then(|any| any.downcast_ref::<T>())
}
