//! Core data-binding primitives for lazy list hosts.
//!
//! lazybind lets a scrollable, lazily-rendering host display heterogeneous
//! items without knowing their concrete types. This crate holds the
//! host-agnostic half: items with declared type ancestry, binders, binder
//! registries, the structural-change observer model, and an observable
//! list store glued together by [`BindingAdapter`].
//!
//! # Architecture
//!
//! - [`ViewItem`] / [`TypeChain`] — items declare an ordered ancestry of
//!   type identifiers, recovering subtype-style dispatch for composed types
//! - [`Binder`] — constructs and populates views; [`BinderWrapper`]
//!   swaps construction while delegating the rest
//! - [`Mapper`] — [`PolymorphicMapper`] (one binder per declared type)
//!   and [`RuleMapper`] (ordered per-type rules with predicates)
//! - [`DataObserver`] / [`DataObservable`] — fine-grained structural
//!   change stream
//! - [`ObservableList`] + [`BindingAdapter`] — a ready-made [`ItemSource`]
//!
//! # Example
//!
//! ```rust,ignore
//! let mut builder = MapperBuilder::new();
//! builder
//!     .bind_when::<Note>(
//!         highlight_binder,
//!         Predicate::of_type(|note: &Note| note.pinned),
//!     )
//!     .bind::<Note>(text_binder);
//! let mapper = Rc::new(builder.build());
//!
//! let adapter = BindingAdapter::new(list, mapper);
//! ```

mod binder;
mod binding_adapter;
pub mod collections;
mod holder;
mod item;
mod list;
mod mapper;
mod observer;
mod source;
#[cfg(test)]
mod test_fixtures;
mod view;

pub use binder::*;
pub use binding_adapter::*;
pub use holder::*;
pub use item::*;
pub use list::*;
pub use mapper::*;
pub use observer::*;
pub use source::*;
pub use view::*;
