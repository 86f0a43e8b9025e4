//! Binds an observable item list to the host adapter contract.

use std::cell::RefCell;
use std::rc::Rc;

use crate::binder::Binder;
use crate::holder::Holder;
use crate::item::BoxedItem;
use crate::list::ObservableList;
use crate::mapper::Mapper;
use crate::observer::{DataObservable, DataObserver};
use crate::source::{ItemSource, ViewType};
use crate::view::{View, ViewParent};

/// [`ItemSource`] over an [`ObservableList`] of heterogeneous items,
/// dispatched through a [`Mapper`].
///
/// The binder resolved for an item doubles as its view type, so items
/// rendered by the same binder share a recycling pool on the host side.
/// The upstream list subscription is reference-counted: it exists exactly
/// while at least one data observer is registered.
pub struct BindingAdapter {
    list: Rc<ObservableList<BoxedItem>>,
    mapper: Rc<dyn Mapper>,
    observable: Rc<DataObservable>,
    forwarder: RefCell<Option<Rc<dyn DataObserver>>>,
}

impl BindingAdapter {
    pub fn new(list: Rc<ObservableList<BoxedItem>>, mapper: Rc<dyn Mapper>) -> Self {
        Self {
            list,
            mapper,
            observable: Rc::new(DataObservable::new()),
            forwarder: RefCell::new(None),
        }
    }

    /// Resolves the binder for the item at `position`.
    ///
    /// Panics on a resolution miss: a bound list holding an item nothing
    /// can render is a configuration bug, and every entry point of this
    /// adapter needs the binder.
    fn binder_at(&self, position: usize) -> Rc<dyn Binder> {
        self.list.with_item(position, |item| {
            match self.mapper.binder_for(item.as_ref(), position) {
                Some(binder) => binder,
                None => panic!(
                    "no binder for item of type {} at position {position}",
                    item.type_chain().concrete().name
                ),
            }
        })
    }
}

impl ItemSource for BindingAdapter {
    fn item_count(&self) -> usize {
        self.list.len()
    }

    fn has_stable_ids(&self) -> bool {
        self.mapper.has_stable_ids()
    }

    fn item_id(&self, position: usize) -> i64 {
        let binder = self.binder_at(position);
        self.list
            .with_item(position, |item| binder.item_id(item.as_ref()))
    }

    fn item_view_type(&self, position: usize) -> ViewType {
        ViewType::of_binder(&self.binder_at(position))
    }

    fn new_view(&self, parent: &mut dyn ViewParent, view_type: &ViewType) -> Box<dyn View> {
        let binder = self
            .mapper
            .all_binders()
            .iter()
            .find(|binder| ViewType::of_binder(binder) == *view_type);
        match binder {
            Some(binder) => binder.new_view(parent),
            None => panic!("view type {view_type:?} does not belong to this adapter"),
        }
    }

    fn bind_view(&self, view: &mut dyn View, holder: &dyn Holder) {
        let position = holder.position();
        let binder = self.binder_at(position);
        self.list
            .with_item(position, |item| binder.bind_view(item.as_ref(), view, holder));
    }

    fn register_data_observer(&self, observer: Rc<dyn DataObserver>) {
        self.observable.register(observer);
        if self.observable.observer_count() == 1 {
            let forwarder: Rc<dyn DataObserver> = Rc::new(ListForwarder {
                downstream: Rc::clone(&self.observable),
            });
            self.list.register_observer(Rc::clone(&forwarder));
            *self.forwarder.borrow_mut() = Some(forwarder);
        }
    }

    fn unregister_data_observer(&self, observer: &Rc<dyn DataObserver>) {
        self.observable.unregister(observer);
        if self.observable.observer_count() == 0 {
            if let Some(forwarder) = self.forwarder.borrow_mut().take() {
                self.list.unregister_observer(&forwarder);
            }
        }
    }
}

/// Relays list events into the adapter's own observable.
struct ListForwarder {
    downstream: Rc<DataObservable>,
}

impl DataObserver for ListForwarder {
    fn on_changed(&self) {
        self.downstream.notify_changed();
    }

    fn on_item_range_changed(&self, position: usize, count: usize) {
        self.downstream.notify_item_range_changed(position, count);
    }

    fn on_item_range_inserted(&self, position: usize, count: usize) {
        self.downstream.notify_item_range_inserted(position, count);
    }

    fn on_item_range_removed(&self, position: usize, count: usize) {
        self.downstream.notify_item_range_removed(position, count);
    }

    fn on_item_range_moved(&self, from_position: usize, to_position: usize, count: usize) {
        self.downstream
            .notify_item_range_moved(from_position, to_position, count);
    }
}
