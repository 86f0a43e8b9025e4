//! End-to-end tests of the change-notification bridge.

use std::cell::RefCell;
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

use lazybind_core::{
    BindingAdapter, BoxedItem, ItemSource, MapperBuilder, ObservableList, ViewType, NO_ID,
};
use lazybind_recycler::{ConverterAdapter, HostObserver};
use lazybind_testing::{Note, ScriptedSource, ScriptedView, StubBinder, TestParent};

/// One host notification, as received.
#[derive(Clone, Debug, PartialEq, Eq)]
enum HostEvent {
    DataSetChanged,
    RangeChanged {
        position: usize,
        count: usize,
    },
    RangeInserted {
        position: usize,
        count: usize,
    },
    RangeRemoved {
        position: usize,
        count: usize,
    },
    Moved {
        from_position: usize,
        to_position: usize,
    },
}

/// [`HostObserver`] that appends every notification to a log.
#[derive(Default)]
struct RecordingHostObserver {
    events: RefCell<Vec<HostEvent>>,
}

impl RecordingHostObserver {
    fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    fn take_events(&self) -> Vec<HostEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl HostObserver for RecordingHostObserver {
    fn on_data_set_changed(&self) {
        self.events.borrow_mut().push(HostEvent::DataSetChanged);
    }

    fn on_item_range_changed(&self, position: usize, count: usize) {
        self.events
            .borrow_mut()
            .push(HostEvent::RangeChanged { position, count });
    }

    fn on_item_range_inserted(&self, position: usize, count: usize) {
        self.events
            .borrow_mut()
            .push(HostEvent::RangeInserted { position, count });
    }

    fn on_item_range_removed(&self, position: usize, count: usize) {
        self.events
            .borrow_mut()
            .push(HostEvent::RangeRemoved { position, count });
    }

    fn on_item_moved(&self, from_position: usize, to_position: usize) {
        self.events.borrow_mut().push(HostEvent::Moved {
            from_position,
            to_position,
        });
    }
}

fn bridged(count: usize) -> (Rc<ScriptedSource>, ConverterAdapter, Rc<RecordingHostObserver>) {
    let source = ScriptedSource::new(count);
    let converter = ConverterAdapter::new(source.clone());
    let recorder = RecordingHostObserver::new();
    converter.register_host_observer(recorder.clone());
    (source, converter, recorder)
}

#[test]
fn test_host_entry_points_delegate_to_the_source() {
    let source = ScriptedSource::new(7);
    let converter = ConverterAdapter::new(source);
    assert_eq!(converter.item_count(), 7);
    assert!(!converter.has_stable_ids());
    assert_eq!(converter.item_id(3), NO_ID);
}

#[test]
fn test_insert_updates_shadow_count_and_forwards() {
    let (source, _converter, recorder) = bridged(5);

    source.insert(2, 3);
    assert_eq!(
        recorder.take_events(),
        vec![HostEvent::RangeInserted {
            position: 2,
            count: 3
        }]
    );

    // A consistent removal afterwards proves the shadow count moved to 8.
    source.remove(0, 2);
    assert_eq!(
        recorder.take_events(),
        vec![HostEvent::RangeRemoved {
            position: 0,
            count: 2
        }]
    );
}

#[test]
fn test_range_change_forwards_unchanged() {
    let (source, _converter, recorder) = bridged(4);
    source.change(1, 2);
    assert_eq!(
        recorder.take_events(),
        vec![HostEvent::RangeChanged {
            position: 1,
            count: 2
        }]
    );
}

#[test]
fn test_single_item_move_forwards_as_primitive_move() {
    let (source, _converter, recorder) = bridged(4);
    source.move_range(3, 0, 1);
    assert_eq!(
        recorder.take_events(),
        vec![HostEvent::Moved {
            from_position: 3,
            to_position: 0
        }]
    );
}

#[test]
fn test_multi_item_move_falls_back_to_full_reset() {
    let (source, _converter, recorder) = bridged(6);
    source.move_range(0, 3, 3);
    assert_eq!(recorder.take_events(), vec![HostEvent::DataSetChanged]);
}

#[test]
fn test_full_reset_recomputes_shadow_count() {
    let (source, _converter, recorder) = bridged(2);

    source.reset(10);
    assert_eq!(recorder.take_events(), vec![HostEvent::DataSetChanged]);

    // Valid only if the reset refreshed the shadow count to 10.
    source.remove(0, 4);
    assert_eq!(
        recorder.take_events(),
        vec![HostEvent::RangeRemoved {
            position: 0,
            count: 4
        }]
    );
}

#[test]
#[should_panic(expected = "inconsistency detected")]
fn test_insert_event_larger_than_count_growth_panics() {
    let (source, _converter, _recorder) = bridged(5);
    // The source grew by one item...
    source.set_count(6);
    // ...but announces an insertion of two.
    source.observable().notify_item_range_inserted(0, 2);
}

#[test]
#[should_panic(expected = "inconsistency detected")]
fn test_removal_of_more_items_than_expected_panics() {
    let (source, _converter, _recorder) = bridged(2);
    source.set_count(0);
    source.observable().notify_item_range_removed(0, 3);
}

#[test]
fn test_inconsistent_event_is_not_forwarded() {
    let (source, _converter, recorder) = bridged(5);
    source.set_count(6);

    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        source.observable().notify_item_range_inserted(0, 2);
    }));
    assert!(result.is_err());
    assert!(recorder.events().is_empty());
}

#[test]
fn test_upstream_subscription_is_reference_counted() {
    let source = ScriptedSource::new(3);
    let converter = ConverterAdapter::new(source.clone());
    assert_eq!(source.observable().observer_count(), 0);

    let first = RecordingHostObserver::new();
    let second = RecordingHostObserver::new();
    converter.register_host_observer(first.clone());
    assert_eq!(source.observable().observer_count(), 1);
    converter.register_host_observer(second.clone());
    assert_eq!(source.observable().observer_count(), 1);

    let first_dyn: Rc<dyn HostObserver> = first;
    let second_dyn: Rc<dyn HostObserver> = second;
    converter.unregister_host_observer(&first_dyn);
    assert_eq!(source.observable().observer_count(), 1);
    converter.unregister_host_observer(&second_dyn);
    assert_eq!(source.observable().observer_count(), 0);
}

#[test]
fn test_events_fan_out_to_every_registered_observer() {
    let source = ScriptedSource::new(1);
    let converter = ConverterAdapter::new(source.clone());
    let first = RecordingHostObserver::new();
    let second = RecordingHostObserver::new();
    converter.register_host_observer(first.clone());
    converter.register_host_observer(second.clone());

    source.insert(0, 1);
    let expected = vec![HostEvent::RangeInserted {
        position: 0,
        count: 1,
    }];
    assert_eq!(first.take_events(), expected);
    assert_eq!(second.take_events(), expected);
}

#[test]
fn test_reregistration_resnapshots_from_live_count() {
    let (source, converter, recorder) = bridged(5);
    let recorder_dyn: Rc<dyn HostObserver> = recorder.clone();
    converter.unregister_host_observer(&recorder_dyn);

    // While unobserved the source may change without notifying anyone.
    source.set_count(9);

    converter.register_host_observer(recorder.clone());
    // Validates against the fresh snapshot of 9, not the stale 5.
    source.insert(0, 1);
    assert_eq!(
        recorder.take_events(),
        vec![HostEvent::RangeInserted {
            position: 0,
            count: 1
        }]
    );
}

#[test]
fn test_dropping_the_converter_releases_the_subscription() {
    let source = ScriptedSource::new(1);
    {
        let converter = ConverterAdapter::new(source.clone());
        converter.register_host_observer(RecordingHostObserver::new());
        assert_eq!(source.observable().observer_count(), 1);
    }
    assert_eq!(source.observable().observer_count(), 0);
}

#[test]
fn test_view_types_intern_densely() {
    let source = ScriptedSource::new(3);
    source.script_view_types(vec![
        ViewType::of_key(10),
        ViewType::of_key(20),
        ViewType::of_key(10),
    ]);
    let converter = ConverterAdapter::new(source.clone());

    assert_eq!(converter.item_view_type(0), 0);
    assert_eq!(converter.item_view_type(1), 1);
    assert_eq!(converter.item_view_type(2), 0);
    assert_eq!(converter.item_view_type(0), 0);
}

#[test]
fn test_create_view_resolves_the_original_token() {
    let source = ScriptedSource::new(2);
    source.script_view_types(vec![ViewType::of_key(10), ViewType::of_key(20)]);
    let converter = ConverterAdapter::new(source.clone());
    let view_type = converter.item_view_type(1);

    let mut parent = TestParent::default();
    let view = converter.create_view(&mut parent, view_type);
    let view = view.as_any().downcast_ref::<ScriptedView>().unwrap();
    assert_eq!(view.view_type, ViewType::of_key(20));
}

#[test]
#[should_panic(expected = "unknown view type")]
fn test_create_view_rejects_unassigned_integers() {
    let converter = ConverterAdapter::new(ScriptedSource::new(1));
    let mut parent = TestParent::default();
    converter.create_view(&mut parent, 5);
}

#[test]
fn test_binding_adapter_bridges_end_to_end() {
    let mut builder = MapperBuilder::new();
    builder.bind::<Note>(StubBinder::new("note"));
    let list = Rc::new(ObservableList::from_vec(vec![
        Box::new(Note::new(1, "a")) as BoxedItem
    ]));
    let adapter: Rc<dyn ItemSource> =
        Rc::new(BindingAdapter::new(list.clone(), Rc::new(builder.build())));

    let converter = ConverterAdapter::new(adapter);
    let recorder = RecordingHostObserver::new();
    converter.register_host_observer(recorder.clone());

    list.push(Box::new(Note::new(2, "b")));
    list.move_item(0, 1);
    list.replace_all(vec![Box::new(Note::new(3, "c")) as BoxedItem]);

    assert_eq!(
        recorder.take_events(),
        vec![
            HostEvent::RangeInserted {
                position: 1,
                count: 1
            },
            HostEvent::Moved {
                from_position: 0,
                to_position: 1
            },
            HostEvent::DataSetChanged,
        ]
    );
    assert_eq!(converter.item_count(), 1);
    assert_eq!(converter.item_view_type(0), 0);
}
