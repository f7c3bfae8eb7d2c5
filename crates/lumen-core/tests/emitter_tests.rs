//! Emitter behaviour seen from outside the crate.

use std::cell::RefCell;
use std::rc::Rc;

use lumen_core::event::{DEFAULT_MAX_LISTENERS, Emitter, EventError, Listener};

type Log = Rc<RefCell<Vec<(String, u32)>>>;

fn tagged(log: &Log, tag: &str) -> Listener<u32> {
    let log = log.clone();
    let tag = tag.to_string();
    Listener::from_fn(move |n: &u32| log.borrow_mut().push((tag.clone(), *n)))
}

#[test]
fn test_multi_type_emit_reaches_both_types() {
    let log: Log = Rc::default();
    let emitter = Emitter::new();
    emitter.on("a", tagged(&log, "a")).unwrap();
    emitter.on("b", tagged(&log, "b")).unwrap();

    emitter.emit("a b", &9).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![("a".to_string(), 9), ("b".to_string(), 9)]
    );
}

#[test]
fn test_same_listener_on_many_types_is_independent() {
    let log: Log = Rc::default();
    let emitter = Emitter::new();
    let listener = tagged(&log, "shared");
    emitter.on("one two three", &listener).unwrap();

    emitter.un("two", Some(&listener));

    assert_eq!(emitter.listener_count("one"), 1);
    assert_eq!(emitter.listener_count("two"), 0);
    assert_eq!(emitter.listener_count("three"), 1);
}

#[test]
fn test_default_capacity_is_999() {
    let emitter: Emitter<u32> = Emitter::default();
    assert_eq!(emitter.max_listeners(), DEFAULT_MAX_LISTENERS);
    assert_eq!(DEFAULT_MAX_LISTENERS, 999);
}

#[test]
fn test_capacity_error_message() {
    let emitter: Emitter<u32> = Emitter::with_capacity(0);
    let err = emitter.on("open", Listener::from_fn(|_: &u32| {})).unwrap_err();

    assert!(matches!(err, EventError::CapacityExceeded { .. }));
    assert_eq!(err.to_string(), "event `open` pool is full as 0");
}

#[test]
fn test_every_failure_is_reported() {
    let emitter: Emitter<u32> = Emitter::new();
    emitter
        .on("a b", Listener::new(|_: &u32| Err("nope".into())))
        .unwrap();

    match emitter.emit("a b", &1) {
        Err(EventError::ListenersFailed(failures)) => {
            let types: Vec<_> = failures.iter().map(|f| f.event_type.as_str()).collect();
            assert_eq!(types, vec!["a", "b"]);
        }
        other => panic!("expected ListenersFailed, got {:?}", other.map(|_| ())),
    }
}
