use std::cell::RefCell;
use std::fmt;

use super::error::{EventError, EventResult, ListenerFailure};
use super::listener::{IntoListener, Listener};
use crate::alloc::IndexMap;

/// Default listener capacity per event type.
pub const DEFAULT_MAX_LISTENERS: usize = 999;

/// Split an event-type string into its names.
///
/// Leading and trailing whitespace is ignored and runs of whitespace count as
/// one separator, so `"  open \t close "` yields `open` and `close`.
pub fn event_types(input: &str) -> impl Iterator<Item = &str> {
    input.split_whitespace()
}

/// Synchronous publish/subscribe dispatcher.
///
/// `A` is the argument type every listener receives. All methods take
/// `&self` so listeners may register or unregister while an emit is in
/// progress; such changes apply from the next emit of that event type.
///
/// An emitter is single-threaded (`!Send`, `!Sync`).
pub struct Emitter<A: ?Sized = ()> {
    pool: RefCell<IndexMap<String, Vec<Listener<A>>>>,
    max_listeners: usize,
}

impl<A: ?Sized> Emitter<A> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_LISTENERS)
    }

    /// Create an emitter that accepts at most `max_listeners` listeners per
    /// event type.
    pub fn with_capacity(max_listeners: usize) -> Self {
        Self {
            pool: RefCell::new(IndexMap::default()),
            max_listeners,
        }
    }

    pub fn max_listeners(&self) -> usize {
        self.max_listeners
    }

    /// Register `listener` under every name in `event_types`.
    ///
    /// A `None` listener is accepted and ignored. Fails with
    /// [`EventError::CapacityExceeded`] on the first name whose list is
    /// already full; names before it keep the new registration.
    pub fn on(&self, event_types: &str, listener: impl IntoListener<A>) -> EventResult<&Self> {
        let listener = listener.into_listener();
        let mut pool = self.pool.borrow_mut();

        for event_type in self::event_types(event_types) {
            let listeners = pool.entry(event_type.to_string()).or_default();

            if listeners.len() >= self.max_listeners {
                return Err(EventError::CapacityExceeded {
                    event_type: event_type.to_string(),
                    capacity: self.max_listeners,
                });
            }

            if let Some(listener) = &listener {
                listeners.push(listener.clone());
            }
        }

        Ok(self)
    }

    /// Unregister listeners from every name in `event_types`.
    ///
    /// With `Some(listener)`, removes its first registration under each name.
    /// With `None`, drops every registration under each name; other event
    /// types are left alone.
    pub fn un(&self, event_types: &str, listener: Option<&Listener<A>>) -> &Self {
        let mut pool = self.pool.borrow_mut();

        for event_type in self::event_types(event_types) {
            match listener {
                Some(listener) => {
                    if let Some(listeners) = pool.get_mut(event_type) {
                        if let Some(index) = listeners.iter().position(|l| l.same(listener)) {
                            listeners.remove(index);
                        }
                    }
                }
                None => {
                    pool.shift_remove(event_type);
                }
            }
        }

        self
    }

    /// Invoke every listener of every name in `event_types` with `args`.
    ///
    /// Listeners run in registration order against the registrations present
    /// when dispatch of that name starts. A failing listener does not stop
    /// the ones after it; all failures are returned together once the
    /// fan-out is done.
    pub fn emit(&self, event_types: &str, args: &A) -> EventResult<&Self> {
        let mut failures = Vec::new();

        for event_type in self::event_types(event_types) {
            let listeners = match self.pool.borrow().get(event_type) {
                Some(listeners) if !listeners.is_empty() => listeners.clone(),
                _ => continue,
            };

            tracing::trace!(event_type, listeners = listeners.len(), "emit");

            for (index, listener) in listeners.iter().enumerate() {
                if let Err(error) = listener.call(args) {
                    failures.push(ListenerFailure {
                        event_type: event_type.to_string(),
                        index,
                        error,
                    });
                }
            }
        }

        if failures.is_empty() {
            Ok(self)
        } else {
            Err(EventError::ListenersFailed(failures))
        }
    }

    /// Number of registrations under `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.pool.borrow().get(event_type).map_or(0, Vec::len)
    }

    pub fn has_listeners(&self, event_type: &str) -> bool {
        self.listener_count(event_type) > 0
    }

    /// Event types that currently hold at least one listener, in the order
    /// they were first registered.
    pub fn event_types(&self) -> Vec<String> {
        self.pool
            .borrow()
            .iter()
            .filter(|(_, listeners)| !listeners.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl<A: ?Sized> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pool = self.pool.borrow();
        f.debug_struct("Emitter")
            .field(
                "pool",
                &pool
                    .iter()
                    .map(|(name, listeners)| (name.as_str(), listeners.len()))
                    .collect::<Vec<_>>(),
            )
            .field("max_listeners", &self.max_listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> Listener<i32> {
        let log = log.clone();
        Listener::from_fn(move |n: &i32| log.borrow_mut().push(format!("{}:{}", tag, n)))
    }

    #[test]
    fn test_event_type_parsing() {
        let names: Vec<_> = event_types("  open \t\n close  ").collect();
        assert_eq!(names, vec!["open", "close"]);
        assert_eq!(event_types("   ").count(), 0);
    }

    #[test]
    fn test_on_registers_under_each_name() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let emitter = Emitter::new();
        emitter.on("a b", recorder(&log, "x")).unwrap();

        assert_eq!(emitter.listener_count("a"), 1);
        assert_eq!(emitter.listener_count("b"), 1);

        emitter.emit("a b", &7).unwrap();
        assert_eq!(*log.borrow(), vec!["x:7", "x:7"]);
    }

    #[test]
    fn test_emit_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let emitter = Emitter::new();
        emitter
            .on("tick", recorder(&log, "first"))
            .unwrap()
            .on("tick", recorder(&log, "second"))
            .unwrap()
            .on("tick", recorder(&log, "third"))
            .unwrap();

        emitter.emit("tick", &1).unwrap();
        assert_eq!(*log.borrow(), vec!["first:1", "second:1", "third:1"]);
    }

    #[test]
    fn test_emit_without_listeners_is_noop() {
        let emitter: Emitter<i32> = Emitter::new();
        assert!(emitter.emit("nothing", &0).is_ok());
        assert!(emitter.event_types().is_empty());
    }

    #[test]
    fn test_none_listener_is_ignored() {
        let emitter: Emitter<i32> = Emitter::new();
        emitter.on("a", None::<Listener<i32>>).unwrap();
        assert_eq!(emitter.listener_count("a"), 0);
    }

    #[test]
    fn test_capacity_boundary() {
        let emitter: Emitter<i32> = Emitter::new();
        let listener = Listener::from_fn(|_: &i32| {});

        for _ in 0..998 {
            emitter.on("full", &listener).unwrap();
        }
        // 999th succeeds
        assert!(emitter.on("full", &listener).is_ok());
        assert_eq!(emitter.listener_count("full"), 999);

        // 1000th fails, and only for that type
        match emitter.on("full", &listener) {
            Err(EventError::CapacityExceeded {
                event_type,
                capacity,
            }) => {
                assert_eq!(event_type, "full");
                assert_eq!(capacity, 999);
            }
            other => panic!("expected CapacityExceeded, got {:?}", other.map(|_| ())),
        }
        assert_eq!(emitter.listener_count("full"), 999);
        assert!(emitter.on("other", &listener).is_ok());
    }

    #[test]
    fn test_capacity_failure_keeps_earlier_names() {
        let emitter: Emitter<i32> = Emitter::with_capacity(1);
        let listener = Listener::from_fn(|_: &i32| {});
        emitter.on("b", &listener).unwrap();

        assert!(emitter.on("a b c", &listener).is_err());
        assert_eq!(emitter.listener_count("a"), 1);
        assert_eq!(emitter.listener_count("b"), 1);
        assert_eq!(emitter.listener_count("c"), 0);
    }

    #[test]
    fn test_un_removes_one_registration() {
        let count = Rc::new(Cell::new(0));
        let listener = {
            let count = count.clone();
            Listener::from_fn(move |_: &i32| count.set(count.get() + 1))
        };
        let emitter = Emitter::new();
        emitter.on("a", &listener).unwrap().on("a", &listener).unwrap();

        emitter.un("a", Some(&listener));
        emitter.emit("a", &0).unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_un_matches_identity_not_behaviour() {
        let emitter: Emitter<i32> = Emitter::new();
        let registered = Listener::from_fn(|_: &i32| {});
        let lookalike = Listener::from_fn(|_: &i32| {});
        emitter.on("a", &registered).unwrap();

        emitter.un("a", Some(&lookalike));
        assert_eq!(emitter.listener_count("a"), 1);
    }

    #[test]
    fn test_un_without_listener_clears_only_named_types() {
        let emitter: Emitter<i32> = Emitter::new();
        let listener = Listener::from_fn(|_: &i32| {});
        emitter.on("a b c", &listener).unwrap();

        emitter.un("a c", None);
        assert_eq!(emitter.listener_count("a"), 0);
        assert_eq!(emitter.listener_count("b"), 1);
        assert_eq!(emitter.listener_count("c"), 0);
        assert_eq!(emitter.event_types(), vec!["b".to_string()]);
    }

    #[test]
    fn test_failing_listener_does_not_stop_fan_out() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let emitter = Emitter::new();
        emitter
            .on("a", Listener::new(|_: &i32| Err("boom".into())))
            .unwrap()
            .on("a", recorder(&log, "after"))
            .unwrap();

        let err = emitter.emit("a", &3).unwrap_err();
        assert_eq!(*log.borrow(), vec!["after:3"]);
        match err {
            EventError::ListenersFailed(failures) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].event_type, "a");
                assert_eq!(failures[0].index, 0);
                assert_eq!(failures[0].error.to_string(), "boom");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_listener_removing_itself_runs_once() {
        let emitter: Rc<Emitter<i32>> = Rc::new(Emitter::new());
        let count = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Listener<i32>>>> = Rc::new(RefCell::new(None));

        let listener = {
            let emitter = Rc::downgrade(&emitter);
            let count = count.clone();
            let slot = slot.clone();
            Listener::from_fn(move |_: &i32| {
                count.set(count.get() + 1);
                if let (Some(emitter), Some(me)) = (emitter.upgrade(), slot.borrow().as_ref()) {
                    emitter.un("a", Some(me));
                }
            })
        };
        *slot.borrow_mut() = Some(listener.clone());

        emitter.on("a", &listener).unwrap();
        emitter.emit("a", &0).unwrap();
        emitter.emit("a", &0).unwrap();

        assert_eq!(count.get(), 1);
        assert_eq!(emitter.listener_count("a"), 0);
    }

    #[test]
    fn test_listener_removed_during_emit_still_runs_this_time() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let emitter: Rc<Emitter<i32>> = Rc::new(Emitter::new());
        let b = recorder(&log, "b");

        let a = {
            let emitter = Rc::downgrade(&emitter);
            let b = b.clone();
            let log = log.clone();
            Listener::from_fn(move |n: &i32| {
                log.borrow_mut().push(format!("a:{}", n));
                if let Some(emitter) = emitter.upgrade() {
                    emitter.un("tick", Some(&b));
                }
            })
        };
        emitter.on("tick", &a).unwrap().on("tick", &b).unwrap();

        emitter.emit("tick", &1).unwrap();
        assert_eq!(*log.borrow(), vec!["a:1", "b:1"]);
        assert_eq!(emitter.listener_count("tick"), 1);

        emitter.emit("tick", &2).unwrap();
        assert_eq!(*log.borrow(), vec!["a:1", "b:1", "a:2"]);
    }

    #[test]
    fn test_listener_added_during_emit_runs_next_time() {
        let emitter: Rc<Emitter<i32>> = Rc::new(Emitter::new());
        let late_hits = Rc::new(Cell::new(0));
        let late = {
            let late_hits = late_hits.clone();
            Listener::from_fn(move |_: &i32| late_hits.set(late_hits.get() + 1))
        };

        let adder = {
            let emitter = Rc::downgrade(&emitter);
            let late = late.clone();
            Listener::from_fn(move |_: &i32| {
                if let Some(emitter) = emitter.upgrade() {
                    emitter.on("a", &late).unwrap();
                }
            })
        };
        emitter.on("a", &adder).unwrap();

        emitter.emit("a", &0).unwrap();
        assert_eq!(late_hits.get(), 0);

        emitter.emit("a", &0).unwrap();
        assert_eq!(late_hits.get(), 1);
    }
}
