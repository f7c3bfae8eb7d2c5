use super::listener::ListenerError;

/// A listener that returned an error during [`Emitter::emit`].
///
/// [`Emitter::emit`]: super::Emitter::emit
#[derive(Debug)]
pub struct ListenerFailure {
    pub event_type: String,
    /// Position of the listener in its event type's list at emit time.
    pub index: usize,
    pub error: ListenerError,
}

/// Errors raised by the event system.
#[derive(Debug)]
pub enum EventError {
    /// The event type already holds the maximum number of listeners.
    CapacityExceeded { event_type: String, capacity: usize },
    /// One or more listeners failed. Every listener was still invoked.
    ListenersFailed(Vec<ListenerFailure>),
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::CapacityExceeded {
                event_type,
                capacity,
            } => write!(f, "event `{}` pool is full as {}", event_type, capacity),
            EventError::ListenersFailed(failures) => match failures.first() {
                Some(first) if failures.len() == 1 => write!(
                    f,
                    "listener {} of event `{}` failed: {}",
                    first.index, first.event_type, first.error
                ),
                Some(first) => write!(
                    f,
                    "{} listeners failed, first on event `{}`: {}",
                    failures.len(),
                    first.event_type,
                    first.error
                ),
                None => write!(f, "listeners failed"),
            },
        }
    }
}

impl std::error::Error for EventError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EventError::ListenersFailed(failures) => {
                failures.first().map(|f| f.error.as_ref() as &(dyn std::error::Error + 'static))
            }
            EventError::CapacityExceeded { .. } => None,
        }
    }
}

/// Result type for event operations.
pub type EventResult<T> = Result<T, EventError>;
