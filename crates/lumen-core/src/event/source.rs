use super::emitter::Emitter;
use super::error::EventResult;
use super::listener::{IntoListener, Listener};

/// Types that publish events through an embedded [`Emitter`].
///
/// Implementors only provide [`EventSource::emitter`]; `on`, `un` and `emit`
/// delegate to it and return the implementor for chaining.
pub trait EventSource<A: ?Sized> {
    fn emitter(&self) -> &Emitter<A>;

    fn on(&self, event_types: &str, listener: impl IntoListener<A>) -> EventResult<&Self>
    where
        Self: Sized,
    {
        self.emitter().on(event_types, listener)?;
        Ok(self)
    }

    fn un(&self, event_types: &str, listener: Option<&Listener<A>>) -> &Self
    where
        Self: Sized,
    {
        self.emitter().un(event_types, listener);
        self
    }

    fn emit(&self, event_types: &str, args: &A) -> EventResult<&Self>
    where
        Self: Sized,
    {
        self.emitter().emit(event_types, args)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Button {
        events: Emitter<&'static str>,
    }

    impl EventSource<&'static str> for Button {
        fn emitter(&self) -> &Emitter<&'static str> {
            &self.events
        }
    }

    #[test]
    fn test_delegation_chains_on_the_source() {
        let button = Button {
            events: Emitter::new(),
        };
        let clicks = Rc::new(Cell::new(0));
        let listener = {
            let clicks = clicks.clone();
            Listener::from_fn(move |_: &&'static str| clicks.set(clicks.get() + 1))
        };

        button
            .on("click", &listener)
            .unwrap()
            .emit("click", &"left")
            .unwrap()
            .un("click", Some(&listener))
            .emit("click", &"left")
            .unwrap();

        assert_eq!(clicks.get(), 1);
    }
}
