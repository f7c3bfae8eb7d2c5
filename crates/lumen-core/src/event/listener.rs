use std::fmt;
use std::rc::Rc;

/// Error a listener may return to signal that it failed.
pub type ListenerError = Box<dyn std::error::Error + 'static>;

pub type ListenerResult = Result<(), ListenerError>;

/// A shared, reference-counted event callback.
///
/// Cloning a listener yields the same callback; [`Emitter::un`] removes
/// registrations by this identity, so keep a clone around to unregister.
///
/// [`Emitter::un`]: super::Emitter::un
pub struct Listener<A: ?Sized> {
    callback: Rc<dyn Fn(&A) -> ListenerResult>,
}

impl<A: ?Sized> Listener<A> {
    /// Wrap a fallible callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&A) -> ListenerResult + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Wrap a callback that never fails.
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self::new(move |args| {
            callback(args);
            Ok(())
        })
    }

    pub fn call(&self, args: &A) -> ListenerResult {
        (self.callback)(args)
    }

    /// Whether both handles point at the same callback.
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<A: ?Sized> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<A: ?Sized> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<A: ?Sized> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// Values accepted by [`Emitter::on`].
///
/// `None` converts to no listener and is dropped without error.
///
/// [`Emitter::on`]: super::Emitter::on
pub trait IntoListener<A: ?Sized> {
    fn into_listener(self) -> Option<Listener<A>>;
}

impl<A: ?Sized> IntoListener<A> for Listener<A> {
    fn into_listener(self) -> Option<Listener<A>> {
        Some(self)
    }
}

impl<A: ?Sized> IntoListener<A> for &Listener<A> {
    fn into_listener(self) -> Option<Listener<A>> {
        Some(self.clone())
    }
}

impl<A: ?Sized> IntoListener<A> for Option<Listener<A>> {
    fn into_listener(self) -> Option<Listener<A>> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_is_same_listener() {
        let a = Listener::from_fn(|_: &()| {});
        let b = a.clone();
        let c = Listener::from_fn(|_: &()| {});

        assert!(a.same(&b));
        assert_eq!(a, b);
        assert!(!a.same(&c));
    }

    #[test]
    fn test_fallible_listener_reports_error() {
        let listener = Listener::new(|n: &i32| {
            if *n < 0 {
                Err("negative".into())
            } else {
                Ok(())
            }
        });

        assert!(listener.call(&1).is_ok());
        assert_eq!(listener.call(&-1).unwrap_err().to_string(), "negative");
    }
}
