//! Support types referenced by generated mocks.
//!
//! Generated code names these through an absolute path (by default
//! `::stubsmith::runtime`), so anything renamed here must also be renamed in
//! the synthesizer.

use std::any::Any;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by stubs registered for `async fn` methods.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Message carried by [`NotMocked::default`].
pub const DEFAULT_NOT_MOCKED_MESSAGE: &str = "Not mocked";

/// Error delivered by a mocked method that has no stub registered.
///
/// Generated methods convert it into the method's own error type with
/// `From`, so error types used in mocked traits need a `From<NotMocked>`
/// impl. `NotMocked` itself, `Box<dyn Error + Send + Sync>`, `String` and
/// `std::io::Error` work out of the box.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct NotMocked {
    message: Cow<'static, str>,
}

impl NotMocked {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for NotMocked {
    fn default() -> Self {
        Self::new(DEFAULT_NOT_MOCKED_MESSAGE)
    }
}

impl From<&'static str> for NotMocked {
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

impl From<String> for NotMocked {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<NotMocked> for String {
    fn from(err: NotMocked) -> Self {
        err.message.into_owned()
    }
}

impl From<NotMocked> for std::io::Error {
    fn from(err: NotMocked) -> Self {
        std::io::Error::other(err)
    }
}

/// Type-erased stub storage keyed by method name.
///
/// Stubs are stored as `Box<dyn Any>` and downcast on lookup. A stub whose
/// concrete type differs from the requested one is reported as absent, so a
/// mismatch degrades to "not mocked" instead of panicking.
#[derive(Default)]
pub struct StubRegistry {
    stubs: HashMap<&'static str, Box<dyn Any + Send + Sync>>,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `stub` under `name`, replacing any earlier registration.
    pub fn insert<S>(&mut self, name: &'static str, stub: S)
    where
        S: Any + Send + Sync,
    {
        self.stubs.insert(name, Box::new(stub));
    }

    /// Returns the stub registered under `name` if it has type `S`.
    pub fn get<S: Any>(&self, name: &str) -> Option<&S> {
        self.stubs
            .get(name)
            .and_then(|stub| (**stub).downcast_ref::<S>())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stubs.contains_key(name)
    }

    /// Drops the stub registered under `name`, returning whether one existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.stubs.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }
}

impl fmt::Debug for StubRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.stubs.keys().collect();
        names.sort();
        f.debug_struct("StubRegistry")
            .field("stubs", &names)
            .finish()
    }
}
