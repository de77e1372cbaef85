//! Subscriptions
//!
//! A [`Sub`] describes an ongoing event source. Hosts compare [`SubId`]s
//! between update cycles to decide which streams to start or stop, so the id
//! must stay stable for as long as the same source is requested.

use std::any::TypeId;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};

pub mod time;

pub use time::Every;

/// Identity of a subscription, derived from its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubId(u64);

impl SubId {
    /// Derive an id from a source type and a hashable key
    pub fn of<S: 'static>(key: &impl Hash) -> Self {
        let mut hasher = DefaultHasher::new();
        TypeId::of::<S>().hash(&mut hasher);
        key.hash(&mut hasher);
        Self(hasher.finish())
    }

    fn mapped(self, key: &impl Hash) -> Self {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        self.0.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// An event source a [`Sub`] can be built from
pub trait SubSource: Send + 'static {
    type Output: Send + 'static;

    fn id(&self) -> SubId;

    fn stream(self: Box<Self>) -> BoxStream<'static, Self::Output>;
}

type Spawn<Msg> = Box<dyn FnOnce() -> BoxStream<'static, Msg> + Send>;

/// Subscription descriptor
pub struct Sub<Msg> {
    id: SubId,
    spawn: Spawn<Msg>,
}

impl<Msg: Send + 'static> Sub<Msg> {
    pub fn new<S>(source: S) -> Self
    where
        S: SubSource<Output = Msg>,
    {
        let id = source.id();
        let source: Box<S> = Box::new(source);
        Self {
            id,
            spawn: Box::new(move || source.stream()),
        }
    }

    /// Re-target every message the subscription will produce
    ///
    /// The resulting id depends on the mapping function's type, so two
    /// children wrapping the same source into different parent messages
    /// never collide.
    pub fn map<B, F>(self, f: F) -> Sub<B>
    where
        B: Send + 'static,
        F: Fn(Msg) -> B + Send + Sync + 'static,
    {
        let spawn = self.spawn;
        Sub {
            id: self.id.mapped(&TypeId::of::<F>()),
            spawn: Box::new(move || spawn().map(f).boxed()),
        }
    }

    /// Like [`Sub::map`] for an already type-erased function; `key` stands
    /// in for the erased function's type when deriving the new id.
    pub(crate) fn map_keyed<B>(self, key: TypeId, f: Arc<dyn Fn(Msg) -> B + Send + Sync>) -> Sub<B>
    where
        B: Send + 'static,
    {
        let spawn = self.spawn;
        Sub {
            id: self.id.mapped(&key),
            spawn: Box::new(move || spawn().map(move |msg| f(msg)).boxed()),
        }
    }
}

impl<Msg> Sub<Msg> {
    pub fn id(&self) -> SubId {
        self.id
    }

    /// Mix `key` into the id, leaving the stream alone
    ///
    /// Needed when the mapping function alone cannot tell instances apart,
    /// e.g. closures capturing an index built by one factory function.
    pub fn keyed(self, key: &impl Hash) -> Self {
        Self {
            id: self.id.mapped(key),
            spawn: self.spawn,
        }
    }

    /// Start the underlying stream; called by the host
    pub fn into_stream(self) -> BoxStream<'static, Msg> {
        (self.spawn)()
    }
}

impl<Msg> fmt::Debug for Sub<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sub").field("id", &self.id).finish()
    }
}
