//! Commands (effects)
//!
//! A [`Cmd`] is an ordered list of effect descriptors. The crate never runs
//! them: the host runtime executes each [`Action`] and feeds the resulting
//! messages back into its update loop at some later point.

use std::fmt;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{BoxStream, Stream, StreamExt};

/// A single effect descriptor
pub enum Action<Msg> {
    /// Deliver a message on the next update cycle
    Message(Msg),
    /// Await a future and deliver its output
    Future(BoxFuture<'static, Msg>),
    /// Deliver every item the stream yields
    Stream(BoxStream<'static, Msg>),
}

impl<Msg: Send + 'static> Action<Msg> {
    fn map_with<B>(self, f: Arc<dyn Fn(Msg) -> B + Send + Sync>) -> Action<B>
    where
        B: Send + 'static,
    {
        match self {
            Action::Message(msg) => Action::Message(f(msg)),
            Action::Future(future) => Action::Future(future.map(move |msg| f(msg)).boxed()),
            Action::Stream(stream) => Action::Stream(stream.map(move |msg| f(msg)).boxed()),
        }
    }

    /// Name of the action kind, used for logging and `Debug`
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Message(_) => "message",
            Action::Future(_) => "future",
            Action::Stream(_) => "stream",
        }
    }
}

impl<Msg: fmt::Debug> fmt::Debug for Action<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Message(msg) => f.debug_tuple("Message").field(msg).finish(),
            Action::Future(_) => f.write_str("Future(..)"),
            Action::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Elm-like command
///
/// Batching concatenates action lists, so the order in which commands are
/// combined is the order in which the host receives them.
pub struct Cmd<Msg> {
    actions: Vec<Action<Msg>>,
}

impl<Msg> Cmd<Msg> {
    /// A command that does nothing
    pub fn none() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// A command that delivers `msg` as-is
    pub fn message(msg: Msg) -> Self {
        Self {
            actions: vec![Action::Message(msg)],
        }
    }

    /// Combine commands, keeping their order
    pub fn batch(commands: impl IntoIterator<Item = Cmd<Msg>>) -> Self {
        let actions = commands
            .into_iter()
            .flat_map(|cmd| cmd.actions)
            .collect();
        Self { actions }
    }

    /// Append `other` after the actions of `self`
    pub fn and(mut self, other: Cmd<Msg>) -> Self {
        self.actions.extend(other.actions);
        self
    }

    /// Number of effect descriptors
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether this command carries no effects
    pub fn is_none(&self) -> bool {
        self.actions.is_empty()
    }

    /// The queued descriptors in the order the host will see them
    pub fn iter(&self) -> impl Iterator<Item = &Action<Msg>> {
        self.actions.iter()
    }

    /// Hand the descriptors over to the host
    pub fn into_actions(self) -> Vec<Action<Msg>> {
        self.actions
    }
}

impl<Msg: Send + 'static> Cmd<Msg> {
    /// Run a future and turn its output into a message
    pub fn perform<T, F>(future: impl std::future::Future<Output = T> + Send + 'static, f: F) -> Self
    where
        F: FnOnce(T) -> Msg + Send + 'static,
    {
        Self {
            actions: vec![Action::Future(future.map(f).boxed())],
        }
    }

    /// Run a stream and turn each item into a message
    pub fn run<T, F>(stream: impl Stream<Item = T> + Send + 'static, f: F) -> Self
    where
        F: FnMut(T) -> Msg + Send + 'static,
    {
        Self {
            actions: vec![Action::Stream(stream.map(f).boxed())],
        }
    }

    /// Re-target every message this command will eventually produce
    pub fn map<B, F>(self, f: F) -> Cmd<B>
    where
        B: Send + 'static,
        F: Fn(Msg) -> B + Send + Sync + 'static,
    {
        let f: Arc<dyn Fn(Msg) -> B + Send + Sync> = Arc::new(f);
        Cmd {
            actions: self
                .actions
                .into_iter()
                .map(|action| action.map_with(Arc::clone(&f)))
                .collect(),
        }
    }
}

impl<Msg> Default for Cmd<Msg> {
    fn default() -> Self {
        Self::none()
    }
}

impl<Msg> From<Vec<Action<Msg>>> for Cmd<Msg> {
    fn from(actions: Vec<Action<Msg>>) -> Self {
        Self { actions }
    }
}

impl<Msg> FromIterator<Cmd<Msg>> for Cmd<Msg> {
    fn from_iter<I: IntoIterator<Item = Cmd<Msg>>>(iter: I) -> Self {
        Self::batch(iter)
    }
}

impl<Msg: fmt::Debug> fmt::Debug for Cmd<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.actions.iter()).finish()
    }
}
