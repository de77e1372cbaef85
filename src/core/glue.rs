//! Glue between a parent module and an embedded child module
//!
//! A [`Glue`] records how a child module's state, messages and effects sit
//! inside a parent module:
//!
//! - `wrap` turns a value emitted by the child (`A`) into a parent message
//! - `get`/`set` form a lens from the parent model to the child model
//! - `init`, `update` and `subscriptions` produce the child's state together
//!   with effects already expressed in the parent's message type
//!
//! The parent's own `init`/`update`/`view`/`subscriptions` then call the
//! orchestration methods below instead of mapping child messages by hand.
//!
//! ## Effect ordering
//!
//! Whenever a method combines effects, the effects the caller already had
//! pending come first and the child's effects are appended after them.
//! Subscriptions follow the same rule: the parent's own list first, then the
//! child's.
//!
//! ## Example
//!
//! ```rust
//! use tea_glue::{Cmd, Glue};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum CounterMsg {
//!     Increment,
//! }
//!
//! #[derive(Debug)]
//! enum Msg {
//!     Counter(CounterMsg),
//! }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Model {
//!     counter: i32,
//!     other: String,
//! }
//!
//! let counter: Glue<Model, i32, Msg, CounterMsg, CounterMsg> = Glue::simple(
//!     Msg::Counter,
//!     |model: &Model| &model.counter,
//!     |counter, model| Model { counter, ..model },
//!     || (0, Cmd::none()),
//!     |msg, count: &i32| match msg {
//!         CounterMsg::Increment => (count + 1, Cmd::none()),
//!     },
//!     |_| vec![],
//! );
//!
//! let (model, cmd) = counter.init((
//!     |counter| Model { counter, other: "x".to_string() },
//!     Cmd::none(),
//! ));
//! let (model, cmd) = counter.update(CounterMsg::Increment, (model, cmd));
//!
//! assert_eq!(model, Model { counter: 1, other: "x".to_string() });
//! assert!(cmd.is_none());
//! ```

use std::any::{type_name, TypeId};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::core::cmd::Cmd;
use crate::core::element::Element;
use crate::core::sub::Sub;

pub mod laws;

type Wrap<A, Msg> = Arc<dyn Fn(A) -> Msg + Send + Sync>;
type Get<M, S> = Arc<dyn Fn(&M) -> &S + Send + Sync>;
type Set<M, S> = Arc<dyn Fn(S, M) -> M + Send + Sync>;
type Init<S, Msg> = Arc<dyn Fn() -> (S, Cmd<Msg>) + Send + Sync>;
type Update<M, S, Msg, SubMsg> = Arc<dyn Fn(SubMsg, &M) -> (S, Cmd<Msg>) + Send + Sync>;
type Subscriptions<M, Msg> = Arc<dyn Fn(&M) -> Vec<Sub<Msg>> + Send + Sync>;

/// Adapter describing how a child module is embedded in a parent module
///
/// Type parameters:
/// - `M`: parent model
/// - `S`: child model
/// - `Msg`: parent message
/// - `SubMsg`: child message consumed by [`Glue::update`]
/// - `A`: what the child's view and triggered effects emit, usually `SubMsg`
///   or `Msg`
///
/// A `Glue` holds no state of its own. Build it once and share it; cloning
/// only bumps reference counts.
pub struct Glue<M, S, Msg, SubMsg, A = Msg> {
    wrap: Wrap<A, Msg>,
    get: Get<M, S>,
    set: Set<M, S>,
    init: Init<S, Msg>,
    update: Update<M, S, Msg, SubMsg>,
    subscriptions: Subscriptions<M, Msg>,
}

fn lift<A, Msg>(wrap: &Wrap<A, Msg>, cmd: Cmd<A>) -> Cmd<Msg>
where
    A: Send + 'static,
    Msg: Send + 'static,
{
    let wrap = Arc::clone(wrap);
    cmd.map(move |a| wrap(a))
}

/// Re-target the effects of a `(state, cmd)` pair, leaving the state alone
///
/// This is how a child's self-contained `(model, Cmd<SubMsg>)` becomes
/// something a parent can queue. Useful when writing the `init`/`update`
/// arguments of [`Glue::new`] by hand.
pub fn map<T, A, Msg, F>(f: F, (state, cmd): (T, Cmd<A>)) -> (T, Cmd<Msg>)
where
    A: Send + 'static,
    Msg: Send + 'static,
    F: Fn(A) -> Msg + Send + Sync + 'static,
{
    (state, cmd.map(f))
}

impl<M, S, Msg, SubMsg> Glue<M, S, Msg, SubMsg, SubMsg>
where
    M: 'static,
    S: 'static,
    Msg: Send + 'static,
    SubMsg: Send + 'static,
{
    /// Glue for a child written purely in terms of its own message type
    ///
    /// `init`, `update` and `subscriptions` only know about `S` and `SubMsg`;
    /// every effect and subscription they produce is wrapped with `msg`.
    pub fn simple<W, G, St, I, U, Sb>(
        msg: W,
        get: G,
        set: St,
        init: I,
        update: U,
        subscriptions: Sb,
    ) -> Self
    where
        W: Fn(SubMsg) -> Msg + Send + Sync + 'static,
        G: Fn(&M) -> &S + Send + Sync + 'static,
        St: Fn(S, M) -> M + Send + Sync + 'static,
        I: Fn() -> (S, Cmd<SubMsg>) + Send + Sync + 'static,
        U: Fn(SubMsg, &S) -> (S, Cmd<SubMsg>) + Send + Sync + 'static,
        Sb: Fn(&S) -> Vec<Sub<SubMsg>> + Send + Sync + 'static,
    {
        let wrap_key = TypeId::of::<W>();
        let wrap: Wrap<SubMsg, Msg> = Arc::new(msg);
        let get: Get<M, S> = Arc::new(get);

        let init: Init<S, Msg> = {
            let wrap = Arc::clone(&wrap);
            Arc::new(move || {
                let (sub_model, cmd) = init();
                (sub_model, lift(&wrap, cmd))
            })
        };

        let update: Update<M, S, Msg, SubMsg> = {
            let wrap = Arc::clone(&wrap);
            let get = Arc::clone(&get);
            Arc::new(move |sub_msg: SubMsg, model: &M| {
                let (sub_model, cmd) = update(sub_msg, get(model));
                (sub_model, lift(&wrap, cmd))
            })
        };

        let subscriptions: Subscriptions<M, Msg> = {
            let wrap = Arc::clone(&wrap);
            let get = Arc::clone(&get);
            Arc::new(move |model: &M| {
                subscriptions(get(model))
                    .into_iter()
                    .map(|sub| sub.map_keyed(wrap_key, Arc::clone(&wrap)))
                    .collect()
            })
        };

        Self {
            wrap,
            get,
            set: Arc::new(set),
            init,
            update,
            subscriptions,
        }
    }
}

impl<M, S, Msg, SubMsg> Glue<M, S, Msg, SubMsg, Msg>
where
    M: 'static,
    S: 'static,
    Msg: Send + 'static,
    SubMsg: 'static,
{
    /// Glue for a child whose effects are already parent messages
    ///
    /// Use it when the child module is generic over the message type it
    /// emits, which lets one child send messages meant for its siblings.
    /// `wrap` is the identity and effects pass through untouched.
    pub fn poly<G, St, I, U, Sb>(get: G, set: St, init: I, update: U, subscriptions: Sb) -> Self
    where
        G: Fn(&M) -> &S + Send + Sync + 'static,
        St: Fn(S, M) -> M + Send + Sync + 'static,
        I: Fn() -> (S, Cmd<Msg>) + Send + Sync + 'static,
        U: Fn(SubMsg, &S) -> (S, Cmd<Msg>) + Send + Sync + 'static,
        Sb: Fn(&S) -> Vec<Sub<Msg>> + Send + Sync + 'static,
    {
        let get: Get<M, S> = Arc::new(get);

        let update: Update<M, S, Msg, SubMsg> = {
            let get = Arc::clone(&get);
            Arc::new(move |sub_msg: SubMsg, model: &M| update(sub_msg, get(model)))
        };

        let subscriptions: Subscriptions<M, Msg> = {
            let get = Arc::clone(&get);
            Arc::new(move |model: &M| subscriptions(get(model)))
        };

        Self {
            wrap: Arc::new(|msg: Msg| msg),
            get,
            set: Arc::new(set),
            init: Arc::new(init),
            update,
            subscriptions,
        }
    }
}

impl<M, S, Msg, SubMsg, A> Glue<M, S, Msg, SubMsg, A>
where
    M: 'static,
    S: 'static,
    Msg: Send + 'static,
    SubMsg: 'static,
    A: Send + 'static,
{
    /// General glue taking every field as-is
    ///
    /// Nothing is lifted: `init`, `update` and `subscriptions` must already
    /// produce parent messages, and `update`/`subscriptions` receive the whole
    /// parent model. Reach for it when neither [`Glue::simple`] nor
    /// [`Glue::poly`] fits every field.
    pub fn new<W, G, St, I, U, Sb>(
        msg: W,
        get: G,
        set: St,
        init: I,
        update: U,
        subscriptions: Sb,
    ) -> Self
    where
        W: Fn(A) -> Msg + Send + Sync + 'static,
        G: Fn(&M) -> &S + Send + Sync + 'static,
        St: Fn(S, M) -> M + Send + Sync + 'static,
        I: Fn() -> (S, Cmd<Msg>) + Send + Sync + 'static,
        U: Fn(SubMsg, &M) -> (S, Cmd<Msg>) + Send + Sync + 'static,
        Sb: Fn(&M) -> Vec<Sub<Msg>> + Send + Sync + 'static,
    {
        Self {
            wrap: Arc::new(msg),
            get: Arc::new(get),
            set: Arc::new(set),
            init: Arc::new(init),
            update: Arc::new(update),
            subscriptions: Arc::new(subscriptions),
        }
    }

    /// Tell apart glues whose `msg` functions share a type
    ///
    /// Subscription ids are derived from the type of the wrapping function.
    /// Glues made by one factory, such as `move |m| Msg::Slot(i, m)`, all
    /// share that type, so give each one its own `key`.
    pub fn keyed<K: Hash>(self, key: K) -> Self {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let key = hasher.finish();

        let subscriptions = self.subscriptions;
        Self {
            subscriptions: Arc::new(move |model: &M| {
                subscriptions(model)
                    .into_iter()
                    .map(|sub| sub.keyed(&key))
                    .collect()
            }),
            ..self
        }
    }

    /// Initialize the child as part of building the parent model
    ///
    /// `builder` receives the child's initial model. Returning another
    /// closure from it lets several children be initialized in a row:
    ///
    /// ```rust,ignore
    /// let (model, cmd) = right.init(left.init((
    ///     |left| move |right| Model { left, right },
    ///     Cmd::none(),
    /// )));
    /// ```
    pub fn init<T, B>(&self, (builder, cmd): (B, Cmd<Msg>)) -> (T, Cmd<Msg>)
    where
        B: FnOnce(S) -> T,
    {
        let (sub_model, sub_cmd) = (self.init)();
        log::trace!(
            "init {}: {} pending + {} child effects",
            type_name::<S>(),
            cmd.len(),
            sub_cmd.len()
        );
        (builder(sub_model), cmd.and(sub_cmd))
    }

    /// Initialize the child into an already constructed parent model
    pub fn init_into(&self, (model, cmd): (M, Cmd<Msg>)) -> (M, Cmd<Msg>) {
        let (sub_model, sub_cmd) = (self.init)();
        ((self.set)(sub_model, model), cmd.and(sub_cmd))
    }

    /// Run the child's update for `sub_msg` and install the result
    ///
    /// The child's effects are appended after `cmd`. Whatever the child does
    /// with a message that does not fit its current state is up to the child.
    pub fn update(&self, sub_msg: SubMsg, (model, cmd): (M, Cmd<Msg>)) -> (M, Cmd<Msg>) {
        let (sub_model, sub_cmd) = (self.update)(sub_msg, &model);
        log::trace!(
            "update {}: {} pending + {} child effects",
            type_name::<S>(),
            cmd.len(),
            sub_cmd.len()
        );
        ((self.set)(sub_model, model), cmd.and(sub_cmd))
    }

    /// Turn the child's view into a view over the parent model
    pub fn view<V>(&self, view: V) -> impl Fn(&M) -> Element<Msg>
    where
        V: Fn(&S) -> Element<A>,
    {
        let get = Arc::clone(&self.get);
        let wrap = Arc::clone(&self.wrap);
        move |model: &M| {
            let wrap = Arc::clone(&wrap);
            view(get(model)).map(move |a| wrap(a))
        }
    }

    /// Add the child's subscriptions to the parent's
    pub fn subscriptions<F>(&self, main: F) -> impl Fn(&M) -> Vec<Sub<Msg>>
    where
        F: Fn(&M) -> Vec<Sub<Msg>>,
    {
        self.subscriptions_when(|_: &M| true, main)
    }

    /// Add the child's subscriptions only while `when` holds
    ///
    /// Handy for listening to global input only while a child is focused.
    pub fn subscriptions_when<P, F>(&self, when: P, main: F) -> impl Fn(&M) -> Vec<Sub<Msg>>
    where
        P: Fn(&M) -> bool,
        F: Fn(&M) -> Vec<Sub<Msg>>,
    {
        let subscriptions = Arc::clone(&self.subscriptions);
        move |model: &M| {
            let mut subs = main(model);
            if when(model) {
                subs.extend(subscriptions(model));
            } else {
                log::trace!("subscriptions of {} gated off", type_name::<S>());
            }
            subs
        }
    }

    /// Apply a plain state transformation to the child model
    ///
    /// No effects are produced, which suits children that expose simple
    /// `&S -> S` functions.
    pub fn update_with<F>(&self, f: F, model: M) -> M
    where
        F: FnOnce(&S) -> S,
    {
        let sub_model = f((self.get)(&model));
        (self.set)(sub_model, model)
    }

    /// Queue effects computed from the child model without changing it
    ///
    /// The effects only run once the host picks them up, so anything they
    /// change shows up on a later update cycle, never by the time this
    /// returns.
    pub fn trigger<F>(&self, f: F, (model, cmd): (M, Cmd<Msg>)) -> (M, Cmd<Msg>)
    where
        F: FnOnce(&S) -> Cmd<A>,
    {
        let sub_cmd = lift(&self.wrap, f((self.get)(&model)));
        (model, cmd.and(sub_cmd))
    }

    /// [`Glue::update_with`] and [`Glue::trigger`] in one step
    ///
    /// The same caveat as for [`Glue::trigger`] applies to the returned
    /// effects.
    pub fn update_with_trigger<F>(&self, f: F, (model, cmd): (M, Cmd<Msg>)) -> (M, Cmd<Msg>)
    where
        F: FnOnce(&S) -> (S, Cmd<A>),
    {
        let (sub_model, sub_cmd) = f((self.get)(&model));
        let sub_cmd = lift(&self.wrap, sub_cmd);
        ((self.set)(sub_model, model), cmd.and(sub_cmd))
    }
}

impl<M, S, Msg, SubMsg, A> Glue<M, S, Msg, SubMsg, A> {
    /// Wrap a value emitted by the child into a parent message
    pub fn wrap(&self, a: A) -> Msg {
        (self.wrap)(a)
    }

    /// The child model inside `model`
    pub fn get<'a>(&self, model: &'a M) -> &'a S {
        (self.get)(model)
    }

    /// `model` with its child model replaced by `sub_model`
    pub fn set(&self, sub_model: S, model: M) -> M {
        (self.set)(sub_model, model)
    }
}

impl<M, S, Msg, SubMsg, A> Clone for Glue<M, S, Msg, SubMsg, A> {
    fn clone(&self) -> Self {
        Self {
            wrap: Arc::clone(&self.wrap),
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
            init: Arc::clone(&self.init),
            update: Arc::clone(&self.update),
            subscriptions: Arc::clone(&self.subscriptions),
        }
    }
}

impl<M, S, Msg, SubMsg, A> fmt::Debug for Glue<M, S, Msg, SubMsg, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glue")
            .field("model", &type_name::<M>())
            .field("sub_model", &type_name::<S>())
            .field("msg", &type_name::<Msg>())
            .field("sub_msg", &type_name::<SubMsg>())
            .finish_non_exhaustive()
    }
}
