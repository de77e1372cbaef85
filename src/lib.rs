//! # tea-glue
//!
//! Combinators for composing modules of an Elm-architecture terminal
//! application built on ratatui.
//!
//! ## Architecture Overview
//!
//! Every module follows the same shape:
//!
//! - **Model**: the module's state
//! - **Message**: events that can change the state
//! - **Init/Update**: pure functions returning a new model plus a [`Cmd`]
//! - **View**: an [`Element`] rendering the model and emitting messages
//! - **Subscriptions**: [`Sub`] descriptors for ongoing event sources
//!
//! A parent module embeds a child through a [`Glue`], which knows how to get
//! the child model out of the parent model, put it back, and turn child
//! messages into parent messages. The host runtime that executes commands,
//! drives subscriptions and draws frames is not part of this crate.
//!
//! ## Example Usage
//!
//! ```rust
//! use tea_glue::{Cmd, Glue};
//!
//! #[derive(Debug)]
//! enum Msg {
//!     Counter(i32),
//! }
//!
//! struct Model {
//!     counter: i32,
//! }
//!
//! let counter: Glue<Model, i32, Msg, i32, i32> = Glue::simple(
//!     Msg::Counter,
//!     |model: &Model| &model.counter,
//!     |counter, _| Model { counter },
//!     || (0, Cmd::none()),
//!     |step, count: &i32| (count + step, Cmd::none()),
//!     |_| vec![],
//! );
//!
//! let (model, cmd) = counter.init((|counter| Model { counter }, Cmd::none()));
//! let (model, _) = counter.update(5, (model, cmd));
//! assert_eq!(model.counter, 5);
//! ```
//!
//! ## Modules
//!
//! - [`core::cmd`] - Effect descriptors
//! - [`core::sub`] - Subscription descriptors
//! - [`core::element`] - Render tree
//! - [`core::glue`] - Parent/child glue and its orchestration operations
//! - [`utils`] - Logging and path helpers for hosts

pub mod core;
pub mod utils;

// Re-exports for convenience
pub use crate::core::cmd::{Action, Cmd};
pub use crate::core::element::Element;
pub use crate::core::glue::{laws, map, Glue};
pub use crate::core::sub::{Every, Sub, SubId, SubSource};

#[doc(hidden)]
pub use tracing;

/// Result type used by the host-facing helpers
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
