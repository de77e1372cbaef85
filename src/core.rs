//! Core Elm Architecture building blocks
//!
//! This module contains the pieces a host runtime exchanges with application
//! modules, and the glue that threads them through a parent/child boundary:
//! - Commands (effect descriptors)
//! - Subscriptions (event source descriptors)
//! - Render tree elements
//! - Glue adapters

pub mod cmd;
pub mod element;
pub mod glue;
pub mod sub;
