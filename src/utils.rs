//! Common utilities for host applications
//!
//! This module contains shared helpers a host runtime wires up at startup:
//! - Logging configuration
//! - Path management

pub mod logging;
pub mod paths;

pub use logging::{initialize_logging, LogConfig};
pub use paths::{get_config_dir, get_data_dir, version};
