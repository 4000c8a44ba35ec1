//! # t18n Common
//!
//! Shared error types, logging bootstrap, and test helpers for t18n.
//!
//! This crate provides the foundational pieces used across all other crates
//! in the t18n workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use logging::{init_logging, LoggingConfig, LoggingGuard};
pub use types::*;
