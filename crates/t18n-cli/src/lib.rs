//! # T18n CLI
//!
//! Command line front end that loads a translation container from resource
//! directories and prints lookups or JSON exports.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod args;
pub mod error;

pub use app::*;
pub use args::*;
pub use error::*;
