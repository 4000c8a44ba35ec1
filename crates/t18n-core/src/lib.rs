//! # T18n Core
//!
//! Language hierarchy registry, multi-language strings and file based
//! translation containers.
//!
//! Languages are identified by dense [`LanguageId`]s handed out by a
//! [`LanguageRegistry`]. Registering `en-US` also registers `en` and records
//! it as the fallback parent, so every lookup can walk from the most specific
//! language to its root.
//!
//! ```no_run
//! use std::sync::Arc;
//! use t18n_core::{LanguageRegistry, LocalFileSource, TranslationContainer};
//!
//! # fn main() -> Result<(), t18n_core::I18nError> {
//! let registry = Arc::new(LanguageRegistry::with_languages(["en"]));
//! let mut source = LocalFileSource::new();
//! source.register_files("*.t18n", &["locales"])?;
//!
//! let container = TranslationContainer::builder(Arc::clone(&registry))
//!     .primary_language(registry.lookup("en"))
//!     .brackets("%")
//!     .source(source)
//!     .load()?;
//!
//! let gb = registry.resolve_or_register("en-GB");
//! println!("{}", container.lang(gb).value("%Lift%"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod container;
pub mod error;
pub mod language;
pub mod localized;
pub mod parser;
pub mod request;
pub mod source;

pub use container::{
    ContainerBuilder, ContainerHandle, FileDescriptor, MissingStrategy, TranslationContainer,
    TranslationSet, NOT_FOUND_MARKER,
};
pub use error::{ContentError, I18nError, I18nResult};
pub use language::{LanguageId, LanguageRegistry, NO_VALUE, UNKNOWN_CODE};
pub use localized::{LocalizedString, LocalizedStringView, StringValidator};
pub use parser::{ContentParser, DefaultParser, Item, HINT_SEPARATOR};
pub use request::{ResponseItem, TranslationRequest};
pub use source::{parse_file_name, EmbeddedFileSource, FileSource, LocalFileSource};
