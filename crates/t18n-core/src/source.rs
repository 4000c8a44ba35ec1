//! Resource file sources
//!
//! A source enumerates resource file locators and reads their bytes. File
//! names follow `<language-code>[.<namespace>].<extension>`, for example
//! `en.t18n`, `en-GB.t18n` or `en-US.customer1.t18n`.

use crate::error::{I18nError, I18nResult};
use crate::language::{LanguageId, LanguageRegistry};
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Where resource files come from.
pub trait FileSource: Send + Sync {
    /// Locators of every file the container should load.
    fn registered_files(&self) -> I18nResult<Vec<String>>;

    /// Display name of a locator, the last path segment by default.
    fn extract_file_name(&self, locator: &str) -> String {
        Path::new(locator)
            .file_name()
            .map_or_else(|| locator.to_string(), |name| name.to_string_lossy().into_owned())
    }

    /// Language and namespace encoded in a display name.
    fn parse_file_name(&self, registry: &LanguageRegistry, name: &str) -> (LanguageId, String) {
        parse_file_name(registry, name)
    }

    /// Raw content of a locator.
    fn read_file(&self, locator: &str) -> I18nResult<Vec<u8>>;
}

/// Splits `<code>[.<namespace>].<ext>` and registers `<code>`.
///
/// `en.t18n` gives `(en, "")`, `en.grid.t18n` gives `(en, "grid")` and
/// `en.a.b.t18n` gives `(en, "a.b")`. A name without any `.` gives
/// `(UNKNOWN, "")`. The code is registered as written, so `.t18n` registers
/// the empty code.
pub fn parse_file_name(registry: &LanguageRegistry, name: &str) -> (LanguageId, String) {
    let (Some(first), Some(last)) = (name.find('.'), name.rfind('.')) else {
        return (LanguageId::UNKNOWN, String::new());
    };

    let code = &name[..first];
    let namespace = if first == last {
        ""
    } else {
        &name[first + 1..last]
    };

    (registry.resolve_or_register(code), namespace.to_string())
}

/// Files on the local file system, registered by directory and mask.
#[derive(Debug, Clone, Default)]
pub struct LocalFileSource {
    names: Vec<String>,
}

impl LocalFileSource {
    /// Create a source with no registered files
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source from explicit file paths.
    pub fn with_files<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Register the regular files of each directory whose name matches `mask`.
    ///
    /// The mask supports `*` and `?`; an empty mask or `*` matches every
    /// file. Subdirectories are not descended into. Files are registered in
    /// name order per directory.
    pub fn register_files<P: AsRef<Path>>(&mut self, mask: &str, dirs: &[P]) -> I18nResult<()> {
        let matcher = mask_to_regex(mask)?;

        for dir in dirs {
            let dir = dir.as_ref();
            let unavailable = |source: io::Error| I18nError::SourceUnavailable {
                locator: dir.display().to_string(),
                source,
            };

            let mut found = Vec::new();
            for entry in fs::read_dir(dir).map_err(unavailable)? {
                let entry = entry.map_err(unavailable)?;
                if !entry.file_type().map_err(unavailable)?.is_file() {
                    continue;
                }

                let name = entry.file_name().to_string_lossy().into_owned();
                if matcher.as_ref().map_or(true, |re| re.is_match(&name)) {
                    found.push(entry.path().to_string_lossy().into_owned());
                }
            }
            found.sort();

            debug!(directory = %dir.display(), mask, count = found.len(), "registered resource files");
            self.names.extend(found);
        }

        Ok(())
    }
}

impl FileSource for LocalFileSource {
    fn registered_files(&self) -> I18nResult<Vec<String>> {
        Ok(self.names.clone())
    }

    fn read_file(&self, locator: &str) -> I18nResult<Vec<u8>> {
        fs::read(locator).map_err(|source| I18nError::SourceUnavailable {
            locator: locator.to_string(),
            source,
        })
    }
}

/// `None` means "match everything".
fn mask_to_regex(mask: &str) -> I18nResult<Option<Regex>> {
    if mask.is_empty() || mask == "*" {
        return Ok(None);
    }

    let mut pattern = String::with_capacity(mask.len() + 8);
    pattern.push('^');
    for ch in mask.chars() {
        match ch {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            other => pattern.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    pattern.push('$');

    Ok(Some(Regex::new(&pattern)?))
}

/// Resource files compiled into the binary, e.g. with `include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedFileSource {
    files: Vec<(String, Vec<u8>)>,
}

impl EmbeddedFileSource {
    /// Create a source from a static `(name, content)` table.
    pub fn new(files: &[(&str, &[u8])]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(name, content)| ((*name).to_string(), content.to_vec()))
                .collect(),
        }
    }

    /// Add one file.
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files.push((name.into(), content.into()));
        self
    }
}

impl FileSource for EmbeddedFileSource {
    fn registered_files(&self) -> I18nResult<Vec<String>> {
        Ok(self.files.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read_file(&self, locator: &str) -> I18nResult<Vec<u8>> {
        self.files
            .iter()
            .find(|(name, _)| name == locator)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| I18nError::SourceUnavailable {
                locator: locator.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no embedded file with this name"),
            })
    }
}
