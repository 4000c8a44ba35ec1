//! Resource file content parsing

use crate::error::ContentError;
use serde::Serialize;

/// Separator between a value and its hint on a resource line.
pub const HINT_SEPARATOR: &str = "//";

/// One translated resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Resource key, unique within a translation set
    pub key: String,
    /// Text shown to the user
    pub value: String,
    /// Guidance for translators, empty when absent
    pub hint: String,
}

impl Item {
    /// Create an item without a hint
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            hint: String::new(),
        }
    }

    /// Set the hint
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }
}

/// Turns raw resource file bytes into ordered items.
pub trait ContentParser: Send + Sync {
    /// Parse `data`, keeping the order in which items appear.
    fn parse(&self, data: &[u8]) -> Result<Vec<Item>, ContentError>;
}

/// Parser for the line-oriented `key = value // hint` format.
///
/// Blank lines, lines starting with `#` and lines without `=` are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParser;

impl DefaultParser {
    fn parse_line(line: &str) -> Option<Item> {
        let (key, rest) = line.split_once('=')?;
        let rest = rest.trim();

        let (value, hint) = match rest.split_once(HINT_SEPARATOR) {
            Some((value, hint)) => (value.trim(), hint.trim()),
            None => (rest, ""),
        };

        Some(Item {
            key: key.trim().to_string(),
            value: value.to_string(),
            hint: hint.to_string(),
        })
    }
}

impl ContentParser for DefaultParser {
    fn parse(&self, data: &[u8]) -> Result<Vec<Item>, ContentError> {
        let text = std::str::from_utf8(data).map_err(|e| {
            let line = data[..e.valid_up_to()]
                .iter()
                .filter(|&&b| b == b'\n')
                .count()
                + 1;
            ContentError::new(line, "invalid UTF-8")
        })?;

        Ok(text
            .lines()
            .map(str::trim_start)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(Self::parse_line)
            .collect())
    }
}
