//! Language registry: stable identifiers and fallback chains
//!
//! Every language code is mapped to a dense identifier in registration order.
//! Registering a hierarchical code such as `zh-Hans-CN` also registers its
//! coarser ancestors (`zh-Hans`, `zh`) and links each one to its parent, so
//! lookups can walk from a regional variant back to the base language.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Returned by [`LanguageRegistry::code`] and localized string lookups when a
/// language identifier is unknown.
pub const UNKNOWN_CODE: &str = "?";

/// Returned by localized string lookups when the whole fallback chain is empty.
pub const NO_VALUE: &str = "$no_value$";

/// Separator between the segments of a hierarchical language code.
pub const SEGMENT_SEPARATOR: char = '-';

/// Stable handle for a registered language code.
///
/// Identifiers are dense and assigned in registration order. The
/// [`LanguageId::UNKNOWN`] sentinel stands for "no language" and is the end of
/// every fallback chain.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(u32);

impl LanguageId {
    /// Sentinel for an unknown or unassigned language.
    pub const UNKNOWN: Self = Self(u32::MAX);

    /// Whether this is the [`LanguageId::UNKNOWN`] sentinel.
    pub const fn is_unknown(self) -> bool {
        self.0 == u32::MAX
    }

    /// Position of the language in the registry, `None` for the sentinel.
    pub const fn index(self) -> Option<usize> {
        if self.is_unknown() {
            None
        } else {
            Some(self.0 as usize)
        }
    }

    /// Builds an identifier from a raw position.
    ///
    /// Positions that do not fit below the sentinel map to the sentinel.
    pub fn from_index(index: usize) -> Self {
        u32::try_from(index)
            .ok()
            .filter(|&raw| raw != u32::MAX)
            .map_or(Self::UNKNOWN, Self)
    }
}

impl Default for LanguageId {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Debug for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            f.write_str("LanguageId(unknown)")
        } else {
            write!(f, "LanguageId({})", self.0)
        }
    }
}

#[derive(Debug)]
struct RegistryState {
    /// Registered codes, position = identifier
    codes: Vec<String>,
    /// Code -> identifier
    positions: HashMap<String, LanguageId>,
    /// Identifier -> fallback parent
    parents: Vec<LanguageId>,
    /// Language consulted when a localized string's chain is exhausted
    no_match: LanguageId,
}

impl RegistryState {
    fn lookup(&self, code: &str) -> LanguageId {
        self.positions
            .get(code)
            .copied()
            .unwrap_or(LanguageId::UNKNOWN)
    }

    /// Returns the identifier of `code`, appending it if it is new.
    fn get_or_insert(&mut self, code: &str) -> (LanguageId, bool) {
        let existing = self.lookup(code);
        if !existing.is_unknown() {
            return (existing, false);
        }

        let id = LanguageId::from_index(self.codes.len());
        self.codes.push(code.to_string());
        self.parents.push(LanguageId::UNKNOWN);
        self.positions.insert(code.to_string(), id);
        (id, true)
    }
}

/// Append-only table of language codes and their fallback parents.
///
/// Reads take a shared lock; only the first registration of a code takes the
/// exclusive lock. Share one registry between the container and every
/// localized string codec through an `Arc`.
#[derive(Debug)]
pub struct LanguageRegistry {
    state: RwLock<RegistryState>,
}

impl LanguageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState {
                codes: Vec::new(),
                positions: HashMap::new(),
                parents: Vec::new(),
                no_match: LanguageId::UNKNOWN,
            }),
        }
    }

    /// Create a registry with `codes` registered in order.
    pub fn with_languages<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = Self::new();
        for code in codes {
            registry.resolve_or_register(code.as_ref());
        }
        registry
    }

    /// Identifier of `code`, or [`LanguageId::UNKNOWN`] if it was never registered.
    pub fn lookup(&self, code: &str) -> LanguageId {
        self.state.read().lookup(code)
    }

    /// Identifier of `code`, registering it and its ancestors on first use.
    ///
    /// `zh-Hans-CN` registers `zh`, `zh-Hans` and `zh-Hans-CN` (whichever are
    /// missing) with parents `zh-Hans-CN -> zh-Hans -> zh`. The returned
    /// identifier is always the one of `code` itself.
    pub fn resolve_or_register(&self, code: &str) -> LanguageId {
        let existing = self.lookup(code);
        if !existing.is_unknown() {
            return existing;
        }

        let mut state = self.state.write();

        // Another writer may have registered it between the two locks.
        let existing = state.lookup(code);
        if !existing.is_unknown() {
            return existing;
        }

        let segments = hierarchy(code);
        let mut parent = LanguageId::UNKNOWN;
        for segment in segments.iter().rev() {
            let (id, added) = state.get_or_insert(segment);
            if added {
                if let Some(index) = id.index() {
                    state.parents[index] = parent;
                }
                debug!(code = %segment, id = ?id, parent = ?parent, "registered language");
            }
            parent = id;
        }

        state.lookup(code)
    }

    /// One-hop fallback parent of `id`.
    ///
    /// The sentinel and out-of-range identifiers map to the sentinel.
    pub fn parent(&self, id: LanguageId) -> LanguageId {
        let state = self.state.read();
        id.index()
            .and_then(|index| state.parents.get(index).copied())
            .unwrap_or(LanguageId::UNKNOWN)
    }

    /// Registered code of `id`, or [`UNKNOWN_CODE`].
    pub fn code(&self, id: LanguageId) -> String {
        let state = self.state.read();
        id.index()
            .and_then(|index| state.codes.get(index).cloned())
            .unwrap_or_else(|| UNKNOWN_CODE.to_string())
    }

    /// Snapshot of all registered codes in registration order.
    pub fn codes(&self) -> Vec<String> {
        self.state.read().codes.clone()
    }

    /// Number of registered languages.
    pub fn count(&self) -> usize {
        self.state.read().codes.len()
    }

    /// `id` followed by each of its ancestors, most specific first.
    ///
    /// Empty for the sentinel.
    pub fn fallback_chain(&self, id: LanguageId) -> Vec<LanguageId> {
        let state = self.state.read();
        let mut chain = Vec::new();
        let mut current = id;
        while let Some(index) = current.index() {
            if index >= state.parents.len() {
                break;
            }
            chain.push(current);
            current = state.parents[index];
        }
        chain
    }

    /// Set the language used when a localized string has no value anywhere in
    /// the requested language's chain. [`LanguageId::UNKNOWN`] disables it.
    pub fn set_no_match_language(&self, id: LanguageId) {
        self.state.write().no_match = id;
    }

    /// Language used when a localized string's fallback chain is exhausted.
    pub fn no_match_language(&self) -> LanguageId {
        self.state.read().no_match
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// `zh-Hans-CN` -> `[zh-Hans-CN, zh-Hans, zh]`
fn hierarchy(code: &str) -> Vec<&str> {
    let mut segments = vec![code];
    let mut rest = code;
    while let Some(pos) = rest.rfind(SEGMENT_SEPARATOR) {
        rest = &rest[..pos];
        segments.push(rest);
    }
    segments
}
