//! Translation container: resource files grouped by language and namespace

use crate::error::{I18nError, I18nResult};
use crate::language::{LanguageId, LanguageRegistry};
use crate::parser::{ContentParser, DefaultParser, Item};
use crate::request::TranslationRequest;
use crate::source::{FileSource, LocalFileSource};
use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Returned by [`MissingStrategy::ReturnNotFoundVariable`] lookups.
pub const NOT_FOUND_MARKER: &str = "\u{2638}";

/// What a lookup returns when no language in the chain has the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingStrategy {
    /// Echo the key, without brackets
    #[default]
    ReturnResourceCode,
    /// Return [`NOT_FOUND_MARKER`]
    ReturnNotFoundVariable,
    /// Return an empty string
    ReturnEmptyString,
}

/// Ordered items plus a key index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationSet {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl TranslationSet {
    /// Replace items with known keys in place, append the rest.
    pub fn merge(&mut self, items: impl IntoIterator<Item = Item>) {
        for item in items {
            if let Some(&position) = self.index.get(&item.key) {
                self.items[position] = item;
            } else {
                self.index.insert(item.key.clone(), self.items.len());
                self.items.push(item);
            }
        }
    }

    /// Item stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Item> {
        self.index.get(key).map(|&position| &self.items[position])
    }

    /// Items in load order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for TranslationSet {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        let mut set = Self::default();
        set.merge(iter);
        set
    }
}

/// A registered resource file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Language parsed from the file name
    pub language: LanguageId,
    /// Namespace parsed from the file name, empty for the default one
    pub namespace: String,
    /// File name without directories
    pub name: String,
    /// Full locator passed back to the source
    pub locator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SetKey {
    language: LanguageId,
    namespace: String,
}

#[derive(Clone)]
struct ContainerConfig {
    primary_language: LanguageId,
    strategy: MissingStrategy,
    namespace_priority: HashMap<String, usize>,
    brackets: String,
    source: Arc<dyn FileSource>,
    parser: Arc<dyn ContentParser>,
}

impl ContainerConfig {
    fn priority(&self, namespace: &str) -> usize {
        self.namespace_priority.get(namespace).copied().unwrap_or(0)
    }
}

impl fmt::Debug for ContainerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerConfig")
            .field("primary_language", &self.primary_language)
            .field("strategy", &self.strategy)
            .field("namespace_priority", &self.namespace_priority)
            .field("brackets", &self.brackets)
            .finish_non_exhaustive()
    }
}

/// Configures and loads a [`TranslationContainer`].
#[derive(Debug)]
pub struct ContainerBuilder {
    registry: Arc<LanguageRegistry>,
    config: ContainerConfig,
}

impl ContainerBuilder {
    /// Language consulted when the requested language lacks a key.
    #[must_use]
    pub fn primary_language(mut self, id: LanguageId) -> Self {
        self.config.primary_language = id;
        self
    }

    /// Namespace suffixes in load order; later ones load on top of earlier ones.
    ///
    /// Files without a namespace always load first. Repeated suffixes keep
    /// their first position.
    #[must_use]
    pub fn file_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for suffix in suffixes {
            let suffix = suffix.into();
            if !self.config.namespace_priority.contains_key(&suffix) {
                let priority = self.config.namespace_priority.len();
                self.config.namespace_priority.insert(suffix, priority);
            }
        }
        self
    }

    /// Symbol wrapped around keys by clients, e.g. `%` for `%Save%`.
    #[must_use]
    pub fn brackets(mut self, symbol: impl Into<String>) -> Self {
        self.config.brackets = symbol.into();
        self
    }

    /// Behavior for keys missing in every fallback language.
    #[must_use]
    pub fn strategy(mut self, strategy: MissingStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Where resource files are read from.
    #[must_use]
    pub fn source(mut self, source: impl FileSource + 'static) -> Self {
        self.config.source = Arc::new(source);
        self
    }

    /// How resource file content is parsed.
    #[must_use]
    pub fn parser(mut self, parser: impl ContentParser + 'static) -> Self {
        self.config.parser = Arc::new(parser);
        self
    }

    /// Read, parse and merge every registered file.
    ///
    /// Any source or parse failure aborts the whole load.
    pub fn load(self) -> I18nResult<TranslationContainer> {
        TranslationContainer::load_with(self.registry, self.config)
    }
}

/// Every translated item, keyed by language and namespace.
///
/// Immutable once loaded; use [`TranslationContainer::reload`] together with
/// a [`ContainerHandle`] to replace it.
#[derive(Debug)]
pub struct TranslationContainer {
    registry: Arc<LanguageRegistry>,
    config: ContainerConfig,
    files: Vec<FileDescriptor>,
    translations: HashMap<SetKey, TranslationSet>,
}

impl TranslationContainer {
    /// Start configuring a container that registers languages in `registry`.
    pub fn builder(registry: Arc<LanguageRegistry>) -> ContainerBuilder {
        ContainerBuilder {
            registry,
            config: ContainerConfig {
                primary_language: LanguageId::UNKNOWN,
                strategy: MissingStrategy::default(),
                namespace_priority: HashMap::from([(String::new(), 0)]),
                brackets: String::new(),
                source: Arc::new(LocalFileSource::new()),
                parser: Arc::new(DefaultParser),
            },
        }
    }

    fn load_with(registry: Arc<LanguageRegistry>, config: ContainerConfig) -> I18nResult<Self> {
        let files = Self::register_files(&registry, &config)?;

        let mut translations: HashMap<SetKey, TranslationSet> = HashMap::new();
        for file in &files {
            let data = config.source.read_file(&file.locator)?;
            let items = config
                .parser
                .parse(&data)
                .map_err(|source| I18nError::ParseError {
                    locator: file.locator.clone(),
                    source,
                })?;

            debug!(
                file = %file.name,
                language = %registry.code(file.language),
                namespace = %file.namespace,
                items = items.len(),
                "loaded resource file"
            );

            translations
                .entry(SetKey {
                    language: file.language,
                    namespace: file.namespace.clone(),
                })
                .or_default()
                .merge(items);
        }

        info!(
            files = files.len(),
            sets = translations.len(),
            "translation container loaded"
        );

        Ok(Self {
            registry,
            config,
            files,
            translations,
        })
    }

    /// Files ordered by language, then namespace priority.
    fn register_files(
        registry: &LanguageRegistry,
        config: &ContainerConfig,
    ) -> I18nResult<Vec<FileDescriptor>> {
        let mut files = Vec::new();
        for locator in config.source.registered_files()? {
            let name = config.source.extract_file_name(&locator);
            let (language, namespace) = config.source.parse_file_name(registry, &name);
            if language.is_unknown() {
                warn!(file = %locator, "resource file name has no language code");
            }
            files.push(FileDescriptor {
                language,
                namespace,
                name,
                locator,
            });
        }

        files.sort_by(|a, b| {
            a.language
                .cmp(&b.language)
                .then_with(|| config.priority(&a.namespace).cmp(&config.priority(&b.namespace)))
        });

        Ok(files)
    }

    /// Run the full load again with the same configuration.
    ///
    /// The current container is left untouched, so readers keep a consistent
    /// view until the new one is published.
    pub fn reload(&self) -> I18nResult<Self> {
        Self::load_with(Arc::clone(&self.registry), self.config.clone())
    }

    /// Request translations in `language` and the default namespace.
    pub fn lang(&self, language: LanguageId) -> TranslationRequest<'_> {
        TranslationRequest::new(self, language, String::new())
    }

    /// Request translations in `language` and `namespace`.
    pub fn namespace(&self, namespace: impl Into<String>, language: LanguageId) -> TranslationRequest<'_> {
        TranslationRequest::new(self, language, namespace.into())
    }

    /// The registry languages are resolved against.
    pub fn registry(&self) -> &Arc<LanguageRegistry> {
        &self.registry
    }

    /// Configured primary language, possibly [`LanguageId::UNKNOWN`].
    pub fn primary_language(&self) -> LanguageId {
        self.config.primary_language
    }

    /// Configured missing-key strategy.
    pub fn strategy(&self) -> MissingStrategy {
        self.config.strategy
    }

    /// Configured bracket symbol, empty when keys are not wrapped.
    pub fn brackets(&self) -> &str {
        &self.config.brackets
    }

    /// Files in the order they were loaded.
    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    /// Translation set for `language` and `namespace`.
    pub fn set(&self, language: LanguageId, namespace: &str) -> Option<&TranslationSet> {
        self.translations.get(&SetKey {
            language,
            namespace: namespace.to_string(),
        })
    }

    /// Whether any file was loaded for `language` and `namespace`.
    pub fn has_set(&self, language: LanguageId, namespace: &str) -> bool {
        self.set(language, namespace).is_some()
    }

    /// Number of (language, namespace) sets.
    pub fn set_count(&self) -> usize {
        self.translations.len()
    }

    /// Languages with at least one set, ascending.
    pub fn languages(&self) -> Vec<LanguageId> {
        let mut languages: Vec<LanguageId> =
            self.translations.keys().map(|key| key.language).collect();
        languages.sort_unstable();
        languages.dedup();
        languages
    }

    /// `key` with one layer of brackets removed, if both ends carry them.
    pub(crate) fn strip_brackets<'k>(&self, key: &'k str) -> &'k str {
        let symbol = self.config.brackets.as_str();
        if symbol.is_empty() {
            return key;
        }
        key.strip_prefix(symbol)
            .and_then(|rest| rest.strip_suffix(symbol))
            .filter(|inner| !inner.is_empty())
            .unwrap_or(key)
    }

    /// `key` wrapped in the bracket symbol.
    pub(crate) fn wrap_key(&self, key: &str) -> String {
        let symbol = self.config.brackets.as_str();
        format!("{symbol}{key}{symbol}")
    }
}

/// Publishes containers to concurrent readers.
///
/// Readers take a snapshot with [`ContainerHandle::load`]; a reload builds a
/// complete replacement and swaps it in atomically.
#[derive(Debug)]
pub struct ContainerHandle {
    current: ArcSwap<TranslationContainer>,
}

impl ContainerHandle {
    /// Create a handle publishing `container`.
    pub fn new(container: TranslationContainer) -> Self {
        Self {
            current: ArcSwap::from_pointee(container),
        }
    }

    /// Current container.
    pub fn load(&self) -> Arc<TranslationContainer> {
        self.current.load_full()
    }

    /// Replace the published container.
    pub fn publish(&self, container: TranslationContainer) {
        self.current.store(Arc::new(container));
    }

    /// Reload from the current container's sources and publish the result.
    ///
    /// On failure the current container stays published.
    pub fn reload(&self) -> I18nResult<()> {
        let next = self.current.load().reload()?;
        self.publish(next);
        info!("translation container republished");
        Ok(())
    }
}
