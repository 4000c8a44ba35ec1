//! Translation requests: key resolution with language fallback

use crate::container::{MissingStrategy, TranslationContainer, NOT_FOUND_MARKER};
use crate::error::{I18nError, I18nResult};
use crate::language::LanguageId;
use crate::parser::Item;
use serde::Serialize;
use std::collections::BTreeMap;

/// One entry of a [`TranslationRequest::json`] export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResponseItem<'a> {
    /// Translated text
    #[serde(rename = "v")]
    pub value: &'a str,
    /// Translator hint, omitted when empty
    #[serde(rename = "h", skip_serializing_if = "str::is_empty")]
    pub hint: &'a str,
}

impl<'a> From<&'a Item> for ResponseItem<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            value: &item.value,
            hint: &item.hint,
        }
    }
}

/// Lookups in one language and namespace of a container.
///
/// Requests are cheap values; [`with_namespace`](Self::with_namespace)
/// returns a new request instead of changing this one.
#[derive(Debug, Clone)]
pub struct TranslationRequest<'c> {
    container: &'c TranslationContainer,
    language: LanguageId,
    namespace: String,
}

impl<'c> TranslationRequest<'c> {
    pub(crate) const fn new(
        container: &'c TranslationContainer,
        language: LanguageId,
        namespace: String,
    ) -> Self {
        Self {
            container,
            language,
            namespace,
        }
    }

    /// Same language, different namespace.
    #[must_use]
    pub fn with_namespace(&self, namespace: impl Into<String>) -> Self {
        Self {
            container: self.container,
            language: self.language,
            namespace: namespace.into(),
        }
    }

    /// Requested language.
    pub const fn language(&self) -> LanguageId {
        self.language
    }

    /// Requested namespace, empty for the default one.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Item for `key` in the requested language or the primary language.
    ///
    /// Does not walk the requested language's parents; see
    /// [`value`](Self::value) for that.
    pub fn resolve(&self, key: &str) -> Option<&'c Item> {
        self.find(self.language, self.container.strip_brackets(key))
    }

    /// Translated text for `key`.
    ///
    /// Tries the requested language and each of its ancestors, every step
    /// also consulting the primary language. When nothing matches, the
    /// container's [`MissingStrategy`] decides the result.
    pub fn value<'k>(&self, key: &'k str) -> &'k str
    where
        'c: 'k,
    {
        let key = self.container.strip_brackets(key);
        match self.walk(key) {
            Some(item) => &item.value,
            None => match self.container.strategy() {
                MissingStrategy::ReturnResourceCode => key,
                MissingStrategy::ReturnEmptyString => "",
                MissingStrategy::ReturnNotFoundVariable => NOT_FOUND_MARKER,
            },
        }
    }

    /// Translator hint for `key`, empty when there is none.
    pub fn hint(&self, key: &str) -> &'c str {
        self.walk(self.container.strip_brackets(key))
            .map_or("", |item| item.hint.as_str())
    }

    /// Text for `key` from the requested or primary language, else `default`.
    pub fn value_with_default<'k>(&self, key: &str, default: &'k str) -> &'k str
    where
        'c: 'k,
    {
        self.resolve(key).map_or(default, |item| item.value.as_str())
    }

    /// Every item of the requested language, completed with primary language
    /// items for missing keys, keyed by the bracketed key.
    pub fn json_map(&self) -> I18nResult<BTreeMap<String, ResponseItem<'c>>> {
        let primary = self.container.primary_language();
        let own = self.container.set(self.language, &self.namespace);
        let fallback = if primary.is_unknown() || primary == self.language {
            None
        } else {
            self.container.set(primary, &self.namespace)
        };

        if own.is_none() && fallback.is_none() {
            return Err(I18nError::NoTranslationFound {
                language: self.container.registry().code(self.language),
                namespace: self.namespace.clone(),
            });
        }

        let mut out = BTreeMap::new();
        for item in own.into_iter().flat_map(|set| set.items()) {
            out.insert(self.container.wrap_key(&item.key), ResponseItem::from(item));
        }
        for item in fallback.into_iter().flat_map(|set| set.items()) {
            out.entry(self.container.wrap_key(&item.key))
                .or_insert_with(|| ResponseItem::from(item));
        }

        Ok(out)
    }

    /// [`json_map`](Self::json_map) serialized as a JSON object.
    pub fn json(&self) -> I18nResult<Vec<u8>> {
        serde_json::to_vec(&self.json_map()?).map_err(I18nError::Serialization)
    }

    /// Look `key` up in `language`, then in the primary language.
    fn find(&self, language: LanguageId, key: &str) -> Option<&'c Item> {
        let container = self.container;
        if let Some(item) = container
            .set(language, &self.namespace)
            .and_then(|set| set.get(key))
        {
            return Some(item);
        }

        let primary = container.primary_language();
        if primary.is_unknown() {
            return None;
        }
        container
            .set(primary, &self.namespace)
            .and_then(|set| set.get(key))
    }

    /// [`find`](Self::find) for the requested language and each ancestor.
    fn walk(&self, key: &str) -> Option<&'c Item> {
        let registry = self.container.registry();
        let mut language = self.language;
        loop {
            if let Some(item) = self.find(language, key) {
                return Some(item);
            }
            language = registry.parent(language);
            if language.is_unknown() {
                return None;
            }
        }
    }
}
