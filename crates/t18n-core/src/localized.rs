//! Localized strings: one text per language, stored as a JSON object
//!
//! The persisted form is `{"en":"Name","cs":"Jméno","sr":"Име"}`. In memory
//! the values live in a sparse vector indexed by [`LanguageId`], so a lookup
//! is a slot read plus, at worst, a walk up the language's fallback chain.

use crate::error::{I18nError, I18nResult};
use crate::language::{LanguageId, LanguageRegistry, NO_VALUE, UNKNOWN_CODE};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

/// Text values of one logical message, one slot per language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedString {
    slots: Vec<Option<String>>,
}

impl LocalizedString {
    /// Create a localized string without any values
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a JSON object of `code -> text` pairs.
    ///
    /// Codes the registry has not seen yet are registered on the fly. `null`
    /// decodes to an empty localized string. Nothing is registered when the
    /// payload is rejected.
    pub fn decode(registry: &LanguageRegistry, bytes: &[u8]) -> I18nResult<Self> {
        let pairs: Option<OrderedPairs> =
            serde_json::from_slice(bytes).map_err(I18nError::MalformedPayload)?;

        let mut value = Self {
            slots: vec![None; registry.count()],
        };

        for (code, text) in pairs.map(|p| p.0).unwrap_or_default() {
            let id = registry.resolve_or_register(&code);
            value.set(id, text);
        }

        Ok(value)
    }

    /// Encodes the present values as a JSON object in ascending identifier order.
    ///
    /// A string without slots encodes as `null`.
    pub fn encode(&self, registry: &LanguageRegistry) -> Vec<u8> {
        if self.slots.is_empty() {
            return b"null".to_vec();
        }

        let mut out = String::from("{");
        for (id, text) in self.present() {
            if out.len() > 1 {
                out.push(',');
            }
            out.push_str(&serde_json::Value::from(registry.code(id)).to_string());
            out.push(':');
            out.push_str(&serde_json::Value::from(text).to_string());
        }
        out.push('}');
        out.into_bytes()
    }

    /// Serde view that writes the same object as [`encode`](Self::encode).
    pub const fn serialize_with<'a>(
        &'a self,
        registry: &'a LanguageRegistry,
    ) -> LocalizedStringView<'a> {
        LocalizedStringView {
            value: self,
            registry,
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with_value(mut self, id: LanguageId, text: impl Into<String>) -> Self {
        self.set(id, text);
        self
    }

    /// Stores `text` for `id`, growing the slot vector as needed.
    ///
    /// The sentinel identifier is ignored.
    pub fn set(&mut self, id: LanguageId, text: impl Into<String>) {
        let Some(index) = id.index() else {
            return;
        };
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(text.into());
    }

    /// Value stored exactly at `id`, without any fallback.
    pub fn get(&self, id: LanguageId) -> Option<&str> {
        id.index()
            .and_then(|index| self.slots.get(index))
            .and_then(Option::as_deref)
    }

    /// Number of slots, including empty ones.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Text for `id`, walking the fallback chain.
    ///
    /// Returns [`UNKNOWN_CODE`] for the sentinel, for a string without slots
    /// and for identifiers whose whole chain lies beyond the slots. Returns
    /// [`NO_VALUE`] when every slot of the chain is empty and the registry has
    /// no usable no-match language.
    pub fn value_for<'a>(&'a self, registry: &LanguageRegistry, id: LanguageId) -> Cow<'a, str> {
        self.resolve(registry, id, None::<fn() -> String>)
    }

    /// Like [`value_for`](Self::value_for), but calls `default` instead of
    /// consulting the no-match language once the chain is exhausted.
    pub fn value_for_or_else<'a, F>(
        &'a self,
        registry: &LanguageRegistry,
        id: LanguageId,
        default: F,
    ) -> Cow<'a, str>
    where
        F: FnOnce() -> String,
    {
        self.resolve(registry, id, Some(default))
    }

    fn resolve<'a, F>(
        &'a self,
        registry: &LanguageRegistry,
        id: LanguageId,
        mut default: Option<F>,
    ) -> Cow<'a, str>
    where
        F: FnOnce() -> String,
    {
        if self.slots.is_empty() || id.is_unknown() {
            return Cow::Borrowed(UNKNOWN_CODE);
        }

        // Phase one: the identifier is newer than this value, climb until a
        // slot exists. The no-match language gets the same treatment.
        let mut current = self.climb_into_slots(registry, id);
        let no_match = self.climb_into_slots(registry, registry.no_match_language());
        let no_match_in_bounds = !no_match.is_unknown();

        if current.is_unknown() {
            if !no_match_in_bounds {
                return Cow::Borrowed(UNKNOWN_CODE);
            }
            current = no_match;
        }

        // Phase two: the slot exists but may be empty, climb until a value.
        let mut no_match_tried = current == no_match;
        loop {
            if let Some(text) = self.get(current) {
                return Cow::Borrowed(text);
            }

            current = registry.parent(current);
            if !current.is_unknown() {
                continue;
            }

            if let Some(default) = default.take() {
                return Cow::Owned(default());
            }

            if no_match_in_bounds && !no_match_tried {
                no_match_tried = true;
                current = no_match;
                continue;
            }

            return Cow::Borrowed(NO_VALUE);
        }
    }

    /// First of `id` and its ancestors that has a slot, or the sentinel.
    fn climb_into_slots(&self, registry: &LanguageRegistry, id: LanguageId) -> LanguageId {
        let mut current = id;
        while current.index().is_some_and(|index| index >= self.slots.len()) {
            current = registry.parent(current);
        }
        current
    }

    fn present(&self) -> impl Iterator<Item = (LanguageId, &str)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_deref()
                .map(|text| (LanguageId::from_index(index), text))
        })
    }
}

/// Serializes a [`LocalizedString`] as `{"code": "text", ...}`.
#[derive(Debug, Clone, Copy)]
pub struct LocalizedStringView<'a> {
    value: &'a LocalizedString,
    registry: &'a LanguageRegistry,
}

impl Serialize for LocalizedStringView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.value.is_empty() {
            return serializer.serialize_none();
        }

        let mut map = serializer.serialize_map(None)?;
        for (id, text) in self.value.present() {
            map.serialize_entry(&self.registry.code(id), text)?;
        }
        map.end()
    }
}

/// JSON object entries in document order.
struct OrderedPairs(Vec<(String, String)>);

struct PairsVisitor;

impl<'de> Visitor<'de> for PairsVisitor {
    type Value = OrderedPairs;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object of language codes to strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((code, text)) = access.next_entry::<String, String>()? {
            pairs.push((code, text));
        }
        Ok(OrderedPairs(pairs))
    }
}

impl<'de> Deserialize<'de> for OrderedPairs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PairsVisitor)
    }
}

/// Checks payloads against the languages registered when it was created.
///
/// Unlike [`LocalizedString::decode`] it never registers anything, so it can
/// reject payloads that mention undeclared languages.
#[derive(Debug, Clone)]
pub struct StringValidator {
    codes: HashSet<String>,
}

impl StringValidator {
    /// Snapshot the registry's current codes.
    pub fn new(registry: &LanguageRegistry) -> Self {
        Self {
            codes: registry.codes().into_iter().collect(),
        }
    }

    /// Whether `bytes` is a JSON object whose keys are known codes and whose
    /// values are all strings. `null` is accepted.
    pub fn is_valid(&self, bytes: &[u8]) -> bool {
        let Ok(parsed) =
            serde_json::from_slice::<Option<serde_json::Map<String, serde_json::Value>>>(bytes)
        else {
            return false;
        };

        parsed.unwrap_or_default().iter().all(|(code, value)| {
            self.codes.contains(code) && value.is_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(codes: &[&str]) -> LanguageRegistry {
        LanguageRegistry::with_languages(codes)
    }

    #[test]
    fn test_decode_and_lookup() {
        let registry = registry_with(&["en", "fr", "es"]);
        let en = registry.lookup("en");
        let fr = registry.lookup("fr");
        let es = registry.lookup("es");

        let value =
            LocalizedString::decode(&registry, br#"{"en":"Hello","fr":"Bonjour"}"#).unwrap();

        assert_eq!(value.value_for(&registry, en), "Hello");
        assert_eq!(value.value_for(&registry, fr), "Bonjour");
        assert_eq!(
            value.value_for_or_else(&registry, es, || "Hola".to_string()),
            "Hola"
        );
        assert_eq!(value.value_for(&registry, es), NO_VALUE);
    }

    #[test]
    fn test_unknown_identifiers_yield_unknown_code() {
        let registry = registry_with(&["en", "fr", "es"]);
        let value =
            LocalizedString::decode(&registry, br#"{"en":"Hello","fr":"Bonjour"}"#).unwrap();

        assert_eq!(value.value_for(&registry, LanguageId::UNKNOWN), UNKNOWN_CODE);
        assert_eq!(
            value.value_for(&registry, LanguageId::from_index(100)),
            UNKNOWN_CODE
        );
        assert_eq!(
            value.value_for_or_else(&registry, LanguageId::from_index(100), || "Hi".into()),
            UNKNOWN_CODE
        );
        assert_eq!(
            LocalizedString::new().value_for(&registry, registry.lookup("en")),
            UNKNOWN_CODE
        );
    }

    #[test]
    fn test_newer_language_falls_back_to_parent() {
        let registry = registry_with(&["en", "fr", "es"]);
        let value =
            LocalizedString::decode(&registry, br#"{"en":"Hello","fr":"Bonjour"}"#).unwrap();

        // Registered after decoding, so beyond the slot vector.
        let en_us = registry.resolve_or_register("en-US");
        assert!(en_us.index().unwrap() >= value.len());
        assert_eq!(value.value_for(&registry, en_us), "Hello");
    }

    #[test]
    fn test_empty_slot_falls_back_to_parent() {
        let registry = registry_with(&["en", "en-GB", "de"]);
        let gb = registry.lookup("en-GB");

        // In bounds but empty.
        let value = LocalizedString::decode(&registry, br#"{"en":"Colour","de":"Farbe"}"#).unwrap();
        assert!(gb.index().unwrap() < value.len());
        assert_eq!(value.value_for(&registry, gb), "Colour");
    }

    #[test]
    fn test_short_and_empty_slot_resolve_identically() {
        let registry = registry_with(&["en"]);
        let short = LocalizedString::decode(&registry, br#"{"en":"Hello"}"#).unwrap();

        let gb = registry.resolve_or_register("en-GB");
        let padded = LocalizedString::decode(&registry, br#"{"en":"Hello"}"#).unwrap();

        assert!(gb.index().unwrap() >= short.len());
        assert!(gb.index().unwrap() < padded.len());
        assert_eq!(short.value_for(&registry, gb), padded.value_for(&registry, gb));
    }

    #[test]
    fn test_explicit_empty_string_is_a_value() {
        let registry = registry_with(&["en", "en-GB"]);
        let value = LocalizedString::decode(&registry, br#"{"en":"Hello","en-GB":""}"#).unwrap();
        assert_eq!(value.value_for(&registry, registry.lookup("en-GB")), "");
    }

    #[test]
    fn test_no_match_language() {
        let registry = registry_with(&["en", "fr", "es"]);
        let en = registry.lookup("en");
        let es = registry.lookup("es");
        let value = LocalizedString::decode(&registry, br#"{"en":"Hello","fr":"Bonjour"}"#).unwrap();

        registry.set_no_match_language(en);
        assert_eq!(value.value_for(&registry, es), "Hello");
        // A caller supplied default wins over the registry wide language.
        assert_eq!(
            value.value_for_or_else(&registry, es, || "Hola".into()),
            "Hola"
        );
        assert_eq!(
            value.value_for(&registry, LanguageId::from_index(100)),
            "Hello"
        );
    }

    #[test]
    fn test_newer_no_match_language_falls_back_to_parent() {
        let registry = registry_with(&["en", "fr"]);
        let value = LocalizedString::decode(&registry, br#"{"en":"Hello"}"#).unwrap();

        // Registered after decoding, so the no-match language itself has no slot.
        let gb = registry.resolve_or_register("en-GB");
        assert!(gb.index().unwrap() >= value.len());
        registry.set_no_match_language(gb);

        assert_eq!(value.value_for(&registry, registry.lookup("fr")), "Hello");
        assert_eq!(value.value_for(&registry, LanguageId::from_index(100)), "Hello");
    }

    #[test]
    fn test_empty_no_match_language_terminates() {
        let registry = registry_with(&["en", "fr", "es"]);
        registry.set_no_match_language(registry.lookup("es"));
        let value = LocalizedString::decode(&registry, br#"{"fr":"Bonjour"}"#).unwrap();
        assert_eq!(value.value_for(&registry, registry.lookup("en")), NO_VALUE);
    }

    #[test]
    fn test_decode_registers_unknown_codes() {
        let registry = registry_with(&["en"]);
        let value = LocalizedString::decode(&registry, r#"{"pt-BR":"Olá"}"#.as_bytes()).unwrap();

        assert_eq!(registry.codes(), vec!["en", "pt", "pt-BR"]);
        assert_eq!(value.len(), 3);
        assert_eq!(value.get(registry.lookup("pt-BR")), Some("Olá"));
        assert_eq!(value.get(registry.lookup("pt")), None);
    }

    #[test]
    fn test_decode_rejects_malformed_payloads() {
        let registry = registry_with(&["en"]);
        for payload in [&b"[1,2]"[..], b"{\"xx\":1}", b"{", b"\"text\""] {
            let err = LocalizedString::decode(&registry, payload).unwrap_err();
            assert!(matches!(err, I18nError::MalformedPayload(_)));
        }
        assert_eq!(registry.codes(), vec!["en"]);
    }

    #[test]
    fn test_null_round_trip() {
        let registry = registry_with(&["en"]);
        let empty = LocalizedString::decode(&registry, b"null").unwrap();
        assert_eq!(empty.value_for(&registry, registry.lookup("en")), NO_VALUE);
        assert_eq!(LocalizedString::new().encode(&registry), b"null");
    }

    #[test]
    fn test_encode_in_identifier_order() {
        let registry = registry_with(&["en", "fr", "es"]);
        let data = br#"{"en":"Hello","fr":"Bonjour"}"#;
        let value = LocalizedString::decode(&registry, data).unwrap();
        assert_eq!(value.encode(&registry), data.to_vec());

        let reordered = LocalizedString::decode(&registry, br#"{"fr":"Bonjour","en":"Hello"}"#)
            .unwrap();
        assert_eq!(reordered.encode(&registry), data.to_vec());
    }

    #[test]
    fn test_encode_escapes_values() {
        let registry = registry_with(&["en"]);
        let value = LocalizedString::new().with_value(registry.lookup("en"), "say \"hi\"\n");
        assert_eq!(value.encode(&registry), br#"{"en":"say \"hi\"\n"}"#.to_vec());

        let decoded = LocalizedString::decode(&registry, &value.encode(&registry)).unwrap();
        assert_eq!(decoded.get(registry.lookup("en")), Some("say \"hi\"\n"));
    }

    #[test]
    fn test_serialize_view_matches_encode() {
        let registry = registry_with(&["en", "fr"]);
        let value = LocalizedString::decode(&registry, br#"{"fr":"Oui","en":"Yes"}"#).unwrap();
        let via_serde = serde_json::to_vec(&value.serialize_with(&registry)).unwrap();
        assert_eq!(via_serde, value.encode(&registry));
    }

    #[test]
    fn test_string_validator() {
        let registry = registry_with(&["en", "fr"]);
        let validator = StringValidator::new(&registry);

        assert!(validator.is_valid(br#"{"en":"Hello","fr":"Bonjour"}"#));
        assert!(!validator.is_valid(br#"{"en":"Hello","unknown":1}"#));
        assert!(!validator.is_valid(br#"{"en":1}"#));
        assert!(!validator.is_valid(br#"{"de":"Hallo"}"#));
        assert!(!validator.is_valid(b"not json"));
        assert!(!validator.is_valid(b"[]"));
    }

    #[test]
    fn test_validator_is_a_snapshot() {
        let registry = registry_with(&["en"]);
        let validator = StringValidator::new(&registry);
        registry.resolve_or_register("de");
        assert!(!validator.is_valid(br#"{"de":"Hallo"}"#));
        assert!(StringValidator::new(&registry).is_valid(br#"{"de":"Hallo"}"#));
    }
}
