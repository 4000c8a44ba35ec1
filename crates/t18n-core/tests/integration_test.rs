//! Integration tests for t18n-core crate.

use std::path::PathBuf;
use std::sync::Arc;
use t18n_common::test_utils::{init_test_logging, resource_fixtures};
use t18n_core::{
    ContainerHandle, EmbeddedFileSource, I18nError, LanguageId, LanguageRegistry, LocalFileSource,
    LocalizedString, MissingStrategy, StringValidator, TranslationContainer, NOT_FOUND_MARKER,
    NO_VALUE, UNKNOWN_CODE,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/locales")
}

fn load_fixtures(registry: &Arc<LanguageRegistry>, strategy: MissingStrategy) -> TranslationContainer {
    let mut source = LocalFileSource::new();
    source.register_files("*.t18n", &[fixtures_dir()]).unwrap();

    TranslationContainer::builder(Arc::clone(registry))
        .primary_language(registry.lookup("en"))
        .brackets("%")
        .strategy(strategy)
        .file_suffixes(["customer1"])
        .source(source)
        .load()
        .unwrap()
}

#[test]
fn test_reference_scenario_from_directory() {
    init_test_logging();

    let registry = Arc::new(LanguageRegistry::with_languages(["en-US", "en", "de"]));
    let container = load_fixtures(&registry, MissingStrategy::ReturnResourceCode);

    let en_gb = registry.resolve_or_register("en-GB");
    let de = registry.lookup("de");
    let en_us = registry.lookup("en-US");

    assert_eq!(container.lang(en_gb).value("%Lift%"), "Elevator");
    assert_eq!(container.lang(en_gb).value("%Save%"), "Save");
    assert_eq!(container.lang(de).value("%Save%"), "Speichern");
    assert_eq!(container.namespace("customer1", en_us).value("%Lift%"), "Hoist");
    assert_eq!(container.lang(de).value("%Unknown%"), "Unknown");
}

#[test]
fn test_registry_order_is_stable_across_loads() {
    let registry = Arc::new(LanguageRegistry::with_languages(["en-US", "en", "de"]));
    let codes_before = registry.codes();
    assert_eq!(codes_before, vec!["en", "en-US", "de"]);

    let _container = load_fixtures(&registry, MissingStrategy::ReturnResourceCode);
    let codes_after = registry.codes();
    assert_eq!(&codes_after[..3], &codes_before[..]);
    assert!(codes_after.contains(&"en-GB".to_string()));
}

#[test]
fn test_missing_key_strategies() {
    let registry = Arc::new(LanguageRegistry::new());
    registry.resolve_or_register("en");

    let container = load_fixtures(&registry, MissingStrategy::ReturnNotFoundVariable);
    let de = registry.lookup("de");
    assert_eq!(container.lang(de).value("%Unknown%"), NOT_FOUND_MARKER);

    let container = load_fixtures(&registry, MissingStrategy::ReturnEmptyString);
    assert_eq!(container.lang(de).value("%Unknown%"), "");
    assert_eq!(container.lang(de).hint("%Greeting%"), "informal");
}

#[test]
fn test_json_export() {
    let registry = Arc::new(LanguageRegistry::with_languages(["en"]));
    let container = load_fixtures(&registry, MissingStrategy::ReturnResourceCode);

    let json = container.lang(registry.lookup("de")).json().unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({
            "%Cancel%": {"v": "Cancel"},
            "%Greeting%": {"v": "Hallo", "h": "informal"},
            "%Save%": {"v": "Speichern"},
        })
    );

    let err = container
        .namespace("customer2", registry.lookup("de"))
        .json()
        .unwrap_err();
    match err {
        I18nError::NoTranslationFound { language, namespace } => {
            assert_eq!(language, "de");
            assert_eq!(namespace, "customer2");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_directory_fails_registration() {
    let mut source = LocalFileSource::new();
    let err = source
        .register_files("*.t18n", &[fixtures_dir().join("does-not-exist")])
        .unwrap_err();
    assert!(matches!(err, I18nError::SourceUnavailable { .. }));
}

#[test]
fn test_embedded_reference_files() {
    let registry = Arc::new(LanguageRegistry::with_languages(["en"]));
    let source = resource_fixtures::reference_files()
        .into_iter()
        .fold(EmbeddedFileSource::default(), |source, (name, content)| {
            source.with_file(name, content)
        });

    let container = TranslationContainer::builder(Arc::clone(&registry))
        .primary_language(registry.lookup("en"))
        .source(source)
        .load()
        .unwrap();

    let en_gb = registry.lookup("en-GB");
    assert_eq!(container.lang(en_gb).value("Lift"), "Elevator");
    assert_eq!(container.lang(en_gb).hint("Save"), "button caption");
    assert_eq!(container.languages().len(), 4);
}

#[test]
fn test_handle_serves_snapshots_during_reload() {
    let dir = tempfile::tempdir().unwrap();
    resource_fixtures::write_reference_files(dir.path());

    let registry = Arc::new(LanguageRegistry::with_languages(["en"]));
    let mut source = LocalFileSource::new();
    source.register_files("*.t18n", &[dir.path()]).unwrap();

    let container = TranslationContainer::builder(Arc::clone(&registry))
        .primary_language(registry.lookup("en"))
        .source(source)
        .load()
        .unwrap();
    let handle = Arc::new(ContainerHandle::new(container));
    let de = registry.lookup("de");

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let handle = Arc::clone(&handle);
            scope.spawn(move || {
                for _ in 0..100 {
                    let snapshot = handle.load();
                    let value = snapshot.lang(de).value("Save");
                    assert!(value == "Speichern" || value == "Sichern");
                }
            });
        }

        std::fs::write(dir.path().join("de.t18n"), "Save = Sichern\n").unwrap();
        handle.reload().unwrap();
    });

    assert_eq!(handle.load().lang(de).value("Save"), "Sichern");
}

#[test]
fn test_localized_string_round_trip_through_registry() {
    let registry = LanguageRegistry::with_languages(["en-US", "de"]);
    let payload = br#"{"en":"Color","en-GB":"Colour","de":"Farbe"}"#;

    let text = LocalizedString::decode(&registry, payload).unwrap();
    let en_gb = registry.lookup("en-GB");
    let en_au = registry.resolve_or_register("en-AU");
    let fr = registry.resolve_or_register("fr");

    assert_eq!(text.value_for(&registry, en_gb), "Colour");
    assert_eq!(text.value_for(&registry, en_au), "Color");
    // Newer than the value and without an ancestor inside it.
    assert_eq!(text.value_for(&registry, fr), UNKNOWN_CODE);
    assert_eq!(text.value_for(&registry, LanguageId::UNKNOWN), UNKNOWN_CODE);

    registry.set_no_match_language(registry.lookup("en"));
    assert_eq!(text.value_for(&registry, fr), "Color");

    let encoded = text.encode(&registry);
    assert_eq!(
        encoded,
        br#"{"en":"Color","de":"Farbe","en-GB":"Colour"}"#.to_vec()
    );
    let again = LocalizedString::decode(&registry, &encoded).unwrap();
    assert_eq!(again.encode(&registry), encoded);
}

#[test]
fn test_localized_string_empty_slot_falls_back_to_no_value() {
    let registry = LanguageRegistry::with_languages(["en", "de"]);
    let text = LocalizedString::decode(&registry, br#"{"de":"Farbe"}"#).unwrap();

    assert_eq!(text.value_for(&registry, registry.lookup("en")), NO_VALUE);
    assert_eq!(
        text.value_for_or_else(&registry, registry.lookup("en"), || "fallback".to_string()),
        "fallback"
    );
}

#[test]
fn test_validator_checks_codes_against_registry() {
    let registry = LanguageRegistry::with_languages(["en-US", "de"]);
    let validator = StringValidator::new(&registry);

    assert!(validator.is_valid(br#"{"en":"Color","de":"Farbe"}"#));
    assert!(validator.is_valid(br#"{"en-US":"Color"}"#));
    assert!(!validator.is_valid(br#"{"fr":"Couleur"}"#));
    assert!(!validator.is_valid(b"not json"));
}
