//! Container loading and request rendering.

use crate::args::Args;
use crate::error::CliResult;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use t18n_config::Config;
use t18n_core::{
    LanguageId, LanguageRegistry, LocalFileSource, LocalizedString, TranslationContainer,
};
use tracing::{debug, info};

/// Loaded translations plus the registry they were resolved against.
pub struct App {
    config: Arc<Config>,
    registry: Arc<LanguageRegistry>,
}

impl App {
    /// Creates the application, registering the configured languages.
    ///
    /// Preloaded languages are registered first so their identifiers do not
    /// depend on which files exist.
    pub fn new(config: Config) -> Self {
        let translations = &config.translations;
        let registry = Arc::new(LanguageRegistry::with_languages(
            &translations.preload_languages,
        ));

        if let Some(code) = &translations.no_match_language {
            registry.set_no_match_language(registry.resolve_or_register(code));
        }

        debug!(languages = registry.count(), "language registry prepared");
        Self {
            config: Arc::new(config),
            registry,
        }
    }

    /// The registry shared with every loaded container.
    pub const fn registry(&self) -> &Arc<LanguageRegistry> {
        &self.registry
    }

    /// Loads a container from `dirs`, or from the configured directories when
    /// `dirs` is empty. File system work runs on the blocking pool.
    pub async fn load_container(&self, dirs: &[PathBuf]) -> CliResult<TranslationContainer> {
        let config = Arc::clone(&self.config);
        let registry = Arc::clone(&self.registry);
        let dirs = if dirs.is_empty() {
            config.translations.directories.clone()
        } else {
            dirs.to_vec()
        };

        let container = tokio::task::spawn_blocking(move || {
            let translations = &config.translations;
            let mut source = LocalFileSource::new();
            source.register_files(&translations.mask, &dirs)?;

            let primary = if translations.has_primary_language() {
                registry.resolve_or_register(&translations.primary_language)
            } else {
                LanguageId::UNKNOWN
            };

            TranslationContainer::builder(registry)
                .primary_language(primary)
                .file_suffixes(translations.namespaces.iter().cloned())
                .brackets(translations.brackets.clone())
                .strategy(translations.strategy)
                .source(source)
                .load()
        })
        .await??;

        info!(
            languages = container.languages().len(),
            sets = container.set_count(),
            "translations ready"
        );
        Ok(container)
    }

    /// Renders the output for `args`: `key = value` lines, the resolved
    /// localized string, or the JSON export.
    pub async fn run(&self, args: &Args) -> CliResult<String> {
        let language = self.registry.resolve_or_register(&args.lang);

        if let Some(payload) = &args.localized {
            let text = LocalizedString::decode(&self.registry, payload.as_bytes())?;
            return Ok(format!("{}\n", text.value_for(&self.registry, language)));
        }

        let container = self.load_container(&args.dirs).await?;
        let request = container.namespace(args.namespace.as_str(), language);

        if args.keys.is_empty() {
            let json = request.json()?;
            return Ok(format!("{}\n", String::from_utf8_lossy(&json)));
        }

        let mut out = String::new();
        for key in &args.keys {
            let _ = writeln!(out, "{key} = {}", request.value(key));
        }
        Ok(out)
    }
}
