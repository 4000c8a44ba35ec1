//! Main entry point for the t18n command line tool.

use anyhow::Context;
use clap::Parser;
use t18n_cli::{App, Args};
use t18n_common::init_logging;
use t18n_config::ConfigLoader;
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let loader = args
        .config
        .as_ref()
        .map_or_else(ConfigLoader::discover, ConfigLoader::new);
    let config = loader.load().await.with_context(|| match loader.path() {
        Some(path) => format!("failed to load configuration from {}", path.display()),
        None => "failed to load default configuration".to_string(),
    })?;

    let _guard = init_logging(&config.logging).context("failed to initialize logging")?;

    let app = App::new(config);
    match app.run(&args).await {
        Ok(output) => {
            print!("{output}");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, language = %args.lang, "lookup failed");
            Err(e).context("failed to resolve translations")
        }
    }
}
