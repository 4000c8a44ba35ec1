//! Command line arguments.

use clap::Parser;
use std::path::PathBuf;

/// Look up translations with language fallback.
#[derive(Debug, Clone, Parser)]
#[command(name = "t18n", version, about)]
pub struct Args {
    /// Configuration file, instead of T18N_CONFIG_PATH or ./t18n.yaml
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Resource directory; replaces the configured directories when given
    #[arg(short, long = "dir", value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Requested language code, e.g. en-GB
    #[arg(short, long, value_name = "CODE")]
    pub lang: String,

    /// Namespace, the default one when omitted
    #[arg(short, long, value_name = "NS", default_value = "")]
    pub namespace: String,

    /// Resolve a localized string JSON payload instead of container keys
    #[arg(long, value_name = "JSON", conflicts_with = "keys")]
    pub localized: Option<String>,

    /// Keys to look up; prints the JSON export when none are given
    pub keys: Vec<String>,
}
