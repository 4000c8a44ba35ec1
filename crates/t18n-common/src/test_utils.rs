//! Test utilities and shared test helpers for t18n.
//!
//! This module provides common testing utilities and fixtures that can be
//! used across all crates in the workspace for unit and integration testing.

use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write a resource file into `dir` and return its full path.
pub fn write_resource_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write resource file");
    path
}

/// Resource file fixtures.
pub mod resource_fixtures {
    /// The reference resource set: a primary `en` file, a regional `en-GB`
    /// override, a German file and a tenant namespace for `en-US`.
    pub fn reference_files() -> Vec<(&'static str, &'static str)> {
        vec![
            ("en.t18n", "# primary\nSave = Save // button caption\nCancel = Cancel\n"),
            ("en-GB.t18n", "Lift = Elevator\n"),
            ("de.t18n", "Save = Speichern\n"),
            ("en-US.customer1.t18n", "Lift = Hoist // tenant wording\n"),
        ]
    }

    /// Write [`reference_files`] into `dir`.
    pub fn write_reference_files(dir: &std::path::Path) {
        for (name, content) in reference_files() {
            super::write_resource_file(dir, name, content);
        }
    }
}
