#![forbid(unsafe_code)]

use std::path::Path;

pub const DEFAULT_EXTENSION: &str = "sql";
pub const EXTENSION_ENV: &str = "SQLBOOK_EXTENSION";

/// Knobs for the directory load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    extension: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl LoadOptions {
    /// Accepts `sql` or `.sql`; a blank value keeps the default.
    pub fn with_extension(extension: &str) -> Self {
        let normalized = extension.trim().trim_start_matches('.');
        if normalized.is_empty() {
            return Self::default();
        }
        Self {
            extension: normalized.to_string(),
        }
    }

    pub fn from_env() -> Self {
        std::env::var(EXTENSION_ENV)
            .ok()
            .map(|value| Self::with_extension(&value))
            .unwrap_or_default()
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub(crate) fn matches(&self, path: &Path) -> bool {
        path.extension().and_then(|v| v.to_str()) == Some(self.extension.as_str())
    }
}
