//! Runtime configuration
//!
//! Values come from the environment (a `.env` file is loaded by the binary);
//! CLI flags override them.

use std::env;
use std::path::PathBuf;

/// Directory holding the last-input store
pub const DIR_ENV: &str = "BRUNO_TRANSLATOR_DIR";

/// Optional JSON rule set replacing the built-in rules
pub const RULES_ENV: &str = "BRUNO_TRANSLATOR_RULES";

/// Default store directory (relative to current dir)
pub const DEFAULT_STORE_DIR: &str = ".bruno-translator";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorConfig {
    pub store_dir: PathBuf,
    pub rules_path: Option<PathBuf>,
}

impl TranslatorConfig {
    /// Read configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let store_dir = lookup(DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR));
        let rules_path = lookup(RULES_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self { store_dir, rules_path }
    }

    pub fn with_rules_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.rules_path = path;
        }
        self
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            rules_path: None,
        }
    }
}
