//! Last-input store
//!
//! Keeps the most recently edited Postman script on disk so the editor can
//! restore it on the next start.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_STORE_DIR;
use crate::diagnostics::report_warning;
use crate::error::StoreResult;

/// Key the last input is stored under
pub const LAST_INPUT_KEY: &str = "pmCode";

/// Script shown when nothing has been stored yet
pub const PLACEHOLDER_SCRIPT: &str = "// translate your awesome code";

/// Stored script body. Older editors saved a list of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptBody {
    Text(String),
    Lines(Vec<String>),
}

impl ScriptBody {
    pub fn into_text(self) -> String {
        match self {
            ScriptBody::Text(text) => text,
            ScriptBody::Lines(lines) => lines.join("\n"),
        }
    }
}

/// A stored script with metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredScript {
    pub key: String,
    pub script: ScriptBody,
    /// RFC 3339 timestamp of the last save
    #[serde(default)]
    pub saved_at: Option<String>,
}

/// File-backed store for the last edited script
#[derive(Debug, Clone)]
pub struct ScriptStore {
    dir: PathBuf,
}

impl ScriptStore {
    /// Store in the default directory
    pub fn new() -> Self {
        Self::with_dir(DEFAULT_STORE_DIR)
    }

    /// Store in a custom directory
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self { dir: PathBuf::from(dir.as_ref()) }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", LAST_INPUT_KEY))
    }

    /// Overwrite the stored script
    pub fn save(&self, script: &str) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;

        let stored = StoredScript {
            key: LAST_INPUT_KEY.to_string(),
            script: ScriptBody::Text(script.to_string()),
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
        };
        let content = serde_json::to_string_pretty(&stored)?;
        fs::write(self.path(), content)?;
        Ok(())
    }

    /// Save, turning a failure into a warning. Returns whether the script was stored.
    pub fn save_or_warn(&self, script: &str) -> bool {
        match self.save(script) {
            Ok(()) => true,
            Err(e) => {
                report_warning(format!("Could not save last input: {}", e));
                false
            }
        }
    }

    /// Load the stored script, if any
    pub fn load(&self) -> StoreResult<Option<StoredScript>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Stored script text, or the placeholder when missing, empty or unreadable
    pub fn load_or_default(&self) -> String {
        match self.load() {
            Ok(Some(stored)) => {
                let text = stored.script.into_text();
                if text.is_empty() {
                    PLACEHOLDER_SCRIPT.to_string()
                } else {
                    text
                }
            }
            Ok(None) => PLACEHOLDER_SCRIPT.to_string(),
            Err(e) => {
                report_warning(format!("Ignoring unreadable last input: {}", e));
                PLACEHOLDER_SCRIPT.to_string()
            }
        }
    }

    /// Remove the stored script. Returns whether one existed.
    pub fn clear(&self) -> StoreResult<bool> {
        let path = self.path();
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        Ok(true)
    }
}

impl Default for ScriptStore {
    fn default() -> Self {
        Self::new()
    }
}
