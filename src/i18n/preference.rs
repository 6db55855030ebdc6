//! Durable storage for the selected language.

use crate::i18n::Language;
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Key the language code is stored under.
pub const LANGUAGE_PREFERENCE_KEY: &str = "selectedLanguage";

/// A single persisted language preference.
pub trait PreferenceStore: Send + Sync {
    /// The stored language code, if any.
    fn load(&self) -> Option<String>;

    /// Overwrite the stored language code.
    fn save(&self, code: &str) -> Result<()>;
}

/// The language the stored preference names, or `fallback` when nothing
/// usable is stored.
pub fn preferred_language(preferences: &dyn PreferenceStore, fallback: Language) -> Language {
    match preferences.load() {
        Some(code) => Language::from_code(&code).unwrap_or_else(|e| {
            tracing::warn!("Ignoring stored language preference: {}", e);
            fallback
        }),
        None => fallback,
    }
}

/// JSON object file holding key-value preferences.
///
/// Unrelated keys already present in the file are preserved on save.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read preferences from {}", self.path.display())
                })
            }
        };

        match serde_json::from_str::<Value>(&contents)
            .with_context(|| format!("Invalid preferences file {}", self.path.display()))?
        {
            Value::Object(map) => Ok(map),
            _ => anyhow::bail!("Preferences file {} is not a JSON object", self.path.display()),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<String> {
        match self.read_all() {
            Ok(map) => map
                .get(LANGUAGE_PREFERENCE_KEY)
                .and_then(Value::as_str)
                .map(str::to_string),
            Err(e) => {
                tracing::warn!("Ignoring stored preferences: {:#}", e);
                None
            }
        }
    }

    fn save(&self, code: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking the save
        let mut map = self.read_all().unwrap_or_default();
        map.insert(
            LANGUAGE_PREFERENCE_KEY.to_string(),
            Value::String(code.to_string()),
        );

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences to {}", self.path.display()))
    }
}

/// In-memory preference slot that also counts writes.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    slot: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(code: &str) -> Self {
        Self {
            slot: Mutex::new(Some(code.to_string())),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, code: &str) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(code.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
