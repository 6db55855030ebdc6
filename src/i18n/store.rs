//! The active language and its translation map.

use crate::i18n::{Language, TranslationMap, TranslationMetrics};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::warn;

/// One consistent `(language, map)` pair.
#[derive(Debug, Clone)]
pub struct Snapshot {
    language: Language,
    map: TranslationMap,
}

impl Snapshot {
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn map(&self) -> &TranslationMap {
        &self.map
    }

    /// Resolve `key`, returning the key itself when it does not name a string.
    pub fn get(&self, key: &str) -> String {
        self.resolve(key).unwrap_or_else(|| key.to_string())
    }

    fn resolve(&self, key: &str) -> Option<String> {
        match self.map.lookup(key) {
            Ok(text) => Some(text.to_string()),
            Err(e) => {
                warn!("{} ({})", e, self.language);
                None
            }
        }
    }
}

/// Holds the active language and the map most recently loaded for it.
///
/// Readers always see a whole snapshot: `replace` swaps the pair behind one
/// lock, so a lookup can never mix the old language with the new map. The
/// store is only written by `LanguageSwitchController`.
#[derive(Debug)]
pub struct TranslationStore {
    current: RwLock<Arc<Snapshot>>,
    metrics: Arc<TranslationMetrics>,
}

impl TranslationStore {
    /// Create a store for `language` with an empty map.
    pub fn new(language: Language) -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot {
                language,
                map: TranslationMap::empty(),
            })),
            metrics: Arc::new(TranslationMetrics::new()),
        }
    }

    /// Create a store that already holds a map (tests and pre-rendered pages).
    pub fn with_map(language: Language, map: TranslationMap) -> Self {
        let store = Self::new(language);
        store.replace(language, map);
        store
    }

    /// The current pair. Hold on to it to do several lookups against one language.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn language(&self) -> Language {
        self.snapshot().language
    }

    /// Whether any translation map has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        !self.snapshot().map.is_empty()
    }

    /// Resolve a dotted key; misses return the key unchanged.
    pub fn get(&self, key: &str) -> String {
        self.resolve(key).unwrap_or_else(|| key.to_string())
    }

    /// Resolve a dotted key; misses return `default`.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.resolve(key).unwrap_or_else(|| default.to_string())
    }

    /// Swap language and map in one step.
    pub fn replace(&self, language: Language, map: TranslationMap) {
        let next = Arc::new(Snapshot { language, map });
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    pub fn metrics(&self) -> &Arc<TranslationMetrics> {
        &self.metrics
    }

    fn resolve(&self, key: &str) -> Option<String> {
        let resolved = self.snapshot().resolve(key);
        if resolved.is_none() {
            self.metrics.record_key_miss();
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> TranslationMap {
        TranslationMap::from_value(value).unwrap()
    }

    #[test]
    fn test_get_present_and_missing_keys() {
        let store = TranslationStore::with_map(
            Language::ENGLISH,
            map(json!({ "hero": { "title_main": "Your Cocoa Source" } })),
        );

        assert_eq!(store.get("hero.title_main"), "Your Cocoa Source");
        assert_eq!(store.get("hero.missing"), "hero.missing");
        assert_eq!(store.get("hero"), "hero");
        assert_eq!(store.metrics().report().key_misses, 2);
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = TranslationStore::new(Language::SERBIAN);

        assert_eq!(store.language(), Language::SERBIAN);
        assert!(!store.is_loaded());
        assert_eq!(store.get("nav.home"), "nav.home");
    }

    #[test]
    fn test_get_or_uses_default_on_miss() {
        let store = TranslationStore::new(Language::ENGLISH);
        assert_eq!(store.get_or("hero.title_accent", "Kakao Balkan"), "Kakao Balkan");
    }

    #[test]
    fn test_replace_swaps_language_and_map_together() {
        let store = TranslationStore::with_map(
            Language::ENGLISH,
            map(json!({ "nav": { "home": "Home" } })),
        );
        let before = store.snapshot();

        store.replace(Language::SERBIAN, map(json!({ "nav": { "home": "Početna" } })));

        // The old snapshot is untouched
        assert_eq!(before.language(), Language::ENGLISH);
        assert_eq!(before.get("nav.home"), "Home");

        let after = store.snapshot();
        assert_eq!(after.language(), Language::SERBIAN);
        assert_eq!(after.get("nav.home"), "Početna");
    }

    #[test]
    fn test_concurrent_readers_never_see_mixed_pairs() {
        let english = map(json!({ "lang": "en" }));
        let serbian = map(json!({ "lang": "sr" }));
        let store = Arc::new(TranslationStore::with_map(Language::ENGLISH, english.clone()));

        let reader = {
            let store = store.clone();
            std::thread::spawn(move || {
                for _ in 0..5_000 {
                    let snapshot = store.snapshot();
                    assert_eq!(snapshot.get("lang"), snapshot.language().code());
                }
            })
        };

        for i in 0..5_000 {
            if i % 2 == 0 {
                store.replace(Language::SERBIAN, serbian.clone());
            } else {
                store.replace(Language::ENGLISH, english.clone());
            }
        }

        reader.join().expect("reader thread panicked");
    }
}
