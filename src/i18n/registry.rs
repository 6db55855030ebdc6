//! Language registry: single source of truth for the site's UI languages.
//!
//! The registry is initialised once on first access (`OnceLock`) and is
//! immutable afterwards. Adding a language means adding an entry here and a
//! matching `languages/<code>.json` file.

use std::sync::OnceLock;

/// Configuration for a supported UI language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// ISO 639-1 language code, also the translation file stem (e.g. "en", "sr")
    pub code: &'static str,

    /// Name shown in the language picker, in the language itself (e.g. "Srpski")
    pub name: &'static str,

    /// Short label shown on the picker button (e.g. "EN")
    pub label: &'static str,

    /// Whether this is the fallback language (exactly one must be true)
    pub is_fallback: bool,

    /// Whether this language is offered in the picker
    pub enabled: bool,
}

/// Set of languages the site can display.
#[derive(Debug)]
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the process-wide registry.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language configuration by code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All languages offered in the picker, in display order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// All languages, including disabled ones.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// The fallback language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one fallback language.
    pub fn fallback(&self) -> &LanguageConfig {
        let fallbacks: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_fallback)
            .collect();

        match fallbacks.len() {
            0 => panic!("No fallback language found in registry"),
            1 => fallbacks[0],
            _ => panic!("Multiple fallback languages found in registry"),
        }
    }

    /// Check if a language code is known and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            label: "EN",
            is_fallback: true,
            enabled: true,
        },
        LanguageConfig {
            code: "sr",
            name: "Srpski",
            label: "SR",
            is_fallback: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        assert!(std::ptr::eq(LanguageRegistry::get(), LanguageRegistry::get()));
    }

    #[test]
    fn test_get_by_code_serbian() {
        let config = LanguageRegistry::get().get_by_code("sr").expect("sr is registered");

        assert_eq!(config.name, "Srpski");
        assert_eq!(config.label, "SR");
        assert!(!config.is_fallback);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_unknown() {
        assert!(LanguageRegistry::get().get_by_code("de").is_none());
        assert!(!LanguageRegistry::get().is_enabled("de"));
    }

    #[test]
    fn test_fallback_is_english() {
        let fallback = LanguageRegistry::get().fallback();
        assert_eq!(fallback.code, "en");
        assert_eq!(fallback.label, "EN");
    }

    #[test]
    fn test_list_enabled_keeps_picker_order() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|lang| lang.code)
            .collect();
        assert_eq!(codes, vec!["en", "sr"]);
        assert_eq!(LanguageRegistry::get().list_all().len(), 2);
    }
}
