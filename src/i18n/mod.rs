//! Internationalization: UI translations and language switching.
//!
//! # Architecture
//!
//! - `registry`: the languages the site can display and which one is the fallback
//! - `language`: validated `Language` codes
//! - `map`: nested translation maps with dotted-key lookup
//! - `store`: the active `(language, map)` pair, swapped atomically
//! - `source`: loading `<code>.json` from a directory or over HTTP
//! - `preference`: the persisted `selectedLanguage` slot
//! - `controller`: the language switch state machine and renderer fan-out
//! - `validator`: checks a language file against the fallback language file
//! - `metrics`: switch and lookup counters
//!
//! # Example
//!
//! ```rust,ignore
//! let store = Arc::new(TranslationStore::new(Language::fallback()));
//! let controller = LanguageSwitchController::new(
//!     store.clone(),
//!     Arc::new(DirectorySource::new("languages")),
//!     Arc::new(FilePreferenceStore::new("prefs.json")),
//! );
//! controller.initialize().await;
//! controller.switch_to(Language::SERBIAN).await;
//! assert_eq!(store.get("hero.title_accent"), "Kakao Balkan");
//! ```

mod controller;
mod language;
mod map;
mod metrics;
mod preference;
mod registry;
mod source;
mod store;
mod validator;

pub use controller::{LanguageSwitchController, SwitchOutcome, SwitchState};
pub use language::Language;
pub use map::{LookupError, MapError, TranslationMap};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use preference::{
    preferred_language, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
    LANGUAGE_PREFERENCE_KEY,
};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use source::{DirectorySource, HttpSource, LoadError, TranslationSource};
pub use store::{Snapshot, TranslationStore};
pub use validator::{TranslationValidator, ValidationReport};
