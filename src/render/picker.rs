use crate::i18n::{Language, TranslationStore};
use crate::render::Renderer;
use std::sync::{Mutex, PoisonError};

/// One entry of the language dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOption {
    pub code: &'static str,
    pub name: &'static str,
    pub label: &'static str,
    pub current: bool,
}

/// The language picker button and dropdown.
#[derive(Debug)]
pub struct LanguagePickerView {
    current: Mutex<Language>,
}

impl LanguagePickerView {
    pub fn new(initial: Language) -> Self {
        Self {
            current: Mutex::new(initial),
        }
    }

    /// Label shown on the button (e.g. "SR").
    pub fn button_label(&self) -> &'static str {
        self.current().label()
    }

    /// Dropdown entries in registry order, with the active one marked.
    pub fn options(&self) -> Vec<PickerOption> {
        let current = self.current();
        Language::all_enabled()
            .into_iter()
            .map(|language| PickerOption {
                code: language.code(),
                name: language.name(),
                label: language.label(),
                current: language == current,
            })
            .collect()
    }

    fn current(&self) -> Language {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Renderer for LanguagePickerView {
    fn name(&self) -> &str {
        "language-picker"
    }

    fn refresh(&self, store: &TranslationStore) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = store.language();
    }
}
