use crate::i18n::TranslationStore;
use crate::render::Renderer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// Which part of an element a translation is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// `data-translate`: text content
    Text,
    /// `data-translate-html`: inner HTML
    Html,
    /// `data-translate-placeholder`: input placeholder
    Placeholder,
    /// `data-translate` on a submit input: its value
    SubmitValue,
}

/// One tagged element and the text it currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub key: String,
    pub kind: BindingKind,
    pub content: String,
    /// The markup's own text, shown whenever the active map lacks `key`.
    pub initial: String,
}

/// The statically tagged elements of a page.
///
/// An element whose key does not resolve goes back to the markup's built-in
/// text, never to a previous language's translation.
#[derive(Debug, Default)]
pub struct TranslatedElements {
    bindings: Mutex<Vec<Binding>>,
    last_translated: AtomicUsize,
}

impl TranslatedElements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag an element with `key`; `initial` is the markup's own text. Returns its index.
    pub fn bind(&self, key: &str, kind: BindingKind, initial: &str) -> usize {
        let mut bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        bindings.push(Binding {
            key: key.to_string(),
            kind,
            content: initial.to_string(),
            initial: initial.to_string(),
        });
        bindings.len() - 1
    }

    pub fn content(&self, index: usize) -> Option<String> {
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index)
            .map(|binding| binding.content.clone())
    }

    pub fn bindings(&self) -> Vec<Binding> {
        self.bindings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of elements updated by the last refresh.
    pub fn last_translated(&self) -> usize {
        self.last_translated.load(Ordering::Relaxed)
    }
}

impl Renderer for TranslatedElements {
    fn name(&self) -> &str {
        "translated-elements"
    }

    fn refresh(&self, store: &TranslationStore) {
        if !store.is_loaded() {
            warn!("No translations available to apply");
            return;
        }

        let mut bindings = self.bindings.lock().unwrap_or_else(PoisonError::into_inner);
        let mut translated = 0;
        for binding in bindings.iter_mut() {
            let text = store.get(&binding.key);
            if text != binding.key {
                binding.content = text;
                translated += 1;
            } else {
                binding.content.clone_from(&binding.initial);
            }
        }

        debug!("Translated {}/{} elements", translated, bindings.len());
        self.last_translated.store(translated, Ordering::Relaxed);
    }
}
