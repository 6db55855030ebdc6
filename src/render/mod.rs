//! UI fragments that display translated text.
//!
//! Every fragment implements [`Renderer`] and is registered with the
//! `LanguageSwitchController`, which calls `refresh` once after each
//! successful language switch.

mod elements;
mod hero;
mod picker;

pub use elements::{Binding, BindingKind, TranslatedElements};
pub use hero::{HeroLine, HeroTitle, TypedFrame};
pub use picker::{LanguagePickerView, PickerOption};

use crate::i18n::TranslationStore;

/// A fragment that re-reads the translation store on demand.
///
/// `refresh` must be idempotent and only touch the renderer's own state.
pub trait Renderer: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    fn refresh(&self, store: &TranslationStore);
}
