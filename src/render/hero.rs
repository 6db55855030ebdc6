use crate::i18n::TranslationStore;
use crate::render::Renderer;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

const DEFAULT_TITLE_MAIN: &str = "Your Cocoa Source";
const DEFAULT_TITLE_ACCENT: &str = "Kakao Balkan";

const MAIN_START: Duration = Duration::from_millis(500);
const ACCENT_START: Duration = Duration::from_millis(2000);
const PER_CHARACTER: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroLine {
    Main,
    Accent,
}

/// What a hero line shows at `at` after the page starts typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedFrame {
    pub at: Duration,
    pub line: HeroLine,
    pub text: String,
}

/// Hero heading with its typewriter effect.
#[derive(Debug)]
pub struct HeroTitle {
    lines: Mutex<(String, String)>,
}

impl HeroTitle {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new((
                DEFAULT_TITLE_MAIN.to_string(),
                DEFAULT_TITLE_ACCENT.to_string(),
            )),
        }
    }

    pub fn main(&self) -> String {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).0.clone()
    }

    pub fn accent(&self) -> String {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner).1.clone()
    }

    /// Typing frames for both lines, ordered by time.
    pub fn typing_frames(&self) -> Vec<TypedFrame> {
        let (main, accent) = self.lines.lock().unwrap_or_else(PoisonError::into_inner).clone();

        let mut frames = type_line(HeroLine::Main, &main, MAIN_START);
        frames.extend(type_line(HeroLine::Accent, &accent, ACCENT_START));
        frames.sort_by_key(|frame| frame.at);
        frames
    }
}

impl Default for HeroTitle {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HeroTitle {
    fn name(&self) -> &str {
        "hero-title"
    }

    fn refresh(&self, store: &TranslationStore) {
        let main = store.get_or("hero.title_main", DEFAULT_TITLE_MAIN);
        let accent = store.get_or("hero.title_accent", DEFAULT_TITLE_ACCENT);
        *self.lines.lock().unwrap_or_else(PoisonError::into_inner) = (main, accent);
    }
}

/// One frame per character: the line starts empty and grows by one char every tick.
fn type_line(line: HeroLine, text: &str, start: Duration) -> Vec<TypedFrame> {
    let mut frames = vec![TypedFrame {
        at: start,
        line,
        text: String::new(),
    }];

    let mut typed = String::with_capacity(text.len());
    for (i, ch) in text.chars().enumerate() {
        typed.push(ch);
        frames.push(TypedFrame {
            at: start + PER_CHARACTER * (i as u32 + 1),
            line,
            text: typed.clone(),
        });
    }
    frames
}
