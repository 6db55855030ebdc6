//! Language switching: load, swap, persist, re-render.
//!
//! A switch moves through `Idle → Loading(target) → Applying → Idle`. When the
//! requested language cannot be loaded the fallback language is loaded
//! instead and becomes the effective language, both in the store and in the
//! persisted preference. When even the fallback fails the store is left as it
//! was and lookups keep degrading to raw keys.
//!
//! Overlapping switches are resolved latest-wins: every request takes a
//! ticket, and a fetch whose ticket is no longer the newest is discarded when
//! it resolves. The store swap and the renderer fan-out happen under one lock,
//! so no other switch can land between them.

use crate::i18n::{
    preferred_language, Language, PreferenceStore, TranslationMap, TranslationSource,
    TranslationStore,
};
use crate::render::Renderer;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Where the controller currently is in a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    Idle,
    Loading(Language),
    Applying,
}

/// Result of a `switch_to` or `initialize` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Target was already the active language; nothing was loaded.
    Unchanged(Language),
    /// Target was loaded and applied.
    Applied(Language),
    /// Target failed to load; the fallback language was applied instead.
    FellBack {
        requested: Language,
        effective: Language,
    },
    /// Neither the target nor the fallback could be loaded; store unchanged.
    Failed { requested: Language },
    /// A newer switch was requested before this one resolved; result dropped.
    Superseded { requested: Language },
}

impl SwitchOutcome {
    /// The language that ended up in the store, if this call applied a map.
    pub fn applied_language(&self) -> Option<Language> {
        match self {
            SwitchOutcome::Applied(language) => Some(*language),
            SwitchOutcome::FellBack { effective, .. } => Some(*effective),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Startup,
    Switch,
}

pub struct LanguageSwitchController {
    store: Arc<TranslationStore>,
    source: Arc<dyn TranslationSource>,
    preferences: Arc<dyn PreferenceStore>,
    fallback: Language,
    renderers: Mutex<Vec<Arc<dyn Renderer>>>,
    state: Mutex<SwitchState>,
    latest_ticket: AtomicU64,
    apply_lock: tokio::sync::Mutex<()>,
}

impl LanguageSwitchController {
    pub fn new(
        store: Arc<TranslationStore>,
        source: Arc<dyn TranslationSource>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        Self {
            store,
            source,
            preferences,
            fallback: Language::fallback(),
            renderers: Mutex::new(Vec::new()),
            state: Mutex::new(SwitchState::Idle),
            latest_ticket: AtomicU64::new(0),
            apply_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Use a fallback other than the registry's default.
    pub fn with_fallback(mut self, fallback: Language) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn store(&self) -> &Arc<TranslationStore> {
        &self.store
    }

    pub fn fallback(&self) -> Language {
        self.fallback
    }

    pub fn state(&self) -> SwitchState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a renderer to the post-switch fan-out.
    pub fn register(&self, renderer: Arc<dyn Renderer>) {
        debug!("Registered renderer '{}'", renderer.name());
        self.renderers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(renderer);
    }

    pub fn renderer_count(&self) -> usize {
        self.renderers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Load the persisted language (or the fallback) and render it.
    ///
    /// Unlike `switch_to`, this loads even when the store already names the
    /// same language, since the store starts with an empty map.
    pub async fn initialize(&self) -> SwitchOutcome {
        let target = preferred_language(self.preferences.as_ref(), self.fallback);

        info!("Initializing translations for '{}'", target);
        let ticket = self.next_ticket();
        self.run(ticket, target, Trigger::Startup).await
    }

    /// Switch the UI to `target`.
    pub async fn switch_to(&self, target: Language) -> SwitchOutcome {
        // Taking a ticket first means a pending switch is superseded even when
        // this call turns out to be a no-op.
        let ticket = self.next_ticket();

        // An unloaded store still needs its map, even for the active language
        if target == self.store.language() && self.store.is_loaded() {
            debug!("Language '{}' is already active", target);
            self.set_state(SwitchState::Idle);
            return SwitchOutcome::Unchanged(target);
        }

        self.run(ticket, target, Trigger::Switch).await
    }

    /// Switch by code, as received from the language picker.
    pub async fn switch_to_code(&self, code: &str) -> anyhow::Result<SwitchOutcome> {
        let target = Language::from_code(code)?;
        Ok(self.switch_to(target).await)
    }

    async fn run(&self, ticket: u64, target: Language, trigger: Trigger) -> SwitchOutcome {
        let metrics = self.store.metrics();
        metrics.record_switch_request();
        self.set_state(SwitchState::Loading(target));

        let loaded = match self.source.fetch(target).await {
            Ok(map) => Some((target, map)),
            Err(e) => {
                warn!("Error loading language '{}': {}", target, e);
                metrics.record_load_failure();

                if target == self.fallback {
                    None
                } else if !self.is_latest(ticket) {
                    return self.discard(target);
                } else {
                    self.load_fallback().await
                }
            }
        };

        let _guard = self.apply_lock.lock().await;
        if !self.is_latest(ticket) {
            return self.discard(target);
        }

        let Some((effective, map)) = loaded else {
            warn!(
                "No translations available for '{}'; keeping the current map",
                target
            );
            self.set_state(SwitchState::Idle);
            return SwitchOutcome::Failed { requested: target };
        };

        self.set_state(SwitchState::Applying);
        self.apply(effective, map);

        let outcome = if effective == target {
            info!("Applied language '{}'", effective);
            SwitchOutcome::Applied(effective)
        } else {
            metrics.record_fallback();
            warn!(
                "Language '{}' unavailable, using fallback '{}'",
                target, effective
            );
            SwitchOutcome::FellBack {
                requested: target,
                effective,
            }
        };

        if trigger == Trigger::Switch || effective != target {
            if let Err(e) = self.preferences.save(effective.code()) {
                warn!("Failed to persist language preference: {:#}", e);
            }
        }

        self.refresh_renderers();
        self.set_state(SwitchState::Idle);
        outcome
    }

    async fn load_fallback(&self) -> Option<(Language, TranslationMap)> {
        match self.source.fetch(self.fallback).await {
            Ok(map) => Some((self.fallback, map)),
            Err(e) => {
                warn!("Error loading fallback language '{}': {}", self.fallback, e);
                self.store.metrics().record_load_failure();
                None
            }
        }
    }

    fn apply(&self, language: Language, map: TranslationMap) {
        self.store.replace(language, map);
        self.store.metrics().record_switch_applied();
    }

    fn refresh_renderers(&self) {
        let renderers = self
            .renderers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for renderer in renderers {
            debug!("Refreshing renderer '{}'", renderer.name());
            renderer.refresh(&self.store);
        }
    }

    fn discard(&self, target: Language) -> SwitchOutcome {
        debug!("Discarding stale result for '{}'", target);
        self.store.metrics().record_stale_discarded();
        SwitchOutcome::Superseded { requested: target }
    }

    fn next_ticket(&self) -> u64 {
        self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, ticket: u64) -> bool {
        self.latest_ticket.load(Ordering::SeqCst) == ticket
    }

    fn set_state(&self, state: SwitchState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}
