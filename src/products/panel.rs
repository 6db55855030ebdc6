//! The "select origin" interaction on product cards.
//!
//! A card's dropdown lists the product's origins; picking one records the
//! selection and flips the card to show it. The recorded names are
//! translated, so the panel re-resolves them on every language switch.

use crate::i18n::TranslationStore;
use crate::products::{catalog, Origin, Product};
use crate::render::Renderer;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::debug;

const DEFAULT_SELECT_FIRST: &str = "Please select an origin first.";

const DEFAULT_INQUIRY_TEMPLATE: &str = "Dear Kakao Balkan Team,

I am interested in purchasing {productName} from {country} ({manufacturer}).

Could you please provide me with:
- Detailed product specifications and technical data sheet
- Current pricing and minimum order quantities
- Availability and delivery timeframes
- Quality certificates and documentation
- Sample availability

I look forward to discussing this opportunity further.

Best regards,";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("product '{product}' has no origin '{origin}'")]
    UnknownOrigin { product: String, origin: String },

    /// Inquiry requested before an origin was picked; `message` is translated.
    #[error("{message}")]
    NoSelection { product: String, message: String },
}

/// A recorded origin choice, with names in the language active when last refreshed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub product_name: String,
    pub origin_key: &'static str,
    pub country: String,
    pub manufacturer: &'static str,
    pub flag: &'static str,
}

/// What the back of a flipped card shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginCard {
    pub flag: &'static str,
    pub country: String,
    pub manufacturer: &'static str,
}

#[derive(Debug, Default)]
struct PanelState {
    open_dropdown: Option<&'static str>,
    flipped: BTreeSet<&'static str>,
    selections: BTreeMap<&'static str, Selection>,
    cards: BTreeMap<&'static str, OriginCard>,
}

pub struct ProductSelectionPanel {
    store: Arc<TranslationStore>,
    state: Mutex<PanelState>,
}

impl ProductSelectionPanel {
    pub fn new(store: Arc<TranslationStore>) -> Self {
        Self {
            store,
            state: Mutex::new(PanelState::default()),
        }
    }

    /// Toggle a product's origin dropdown. Opening one closes any other.
    /// Returns whether the dropdown is now open.
    pub fn show_origins(&self, product_key: &str) -> Result<bool, PanelError> {
        let product = find_product(product_key)?;
        let mut state = self.lock();

        if state.open_dropdown == Some(product.key) {
            state.open_dropdown = None;
            Ok(false)
        } else {
            state.open_dropdown = Some(product.key);
            Ok(true)
        }
    }

    pub fn open_dropdown(&self) -> Option<&'static str> {
        self.lock().open_dropdown
    }

    pub fn close_dropdowns(&self) {
        self.lock().open_dropdown = None;
    }

    /// Record an origin for a product and flip its card.
    pub fn select_origin(&self, product_key: &str, origin_key: &str) -> Result<Selection, PanelError> {
        let product = find_product(product_key)?;
        let origin = product.origin(origin_key).ok_or_else(|| PanelError::UnknownOrigin {
            product: product_key.to_string(),
            origin: origin_key.to_string(),
        })?;

        let selection = resolve_selection(&self.store, product, origin);
        debug!(
            "Selected {} / {} for '{}'",
            selection.country, selection.manufacturer, product.key
        );

        let mut state = self.lock();
        state.cards.insert(product.key, card_for(&selection));
        state.selections.insert(product.key, selection.clone());
        if state.open_dropdown == Some(product.key) {
            state.open_dropdown = None;
        }
        state.flipped.insert(product.key);

        Ok(selection)
    }

    /// Turn a card back to its front. The selection is kept.
    pub fn flip_back(&self, product_key: &str) -> Result<(), PanelError> {
        let product = find_product(product_key)?;
        self.lock().flipped.remove(product.key);
        Ok(())
    }

    pub fn is_flipped(&self, product_key: &str) -> bool {
        self.lock().flipped.contains(product_key)
    }

    pub fn selection(&self, product_key: &str) -> Option<Selection> {
        self.lock().selections.get(product_key).cloned()
    }

    /// The origin shown on the back of a flipped card.
    pub fn origin_card(&self, product_key: &str) -> Option<OriginCard> {
        let state = self.lock();
        if !state.flipped.contains(product_key) {
            return None;
        }
        state.cards.get(product_key).cloned()
    }

    /// Inquiry text for the contact form, in the active language.
    pub fn inquiry_message(&self, product_key: &str) -> Result<String, PanelError> {
        let product = find_product(product_key)?;
        let selection = self.selection(product.key).ok_or_else(|| self.no_selection(product))?;

        let template = self
            .store
            .get_or("inquiry.message_template", DEFAULT_INQUIRY_TEMPLATE);

        Ok(template
            .replace("{productName}", &selection.product_name)
            .replace("{country}", &selection.country)
            .replace("{manufacturer}", selection.manufacturer))
    }

    /// Close any open dropdown and produce the inquiry for the contact form.
    pub fn send_inquiry(&self, product_key: &str) -> Result<String, PanelError> {
        let message = self.inquiry_message(product_key)?;
        self.close_dropdowns();
        Ok(message)
    }

    fn no_selection(&self, product: &Product) -> PanelError {
        PanelError::NoSelection {
            product: product.key.to_string(),
            message: self
                .store
                .get_or("inquiry.select_origin_first", DEFAULT_SELECT_FIRST),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Renderer for ProductSelectionPanel {
    fn name(&self) -> &str {
        "product-selection"
    }

    fn refresh(&self, store: &TranslationStore) {
        let mut state = self.lock();
        let state = &mut *state;

        for (product_key, selection) in state.selections.iter_mut() {
            let Some(product) = catalog::product(product_key) else {
                continue;
            };
            let Some(origin) = product.origin(selection.origin_key) else {
                continue;
            };

            *selection = resolve_selection(store, product, origin);
            if state.flipped.contains(product_key) {
                state.cards.insert(product.key, card_for(selection));
            }
        }
    }
}

fn find_product(key: &str) -> Result<&'static Product, PanelError> {
    catalog::product(key).ok_or_else(|| PanelError::UnknownProduct(key.to_string()))
}

fn resolve_selection(store: &TranslationStore, product: &Product, origin: &'static Origin) -> Selection {
    Selection {
        product_name: store.get_or(product.translation_key, product.name),
        origin_key: origin.key,
        country: store.get_or(origin.country_key, origin.country),
        manufacturer: origin.manufacturer,
        flag: origin.flag,
    }
}

fn card_for(selection: &Selection) -> OriginCard {
    OriginCard {
        flag: selection.flag,
        country: selection.country.clone(),
        manufacturer: selection.manufacturer,
    }
}
