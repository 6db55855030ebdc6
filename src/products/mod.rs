//! Product catalog and origin selection.

pub mod catalog;
mod panel;

pub use catalog::{Origin, Product};
pub use panel::{OriginCard, PanelError, ProductSelectionPanel, Selection};
