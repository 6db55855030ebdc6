//! Client-side logic for the Kakao Balkan website.
//!
//! - `i18n`: translation store, language switch controller, sources and preferences
//! - `render`: renderers that refresh their text after a language switch
//! - `products`: product/origin catalog and the origin selection panel
//! - `contact`: contact form validation and email submission

pub mod config;
pub mod contact;
pub mod i18n;
pub mod products;
pub mod render;
pub mod retry;
