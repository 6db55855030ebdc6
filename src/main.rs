use anyhow::{bail, Result};
use kakao_balkan_web::config::Config;
use kakao_balkan_web::contact::{ContactForm, ContactService, EmailJsClient};
use kakao_balkan_web::i18n::{
    preferred_language, DirectorySource, FilePreferenceStore, HttpSource, Language,
    LanguageSwitchController, TranslationSource, TranslationStore,
};
use kakao_balkan_web::products::ProductSelectionPanel;
use kakao_balkan_web::render::{BindingKind, HeroTitle, LanguagePickerView, TranslatedElements};
use std::sync::Arc;
use tracing::info;

const USAGE: &str = "usage: kakao-balkan-web [switch <code> | inquiry <product> <origin> | contact <name> <email> <message>]";

/// Tagged elements of the landing page, with their built-in English text.
const PAGE_BINDINGS: &[(&str, BindingKind, &str)] = &[
    ("nav.home", BindingKind::Text, "Home"),
    ("nav.about", BindingKind::Text, "About Us"),
    ("nav.products", BindingKind::Text, "Products"),
    ("nav.contact", BindingKind::Text, "Contact"),
    ("hero.subtitle", BindingKind::Html, ""),
    ("hero.cta", BindingKind::Text, "Explore Products"),
    ("contact.form.name", BindingKind::Placeholder, "Your Name"),
    ("contact.form.email", BindingKind::Placeholder, "Your Email"),
    ("contact.form.message", BindingKind::Placeholder, "Your Message"),
    ("contact.form.submit", BindingKind::SubmitValue, "Send Message"),
];

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kakao_balkan_web=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let fallback = Language::from_code(&config.fallback_language)?;

    let source: Arc<dyn TranslationSource> = match &config.languages_base_url {
        Some(url) => {
            info!("Loading translations from {}", url);
            Arc::new(HttpSource::new(url))
        }
        None => {
            info!("Loading translations from {}/", config.languages_dir);
            Arc::new(DirectorySource::new(&config.languages_dir))
        }
    };
    let preferences = Arc::new(FilePreferenceStore::new(&config.preferences_path));
    let preferred = preferred_language(preferences.as_ref(), fallback);
    let store = Arc::new(TranslationStore::new(preferred));
    let controller =
        LanguageSwitchController::new(store.clone(), source, preferences).with_fallback(fallback);

    let hero = Arc::new(HeroTitle::new());
    let elements = Arc::new(TranslatedElements::new());
    for (key, kind, text) in PAGE_BINDINGS {
        elements.bind(key, *kind, text);
    }
    let picker = Arc::new(LanguagePickerView::new(preferred));
    let panel = Arc::new(ProductSelectionPanel::new(store.clone()));

    controller.register(hero.clone());
    controller.register(elements.clone());
    controller.register(picker.clone());
    controller.register(panel.clone());

    controller.initialize().await;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        [] => {}
        ["switch", code] => {
            let outcome = controller.switch_to_code(code).await?;
            info!("Switch result: {:?}", outcome);
        }
        ["inquiry", product, origin] => {
            panel.select_origin(product, origin)?;
            println!("{}\n", panel.send_inquiry(product)?);
        }
        ["contact", name, email, message] => {
            let sender = Arc::new(EmailJsClient::from_config(&config)?);
            let service = ContactService::new(
                sender,
                store.clone(),
                config.require_template_id()?,
                &config.contact_recipient,
            );
            let form = ContactForm {
                name: name.to_string(),
                email: email.to_string(),
                company: None,
                message: message.to_string(),
            };
            let notification = service.submit_and_notify(&form).await;
            println!("[{:?}] {}\n", notification.kind, notification.message);
        }
        _ => bail!(USAGE),
    }

    println!(
        "Language: {} ({})",
        picker.button_label(),
        store.language().name()
    );
    println!("{} / {}", hero.main(), hero.accent());
    for binding in elements.bindings() {
        println!("  {:<24} {}", binding.key, binding.content);
    }

    info!(
        "Metrics: {}",
        serde_json::to_string(&store.metrics().report())?
    );
    Ok(())
}
