//! Validate every language file against the fallback language file.
//!
//! Usage: check-translations [languages-dir]
//!
//! Exits with an error when any language has missing keys or broken placeholders.

use anyhow::{Context, Result};
use kakao_balkan_web::config::Config;
use kakao_balkan_web::i18n::{DirectorySource, Language, TranslationSource, TranslationValidator};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("check_translations=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.languages_dir.clone());
    let fallback = Language::from_code(&config.fallback_language)?;
    let source = DirectorySource::new(&dir);

    let reference = source
        .fetch(fallback)
        .await
        .with_context(|| format!("Failed to load fallback language '{}'", fallback))?;
    info!(
        "Reference '{}' has {} keys",
        fallback,
        reference.leaf_keys().len()
    );

    let mut failed = Vec::new();
    for language in Language::all_enabled() {
        if language == fallback {
            continue;
        }

        let candidate = match source.fetch(language).await {
            Ok(map) => map,
            Err(e) => {
                warn!("{}", e);
                failed.push(language.code());
                continue;
            }
        };

        let report = TranslationValidator::validate(&reference, &candidate);
        for warning in &report.warnings {
            warn!("[{}] {}", language, warning);
        }
        for error in &report.errors {
            println!("[{}] ERROR {}", language, error);
        }

        if report.has_errors() {
            failed.push(language.code());
        } else {
            println!("[{}] ok ({} warnings)", language, report.warnings.len());
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("Translation check failed for: {}", failed.join(", "));
    }
    Ok(())
}
