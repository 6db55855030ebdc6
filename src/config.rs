use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Translations
    pub languages_dir: String,
    pub languages_base_url: Option<String>,
    pub fallback_language: String,

    // Preferences
    pub preferences_path: String,

    // EmailJS
    pub emailjs_api_url: String,
    pub emailjs_service_id: Option<String>,
    pub emailjs_template_id: Option<String>,
    pub emailjs_public_key: Option<String>,
    pub contact_recipient: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            // Translations - directory by default, HTTP when a base URL is given
            languages_dir: std::env::var("LANGUAGES_DIR")
                .unwrap_or_else(|_| "languages".to_string()),
            languages_base_url: non_empty_var("LANGUAGES_BASE_URL"),
            fallback_language: std::env::var("FALLBACK_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),

            // Preferences
            preferences_path: std::env::var("PREFERENCES_PATH")
                .unwrap_or_else(|_| ".kakao-balkan/preferences.json".to_string()),

            // EmailJS - contact form is disabled unless all three ids are set
            emailjs_api_url: std::env::var("EMAILJS_API_URL")
                .unwrap_or_else(|_| "https://api.emailjs.com".to_string()),
            emailjs_service_id: non_empty_var("EMAILJS_SERVICE_ID"),
            emailjs_template_id: non_empty_var("EMAILJS_TEMPLATE_ID"),
            emailjs_public_key: non_empty_var("EMAILJS_PUBLIC_KEY"),
            contact_recipient: std::env::var("CONTACT_RECIPIENT")
                .unwrap_or_else(|_| "igor.sergejev@kakaobalkan.rs".to_string()),
        };

        if config.fallback_language.trim().is_empty() {
            anyhow::bail!("FALLBACK_LANGUAGE must not be empty");
        }

        Ok(config)
    }

    /// Service id, template id and public key, if the contact form is configured.
    pub fn emailjs_credentials(&self) -> Option<(&str, &str, &str)> {
        match (
            &self.emailjs_service_id,
            &self.emailjs_template_id,
            &self.emailjs_public_key,
        ) {
            (Some(service), Some(template), Some(key)) => {
                Some((service.as_str(), template.as_str(), key.as_str()))
            }
            _ => None,
        }
    }

    /// Template id for contact submissions; errors when the contact form is not configured.
    pub fn require_template_id(&self) -> Result<&str> {
        self.emailjs_template_id
            .as_deref()
            .context("EMAILJS_TEMPLATE_ID not set")
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "LANGUAGES_DIR",
        "LANGUAGES_BASE_URL",
        "FALLBACK_LANGUAGE",
        "PREFERENCES_PATH",
        "EMAILJS_API_URL",
        "EMAILJS_SERVICE_ID",
        "EMAILJS_TEMPLATE_ID",
        "EMAILJS_PUBLIC_KEY",
        "CONTACT_RECIPIENT",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_env_is_empty() {
        clear_env();
        let config = Config::from_env().expect("defaults should load");

        assert_eq!(config.languages_dir, "languages");
        assert!(config.languages_base_url.is_none());
        assert_eq!(config.fallback_language, "en");
        assert_eq!(config.emailjs_api_url, "https://api.emailjs.com");
        assert!(config.emailjs_credentials().is_none());
        assert!(config.require_template_id().is_err());
    }

    #[test]
    #[serial]
    fn test_emailjs_credentials_require_all_three() {
        clear_env();
        std::env::set_var("EMAILJS_SERVICE_ID", "service_abc");
        std::env::set_var("EMAILJS_TEMPLATE_ID", "template_xyz");

        let config = Config::from_env().unwrap();
        assert!(config.emailjs_credentials().is_none());

        std::env::set_var("EMAILJS_PUBLIC_KEY", "public-key");
        let config = Config::from_env().unwrap();
        assert_eq!(
            config.emailjs_credentials(),
            Some(("service_abc", "template_xyz", "public-key"))
        );
        assert_eq!(config.require_template_id().unwrap(), "template_xyz");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_base_url_is_ignored() {
        clear_env();
        std::env::set_var("LANGUAGES_BASE_URL", "   ");

        let config = Config::from_env().unwrap();
        assert!(config.languages_base_url.is_none());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_empty_fallback_language_is_rejected() {
        clear_env();
        std::env::set_var("FALLBACK_LANGUAGE", "");

        assert!(Config::from_env().is_err());

        clear_env();
    }
}
