//! Contact form validation and submission through EmailJS.

use crate::config::Config;
use crate::i18n::TranslationStore;
use crate::retry::{with_retry_if, RetryConfig};
use anyhow::Context;
use futures::future::BoxFuture;
use regex::Regex;
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::{error, info, warn};

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Values entered in the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name, email and message are required")]
    MissingFields,

    #[error("email address is not valid")]
    InvalidEmail,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if [&self.name, &self.email, &self.message]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ValidationError::MissingFields);
        }

        let regex = EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
        if !regex.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(())
    }
}

/// Template parameters sent to the email service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailPayload {
    pub from_name: String,
    pub from_email: String,
    pub company: String,
    pub message: String,
    pub to_email: String,
}

impl EmailPayload {
    pub fn from_form(form: &ContactForm, recipient: &str) -> Self {
        let company = form
            .company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("Not specified");

        Self {
            from_name: form.name.trim().to_string(),
            from_email: form.email.trim().to_string(),
            company: company.to_string(),
            message: form.message.trim().to_string(),
            to_email: recipient.to_string(),
        }
    }
}

/// The email service refused or could not be reached.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("email service rejected the request (400): {body}")]
    BadRequest { body: String },

    #[error("email service authentication failed (401)")]
    AuthFailed,

    #[error("email service quota exceeded (402)")]
    QuotaExceeded,

    #[error("email service error ({status}): {body}")]
    Other { status: u16, body: String },

    #[error("failed to reach email service: {0}")]
    Network(#[source] reqwest::Error),
}

impl SubmissionError {
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            400 => SubmissionError::BadRequest { body },
            401 => SubmissionError::AuthFailed,
            402 => SubmissionError::QuotaExceeded,
            _ => SubmissionError::Other { status, body },
        }
    }

    /// Only network errors and 5xx responses are worth repeating.
    pub fn is_retryable(&self) -> bool {
        match self {
            SubmissionError::Network(_) => true,
            SubmissionError::Other { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Delivers a contact payload using a stored email template.
pub trait EmailSender: Send + Sync {
    fn send<'a>(
        &'a self,
        template_id: &'a str,
        payload: &'a EmailPayload,
    ) -> BoxFuture<'a, Result<(), SubmissionError>>;
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a EmailPayload,
}

/// EmailJS REST client (`POST /api/v1.0/email/send`).
#[derive(Debug, Clone)]
pub struct EmailJsClient {
    client: reqwest::Client,
    api_url: String,
    service_id: String,
    public_key: String,
    retry: RetryConfig,
}

impl EmailJsClient {
    pub fn new(api_url: &str, service_id: &str, public_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            service_id: service_id.to_string(),
            public_key: public_key.to_string(),
            retry: RetryConfig::email_send(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let (service_id, _, public_key) = config
            .emailjs_credentials()
            .context("EmailJS is not configured (EMAILJS_SERVICE_ID, EMAILJS_TEMPLATE_ID, EMAILJS_PUBLIC_KEY)")?;
        Ok(Self::new(&config.emailjs_api_url, service_id, public_key))
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    async fn send_once(&self, request: &SendRequest<'_>) -> Result<(), SubmissionError> {
        let response = self
            .client
            .post(format!("{}/api/v1.0/email/send", self.api_url))
            .json(request)
            .send()
            .await
            .map_err(SubmissionError::Network)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(SubmissionError::from_status(status, body));
        }

        Ok(())
    }
}

impl EmailSender for EmailJsClient {
    fn send<'a>(
        &'a self,
        template_id: &'a str,
        payload: &'a EmailPayload,
    ) -> BoxFuture<'a, Result<(), SubmissionError>> {
        Box::pin(async move {
            let request = SendRequest {
                service_id: &self.service_id,
                template_id,
                user_id: &self.public_key,
                template_params: payload,
            };

            with_retry_if(
                &self.retry,
                "EmailJS send",
                || self.send_once(&request),
                SubmissionError::is_retryable,
            )
            .await
        })
    }
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Rejected(#[from] SubmissionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient message shown after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Validates and sends contact form submissions.
pub struct ContactService {
    sender: Arc<dyn EmailSender>,
    store: Arc<TranslationStore>,
    template_id: String,
    recipient: String,
}

impl ContactService {
    pub fn new(
        sender: Arc<dyn EmailSender>,
        store: Arc<TranslationStore>,
        template_id: &str,
        recipient: &str,
    ) -> Self {
        Self {
            sender,
            store,
            template_id: template_id.to_string(),
            recipient: recipient.to_string(),
        }
    }

    /// Validate the form and send it. Invalid forms never reach the sender.
    pub async fn submit(&self, form: &ContactForm) -> Result<(), ContactError> {
        form.validate()?;

        let payload = EmailPayload::from_form(form, &self.recipient);
        match self.sender.send(&self.template_id, &payload).await {
            Ok(()) => {
                info!("Contact message from {} sent", payload.from_email);
                Ok(())
            }
            Err(e) => {
                error!("Failed to send email: {}", e);
                Err(e.into())
            }
        }
    }

    /// Submit and turn the result into the notification the page shows.
    pub async fn submit_and_notify(&self, form: &ContactForm) -> Notification {
        let result = self.submit(form).await;
        if let Err(ContactError::Invalid(e)) = &result {
            warn!("Contact form rejected: {}", e);
        }
        self.notification_for(&result)
    }

    pub fn notification_for(&self, result: &Result<(), ContactError>) -> Notification {
        let (kind, key, default) = match result {
            Ok(()) => (
                NotificationKind::Success,
                "contact.notifications.success",
                "Thank you for your message! We will get back to you soon.",
            ),
            Err(ContactError::Invalid(ValidationError::MissingFields)) => (
                NotificationKind::Error,
                "contact.notifications.required_fields",
                "Please fill in all required fields.",
            ),
            Err(ContactError::Invalid(ValidationError::InvalidEmail)) => (
                NotificationKind::Error,
                "contact.notifications.invalid_email",
                "Please enter a valid email address.",
            ),
            Err(ContactError::Rejected(SubmissionError::BadRequest { .. })) => (
                NotificationKind::Error,
                "contact.notifications.bad_request",
                "Invalid request. Please check all fields and try again.",
            ),
            Err(ContactError::Rejected(SubmissionError::AuthFailed)) => (
                NotificationKind::Error,
                "contact.notifications.auth_failed",
                "Email service authentication failed. Please try again later.",
            ),
            Err(ContactError::Rejected(SubmissionError::QuotaExceeded)) => (
                NotificationKind::Error,
                "contact.notifications.quota_exceeded",
                "Email service quota exceeded. Please try again later.",
            ),
            Err(ContactError::Rejected(_)) => (
                NotificationKind::Error,
                "contact.notifications.generic",
                "Sorry, there was an error sending your message. Please try again or contact us directly.",
            ),
        };

        Notification {
            kind,
            message: self.store.get_or(key, default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, TranslationMap};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Ana Petrović".to_string(),
            email: "ana@example.rs".to_string(),
            company: None,
            message: "Need 5t of cocoa butter".to_string(),
        }
    }

    /// Sender that answers every call with a fixed status.
    struct FixedSender {
        status: Option<u16>,
        calls: AtomicUsize,
    }

    impl FixedSender {
        fn new(status: Option<u16>) -> Arc<Self> {
            Arc::new(Self {
                status,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl EmailSender for FixedSender {
        fn send<'a>(
            &'a self,
            _template_id: &'a str,
            _payload: &'a EmailPayload,
        ) -> BoxFuture<'a, Result<(), SubmissionError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                match self.status {
                    None => Ok(()),
                    Some(status) => Err(SubmissionError::from_status(status, String::new())),
                }
            })
        }
    }

    fn service(sender: Arc<FixedSender>, store: TranslationStore) -> ContactService {
        ContactService::new(sender, Arc::new(store), "template_test", "sales@kakaobalkan.rs")
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_valid_form_passes() {
        assert_eq!(valid_form().validate(), Ok(()));
    }

    #[test]
    fn test_blank_required_fields() {
        let mut form = valid_form();
        form.message = "   ".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["ana", "ana@", "ana@example", "a na@example.rs", "@example.rs"] {
            let form = ContactForm {
                email: email.to_string(),
                ..valid_form()
            };
            assert_eq!(form.validate(), Err(ValidationError::InvalidEmail), "{}", email);
        }
    }

    // ==================== Payload Tests ====================

    #[test]
    fn test_payload_defaults_company() {
        let payload = EmailPayload::from_form(&valid_form(), "sales@kakaobalkan.rs");
        assert_eq!(payload.company, "Not specified");
        assert_eq!(payload.to_email, "sales@kakaobalkan.rs");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["from_name"], "Ana Petrović");
        assert_eq!(json["from_email"], "ana@example.rs");
    }

    #[test]
    fn test_payload_keeps_company() {
        let form = ContactForm {
            company: Some(" Slatko d.o.o. ".to_string()),
            ..valid_form()
        };
        assert_eq!(EmailPayload::from_form(&form, "x@y.rs").company, "Slatko d.o.o.");
    }

    #[test]
    fn test_status_categories() {
        assert!(matches!(
            SubmissionError::from_status(400, "bad".into()),
            SubmissionError::BadRequest { .. }
        ));
        assert!(matches!(SubmissionError::from_status(401, String::new()), SubmissionError::AuthFailed));
        assert!(matches!(SubmissionError::from_status(402, String::new()), SubmissionError::QuotaExceeded));
        assert!(matches!(
            SubmissionError::from_status(503, String::new()),
            SubmissionError::Other { status: 503, .. }
        ));
        assert!(SubmissionError::from_status(503, String::new()).is_retryable());
        assert!(!SubmissionError::from_status(402, String::new()).is_retryable());
    }

    // ==================== ContactService Tests ====================

    #[tokio::test]
    async fn test_invalid_form_never_reaches_sender() {
        let sender = FixedSender::new(None);
        let service = service(sender.clone(), TranslationStore::new(Language::ENGLISH));

        let form = ContactForm {
            email: "not-an-email".to_string(),
            ..valid_form()
        };
        let notification = service.submit_and_notify(&form).await;

        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "Please enter a valid email address.");
        assert_eq!(sender.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_notification() {
        let sender = FixedSender::new(None);
        let service = service(sender.clone(), TranslationStore::new(Language::ENGLISH));

        let notification = service.submit_and_notify(&valid_form()).await;

        assert_eq!(notification.kind, NotificationKind::Success);
        assert!(notification.message.starts_with("Thank you"));
        assert_eq!(sender.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_quota_notification_is_translated() {
        let store = TranslationStore::with_map(
            Language::SERBIAN,
            TranslationMap::from_value(json!({
                "contact": { "notifications": { "quota_exceeded": "Kvota je prekoračena." } }
            }))
            .unwrap(),
        );
        let service = service(FixedSender::new(Some(402)), store);

        let notification = service.submit_and_notify(&valid_form()).await;

        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "Kvota je prekoračena.");
    }

    #[tokio::test]
    async fn test_unknown_status_uses_generic_message() {
        let service = service(FixedSender::new(Some(418)), TranslationStore::new(Language::ENGLISH));

        let notification = service.submit_and_notify(&valid_form()).await;
        assert!(notification.message.starts_with("Sorry, there was an error"));
    }
}
