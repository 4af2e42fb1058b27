use crate::config::NewsletterConfig;
use crate::domain::model::NewsletterSignup;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::require_email;
use chrono::{SecondsFormat, Utc};
use reqwest::Client;

/// Fire-and-forget signup to the spreadsheet webhook.
#[derive(Clone)]
pub struct NewsletterClient {
    client: Client,
    webhook_url: Option<String>,
    default_source: String,
}

impl NewsletterClient {
    pub fn new(config: &NewsletterConfig) -> Self {
        Self {
            client: Client::new(),
            webhook_url: config.webhook_url.clone(),
            default_source: config.source.clone(),
        }
    }

    pub async fn subscribe(&self, email: &str, source: Option<&str>) -> Result<()> {
        require_email("email", email)?;

        let url = self
            .webhook_url
            .as_deref()
            .ok_or_else(|| SiteError::MissingConfigError {
                field: "newsletter.webhook_url".to_string(),
            })?;

        let signup = NewsletterSignup {
            email: email.trim().to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            source: source.unwrap_or(&self.default_source).to_string(),
        };

        // The webhook's response is opaque; only transport failures matter.
        let response = self.client.post(url).json(&signup).send().await?;
        tracing::debug!("Newsletter webhook answered {}", response.status());
        tracing::info!("Subscribed {} from {}", signup.email, signup.source);
        Ok(())
    }
}
