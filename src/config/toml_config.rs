use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://agency-backend.onrender.com";
pub const DEFAULT_CONTACT_SUBJECT: &str = "New Contact Form Submission";

pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_ASSET_BASE_URL: &str = "ASSET_BASE_URL";
pub const ENV_NEWSLETTER_WEBHOOK_URL: &str = "NEWSLETTER_WEBHOOK_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub newsletter: NewsletterConfig,
    pub contact: ContactConfig,
    pub ui: UiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Prefix for uploaded `filePath`s; falls back to `base_url`.
    pub asset_base_url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            asset_base_url: None,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    pub webhook_url: Option<String>,
    pub source: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            source: "website-footer".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub default_subject: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            default_subject: DEFAULT_CONTACT_SUBJECT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub prefers_dark: bool,
    pub reveal_threshold: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            prefers_dark: false,
            reveal_threshold: crate::core::reveal::DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub state_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| SiteError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown vars are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SiteError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = lookup(ENV_API_BASE_URL) {
            self.api.base_url = base_url;
        }
        if let Some(asset_base_url) = lookup(ENV_ASSET_BASE_URL) {
            self.api.asset_base_url = Some(asset_base_url);
        }
        if let Some(webhook) = lookup(ENV_NEWSLETTER_WEBHOOK_URL) {
            self.newsletter.webhook_url = Some(webhook);
        }
    }

    pub fn state_dir(&self) -> PathBuf {
        self.storage.state_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("agency-console")
        })
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        if let Some(asset_base_url) = &self.api.asset_base_url {
            validate_url("api.asset_base_url", asset_base_url)?;
        }
        validate_positive_number("api.timeout_seconds", self.api.timeout_seconds, 1)?;
        if let Some(webhook) = &self.newsletter.webhook_url {
            validate_url("newsletter.webhook_url", webhook)?;
        }
        validate_range("ui.reveal_threshold", self.ui.reveal_threshold, 0.0, 1.0)?;
        Ok(())
    }
}
