use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session expired or not authorized")]
    Unauthorized,

    #[error("Server responded with {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Auth,
    Validation,
    Server,
    Config,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        SiteError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::Http(_) => ErrorCategory::Network,
            SiteError::Unauthorized => ErrorCategory::Auth,
            SiteError::Validation { .. } => ErrorCategory::Validation,
            SiteError::Server { .. } | SiteError::Serialization(_) => ErrorCategory::Server,
            SiteError::ConfigError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::MissingConfigError { .. } => ErrorCategory::Config,
            SiteError::Io(_) | SiteError::Storage { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network | ErrorCategory::Auth => ErrorSeverity::Medium,
            ErrorCategory::Server => ErrorSeverity::High,
            ErrorCategory::Config | ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// Text suitable for a toast.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::Http(_) => "Network error. Please check your connection.".to_string(),
            SiteError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            SiteError::Server { message, .. } => message.clone(),
            SiteError::Validation { message, .. } => message.clone(),
            SiteError::Serialization(_) => "Unexpected response from server.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the API base URL is reachable and try again",
            ErrorCategory::Auth => "Run `agency-console login` to start a new session",
            ErrorCategory::Validation => "Fill in the required fields and resubmit",
            ErrorCategory::Server => "Inspect the server message; the backend rejected the request",
            ErrorCategory::Config => "Review the config file and environment overrides",
            ErrorCategory::Storage => "Make sure the state directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
