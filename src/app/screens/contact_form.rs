use crate::core::lifecycle::ViewScope;
use crate::core::resources::ContactApi;
use crate::core::router::THANK_YOU_PATH;
use crate::core::toasts::Toasts;
use crate::domain::model::ContactSubmission;
use crate::domain::ports::Navigator;
use crate::utils::error::Result;
use crate::utils::validation::{require_email, require_field};
use std::sync::Arc;

/// Public contact form. Field values are public so callers can bind to them.
pub struct ContactForm {
    api: ContactApi,
    navigator: Arc<dyn Navigator>,
    toasts: Arc<Toasts>,
    scope: ViewScope,
    default_subject: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        api: ContactApi,
        navigator: Arc<dyn Navigator>,
        toasts: Arc<Toasts>,
        default_subject: impl Into<String>,
    ) -> Self {
        Self {
            api,
            navigator,
            toasts,
            scope: ViewScope::new(),
            default_subject: default_subject.into(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            message: String::new(),
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    fn check(&self) -> Result<()> {
        require_field("name", "Name", &self.name)?;
        require_email("email", &self.email)?;
        require_field("message", "Message", &self.message)?;
        Ok(())
    }

    fn submission(&self) -> ContactSubmission {
        let phone = self.phone.trim();
        ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            message: self.message.trim().to_string(),
            subject: self.default_subject.clone(),
        }
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.message.clear();
    }

    pub async fn submit(&mut self) -> bool {
        if let Err(e) = self.check() {
            self.toasts.error(e.user_friendly_message());
            return false;
        }

        let submission = self.submission();
        match self.scope.run(self.api.submit(&submission)).await {
            Some(Ok(())) => {
                self.reset();
                self.toasts
                    .success("Thank you! Your message has been sent successfully.");
                self.navigator.navigate(THANK_YOU_PATH);
                true
            }
            Some(Err(e)) => {
                self.toasts.error(format!(
                    "Failed to send message: {}",
                    e.user_friendly_message()
                ));
                false
            }
            None => false,
        }
    }
}
