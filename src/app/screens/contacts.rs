use super::{LoadState, Screen};
use crate::core::lifecycle::ViewScope;
use crate::core::resources::ContactApi;
use crate::core::toasts::Toasts;
use crate::domain::model::ContactMessage;
use crate::domain::ports::Confirm;
use crate::utils::validation::require_field;
use async_trait::async_trait;
use std::sync::Arc;

pub struct ContactsScreen {
    api: ContactApi,
    toasts: Arc<Toasts>,
    confirm: Arc<dyn Confirm>,
    scope: ViewScope,
    messages: Vec<ContactMessage>,
    state: LoadState,
}

impl ContactsScreen {
    pub fn new(api: ContactApi, toasts: Arc<Toasts>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api,
            toasts,
            confirm,
            scope: ViewScope::new(),
            messages: Vec::new(),
            state: LoadState::Idle,
        }
    }

    pub fn messages(&self) -> &[ContactMessage] {
        &self.messages
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub async fn load(&mut self) {
        self.state = LoadState::Loading;

        match self.scope.run(self.api.list()).await {
            None => self.state = LoadState::Idle,
            Some(Ok(messages)) => {
                self.messages = messages;
                self.state = LoadState::Ready;
            }
            Some(Err(e)) => {
                tracing::warn!("Failed to load contact messages: {}", e);
                let message = "Failed to load contact messages".to_string();
                self.messages.clear();
                self.toasts.error(message.clone());
                self.state = LoadState::Failed(message);
            }
        }
    }

    pub async fn reply(&mut self, id: &str, message: &str) -> bool {
        if let Err(e) = require_field("message", "Reply message", message) {
            self.toasts.error(e.user_friendly_message());
            return false;
        }

        match self.scope.run(self.api.reply(id, message)).await {
            Some(Ok(())) => {
                self.toasts.success("Reply sent successfully");
                true
            }
            Some(Err(e)) => {
                self.toasts.error(e.user_friendly_message());
                false
            }
            None => false,
        }
    }

    pub async fn set_status(&mut self, id: &str, status: &str) -> bool {
        match self.scope.run(self.api.set_status(id, status)).await {
            Some(Ok(updated)) => {
                if let Some(slot) = self.messages.iter_mut().find(|m| m.id == id) {
                    *slot = updated;
                }
                self.toasts.success(format!("Message marked as {}", status));
                true
            }
            Some(Err(e)) => {
                self.toasts.error(e.user_friendly_message());
                false
            }
            None => false,
        }
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this message?")
        {
            return false;
        }

        match self.scope.run(self.api.delete(id)).await {
            Some(Ok(())) => {
                self.messages.retain(|m| m.id != id);
                self.toasts.success("Message deleted successfully");
                true
            }
            Some(Err(e)) => {
                self.toasts.error(e.user_friendly_message());
                false
            }
            None => false,
        }
    }
}

#[async_trait]
impl Screen for ContactsScreen {
    async fn mount(&mut self) {
        self.scope.renew();
        self.load().await;
    }

    fn unmount(&mut self) {
        self.scope.cancel();
    }
}
