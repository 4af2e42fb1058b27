use super::{capitalize, LoadState, Screen};
use crate::core::lifecycle::ViewScope;
use crate::core::resources::ResourceApi;
use crate::core::toasts::Toasts;
use crate::domain::model::ImageFile;
use crate::domain::ports::{Confirm, Draft, Resource};
use crate::utils::error::Result;
use crate::utils::validation::require_field;
use async_trait::async_trait;
use std::sync::Arc;

/// List/create/edit/delete screen for one admin collection.
pub struct CrudScreen<R: Resource> {
    api: ResourceApi<R>,
    toasts: Arc<Toasts>,
    confirm: Arc<dyn Confirm>,
    scope: ViewScope,
    items: Vec<R>,
    state: LoadState,
}

impl<R: Resource> CrudScreen<R> {
    pub fn new(api: ResourceApi<R>, toasts: Arc<Toasts>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            api,
            toasts,
            confirm,
            scope: ViewScope::new(),
            items: Vec::new(),
            state: LoadState::Idle,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub async fn load(&mut self) {
        self.state = LoadState::Loading;

        match self.scope.run(self.api.list()).await {
            None => {
                tracing::debug!("Discarding {} list for unmounted view", R::LABEL);
                self.state = LoadState::Idle;
            }
            Some(Ok(items)) => {
                tracing::debug!("Loaded {} {}(s)", items.len(), R::LABEL);
                self.items = items;
                self.state = LoadState::Ready;
            }
            Some(Err(e)) => {
                tracing::warn!("Failed to load {}s: {}", R::LABEL, e);
                let message = format!("Failed to load {}s", R::LABEL);
                self.items.clear();
                self.toasts.error(message.clone());
                self.state = LoadState::Failed(message);
            }
        }
    }

    fn check_draft(draft: &R::Draft) -> Result<()> {
        require_field("title", "Title", draft.title())?;
        require_field("description", "Description", draft.description())?;
        Ok(())
    }

    /// Create (`editing == None`) or update. Returns the saved item, or
    /// `None` after reporting the failure as a toast.
    pub async fn save(
        &mut self,
        editing: Option<&str>,
        mut draft: R::Draft,
        image: Option<ImageFile>,
    ) -> Option<R> {
        if let Err(e) = Self::check_draft(&draft) {
            self.toasts.error(e.user_friendly_message());
            return None;
        }

        if let Some(image) = image {
            match self.scope.run(self.api.upload_image(&image)).await? {
                Ok(url) => draft.set_image(url),
                Err(e) => {
                    self.toasts
                        .error(format!("Image upload failed: {}", e.user_friendly_message()));
                    return None;
                }
            }
        }

        let result = match editing {
            Some(id) => self.scope.run(self.api.update(id, &draft)).await?,
            None => self.scope.run(self.api.create(&draft)).await?,
        };

        match result {
            Ok(saved) => {
                let verb = if editing.is_some() { "updated" } else { "created" };
                self.splice(saved.clone(), editing.is_none());
                self.toasts
                    .success(format!("{} {} successfully", capitalize(R::LABEL), verb));
                Some(saved)
            }
            Err(e) => {
                self.toasts.error(e.user_friendly_message());
                None
            }
        }
    }

    fn splice(&mut self, saved: R, created: bool) {
        match self.items.iter().position(|item| item.id() == saved.id()) {
            Some(index) => self.items[index] = saved,
            None if created => self.items.insert(0, saved),
            None => self.items.push(saved),
        }
    }

    /// Confirm, then delete. Returns true when the item was removed.
    pub async fn delete(&mut self, id: &str) -> bool {
        let prompt = format!("Are you sure you want to delete this {}?", R::LABEL);
        if !self.confirm.confirm(&prompt) {
            return false;
        }

        match self.scope.run(self.api.delete(id)).await {
            Some(Ok(())) => {
                self.items.retain(|item| item.id() != id);
                self.toasts
                    .success(format!("{} deleted successfully", capitalize(R::LABEL)));
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
impl<R: Resource> Screen for CrudScreen<R> {
    async fn mount(&mut self) {
        self.scope.renew();
        self.load().await;
    }

    fn unmount(&mut self) {
        self.scope.cancel();
    }
}
