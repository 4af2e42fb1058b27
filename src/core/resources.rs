use crate::core::api::ApiClient;
use crate::domain::model::{
    ContactMessage, ContactReply, ContactSubmission, ImageFile, LoginRequest, LoginResponse,
    StatusUpdate,
};
use crate::domain::ports::Resource;
use crate::utils::error::Result;
use std::marker::PhantomData;

pub const LOGIN_ENDPOINT: &str = "/api/admin/login";
pub const CONTACT_ENDPOINT: &str = "/api/contact";

pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<LoginResponse> {
    let request = LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };
    api.post_json(LOGIN_ENDPOINT, &request).await
}

/// Typed access to one REST collection.
pub struct ResourceApi<R: Resource> {
    api: ApiClient,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceApi<R> {
    fn clone(&self) -> Self {
        Self::new(self.api.clone())
    }
}

impl<R: Resource> ResourceApi<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _marker: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.api
    }

    pub async fn list(&self) -> Result<Vec<R>> {
        self.api.get_json(R::COLLECTION).await
    }

    pub async fn list_by_status(&self, status: &str) -> Result<Vec<R>> {
        self.api
            .get_json_query(R::COLLECTION, &[("status", status)])
            .await
    }

    pub async fn get(&self, id: &str) -> Result<R> {
        self.api.get_json(&R::item_path(id)).await
    }

    pub async fn create(&self, draft: &R::Draft) -> Result<R> {
        let created: R = self.api.post_json(R::COLLECTION, draft).await?;
        tracing::info!("Created {} {}", R::LABEL, created.id());
        Ok(created)
    }

    pub async fn update(&self, id: &str, draft: &R::Draft) -> Result<R> {
        let updated: R = self.api.put_json(&R::item_path(id), draft).await?;
        tracing::info!("Updated {} {}", R::LABEL, id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&R::item_path(id)).await?;
        tracing::info!("Deleted {} {}", R::LABEL, id);
        Ok(())
    }

    /// Upload and return the displayable URL.
    pub async fn upload_image(&self, image: &ImageFile) -> Result<String> {
        let uploaded = self.api.upload(&R::upload_path(), image).await?;
        Ok(self.api.asset_url(&uploaded.file_path))
    }
}

#[derive(Clone)]
pub struct ContactApi {
    api: ApiClient,
}

impl ContactApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn submit(&self, submission: &ContactSubmission) -> Result<()> {
        self.api.post_discard(CONTACT_ENDPOINT, submission).await?;
        tracing::info!("Contact message submitted by {}", submission.email);
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<ContactMessage>> {
        self.api.get_json(CONTACT_ENDPOINT).await
    }

    pub async fn reply(&self, id: &str, message: &str) -> Result<()> {
        let body = ContactReply {
            message: message.to_string(),
        };
        self.api
            .post_discard(&format!("{}/{}/reply", CONTACT_ENDPOINT, id), &body)
            .await
    }

    pub async fn set_status(&self, id: &str, status: &str) -> Result<ContactMessage> {
        let body = StatusUpdate {
            status: status.to_string(),
        };
        self.api
            .put_json(&format!("{}/{}/status", CONTACT_ENDPOINT, id), &body)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api
            .delete(&format!("{}/{}", CONTACT_ENDPOINT, id))
            .await
    }
}
