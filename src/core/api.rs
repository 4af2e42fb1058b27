//! HTTP client for the agency backend.
//!
//! Every request goes through two hooks. Before sending, the stored bearer
//! token (if any) is attached. After receiving, a 401 wipes the session and
//! sends the user to the login page, then the error is still returned so the
//! caller's own handling runs.

use crate::config::ApiConfig;
use crate::core::router::{is_login_path, login_redirect_for};
use crate::core::session::AuthSession;
use crate::domain::model::{Envelope, ImageFile, UploadResponse};
use crate::domain::ports::Navigator;
use crate::utils::error::{Result, SiteError};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub const UPLOAD_FIELD: &str = "image";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    asset_base_url: String,
    session: AuthSession,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: AuthSession, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let asset_base_url = config
            .asset_base_url
            .as_deref()
            .unwrap_or(&config.base_url)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            asset_base_url,
            session,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Displayable URL for a `filePath` returned by an upload endpoint.
    pub fn asset_url(&self, file_path: &str) -> String {
        if file_path.starts_with("http://") || file_path.starts_with("https://") {
            return file_path.to_string();
        }
        format!("{}/{}", self.asset_base_url, file_path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(SiteError::Unauthorized);
        }

        if !status.is_success() {
            let message = error_message(response).await;
            return Err(SiteError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    fn handle_unauthorized(&self) {
        tracing::warn!("Received 401, clearing admin session");
        if let Err(e) = self.session.clear() {
            tracing::error!("Failed to clear session after 401: {}", e);
        }

        let current = self.navigator.current_path();
        if !is_login_path(&current) {
            self.navigator.navigate(&login_redirect_for(&current));
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
        Ok(envelope.into_inner())
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.dispatch(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    pub async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .dispatch(self.request(Method::GET, path).query(query))
            .await?;
        Self::decode(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .dispatch(self.request(Method::POST, path).json(body))
            .await?;
        Self::decode(response).await
    }

    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .dispatch(self.request(Method::PUT, path).json(body))
            .await?;
        Self::decode(response).await
    }

    /// POST whose response body is not needed.
    pub async fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.dispatch(self.request(Method::POST, path).json(body))
            .await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.dispatch(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    pub async fn upload(&self, path: &str, image: &ImageFile) -> Result<UploadResponse> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .dispatch(self.request(Method::POST, path).multipart(form))
            .await?;
        let upload: UploadResponse = Self::decode(response).await?;

        if !upload.success {
            return Err(SiteError::Server {
                status: StatusCode::OK.as_u16(),
                message: "Image upload failed".to_string(),
            });
        }
        tracing::info!("Uploaded {} to {}", image.file_name, upload.file_path);
        Ok(upload)
    }
}

async fn error_message(response: Response) -> String {
    let fallback = response
        .status()
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string();

    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("message")
            .or_else(|| body.get("error"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}
