use super::Screen;
use crate::core::api::ApiClient;
use crate::core::lifecycle::ViewScope;
use crate::core::resources;
use crate::core::router::{
    is_login_path, login_redirect_for, query_param, Route, ADMIN_HOME, LOGIN_PATH,
};
use crate::core::toasts::Toasts;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{is_local_path, require_field};
use async_trait::async_trait;
use std::sync::Arc;

pub struct LoginScreen {
    api: ApiClient,
    toasts: Arc<Toasts>,
    scope: ViewScope,
}

impl LoginScreen {
    pub fn new(api: ApiClient, toasts: Arc<Toasts>) -> Self {
        Self {
            api,
            toasts,
            scope: ViewScope::new(),
        }
    }

    /// Where to go after a successful login.
    pub fn redirect_target(&self) -> String {
        let current = self.api.navigator().current_path();
        query_param(&current, "redirect")
            .filter(|target| is_local_path(target))
            .unwrap_or_else(|| ADMIN_HOME.to_string())
    }

    fn check(email: &str, password: &str) -> Result<()> {
        require_field("email", "Email", email)?;
        require_field("password", "Password", password)?;
        Ok(())
    }

    /// Returns true once the session is stored and navigation happened.
    pub async fn submit(&mut self, email: &str, password: &str) -> bool {
        if let Err(e) = Self::check(email, password) {
            self.toasts.error(e.user_friendly_message());
            return false;
        }

        let target = self.redirect_target();
        let response = match self
            .scope
            .run(resources::login(&self.api, email, password))
            .await
        {
            None => return false,
            Some(Ok(response)) => response,
            Some(Err(SiteError::Unauthorized)) => {
                self.toasts.error("Invalid email or password");
                return false;
            }
            Some(Err(e)) => {
                self.toasts.error(e.user_friendly_message());
                return false;
            }
        };

        if let Err(e) = self.api.session().establish(&response.token, &response.admin) {
            tracing::error!("Could not persist session: {}", e);
            self.toasts.error(e.user_friendly_message());
            return false;
        }

        tracing::info!("Admin {} logged in", email.trim());
        self.toasts.success("Login successful");
        self.api.navigator().navigate(&target);
        true
    }
}

#[async_trait]
impl Screen for LoginScreen {
    async fn mount(&mut self) {
        self.scope.renew();
        let navigator = self.api.navigator();
        let current = navigator.current_path();
        if is_login_path(&current) {
            return;
        }

        // Coming from an admin page: return there after login.
        if Route::from_path(&current).is_protected() {
            navigator.navigate(&login_redirect_for(&current));
        } else {
            navigator.navigate(LOGIN_PATH);
        }
    }

    fn unmount(&mut self) {
        self.scope.cancel();
    }
}
