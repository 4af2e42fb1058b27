//! Application shell: builds every shared service once and hands them to
//! screens explicitly.

use crate::adapters::{FileStore, HistoryNavigator};
use crate::app::screens::{ContactForm, ContactsScreen, CrudScreen, LoginScreen, PublicFeed};
use crate::config::AppConfig;
use crate::core::api::ApiClient;
use crate::core::newsletter::NewsletterClient;
use crate::core::resources::{ContactApi, ResourceApi};
use crate::core::reveal::RevealRegistry;
use crate::core::router::{GuardDecision, Route, RouteGuard, LOGIN_PATH};
use crate::core::session::AuthSession;
use crate::core::theme::ThemeStore;
use crate::core::toasts::Toasts;
use crate::domain::model::{BlogPost, PortfolioItem};
use crate::domain::ports::{Confirm, KeyValueStore, Navigator, ViewportHost};
use crate::utils::error::Result;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    Rendered(Route),
    Redirected { from: Route, to: String },
}

pub struct Site {
    config: AppConfig,
    session: AuthSession,
    theme: ThemeStore,
    api: ApiClient,
    navigator: Arc<dyn Navigator>,
    toasts: Arc<Toasts>,
    confirm: Arc<dyn Confirm>,
}

impl Site {
    pub fn bootstrap(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
        confirm: Arc<dyn Confirm>,
    ) -> Result<Self> {
        let session = AuthSession::new(store.clone());
        let theme = ThemeStore::load(store, config.ui.prefers_dark);
        let api = ApiClient::new(&config.api, session.clone(), navigator.clone())?;

        tracing::debug!(
            "Site ready: api={} theme={} authenticated={}",
            api.base_url(),
            theme.current(),
            session.is_authenticated()
        );

        Ok(Self {
            config,
            session,
            theme,
            api,
            navigator,
            toasts: Arc::new(Toasts::new()),
            confirm,
        })
    }

    /// File-backed state under the configured state directory.
    pub fn open(config: AppConfig, start: &str, confirm: Arc<dyn Confirm>) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(config.state_dir())?);
        let navigator: Arc<dyn Navigator> = Arc::new(HistoryNavigator::new(start));
        Self::bootstrap(config, store, navigator, confirm)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeStore {
        &mut self.theme
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn toasts(&self) -> &Arc<Toasts> {
        &self.toasts
    }

    /// Navigate to `path` and run the route guard on it.
    pub fn visit(&self, path: &str) -> Visit {
        let route = Route::from_path(path);
        self.navigator.navigate(path);

        match RouteGuard::check(&self.session, path) {
            GuardDecision::Render => Visit::Rendered(route),
            GuardDecision::Redirect(to) => {
                tracing::info!("{} requires login, redirecting", path);
                self.navigator.navigate(&to);
                Visit::Redirected { from: route, to }
            }
        }
    }

    pub fn logout(&self) -> Result<()> {
        self.session.clear()?;
        self.toasts.info("Logged out");
        self.navigator.navigate(LOGIN_PATH);
        Ok(())
    }

    pub fn blog_screen(&self) -> CrudScreen<BlogPost> {
        CrudScreen::new(
            ResourceApi::new(self.api.clone()),
            self.toasts.clone(),
            self.confirm.clone(),
        )
    }

    pub fn portfolio_screen(&self) -> CrudScreen<PortfolioItem> {
        CrudScreen::new(
            ResourceApi::new(self.api.clone()),
            self.toasts.clone(),
            self.confirm.clone(),
        )
    }

    pub fn contacts_screen(&self) -> ContactsScreen {
        ContactsScreen::new(
            ContactApi::new(self.api.clone()),
            self.toasts.clone(),
            self.confirm.clone(),
        )
    }

    pub fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(self.api.clone(), self.toasts.clone())
    }

    pub fn contact_form(&self) -> ContactForm {
        ContactForm::new(
            ContactApi::new(self.api.clone()),
            self.navigator.clone(),
            self.toasts.clone(),
            self.config.contact.default_subject.clone(),
        )
    }

    pub fn blog_feed(&self) -> PublicFeed<BlogPost> {
        PublicFeed::new(ResourceApi::new(self.api.clone()))
    }

    pub fn portfolio_feed(&self) -> PublicFeed<PortfolioItem> {
        PublicFeed::new(ResourceApi::new(self.api.clone()))
    }

    pub fn newsletter(&self) -> NewsletterClient {
        NewsletterClient::new(&self.config.newsletter)
    }

    pub fn reveal_registry<H: ViewportHost>(&self, host: H) -> RevealRegistry<H> {
        RevealRegistry::new(host, self.config.ui.reveal_threshold)
    }
}
