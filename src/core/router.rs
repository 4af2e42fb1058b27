use crate::core::session::AuthSession;
use url::form_urlencoded;

pub const LOGIN_PATH: &str = "/admin/login";
pub const ADMIN_HOME: &str = "/admin";
pub const THANK_YOU_PATH: &str = "/thank-you";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Services,
    Portfolio,
    Blog,
    BlogPost(String),
    Contact,
    ThankYou,
    AdminLogin,
    AdminDashboard,
    AdminBlog,
    AdminPortfolio,
    AdminContacts,
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let path = strip_query(path);
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["services"] => Route::Services,
            ["portfolio"] => Route::Portfolio,
            ["blog"] => Route::Blog,
            ["blog", id] => Route::BlogPost((*id).to_string()),
            ["contact"] => Route::Contact,
            ["thank-you"] => Route::ThankYou,
            ["admin", "login"] => Route::AdminLogin,
            ["admin"] | ["admin", "dashboard"] => Route::AdminDashboard,
            ["admin", "blog"] => Route::AdminBlog,
            ["admin", "portfolio"] => Route::AdminPortfolio,
            ["admin", "contacts"] => Route::AdminContacts,
            _ => Route::NotFound,
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::AdminDashboard | Route::AdminBlog | Route::AdminPortfolio | Route::AdminContacts
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Services => "Services",
            Route::Portfolio => "Portfolio",
            Route::Blog => "Blog",
            Route::BlogPost(_) => "Blog Post",
            Route::Contact => "Contact",
            Route::ThankYou => "Thank You",
            Route::AdminLogin => "Admin Login",
            Route::AdminDashboard => "Dashboard",
            Route::AdminBlog => "Manage Blog",
            Route::AdminPortfolio => "Manage Portfolio",
            Route::AdminContacts => "Contact Messages",
            Route::NotFound => "Not Found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(String),
}

pub struct RouteGuard;

impl RouteGuard {
    /// Optimistic, presence-only check. Stale tokens pass and are caught by
    /// the first 401 from the backend.
    pub fn check(session: &AuthSession, requested: &str) -> GuardDecision {
        let route = Route::from_path(requested);
        if !route.is_protected() || session.is_authenticated() {
            return GuardDecision::Render;
        }
        GuardDecision::Redirect(login_redirect_for(requested))
    }
}

pub fn login_redirect_for(requested: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(requested.as_bytes()).collect();
    format!("{}?redirect={}", LOGIN_PATH, encoded)
}

pub fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

pub fn query_param(path: &str, name: &str) -> Option<String> {
    let (_, query) = path.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

pub fn is_login_path(path: &str) -> bool {
    strip_query(path).trim_end_matches('/') == LOGIN_PATH
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::ports::KeyValueStore;
    use crate::core::session::{PROFILE_KEY, TOKEN_KEY};
    use std::sync::Arc;

    #[test]
    fn maps_paths() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/services/"), Route::Services);
        assert_eq!(Route::from_path("/blog/abc123"), Route::BlogPost("abc123".into()));
        assert_eq!(Route::from_path("/admin/blog?tab=drafts"), Route::AdminBlog);
        assert_eq!(Route::from_path("/admin/login?redirect=%2Fadmin"), Route::AdminLogin);
        assert_eq!(Route::from_path("/pricing"), Route::NotFound);
    }

    #[test]
    fn only_admin_pages_are_protected() {
        assert!(Route::AdminContacts.is_protected());
        assert!(Route::AdminDashboard.is_protected());
        assert!(!Route::AdminLogin.is_protected());
        assert!(!Route::Blog.is_protected());
    }

    #[test]
    fn guard_redirects_with_encoded_origin() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = AuthSession::new(store.clone());

        assert_eq!(
            RouteGuard::check(&session, "/admin/portfolio"),
            GuardDecision::Redirect("/admin/login?redirect=%2Fadmin%2Fportfolio".into())
        );
        assert_eq!(RouteGuard::check(&session, "/contact"), GuardDecision::Render);

        store.set(TOKEN_KEY, "t").unwrap();
        assert!(matches!(
            RouteGuard::check(&session, "/admin"),
            GuardDecision::Redirect(_)
        ));

        store.set(PROFILE_KEY, "{}").unwrap();
        assert_eq!(RouteGuard::check(&session, "/admin"), GuardDecision::Render);
    }

    #[test]
    fn redirect_round_trips_through_query() {
        let target = login_redirect_for("/admin/blog?draft=1");
        assert_eq!(query_param(&target, "redirect").as_deref(), Some("/admin/blog?draft=1"));
        assert_eq!(query_param("/admin/login", "redirect"), None);
    }

    #[test]
    fn detects_login_path() {
        assert!(is_login_path("/admin/login"));
        assert!(is_login_path("/admin/login?redirect=%2Fadmin"));
        assert!(!is_login_path("/admin"));
    }
}
