mod common;

use agency_console::app::screens::Screen;
use agency_console::core::resources::ResourceApi;
use agency_console::core::session::{PROFILE_KEY, TOKEN_KEY};
use agency_console::domain::model::BlogPost;
use agency_console::domain::ports::KeyValueStore;
use agency_console::{SiteError, Visit};
use anyhow::Result;
use common::{harness, logged_in};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn bearer_token_attached_only_when_stored() -> Result<()> {
    let server = MockServer::start();
    let authed = server.mock(|when, then| {
        when.method(GET)
            .path("/api/blog")
            .header("authorization", "Bearer test-token");
        then.status(200).json_body(json!([]));
    });

    let h = harness(&server, "/admin/blog");
    let api = ResourceApi::<BlogPost>::new(h.site.api().clone());

    // No token: the authed mock must not match.
    let err = api.list().await.unwrap_err();
    assert!(matches!(err, SiteError::Server { status: 404, .. }));
    assert_eq!(authed.hits(), 0);

    h.store.set(TOKEN_KEY, "test-token")?;
    assert!(api.list().await?.is_empty());
    authed.assert();
    Ok(())
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects_once() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/blog");
        then.status(401).json_body(json!({"message": "Token expired"}));
    });

    let h = logged_in(&server, "/admin/blog");
    let before = h.navigator.navigation_count();

    let err = ResourceApi::<BlogPost>::new(h.site.api().clone())
        .list()
        .await
        .unwrap_err();

    assert!(matches!(err, SiteError::Unauthorized));
    assert_eq!(h.store.get(TOKEN_KEY), None);
    assert_eq!(h.store.get(PROFILE_KEY), None);
    assert_eq!(h.navigator.navigation_count(), before + 1);
    assert_eq!(h.current_path(), "/admin/login?redirect=%2Fadmin%2Fblog");
    Ok(())
}

#[tokio::test]
async fn unauthorized_on_login_page_does_not_navigate() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/admin/login");
        then.status(401).json_body(json!({"message": "Invalid credentials"}));
    });

    let h = harness(&server, "/admin/login?redirect=%2Fadmin%2Fportfolio");
    let mut screen = h.site.login_screen();
    screen.mount().await;

    assert!(!screen.submit("riley@agency.test", "wrong").await);
    assert_eq!(h.navigator.navigation_count(), 0);
    assert_eq!(h.last_toast(), "Invalid email or password");
    Ok(())
}

#[tokio::test]
async fn login_persists_session_and_follows_redirect() -> Result<()> {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/api/admin/login")
            .json_body(json!({"email": "riley@agency.test", "password": "hunter22"}));
        then.status(200).json_body(json!({
            "success": true,
            "token": "jwt-abc",
            "admin": {"_id": "adm1", "name": "Riley", "email": "riley@agency.test"}
        }));
    });

    let h = harness(&server, "/admin/login?redirect=%2Fadmin%2Fportfolio");
    let mut screen = h.site.login_screen();
    screen.mount().await;

    assert!(screen.submit(" riley@agency.test ", "hunter22").await);
    login.assert();

    assert_eq!(h.store.get(TOKEN_KEY).as_deref(), Some("jwt-abc"));
    let profile = h.site.session().profile().expect("profile stored");
    assert_eq!(profile.display_name(), "Riley");
    assert_eq!(h.current_path(), "/admin/portfolio");
    Ok(())
}

#[tokio::test]
async fn login_without_redirect_goes_to_dashboard() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/admin/login");
        then.status(200)
            .json_body(json!({"token": "jwt-xyz", "admin": {"email": "ops@agency.test"}}));
    });

    let h = harness(&server, "/");
    let mut screen = h.site.login_screen();
    screen.mount().await;
    assert_eq!(h.current_path(), "/admin/login");

    assert!(screen.submit("ops@agency.test", "pw").await);
    assert_eq!(h.current_path(), "/admin");
    Ok(())
}

#[tokio::test]
async fn login_mounted_on_admin_page_returns_there() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/admin/login");
        then.status(200)
            .json_body(json!({"token": "jwt-blog", "admin": {"email": "ops@agency.test"}}));
    });

    let h = harness(&server, "/admin/blog");
    let mut screen = h.site.login_screen();
    screen.mount().await;
    assert_eq!(h.current_path(), "/admin/login?redirect=%2Fadmin%2Fblog");

    assert!(screen.submit("ops@agency.test", "pw").await);
    assert_eq!(h.current_path(), "/admin/blog");
    Ok(())
}

#[tokio::test]
async fn login_ignores_offsite_redirect() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/admin/login");
        then.status(200)
            .json_body(json!({"token": "t", "admin": {"email": "ops@agency.test"}}));
    });

    let h = harness(&server, "/admin/login?redirect=https%3A%2F%2Fevil.example");
    let mut screen = h.site.login_screen();
    assert!(screen.submit("ops@agency.test", "pw").await);
    assert_eq!(h.current_path(), "/admin");
    Ok(())
}

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let server = MockServer::start();
    let login = server.mock(|when, then| {
        when.method(POST).path("/api/admin/login");
        then.status(200);
    });

    let h = harness(&server, "/admin/login");
    let mut screen = h.site.login_screen();

    assert!(!screen.submit("ops@agency.test", "").await);
    assert_eq!(h.last_toast(), "Password is required");
    assert_eq!(login.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn guard_and_logout_round_trip() -> Result<()> {
    let server = MockServer::start();
    let h = logged_in(&server, "/");

    assert_eq!(
        h.site.visit("/admin/contacts"),
        Visit::Rendered(agency_console::core::router::Route::AdminContacts)
    );

    h.site.logout()?;
    assert_eq!(h.current_path(), "/admin/login");

    match h.site.visit("/admin/contacts") {
        Visit::Redirected { to, .. } => {
            assert_eq!(to, "/admin/login?redirect=%2Fadmin%2Fcontacts")
        }
        other => panic!("expected redirect, got {:?}", other),
    }
    assert_eq!(h.current_path(), "/admin/login?redirect=%2Fadmin%2Fcontacts");
    Ok(())
}

#[tokio::test]
async fn server_error_message_is_passed_through() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/blog/missing");
        then.status(404).json_body(json!({"success": false, "message": "Blog post not found"}));
    });

    let h = logged_in(&server, "/admin/blog");
    let err = ResourceApi::<BlogPost>::new(h.site.api().clone())
        .get("missing")
        .await
        .unwrap_err();

    assert_eq!(err.user_friendly_message(), "Blog post not found");
    assert!(h.site.session().is_authenticated());
    Ok(())
}
