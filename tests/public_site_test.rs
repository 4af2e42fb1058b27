mod common;

use agency_console::adapters::{FixedAnswer, RecordingViewport};
use agency_console::app::screens::{FeedState, Screen};
use agency_console::core::reveal::{IntersectionEntry, REVEAL_CLASS};
use agency_console::core::router::Route;
use agency_console::core::theme::Theme;
use agency_console::domain::ports::ElementId;
use agency_console::{Site, SiteError, Visit};
use anyhow::Result;
use common::{config_for, harness, harness_with};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test]
async fn public_blog_feed_requests_published_only() -> Result<()> {
    let server = MockServer::start();
    let feed_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/blog")
            .query_param("status", "published");
        then.status(200).json_body(json!([
            {"_id": "abc123", "title": "SEO in 2025", "status": "published", "readTime": "5 min"}
        ]));
    });

    let h = harness(&server, "/blog");
    let mut feed = h.site.blog_feed();
    feed.mount().await;

    feed_mock.assert();
    assert_eq!(feed.items().len(), 1);
    assert_eq!(feed.items()[0].extra.get("readTime"), Some(&json!("5 min")));
    Ok(())
}

#[tokio::test]
async fn public_feed_failure_renders_inline() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/portfolio");
        then.status(503);
    });

    let h = harness(&server, "/portfolio");
    let mut feed = h.site.portfolio_feed();
    feed.mount().await;

    assert_eq!(
        feed.state(),
        &FeedState::Failed("Failed to load portfolio items. Please try again later.".into())
    );
    assert!(h.site.toasts().drain().is_empty());
    Ok(())
}

#[tokio::test]
async fn cancelled_feed_returns_to_idle() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/blog");
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(json!([{"_id": "abc123", "title": "SEO in 2025"}]));
    });

    let h = harness(&server, "/blog");
    let mut feed = h.site.blog_feed();
    assert_eq!(feed.state(), &FeedState::Idle);
    let token = feed.scope().token();

    let task = tokio::spawn(async move {
        feed.load().await;
        feed
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    token.cancel();

    let feed = task.await?;
    assert_eq!(feed.state(), &FeedState::Idle);
    assert!(feed.items().is_empty());
    Ok(())
}

#[tokio::test]
async fn newsletter_posts_email_timestamp_and_source() -> Result<()> {
    let server = MockServer::start();
    let hook = server.mock(|when, then| {
        when.method(POST)
            .path("/macros/s/sheet/exec")
            .json_body_partial(r#"{"email": "fan@agency.test", "source": "blog-sidebar"}"#)
            .body_contains("\"timestamp\"");
        then.status(200).body("<html>ok</html>");
    });

    let mut config = config_for(&server);
    config.newsletter.webhook_url = Some(server.url("/macros/s/sheet/exec"));
    let h = harness_with(config, "/", true);

    h.site
        .newsletter()
        .subscribe("fan@agency.test", Some("blog-sidebar"))
        .await?;
    hook.assert();
    Ok(())
}

#[tokio::test]
async fn newsletter_rejects_bad_email_and_missing_webhook() -> Result<()> {
    let server = MockServer::start();
    let h = harness(&server, "/");

    let err = h.site.newsletter().subscribe("nope", None).await.unwrap_err();
    assert!(matches!(err, SiteError::Validation { .. }));

    let err = h
        .site
        .newsletter()
        .subscribe("fan@agency.test", None)
        .await
        .unwrap_err();
    assert!(matches!(err, SiteError::MissingConfigError { .. }));
    Ok(())
}

#[tokio::test]
async fn public_routes_render_without_session() -> Result<()> {
    let server = MockServer::start();
    let h = harness(&server, "/");

    assert_eq!(h.site.visit("/services"), Visit::Rendered(Route::Services));
    assert_eq!(
        h.site.visit("/blog/abc123"),
        Visit::Rendered(Route::BlogPost("abc123".into()))
    );
    assert!(matches!(
        h.site.visit("/admin"),
        Visit::Redirected { from: Route::AdminDashboard, .. }
    ));
    Ok(())
}

#[test]
fn theme_and_session_persist_across_restarts() -> Result<()> {
    let dir = TempDir::new()?;
    let mut config = agency_console::AppConfig::default();
    config.storage.state_dir = Some(dir.path().to_path_buf());
    config.ui.prefers_dark = true;

    {
        let mut site = Site::open(config.clone(), "/", Arc::new(FixedAnswer(true)))?;
        assert_eq!(site.theme().current(), Theme::Dark);
        site.theme_mut().toggle()?;
        site.session()
            .establish("persisted", &json!({"email": "ops@agency.test"}))?;
    }

    let site = Site::open(config, "/", Arc::new(FixedAnswer(true)))?;
    assert_eq!(site.theme().current(), Theme::Light);
    assert!(site.session().is_authenticated());
    assert_eq!(site.visit("/admin/blog"), Visit::Rendered(Route::AdminBlog));
    Ok(())
}

#[test]
fn reveal_registry_uses_configured_threshold() -> Result<()> {
    let server = MockServer::start();
    let mut config = config_for(&server);
    config.ui.reveal_threshold = 0.5;
    let h = harness_with(config, "/", true);

    let mut viewport = RecordingViewport::new();
    {
        let mut registry = h.site.reveal_registry(&mut viewport);
        registry.register(ElementId(1));
        registry.register(ElementId(2));

        let revealed = registry.handle_intersections(&[
            IntersectionEntry {
                target: ElementId(1),
                is_intersecting: true,
                ratio: 0.3,
            },
            IntersectionEntry {
                target: ElementId(2),
                is_intersecting: true,
                ratio: 0.6,
            },
        ]);
        assert_eq!(revealed, vec![ElementId(2)]);
    }

    assert!(viewport.classes_of(ElementId(1)).is_empty());
    assert_eq!(viewport.classes_of(ElementId(2)), [REVEAL_CLASS.to_string()]);
    assert!(viewport.is_disconnected());
    Ok(())
}
