#![allow(dead_code)]

use agency_console::adapters::{FixedAnswer, HistoryNavigator, MemoryStore};
use agency_console::core::session::{PROFILE_KEY, TOKEN_KEY};
use agency_console::domain::ports::{KeyValueStore, Navigator};
use agency_console::{AppConfig, Site};
use httpmock::MockServer;
use std::sync::Arc;

pub struct Harness {
    pub site: Site,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<HistoryNavigator>,
}

impl Harness {
    pub fn current_path(&self) -> String {
        self.navigator.current_path()
    }

    pub fn last_toast(&self) -> String {
        self.site
            .toasts()
            .last()
            .map(|t| t.message)
            .unwrap_or_default()
    }
}

pub fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = server.base_url();
    config.api.asset_base_url = Some("https://cdn.agency.test".to_string());
    config.api.timeout_seconds = 5;
    config
}

pub fn harness_with(config: AppConfig, start: &str, confirm: bool) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let navigator = Arc::new(HistoryNavigator::new(start));

    let site = Site::bootstrap(
        config,
        store.clone() as Arc<dyn KeyValueStore>,
        navigator.clone() as Arc<dyn Navigator>,
        Arc::new(FixedAnswer(confirm)),
    )
    .expect("site bootstrap");

    Harness {
        site,
        store,
        navigator,
    }
}

pub fn harness(server: &MockServer, start: &str) -> Harness {
    harness_with(config_for(server), start, true)
}

pub fn logged_in(server: &MockServer, start: &str) -> Harness {
    let h = harness(server, start);
    h.store.set(TOKEN_KEY, "test-token").unwrap();
    h.store
        .set(PROFILE_KEY, r#"{"_id":"adm1","name":"Riley","email":"riley@agency.test"}"#)
        .unwrap();
    h
}
