use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Class applied to the document root.
    pub fn css_class(self) -> &'static str {
        self.as_str()
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_preference(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

pub struct ThemeStore {
    store: Arc<dyn KeyValueStore>,
    current: Theme,
}

impl ThemeStore {
    pub fn load(store: Arc<dyn KeyValueStore>, prefers_dark: bool) -> Self {
        let current = store
            .get(THEME_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(|| Theme::from_preference(prefers_dark));

        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn is_dark(&self) -> bool {
        self.current == Theme::Dark
    }

    pub fn set(&mut self, theme: Theme) -> Result<()> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.current = theme;
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.current.toggled();
        self.set(next)?;
        tracing::info!("Theme switched to {}", next);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;

    #[test]
    fn falls_back_to_system_preference() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        assert_eq!(ThemeStore::load(store.clone(), true).current(), Theme::Dark);
        assert_eq!(ThemeStore::load(store, false).current(), Theme::Light);
    }

    #[test]
    fn stored_value_beats_preference() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(ThemeStore::load(store, true).current(), Theme::Light);
    }

    #[test]
    fn garbage_in_storage_is_ignored() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(ThemeStore::load(store, true).current(), Theme::Dark);
    }

    #[test]
    fn double_toggle_restores_stored_value() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store.set(THEME_KEY, "dark").unwrap();
        let mut theme = ThemeStore::load(store.clone(), false);

        assert_eq!(theme.toggle().unwrap(), Theme::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(theme.toggle().unwrap(), Theme::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(theme.current().css_class(), "dark");
    }
}
