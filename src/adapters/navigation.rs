use crate::domain::ports::Navigator;
use std::sync::Mutex;

/// In-process history stack. The last entry is the current location.
#[derive(Debug)]
pub struct HistoryNavigator {
    stack: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            stack: Mutex::new(vec![start.into()]),
        }
    }

    pub fn history(&self) -> Vec<String> {
        self.stack
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of navigations made after the starting location.
    pub fn navigation_count(&self) -> usize {
        self.history().len().saturating_sub(1)
    }
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HistoryNavigator {
    fn current_path(&self) -> String {
        self.stack
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }

    fn navigate(&self, to: &str) {
        tracing::info!("Navigating to {}", to);
        self.stack
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(to.to_string());
    }
}
