// Adapters layer: concrete implementations of the domain ports.

pub mod dialog;
pub mod navigation;
pub mod storage;
pub mod viewport;

pub use dialog::{FixedAnswer, PromptConfirm};
pub use navigation::HistoryNavigator;
pub use storage::{FileStore, MemoryStore};
pub use viewport::RecordingViewport;
