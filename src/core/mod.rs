pub mod api;
pub mod lifecycle;
pub mod newsletter;
pub mod resources;
pub mod reveal;
pub mod router;
pub mod session;
pub mod theme;
pub mod toasts;

pub use crate::domain::model::{BlogPost, ContactMessage, PortfolioItem};
pub use crate::domain::ports::{Confirm, KeyValueStore, Navigator, Resource, ViewportHost};
pub use crate::utils::error::Result;
