pub mod contact_form;
pub mod contacts;
pub mod crud;
pub mod login;
pub mod public;

pub use contact_form::ContactForm;
pub use contacts::ContactsScreen;
pub use crud::CrudScreen;
pub use login::LoginScreen;
pub use public::{FeedState, PublicFeed};

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// A view with a mount/unmount lifetime. Unmounting cancels anything the
/// view still has in flight.
#[async_trait]
pub trait Screen: Send {
    async fn mount(&mut self);
    fn unmount(&mut self);
}

pub(crate) fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
