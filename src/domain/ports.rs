use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Durable string key/value storage shared by the session and theme stores.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Where the user currently is, and a way to send them elsewhere.
pub trait Navigator: Send + Sync {
    /// Path plus query string, e.g. `/admin/login?redirect=%2Fadmin`.
    fn current_path(&self) -> String;
    fn navigate(&self, to: &str);
}

/// Blocking yes/no prompt before destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Opaque handle to a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// The viewport-observation surface the reveal registry drives.
pub trait ViewportHost {
    fn observe(&mut self, element: ElementId);
    fn unobserve(&mut self, element: ElementId);
    fn disconnect(&mut self);
    fn add_class(&mut self, element: ElementId, class: &str);
}

/// Form payload for a create or update call.
pub trait Draft: Serialize + Send + Sync {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn set_image(&mut self, url: String);
}

/// A remote collection with the standard list/get/create/update/delete shape.
pub trait Resource: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    type Draft: Draft;

    const COLLECTION: &'static str;
    const LABEL: &'static str;

    fn id(&self) -> &str;

    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::COLLECTION, id)
    }

    fn upload_path() -> String {
        format!("{}/upload-image", Self::COLLECTION)
    }
}
