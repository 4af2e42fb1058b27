use super::Screen;
use crate::core::lifecycle::ViewScope;
use crate::core::resources::ResourceApi;
use crate::domain::ports::Resource;
use async_trait::async_trait;

pub const PUBLISHED: &str = "published";

#[derive(Debug, Clone, PartialEq)]
pub enum FeedState<R> {
    Idle,
    Loading,
    Loaded(Vec<R>),
    Failed(String),
}

/// Read-only list of published items on the marketing pages. Failures are
/// rendered inline rather than as toasts.
pub struct PublicFeed<R: Resource> {
    api: ResourceApi<R>,
    scope: ViewScope,
    state: FeedState<R>,
}

impl<R: Resource> PublicFeed<R> {
    pub fn new(api: ResourceApi<R>) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            state: FeedState::Idle,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn state(&self) -> &FeedState<R> {
        &self.state
    }

    pub fn items(&self) -> &[R] {
        match &self.state {
            FeedState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub async fn load(&mut self) {
        self.state = FeedState::Loading;

        match self.scope.run(self.api.list_by_status(PUBLISHED)).await {
            None => self.state = FeedState::Idle,
            Some(Ok(items)) => self.state = FeedState::Loaded(items),
            Some(Err(e)) => {
                tracing::warn!("Public {} feed failed: {}", R::LABEL, e);
                self.state = FeedState::Failed(format!(
                    "Failed to load {}s. Please try again later.",
                    R::LABEL
                ));
            }
        }
    }
}

#[async_trait]
impl<R: Resource> Screen for PublicFeed<R> {
    async fn mount(&mut self) {
        self.scope.renew();
        self.load().await;
    }

    fn unmount(&mut self) {
        self.scope.cancel();
    }
}
