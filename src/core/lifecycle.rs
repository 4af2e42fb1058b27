use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Lifetime of a mounted view. Responses that resolve after the view was
/// unmounted are dropped instead of being applied.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that can unmount the view from another task.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// A fresh scope for a remount.
    pub fn renew(&mut self) {
        if self.token.is_cancelled() {
            self.token = CancellationToken::new();
        }
    }

    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = fut => {
                if self.token.is_cancelled() {
                    None
                } else {
                    Some(out)
                }
            }
        }
    }
}
