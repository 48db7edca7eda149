use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};

/// Lifetime of one mounted page. Work started inside the scope is dropped
/// when the page unmounts.
#[derive(Debug, Clone)]
pub struct ViewScope {
    id: Uuid,
    page: &'static str,
    token: CancellationToken,
}

impl ViewScope {
    pub fn new(page: &'static str) -> Self {
        Self {
            id: Uuid::new_v4(),
            page,
            token: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn page(&self) -> &'static str {
        self.page
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn close(&self) {
        if !self.token.is_cancelled() {
            debug!("Closing {} view {}", self.page, self.id);
            self.token.cancel();
        }
    }

    /// Runs `fut` until it finishes or the scope closes, whichever is first.
    pub async fn run<F, T>(&self, fut: F) -> ClientResult<T>
    where
        F: Future<Output = T>,
    {
        if self.is_closed() {
            return Err(ClientError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ClientError::Cancelled),
            out = fut => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_completes_while_open() {
        let scope = ViewScope::new("test");
        let out = scope.run(async { 5 }).await.unwrap();
        assert_eq!(out, 5);
    }

    #[tokio::test]
    async fn test_close_interrupts_pending_work() {
        let scope = ViewScope::new("test");
        let closer = scope.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            closer.close();
        });

        let result = scope.run(tokio::time::sleep(Duration::from_secs(30))).await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert!(scope.is_closed());
    }

    #[tokio::test]
    async fn test_run_after_close_is_refused() {
        let scope = ViewScope::new("test");
        scope.close();
        assert!(matches!(
            scope.run(async { 1 }).await,
            Err(ClientError::Cancelled)
        ));
    }
}
