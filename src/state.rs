use std::sync::Arc;
use tokio::sync::RwLock;

use crate::api::AdminApi;
use crate::config::Config;
use crate::notify::Notifier;

/// Collaborators shared by every page: configuration, the API, the notifier.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub api: Arc<dyn AdminApi>,
    pub notifier: Arc<dyn Notifier>,
    pub stats: Arc<RwLock<ClientStats>>,
}

impl AppContext {
    pub fn new(config: Config, api: Arc<dyn AdminApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            config: Arc::new(config),
            api,
            notifier,
            stats: Arc::new(RwLock::new(ClientStats::default())),
        }
    }

    pub async fn record_request(&self) {
        self.stats.write().await.requests_sent += 1;
    }

    pub async fn record_api_error(&self) {
        self.stats.write().await.api_errors += 1;
    }

    pub async fn record_transport_error(&self) {
        self.stats.write().await.transport_errors += 1;
    }

    pub async fn record_discarded(&self) {
        self.stats.write().await.discarded_responses += 1;
    }

    pub async fn get_stats(&self) -> ClientStats {
        self.stats.read().await.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientStats {
    pub requests_sent: u64,
    pub api_errors: u64,
    pub transport_errors: u64,
    /// Stale or post-unmount responses that were dropped.
    pub discarded_responses: u64,
}
