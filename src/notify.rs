use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

/// User-facing, blocking notification. The call returns once the user has
/// been told.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn alert(&self, message: &str);
}

/// Writes alerts to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn alert(&self, message: &str) {
        info!("Alerting user: {}", message);
        eprintln!("alert: {}", message);
    }
}

/// Keeps every alert in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|alerts| alerts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}
