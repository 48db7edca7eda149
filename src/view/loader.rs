use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::api::AdminApi;
use crate::error::{ClientError, ClientResult};
use crate::state::AppContext;
use crate::view::scope::ViewScope;

/// A server-side entity a page loads by id.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Value: Clone + Default + Send + Sync + 'static;

    fn name(&self) -> &'static str;

    async fn fetch(&self, api: &dyn AdminApi, id: Option<i64>) -> ClientResult<Self::Value>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response replaced local state.
    Applied,
    /// A newer response had already been applied; this one was dropped.
    Stale,
    /// The server answered with an error, which was shown to the user.
    Rejected(String),
    /// `mount` had already run.
    AlreadyMounted,
}

struct Slot<T> {
    value: T,
    applied_seq: u64,
}

/// Fetches one resource and keeps the latest copy as local state.
pub struct ResourceLoader<R: Resource> {
    resource: R,
    ctx: AppContext,
    id: Option<i64>,
    scope: ViewScope,
    mounted: AtomicBool,
    issued_seq: AtomicU64,
    slot: RwLock<Slot<R::Value>>,
}

impl<R: Resource> ResourceLoader<R> {
    pub fn new(resource: R, ctx: AppContext, id: Option<i64>, scope: ViewScope) -> Self {
        Self {
            resource,
            ctx,
            id,
            scope,
            mounted: AtomicBool::new(false),
            issued_seq: AtomicU64::new(0),
            slot: RwLock::new(Slot {
                value: R::Value::default(),
                applied_seq: 0,
            }),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// First load. Only the first call per loader sends a request.
    pub async fn mount(&self) -> ClientResult<LoadOutcome> {
        if self.mounted.swap(true, Ordering::SeqCst) {
            debug!("{} already mounted, skipping fetch", self.resource.name());
            return Ok(LoadOutcome::AlreadyMounted);
        }

        info!(
            "Mounting {} (id: {:?}, view: {})",
            self.resource.name(),
            self.id,
            self.scope.id()
        );
        self.refresh().await
    }

    pub async fn refresh(&self) -> ClientResult<LoadOutcome> {
        if self.scope.is_closed() {
            return Err(ClientError::Cancelled);
        }

        let seq = self.issued_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.ctx.record_request().await;
        debug!("Fetching {} #{} (id: {:?})", self.resource.name(), seq, self.id);

        let fetched = match self
            .scope
            .run(self.resource.fetch(self.ctx.api.as_ref(), self.id))
            .await
        {
            Ok(fetched) => fetched,
            Err(e) => {
                self.ctx.record_discarded().await;
                return Err(e);
            }
        };

        match fetched {
            Ok(value) => self.apply(seq, value).await,
            Err(ClientError::Api(message)) => {
                self.ctx.record_api_error().await;
                if self.scope.is_closed() {
                    return Err(ClientError::Cancelled);
                }
                if seq < self.slot.read().await.applied_seq {
                    debug!(
                        "Dropping stale {} #{} error: {}",
                        self.resource.name(),
                        seq,
                        message
                    );
                    self.ctx.record_discarded().await;
                    return Ok(LoadOutcome::Stale);
                }
                warn!("{} #{} rejected: {}", self.resource.name(), seq, message);
                self.ctx.notifier.alert(&message).await;
                Ok(LoadOutcome::Rejected(message))
            }
            Err(e) => {
                if e.is_transport() {
                    self.ctx.record_transport_error().await;
                }
                warn!("{} #{} failed: {}", self.resource.name(), seq, e);
                Err(e)
            }
        }
    }

    async fn apply(&self, seq: u64, value: R::Value) -> ClientResult<LoadOutcome> {
        let outcome = {
            let mut slot = self.slot.write().await;
            if self.scope.is_closed() {
                None
            } else if seq < slot.applied_seq {
                Some(LoadOutcome::Stale)
            } else {
                slot.value = value;
                slot.applied_seq = seq;
                Some(LoadOutcome::Applied)
            }
        };

        match outcome {
            None => {
                self.ctx.record_discarded().await;
                Err(ClientError::Cancelled)
            }
            Some(LoadOutcome::Stale) => {
                debug!("Dropping stale {} #{}", self.resource.name(), seq);
                self.ctx.record_discarded().await;
                Ok(LoadOutcome::Stale)
            }
            Some(outcome) => Ok(outcome),
        }
    }

    pub async fn snapshot(&self) -> R::Value {
        self.slot.read().await.value.clone()
    }

    /// Replaces local state with `f(current)`. Nothing changes if `f` fails.
    pub async fn update<F>(&self, f: F) -> ClientResult<()>
    where
        F: FnOnce(&R::Value) -> ClientResult<R::Value>,
    {
        let mut slot = self.slot.write().await;
        slot.value = f(&slot.value)?;
        Ok(())
    }
}
