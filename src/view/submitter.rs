use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::state::AppContext;
use crate::view::scope::ViewScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    /// The server answered with an error, which was shown to the user.
    Rejected(String),
    /// Another submission was still in flight; nothing was sent.
    Busy,
}

/// Clears the in-flight flag however the submission ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Sends one mutation at a time.
pub struct MutationSubmitter {
    name: &'static str,
    ctx: AppContext,
    scope: ViewScope,
    in_flight: AtomicBool,
}

impl MutationSubmitter {
    pub fn new(name: &'static str, ctx: AppContext, scope: ViewScope) -> Self {
        Self {
            name,
            ctx,
            scope,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> SubmissionState {
        if self.in_flight.load(Ordering::SeqCst) {
            SubmissionState::Submitting
        } else {
            SubmissionState::Idle
        }
    }

    /// Awaits `send`; on success runs `on_accepted` before going back to
    /// `Idle`. `send` is dropped unpolled when the submitter is busy.
    pub async fn submit<F, A, AF>(&self, send: F, on_accepted: A) -> ClientResult<SubmitOutcome>
    where
        F: Future<Output = ClientResult<()>>,
        A: FnOnce() -> AF,
        AF: Future<Output = ()>,
    {
        if self.scope.is_closed() {
            return Err(ClientError::Cancelled);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("{} already in flight, ignoring submit", self.name);
            return Ok(SubmitOutcome::Busy);
        }
        let _in_flight = InFlight(&self.in_flight);

        self.ctx.record_request().await;
        debug!("Submitting {} (view: {})", self.name, self.scope.id());

        let result = match self.scope.run(send).await {
            Ok(result) => result,
            Err(e) => {
                self.ctx.record_discarded().await;
                return Err(e);
            }
        };

        match result {
            Ok(()) => {
                if self.scope.is_closed() {
                    self.ctx.record_discarded().await;
                    return Err(ClientError::Cancelled);
                }
                on_accepted().await;
                Ok(SubmitOutcome::Accepted)
            }
            Err(ClientError::Api(message)) => {
                self.ctx.record_api_error().await;
                if self.scope.is_closed() {
                    return Err(ClientError::Cancelled);
                }
                warn!("{} rejected: {}", self.name, message);
                self.ctx.notifier.alert(&message).await;
                Ok(SubmitOutcome::Rejected(message))
            }
            Err(e) => {
                if e.is_transport() {
                    self.ctx.record_transport_error().await;
                }
                warn!("{} failed: {}", self.name, e);
                Err(e)
            }
        }
    }
}
