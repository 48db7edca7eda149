//! Scripted `AdminApi` for unit tests.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::api::{decode_reply, parse_reply, AdminApi, Endpoint};
use crate::error::ClientResult;
use crate::models::{
    ByIdRequest, InsertReviewRequest, ReviewsResponse, TagInfoResponse, UpdateTagRequest,
};

struct Scripted {
    body: String,
    gate: Option<oneshot::Receiver<()>>,
}

/// Replies are queued per endpoint and consumed in call order. An endpoint
/// with nothing queued answers `{}`.
#[derive(Default)]
pub struct MockApi {
    replies: Mutex<HashMap<&'static str, VecDeque<Scripted>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn endpoint(name: &str) -> &'static str {
        match name {
            "get_tag_info" => Endpoint::GetTagInfo.as_str(),
            "get_reviews_on_file" => Endpoint::GetReviewsOnFile.as_str(),
            "insert_review" => Endpoint::InsertReview.as_str(),
            "update_tag" => Endpoint::UpdateTag.as_str(),
            other => panic!("unknown endpoint {}", other),
        }
    }

    pub fn reply(&self, endpoint: &str, body: &str) {
        self.push(endpoint, body, None);
    }

    /// Queues a reply that is held back until the returned sender fires.
    pub fn reply_gated(&self, endpoint: &str, body: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(endpoint, body, Some(rx));
        tx
    }

    fn push(&self, endpoint: &str, body: &str, gate: Option<oneshot::Receiver<()>>) {
        self.replies
            .lock()
            .unwrap()
            .entry(Self::endpoint(endpoint))
            .or_default()
            .push_back(Scripted {
                body: body.to_string(),
                gate,
            });
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(name, _)| name == endpoint)
            .map(|(_, body)| body)
            .collect()
    }

    pub async fn wait_for_calls(&self, count: usize) {
        for _ in 0..1000 {
            if self.calls.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("expected {} calls, saw {:?}", count, self.calls());
    }

    async fn respond<B: Serialize + Sync>(&self, endpoint: Endpoint, request: &B) -> String {
        let scripted = {
            let scripted = self
                .replies
                .lock()
                .unwrap()
                .get_mut(endpoint.as_str())
                .and_then(VecDeque::pop_front);
            self.calls.lock().unwrap().push((
                endpoint.as_str().to_string(),
                serde_json::to_value(request).unwrap(),
            ));
            scripted
        };

        match scripted {
            Some(Scripted { body, gate }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                body
            }
            None => "{}".to_string(),
        }
    }
}

#[async_trait]
impl AdminApi for MockApi {
    async fn get_tag_info(&self, request: &ByIdRequest) -> ClientResult<TagInfoResponse> {
        decode_reply(&self.respond(Endpoint::GetTagInfo, request).await)
    }

    async fn get_reviews_on_file(&self, request: &ByIdRequest) -> ClientResult<ReviewsResponse> {
        decode_reply(&self.respond(Endpoint::GetReviewsOnFile, request).await)
    }

    async fn insert_review(&self, request: &InsertReviewRequest) -> ClientResult<()> {
        parse_reply(&self.respond(Endpoint::InsertReview, request).await)?;
        Ok(())
    }

    async fn update_tag(&self, request: &UpdateTagRequest) -> ClientResult<()> {
        parse_reply(&self.respond(Endpoint::UpdateTag, request).await)?;
        Ok(())
    }
}
