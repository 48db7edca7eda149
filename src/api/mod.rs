pub mod client;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::models::{
    ByIdRequest, InsertReviewRequest, ReviewsResponse, TagInfoResponse, UpdateTagRequest,
};

pub use client::HttpAdminApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetTagInfo,
    GetReviewsOnFile,
    InsertReview,
    UpdateTag,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::GetTagInfo => "get_tag_info",
            Endpoint::GetReviewsOnFile => "get_reviews_on_file",
            Endpoint::InsertReview => "insert_review",
            Endpoint::UpdateTag => "update_tag",
        }
    }
}

/// The admin JSON API. Every call is a POST; an `error` key in the reply body
/// comes back as `ClientError::Api`.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn get_tag_info(&self, request: &ByIdRequest) -> ClientResult<TagInfoResponse>;

    async fn get_reviews_on_file(&self, request: &ByIdRequest) -> ClientResult<ReviewsResponse>;

    async fn insert_review(&self, request: &InsertReviewRequest) -> ClientResult<()>;

    async fn update_tag(&self, request: &UpdateTagRequest) -> ClientResult<()>;
}

/// Parses a reply body and splits off application errors. The HTTP status is
/// not consulted: `{"error": ...}` is an error on a 200, and a 500 without
/// one is not. Falsy values (`null`, `false`, `""`, `0`) do not count.
pub fn parse_reply(body: &str) -> ClientResult<Value> {
    let value: Value = serde_json::from_str(body)?;

    match value.get("error") {
        None => Ok(value),
        Some(error) if !is_truthy(error) => Ok(value),
        Some(Value::String(message)) => Err(ClientError::Api(message.clone())),
        Some(other) => Err(ClientError::Api(other.to_string())),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn decode_reply<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    let value = parse_reply(body)?;
    Ok(serde_json::from_value(value)?)
}
