use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::{decode_reply, parse_reply, AdminApi, Endpoint};
use crate::config::Config;
use crate::error::ClientResult;
use crate::models::{
    ByIdRequest, InsertReviewRequest, ReviewsResponse, TagInfoResponse, UpdateTagRequest,
};

/// reqwest-backed client for the admin API.
#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    client: Client,
    config: Config,
}

impl HttpAdminApi {
    pub fn new(config: Config) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    /// POSTs `body` as JSON and returns the raw reply text, whatever the status.
    async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> ClientResult<String> {
        let url = self.config.endpoint_url(endpoint.as_str());
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;
        debug!("{} replied {} ({} bytes)", endpoint.as_str(), status, text.len());

        Ok(text)
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn get_tag_info(&self, request: &ByIdRequest) -> ClientResult<TagInfoResponse> {
        let text = self.post(Endpoint::GetTagInfo, request).await?;
        decode_reply(&text)
    }

    async fn get_reviews_on_file(&self, request: &ByIdRequest) -> ClientResult<ReviewsResponse> {
        let text = self.post(Endpoint::GetReviewsOnFile, request).await?;
        decode_reply(&text)
    }

    async fn insert_review(&self, request: &InsertReviewRequest) -> ClientResult<()> {
        let text = self.post(Endpoint::InsertReview, request).await?;
        parse_reply(&text)?;
        Ok(())
    }

    async fn update_tag(&self, request: &UpdateTagRequest) -> ClientResult<()> {
        let text = self.post(Endpoint::UpdateTag, request).await?;
        parse_reply(&text)?;
        Ok(())
    }
}
