use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Write;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::api::AdminApi;
use crate::error::{ClientError, ClientResult};
use crate::models::{ByIdRequest, InsertReviewRequest, Review};
use crate::route::RouteParams;
use crate::state::AppContext;
use crate::utils::time::convert_int_to_datetime;
use crate::view::{
    LoadOutcome, MutationSubmitter, Resource, ResourceLoader, SubmissionState, SubmitOutcome,
    ViewScope,
};

pub struct ReviewsResource;

#[async_trait]
impl Resource for ReviewsResource {
    type Value = Vec<Review>;

    fn name(&self) -> &'static str {
        "reviews"
    }

    async fn fetch(&self, api: &dyn AdminApi, id: Option<i64>) -> ClientResult<Vec<Review>> {
        Ok(api.get_reviews_on_file(&ByIdRequest { id }).await?.reviews)
    }
}

/// One rendered review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewEntryView {
    pub id: i64,
    pub author: String,
    pub author_link: String,
    pub written_at: String,
    pub content: String,
}

/// Reviews on one file plus the box for writing a new one.
pub struct ReviewPage {
    ctx: AppContext,
    scope: ViewScope,
    loader: ResourceLoader<ReviewsResource>,
    submitter: MutationSubmitter,
    draft: Mutex<String>,
}

impl ReviewPage {
    pub fn new(ctx: AppContext, route: &RouteParams) -> Self {
        let scope = ViewScope::new("review page");
        let loader = ResourceLoader::new(ReviewsResource, ctx.clone(), route.id(), scope.clone());
        let submitter = MutationSubmitter::new("review", ctx.clone(), scope.clone());

        Self {
            ctx,
            scope,
            loader,
            submitter,
            draft: Mutex::new(String::new()),
        }
    }

    pub async fn mount(&self) -> ClientResult<LoadOutcome> {
        self.loader.mount().await
    }

    pub async fn refresh(&self) -> ClientResult<LoadOutcome> {
        self.loader.refresh().await
    }

    pub fn unmount(&self) {
        self.scope.close();
    }

    pub async fn reviews(&self) -> Vec<Review> {
        self.loader.snapshot().await
    }

    pub async fn entries(&self) -> Vec<ReviewEntryView> {
        let config = &self.ctx.config;
        self.reviews()
            .await
            .into_iter()
            .map(|review| ReviewEntryView {
                id: review.id,
                author: format!("@{}", review.user.username),
                author_link: format!(
                    "{}/{}",
                    config.user_link_prefix.trim_end_matches('/'),
                    review.user.id
                ),
                written_at: convert_int_to_datetime(review.created_at, &config.date_format),
                content: review.content,
            })
            .collect()
    }

    pub async fn draft(&self) -> String {
        self.draft.lock().await.clone()
    }

    pub async fn set_draft(&self, text: &str) {
        *self.draft.lock().await = text.to_string();
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submitter.state()
    }

    /// Sends the draft as a new review. On success the draft is cleared and
    /// the list is fetched again; on a server error the draft is kept.
    pub async fn submit(&self) -> ClientResult<SubmitOutcome> {
        let request = InsertReviewRequest {
            content: self.draft().await,
            file_id: self.loader.id(),
        };

        let outcome = self
            .submitter
            .submit(self.ctx.api.insert_review(&request), || async move {
                self.draft.lock().await.clear();
            })
            .await?;

        if outcome == SubmitOutcome::Accepted {
            info!("Review added to file {:?}, refreshing", request.file_id);
            match self.loader.refresh().await {
                Ok(_) | Err(ClientError::Cancelled) => {}
                Err(e) => warn!("Refresh after review submit failed: {}", e),
            }
        }

        Ok(outcome)
    }

    pub async fn render(&self) -> String {
        let mut out = String::from("Review Page\n");
        for entry in self.entries().await {
            let _ = writeln!(
                out,
                "{} wrote on {} <{}>",
                entry.author, entry.written_at, entry.author_link
            );
            let _ = writeln!(out, "{}", entry.content);
        }
        let _ = writeln!(out, "Draft: {}", self.draft().await);
        out
    }
}
