// src/application/ports/content.rs
use crate::application::ApplicationResult;
use crate::domain::issue::IssueId;
use crate::domain::submission::{ProcessedResult, Submission, TransformationProfile};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub submission: Submission,
    pub author_name: String,
    pub author_department: String,
    pub profile: TransformationProfile,
    pub target_issue_id: IssueId,
}

/// External content generator. A call either leaves a `ProcessedResult`
/// stored and linked to `target_issue_id`, or stores nothing.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_and_persist(&self, request: GenerationRequest)
    -> ApplicationResult<ProcessedResult>;
}
