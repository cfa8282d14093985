use crate::domain::errors::DomainResult;
use crate::domain::submission::entity::{NewSubmission, Submission};
use crate::domain::submission::result::ProcessedResult;
use crate::domain::submission::value_objects::SubmissionId;
use async_trait::async_trait;

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn insert(&self, submission: NewSubmission) -> DomainResult<Submission>;
    async fn find_by_id(&self, id: SubmissionId) -> DomainResult<Option<Submission>>;
    async fn delete(&self, id: SubmissionId) -> DomainResult<()>;
}

/// Read side of generated results. Results are written by the content
/// generator as part of its own atomic unit of work.
#[async_trait]
pub trait ProcessedResultRepository: Send + Sync {
    async fn find_by_submission(
        &self,
        submission_id: SubmissionId,
    ) -> DomainResult<Option<ProcessedResult>>;
}
