use crate::domain::assignment::entity::{Assignment, NewAssignment};
use crate::domain::assignment::history::{RotationHistoryEntry, RotationHistoryFilter};
use crate::domain::assignment::value_objects::{AssignmentId, PersonId};
use crate::domain::category::ContentCategory;
use crate::domain::errors::DomainResult;
use crate::domain::issue::IssueId;
use crate::domain::submission::SubmissionId;
use async_trait::async_trait;

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Implementations must reject a second assignment for the same
    /// (issue, person) with `DomainError::Conflict`, independently of any
    /// pre-check done by callers.
    async fn insert(&self, assignment: NewAssignment) -> DomainResult<Assignment>;
    async fn find_by_id(&self, id: AssignmentId) -> DomainResult<Option<Assignment>>;
    async fn find_by_issue_and_person(
        &self,
        issue_id: IssueId,
        person: &PersonId,
    ) -> DomainResult<Option<Assignment>>;
    async fn find_for(
        &self,
        issue_id: IssueId,
        person: &PersonId,
        category: ContentCategory,
    ) -> DomainResult<Option<Assignment>>;
    async fn find_by_submission(
        &self,
        submission_id: SubmissionId,
    ) -> DomainResult<Option<Assignment>>;
    /// Ordered by creation time, oldest first.
    async fn list_by_issue(&self, issue_id: IssueId) -> DomainResult<Vec<Assignment>>;
    async fn link_submission(
        &self,
        id: AssignmentId,
        submission_id: SubmissionId,
    ) -> DomainResult<Assignment>;
    /// Returns the number of rows removed.
    async fn delete(&self, id: AssignmentId) -> DomainResult<u64>;
    /// Removes the person's assignments that have no submission yet.
    async fn delete_unfulfilled_for_person(&self, person: &PersonId) -> DomainResult<u64>;
}

#[async_trait]
pub trait RotationHistoryRepository: Send + Sync {
    async fn append(&self, entry: RotationHistoryEntry) -> DomainResult<()>;
    /// Newest first.
    async fn list(&self, filter: RotationHistoryFilter) -> DomainResult<Vec<RotationHistoryEntry>>;
}
