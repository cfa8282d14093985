use crate::domain::errors::DomainResult;
use crate::domain::issue::entity::{IssueUpdate, NewIssue, PublicationIssue};
use crate::domain::issue::value_objects::{CycleKey, IssueId, IssueYear};
use async_trait::async_trait;

#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Insert the issue unless one already exists for its cycle, then return
    /// whichever row owns the cycle. Must be safe under concurrent callers.
    async fn find_or_insert(&self, issue: NewIssue) -> DomainResult<PublicationIssue>;
    async fn find_by_id(&self, id: IssueId) -> DomainResult<Option<PublicationIssue>>;
    async fn find_by_key(&self, key: CycleKey) -> DomainResult<Option<PublicationIssue>>;
    async fn list(&self, year: Option<IssueYear>) -> DomainResult<Vec<PublicationIssue>>;
    async fn update(&self, update: IssueUpdate) -> DomainResult<PublicationIssue>;
}
