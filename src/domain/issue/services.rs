use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::errors::DomainResult;
use crate::domain::issue::calendar::{current_cycle, publication_date};
use crate::domain::issue::entity::{NewIssue, PublicationIssue};
use crate::domain::issue::repository::IssueRepository;
use crate::domain::issue::value_objects::CycleKey;

/// Maps publication cycles to their single issue record, creating the record
/// on first reference.
pub struct PublicationCycleStore {
    repo: Arc<dyn IssueRepository>,
    offset: FixedOffset,
}

impl PublicationCycleStore {
    pub fn new(repo: Arc<dyn IssueRepository>, offset: FixedOffset) -> Self {
        Self { repo, offset }
    }

    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Validation happens in `CycleKey::new` before the repository is touched.
    pub async fn resolve_or_create(
        &self,
        week: i64,
        year: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<PublicationIssue> {
        let key = CycleKey::new(week, year)?;
        self.resolve_key(key, now).await
    }

    pub async fn resolve_current(&self, now: DateTime<Utc>) -> DomainResult<PublicationIssue> {
        let key = current_cycle(now, self.offset)?;
        self.resolve_key(key, now).await
    }

    /// Current cycle's issue if it already exists; never creates one.
    pub async fn find_current(&self, now: DateTime<Utc>) -> DomainResult<Option<PublicationIssue>> {
        let key = current_cycle(now, self.offset)?;
        self.repo.find_by_key(key).await
    }

    async fn resolve_key(&self, key: CycleKey, now: DateTime<Utc>) -> DomainResult<PublicationIssue> {
        if let Some(existing) = self.repo.find_by_key(key).await? {
            return Ok(existing);
        }
        let date = publication_date(key, self.offset)?;
        let issue = self.repo.find_or_insert(NewIssue::new(key, date, now)).await?;
        tracing::info!(issue_id = %issue.id, cycle = %key, "publication issue resolved");
        Ok(issue)
    }
}
