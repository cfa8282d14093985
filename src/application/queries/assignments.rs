// src/application/queries/assignments.rs
use crate::{
    application::{
        dto::{AssignmentDto, RotationHistoryDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        assignment::{AssignmentRepository, PersonId, RotationHistoryFilter, RotationHistoryRepository},
        category::ContentCategory,
        issue::{IssueId, PublicationCycleStore},
    },
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

pub struct ActiveAssignmentQuery {
    pub person: String,
    pub category: String,
}

pub struct AssignmentsByIssueQuery {
    pub issue_id: i64,
}

pub struct RotationHistoryQuery {
    pub person: Option<String>,
    pub category: Option<String>,
    pub since_weeks: Option<u32>,
}

pub struct AssignmentQueryService {
    assignments: Arc<dyn AssignmentRepository>,
    history: Arc<dyn RotationHistoryRepository>,
    cycle_store: Arc<PublicationCycleStore>,
    clock: Arc<dyn Clock>,
}

impl AssignmentQueryService {
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        history: Arc<dyn RotationHistoryRepository>,
        cycle_store: Arc<PublicationCycleStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            assignments,
            history,
            cycle_store,
            clock,
        }
    }

    /// The person's assignment of `category` in the current cycle. Exactly
    /// one or none exists, so absence is `NotFound` rather than an empty list.
    pub async fn active_for(&self, query: ActiveAssignmentQuery) -> ApplicationResult<AssignmentDto> {
        let person = PersonId::new(query.person)?;
        let category = ContentCategory::parse(&query.category)?;
        let issue = self.cycle_store.resolve_current(self.clock.now()).await?;

        let assignment = self
            .assignments
            .find_for(issue.id, &person, category)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!(
                    "no active {category} assignment for {person} in issue #{}",
                    issue.id
                ))
            })?;
        Ok(assignment.into())
    }

    pub async fn by_issue(&self, query: AssignmentsByIssueQuery) -> ApplicationResult<Vec<AssignmentDto>> {
        let issue_id = IssueId::new(query.issue_id)?;
        let assignments = self.assignments.list_by_issue(issue_id).await?;
        Ok(assignments.into_iter().map(Into::into).collect())
    }

    pub async fn rotation_history(
        &self,
        query: RotationHistoryQuery,
    ) -> ApplicationResult<Vec<RotationHistoryDto>> {
        let filter = RotationHistoryFilter {
            person: query.person.map(PersonId::new).transpose()?,
            category: query
                .category
                .as_deref()
                .map(ContentCategory::parse)
                .transpose()?,
            since: query
                .since_weeks
                .map(|weeks| weeks_before(self.clock.now(), weeks))
                .transpose()?,
        };
        let entries = self.history.list(filter).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }
}

fn weeks_before(now: DateTime<Utc>, weeks: u32) -> ApplicationResult<DateTime<Utc>> {
    Duration::try_weeks(i64::from(weeks))
        .and_then(|span| now.checked_sub_signed(span))
        .ok_or_else(|| ApplicationError::validation("since_weeks: out of range"))
}
