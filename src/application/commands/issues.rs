// src/application/commands/issues.rs
use crate::{
    application::{
        dto::IssueDto,
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::issue::{IssueId, IssueRepository, IssueStatus, IssueUpdate, PublicationCycleStore},
};
use std::sync::Arc;

pub struct ResolveIssueCommand {
    pub week: i64,
    pub year: i64,
}

pub struct SetIssueStatusCommand {
    pub id: i64,
    pub status: String,
}

pub struct UpdateIssueContentCommand {
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
}

pub struct IssueCommandService {
    cycle_store: Arc<PublicationCycleStore>,
    repo: Arc<dyn IssueRepository>,
    clock: Arc<dyn Clock>,
}

impl IssueCommandService {
    pub fn new(
        cycle_store: Arc<PublicationCycleStore>,
        repo: Arc<dyn IssueRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cycle_store,
            repo,
            clock,
        }
    }

    pub async fn resolve_or_create_issue(
        &self,
        command: ResolveIssueCommand,
    ) -> ApplicationResult<IssueDto> {
        let issue = self
            .cycle_store
            .resolve_or_create(command.week, command.year, self.clock.now())
            .await?;
        Ok(issue.into())
    }

    pub async fn resolve_current_issue(&self) -> ApplicationResult<IssueDto> {
        let issue = self.cycle_store.resolve_current(self.clock.now()).await?;
        Ok(issue.into())
    }

    /// Operator-driven status change. Only single forward steps are accepted.
    pub async fn set_status(&self, command: SetIssueStatusCommand) -> ApplicationResult<IssueDto> {
        let id = IssueId::new(command.id)?;
        let target: IssueStatus = command.status.parse()?;
        let mut issue = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("issue {id} not found")))?;
        let original_updated_at = issue.updated_at;
        let previous = issue.status;

        if !issue.advance_to(target, self.clock.now())? {
            return Ok(issue.into());
        }

        let updated = self
            .repo
            .update(IssueUpdate::from_issue(&issue, original_updated_at))
            .await?;
        tracing::info!(issue_id = %id, from = %previous, to = %updated.status, "issue status changed");
        Ok(updated.into())
    }

    pub async fn update_content(
        &self,
        command: UpdateIssueContentCommand,
    ) -> ApplicationResult<IssueDto> {
        let id = IssueId::new(command.id)?;
        if command.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ApplicationError::validation("title: cannot be empty"));
        }
        let mut issue = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("issue {id} not found")))?;
        let original_updated_at = issue.updated_at;

        issue.set_content(command.title, command.body, self.clock.now());
        let updated = self
            .repo
            .update(IssueUpdate::from_issue(&issue, original_updated_at))
            .await?;
        Ok(updated.into())
    }
}
