// src/application/commands/assignments.rs
use crate::{
    application::{
        dto::AssignmentDto,
        error::{ApplicationError, ApplicationResult},
        ports::{messaging::MessagingGateway, time::Clock},
    },
    domain::{
        assignment::{
            Assignment, AssignmentId, AssignmentRepository, NewAssignment, PersonId, RotationHistoryEntry,
            RotationHistoryFilter, RotationHistoryRepository,
            services::pick_least_recent_assignee,
        },
        category::ContentCategory,
        errors::DomainError,
        issue::{IssueId, IssueRepository, PublicationIssue},
        prompt::{Prompt, PromptId, PromptRotationSelector},
        submission::SubmissionId,
    },
};
use chrono::Duration;
use std::sync::Arc;

pub struct CreateAssignmentCommand {
    pub issue_id: i64,
    pub person: String,
    pub category: String,
    pub prompt_id: Option<i64>,
}

pub struct LinkSubmissionCommand {
    pub assignment_id: i64,
    pub submission_id: i64,
}

pub struct DeleteAssignmentCommand {
    pub id: i64,
}

pub struct DeleteAssignmentsForPersonCommand {
    pub person: String,
}

/// Automated distribution: pick whoever among `candidates` has waited
/// longest for this category, attach the next rotating prompt and notify them.
pub struct DistributeAssignmentCommand {
    pub issue_id: i64,
    pub category: String,
    pub candidates: Vec<String>,
    pub notify: bool,
}

pub struct AssignmentCommandService {
    assignments: Arc<dyn AssignmentRepository>,
    history: Arc<dyn RotationHistoryRepository>,
    issues: Arc<dyn IssueRepository>,
    selector: Arc<PromptRotationSelector>,
    messaging: Arc<dyn MessagingGateway>,
    clock: Arc<dyn Clock>,
    lookback: Duration,
}

impl AssignmentCommandService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        history: Arc<dyn RotationHistoryRepository>,
        issues: Arc<dyn IssueRepository>,
        selector: Arc<PromptRotationSelector>,
        messaging: Arc<dyn MessagingGateway>,
        clock: Arc<dyn Clock>,
        lookback: Duration,
    ) -> Self {
        Self {
            assignments,
            history,
            issues,
            selector,
            messaging,
            clock,
            lookback,
        }
    }

    pub async fn create_assignment(
        &self,
        command: CreateAssignmentCommand,
    ) -> ApplicationResult<AssignmentDto> {
        let category = ContentCategory::parse(&command.category)?;
        let issue_id = IssueId::new(command.issue_id)
            .map_err(|_| ApplicationError::validation("issue_id: must be a positive issue id"))?;
        let person = PersonId::new(command.person)?;
        let prompt_id = command.prompt_id.map(PromptId::new).transpose()?;

        let issue = self.load_issue(issue_id).await?;
        let created = self.record(&issue, person, category, prompt_id).await?;
        Ok(created.into())
    }

    pub async fn link_submission(
        &self,
        command: LinkSubmissionCommand,
    ) -> ApplicationResult<AssignmentDto> {
        let id = AssignmentId::new(command.assignment_id)?;
        let submission_id = SubmissionId::new(command.submission_id)?;
        let linked = self
            .assignments
            .link_submission(id, submission_id)
            .await
            .map_err(|err| match err {
                DomainError::NotFound(_) => {
                    ApplicationError::not_found(format!("assignment {id} not found"))
                }
                other => other.into(),
            })?;
        Ok(linked.into())
    }

    /// Returns the number of assignments removed; zero when nothing matched.
    pub async fn delete_assignment(&self, command: DeleteAssignmentCommand) -> ApplicationResult<u64> {
        let id = AssignmentId::new(command.id)?;
        let Some(existing) = self.assignments.find_by_id(id).await? else {
            return Ok(0);
        };
        if existing.is_fulfilled() {
            return Err(ApplicationError::conflict(format!(
                "assignment {id} already has a submission and cannot be deleted"
            )));
        }
        Ok(self.assignments.delete(id).await?)
    }

    /// Removes every assignment of `person` that has no submission yet.
    pub async fn delete_for_person(
        &self,
        command: DeleteAssignmentsForPersonCommand,
    ) -> ApplicationResult<u64> {
        let person = PersonId::new(command.person)?;
        let removed = self.assignments.delete_unfulfilled_for_person(&person).await?;
        if removed > 0 {
            tracing::info!(%person, removed, "assignments removed for person");
        }
        Ok(removed)
    }

    pub async fn distribute(
        &self,
        command: DistributeAssignmentCommand,
    ) -> ApplicationResult<AssignmentDto> {
        let category = ContentCategory::parse(&command.category)?;
        let issue_id = IssueId::new(command.issue_id)
            .map_err(|_| ApplicationError::validation("issue_id: must be a positive issue id"))?;
        let candidates = command
            .candidates
            .into_iter()
            .map(PersonId::new)
            .collect::<Result<Vec<_>, _>>()?;
        if candidates.is_empty() {
            return Err(ApplicationError::validation(
                "candidates: at least one candidate is required",
            ));
        }

        let issue = self.load_issue(issue_id).await?;
        let taken: Vec<PersonId> = self
            .assignments
            .list_by_issue(issue_id)
            .await?
            .into_iter()
            .map(|a| a.person)
            .collect();
        let available: Vec<PersonId> = candidates
            .into_iter()
            .filter(|person| !taken.contains(person))
            .collect();

        let since = self
            .clock
            .now()
            .checked_sub_signed(self.lookback)
            .ok_or_else(|| ApplicationError::validation("rotation look-back: out of range"))?;
        let filter = RotationHistoryFilter {
            person: None,
            category: Some(category),
            since: Some(since),
        };
        let history = self.history.list(filter).await?;
        let person = pick_least_recent_assignee(&available, &history).ok_or_else(|| {
            ApplicationError::conflict(format!(
                "every candidate already has an assignment for issue #{issue_id}"
            ))
        })?;

        // Checked before the prompt is claimed. A duplicate that only surfaces
        // at insert still leaves the prompt stamped.
        self.ensure_unassigned(&issue, &person).await?;

        let prompt = match self.selector.next(category, self.clock.now()).await {
            Ok(prompt) => Some(prompt),
            Err(err) if err.is_not_found() => {
                tracing::warn!(%category, "no prompt available, assigning without one");
                None
            }
            Err(err) => return Err(err.into()),
        };

        let created = self
            .record(&issue, person, category, prompt.as_ref().map(|p| p.id))
            .await?;

        if command.notify {
            let message = assignment_message(&issue, category, prompt.as_ref());
            if let Err(err) = self
                .messaging
                .send_direct(created.person.as_str(), &message)
                .await
            {
                tracing::warn!(person = %created.person, error = %err, "assignment notification failed");
            }
        }

        Ok(created.into())
    }

    async fn load_issue(&self, issue_id: IssueId) -> ApplicationResult<PublicationIssue> {
        self.issues
            .find_by_id(issue_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("issue {issue_id} not found")))
    }

    async fn ensure_unassigned(
        &self,
        issue: &PublicationIssue,
        person: &PersonId,
    ) -> ApplicationResult<()> {
        if self
            .assignments
            .find_by_issue_and_person(issue.id, person)
            .await?
            .is_some()
        {
            return Err(duplicate_assignment(issue, person));
        }
        Ok(())
    }

    async fn record(
        &self,
        issue: &PublicationIssue,
        person: PersonId,
        category: ContentCategory,
        prompt_id: Option<PromptId>,
    ) -> ApplicationResult<Assignment> {
        self.ensure_unassigned(issue, &person).await?;

        let now = self.clock.now();
        let new_assignment = NewAssignment {
            issue_id: issue.id,
            person: person.clone(),
            category,
            prompt_id,
            created_at: now,
        };
        // The pre-check can race; the storage constraint is authoritative.
        let created = match self.assignments.insert(new_assignment).await {
            Ok(created) => created,
            Err(DomainError::Conflict(_)) => return Err(duplicate_assignment(issue, &person)),
            Err(err) => return Err(err.into()),
        };

        let entry = RotationHistoryEntry {
            person: created.person.clone(),
            category,
            cycle: issue.key,
            recorded_at: now,
        };
        if let Err(err) = self.history.append(entry).await {
            tracing::warn!(assignment_id = %created.id, error = %err, "failed to append rotation history");
        }

        tracing::info!(
            assignment_id = %created.id,
            issue_id = %issue.id,
            person = %created.person,
            %category,
            "assignment created"
        );
        Ok(created)
    }
}

fn duplicate_assignment(issue: &PublicationIssue, person: &PersonId) -> ApplicationError {
    ApplicationError::conflict(format!(
        "{person} already has an assignment for issue #{}",
        issue.id
    ))
}

fn assignment_message(
    issue: &PublicationIssue,
    category: ContentCategory,
    prompt: Option<&Prompt>,
) -> String {
    let mut message = format!(
        "You're up for the {} piece in {} (publishing {}).",
        category,
        issue.title,
        issue.publication_date.format("%A %B %-d")
    );
    if let Some(prompt) = prompt {
        message.push_str("\nThis week's prompt: ");
        message.push_str(prompt.text.as_str());
    }
    message
}
