// src/application/commands/submissions.rs
use crate::{
    application::{
        dto::SubmissionReceipt,
        error::{ApplicationError, ApplicationResult},
        pipeline::{PipelineJob, PipelineQueue},
        ports::time::Clock,
    },
    domain::{
        assignment::{Assignment, AssignmentRepository, PersonId},
        errors::DomainResult,
        issue::PublicationCycleStore,
        prompt::PromptId,
        submission::{NewSubmission, Submission, SubmissionId, SubmissionRepository, SubmissionText},
    },
};
use std::sync::Arc;
use uuid::Uuid;

pub struct SubmitCommand {
    /// Empty or missing for anonymous submissions.
    pub author: Option<String>,
    pub text: String,
    pub prompt_id: Option<i64>,
    pub response_url: Option<String>,
}

pub struct ReprocessSubmissionCommand {
    pub submission_id: i64,
    pub response_url: Option<String>,
}

pub struct SubmissionCommandService {
    submissions: Arc<dyn SubmissionRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    cycle_store: Arc<PublicationCycleStore>,
    queue: Arc<PipelineQueue>,
    clock: Arc<dyn Clock>,
}

impl SubmissionCommandService {
    pub fn new(
        submissions: Arc<dyn SubmissionRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        cycle_store: Arc<PublicationCycleStore>,
        queue: Arc<PipelineQueue>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            submissions,
            assignments,
            cycle_store,
            queue,
            clock,
        }
    }

    /// Store the submission and hand it to the background pipeline. Returns
    /// as soon as the job is queued; the outcome arrives on `response_url`.
    pub async fn submit(&self, command: SubmitCommand) -> ApplicationResult<SubmissionReceipt> {
        let author = command
            .author
            .filter(|a| !a.trim().is_empty())
            .map(PersonId::new)
            .transpose()?;
        let text = SubmissionText::new(command.text)?;
        let prompt_id = command.prompt_id.map(PromptId::new).transpose()?;
        let response_url = normalize_url(command.response_url)?;

        let submission = self
            .submissions
            .insert(NewSubmission {
                author,
                text,
                prompt_id,
                created_at: self.clock.now(),
            })
            .await?;

        let assignment = self.link_active_assignment(&submission).await;

        self.queue.enqueue(PipelineJob {
            submission_id: submission.id,
            response_url,
        })?;
        tracing::info!(
            submission_id = %submission.id,
            anonymous = submission.author.is_none(),
            assignment_id = ?assignment.as_ref().map(|a| a.id.0),
            "submission accepted"
        );

        let message = match &assignment {
            Some(a) => format!(
                "Thanks! Submission #{} counts toward your {} assignment. We'll let you know when it's ready.",
                submission.id, a.category
            ),
            None => format!(
                "Thanks! Submission #{} is being processed. We'll let you know when it's ready.",
                submission.id
            ),
        };
        Ok(SubmissionReceipt {
            submission_id: submission.id.into(),
            receipt_id: Uuid::new_v4().to_string(),
            assignment_id: assignment.map(|a| a.id.into()),
            message,
        })
    }

    /// Admin-triggered rerun of the pipeline for an existing submission.
    pub async fn reprocess(
        &self,
        command: ReprocessSubmissionCommand,
    ) -> ApplicationResult<SubmissionReceipt> {
        let id = SubmissionId::new(command.submission_id)?;
        let response_url = normalize_url(command.response_url)?;
        let submission = self
            .submissions
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("submission {id} not found")))?;

        self.queue.enqueue(PipelineJob {
            submission_id: submission.id,
            response_url,
        })?;
        tracing::info!(submission_id = %id, "submission queued for reprocessing");

        Ok(SubmissionReceipt {
            submission_id: id.into(),
            receipt_id: Uuid::new_v4().to_string(),
            assignment_id: None,
            message: format!("Submission #{id} queued for reprocessing."),
        })
    }

    /// Attach the submission to the author's open assignment for the current
    /// cycle, if any. Prompted submissions are linked too: the prompt decides
    /// the profile, the assignment records the obligation as met.
    async fn link_active_assignment(&self, submission: &Submission) -> Option<Assignment> {
        let author = submission.author.as_ref()?;
        match self.try_link(author, submission.id).await {
            Ok(linked) => linked,
            Err(err) => {
                tracing::warn!(submission_id = %submission.id, error = %err, "could not link submission to assignment");
                None
            }
        }
    }

    async fn try_link(
        &self,
        author: &PersonId,
        submission_id: SubmissionId,
    ) -> DomainResult<Option<Assignment>> {
        let Some(issue) = self.cycle_store.find_current(self.clock.now()).await? else {
            return Ok(None);
        };
        match self.assignments.find_by_issue_and_person(issue.id, author).await? {
            Some(open) if !open.is_fulfilled() => self
                .assignments
                .link_submission(open.id, submission_id)
                .await
                .map(Some),
            _ => Ok(None),
        }
    }
}

fn normalize_url(url: Option<String>) -> ApplicationResult<Option<String>> {
    let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(ApplicationError::validation(
            "response_url: must be an http(s) URL",
        ));
    }
    Ok(Some(url))
}
