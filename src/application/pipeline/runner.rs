// src/application/pipeline/runner.rs
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        pipeline::{PipelineJob, enrich, profile::ProfileResolverChain},
        ports::{
            content::{ContentGenerator, GenerationRequest},
            messaging::MessagingGateway,
            reply::DeferredReplier,
            time::Clock,
        },
    },
    domain::{
        issue::PublicationCycleStore,
        submission::{ProcessedResult, SubmissionRepository},
    },
};
use std::sync::Arc;

pub struct SubmissionPipeline {
    submissions: Arc<dyn SubmissionRepository>,
    profiles: ProfileResolverChain,
    cycle_store: Arc<PublicationCycleStore>,
    messaging: Arc<dyn MessagingGateway>,
    generator: Arc<dyn ContentGenerator>,
    replier: Arc<dyn DeferredReplier>,
    clock: Arc<dyn Clock>,
}

impl SubmissionPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        submissions: Arc<dyn SubmissionRepository>,
        profiles: ProfileResolverChain,
        cycle_store: Arc<PublicationCycleStore>,
        messaging: Arc<dyn MessagingGateway>,
        generator: Arc<dyn ContentGenerator>,
        replier: Arc<dyn DeferredReplier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            submissions,
            profiles,
            cycle_store,
            messaging,
            generator,
            replier,
            clock,
        }
    }

    /// Run the job to completion and report the outcome on its reply URL.
    pub async fn process(&self, job: PipelineJob) -> ApplicationResult<ProcessedResult> {
        let outcome = self.run(&job).await;

        let message = match &outcome {
            Ok(result) => {
                tracing::info!(
                    submission_id = %job.submission_id,
                    profile = %result.profile,
                    words = result.word_count,
                    "submission processed"
                );
                format!(
                    "Your submission #{} is ready: a {} piece of {} words for this week's issue.",
                    job.submission_id, result.profile, result.word_count
                )
            }
            Err(err) => {
                tracing::error!(submission_id = %job.submission_id, error = %err, "submission processing failed");
                format!(
                    "Sorry, we couldn't process submission #{}: {err}. An editor can reprocess it.",
                    job.submission_id
                )
            }
        };

        if let Some(url) = job.response_url.as_deref() {
            if let Err(err) = self.replier.reply(url, &message).await {
                tracing::warn!(submission_id = %job.submission_id, error = %err, "deferred reply failed");
            }
        }

        outcome
    }

    async fn run(&self, job: &PipelineJob) -> ApplicationResult<ProcessedResult> {
        let submission = self
            .submissions
            .find_by_id(job.submission_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("submission {} not found", job.submission_id))
            })?;

        let author = enrich::author_details(self.messaging.as_ref(), submission.author.as_ref()).await;
        let profile = self.profiles.resolve(&submission).await;
        let issue = self.cycle_store.resolve_current(self.clock.now()).await?;

        let request = GenerationRequest {
            submission,
            author_name: author.name,
            author_department: author.department,
            profile,
            target_issue_id: issue.id,
        };
        let result = self.generator.generate_and_persist(request).await?;
        result.ensure_consistent()?;
        Ok(result)
    }
}
