// src/application/pipeline/profile.rs
use crate::{
    application::ApplicationResult,
    domain::{
        assignment::AssignmentRepository,
        prompt::PromptRepository,
        submission::{Submission, TransformationProfile},
    },
};
use async_trait::async_trait;
use std::sync::Arc;

/// One source of truth for which profile a submission should get. Returns
/// `Ok(None)` when it has no opinion so the next resolver is consulted.
#[async_trait]
pub trait ProfileResolver: Send + Sync {
    fn name(&self) -> &'static str;
    async fn resolve(&self, submission: &Submission)
    -> ApplicationResult<Option<TransformationProfile>>;
}

/// Uses the category of the prompt the submission answers.
pub struct PromptCategoryResolver {
    prompts: Arc<dyn PromptRepository>,
}

impl PromptCategoryResolver {
    pub fn new(prompts: Arc<dyn PromptRepository>) -> Self {
        Self { prompts }
    }
}

#[async_trait]
impl ProfileResolver for PromptCategoryResolver {
    fn name(&self) -> &'static str {
        "prompt_category"
    }

    async fn resolve(
        &self,
        submission: &Submission,
    ) -> ApplicationResult<Option<TransformationProfile>> {
        let Some(prompt_id) = submission.prompt_id else {
            return Ok(None);
        };
        let prompt = self.prompts.find_by_id(prompt_id).await?;
        Ok(prompt.map(|p| p.category.profile()))
    }
}

/// Uses the category of the assignment the submission fulfils.
pub struct AssignmentCategoryResolver {
    assignments: Arc<dyn AssignmentRepository>,
}

impl AssignmentCategoryResolver {
    pub fn new(assignments: Arc<dyn AssignmentRepository>) -> Self {
        Self { assignments }
    }
}

#[async_trait]
impl ProfileResolver for AssignmentCategoryResolver {
    fn name(&self) -> &'static str {
        "assignment_category"
    }

    async fn resolve(
        &self,
        submission: &Submission,
    ) -> ApplicationResult<Option<TransformationProfile>> {
        let assignment = self.assignments.find_by_submission(submission.id).await?;
        Ok(assignment.map(|a| a.category.profile()))
    }
}

pub struct DefaultProfileResolver(pub TransformationProfile);

#[async_trait]
impl ProfileResolver for DefaultProfileResolver {
    fn name(&self) -> &'static str {
        "default"
    }

    async fn resolve(&self, _: &Submission) -> ApplicationResult<Option<TransformationProfile>> {
        Ok(Some(self.0))
    }
}

/// Resolvers tried in priority order; the first opinion wins. A failing
/// resolver is logged and skipped.
pub struct ProfileResolverChain {
    resolvers: Vec<Arc<dyn ProfileResolver>>,
}

impl ProfileResolverChain {
    pub fn new(resolvers: Vec<Arc<dyn ProfileResolver>>) -> Self {
        Self { resolvers }
    }

    /// prompt category, then assignment category, then `general`.
    pub fn standard(
        prompts: Arc<dyn PromptRepository>,
        assignments: Arc<dyn AssignmentRepository>,
    ) -> Self {
        Self::new(vec![
            Arc::new(PromptCategoryResolver::new(prompts)),
            Arc::new(AssignmentCategoryResolver::new(assignments)),
            Arc::new(DefaultProfileResolver(TransformationProfile::General)),
        ])
    }

    pub async fn resolve(&self, submission: &Submission) -> TransformationProfile {
        for resolver in &self.resolvers {
            match resolver.resolve(submission).await {
                Ok(Some(profile)) => {
                    tracing::debug!(
                        submission_id = %submission.id,
                        resolver = resolver.name(),
                        %profile,
                        "profile resolved"
                    );
                    return profile;
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(
                    submission_id = %submission.id,
                    resolver = resolver.name(),
                    error = %err,
                    "profile resolver failed, trying next"
                ),
            }
        }
        TransformationProfile::General
    }
}
