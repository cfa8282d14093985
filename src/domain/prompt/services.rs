use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;

use crate::domain::category::ContentCategory;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::prompt::entity::Prompt;
use crate::domain::prompt::repository::PromptRepository;
use crate::domain::prompt::value_objects::PromptId;

const MAX_CLAIM_ATTEMPTS: usize = 5;

/// Prompts eligible for the next pick: every never-used prompt if there is
/// one, otherwise every prompt sharing the oldest `last_used_at`.
pub fn least_recently_used(prompts: &[Prompt]) -> Vec<&Prompt> {
    let never_used: Vec<&Prompt> = prompts.iter().filter(|p| p.last_used_at.is_none()).collect();
    if !never_used.is_empty() {
        return never_used;
    }
    let Some(oldest) = prompts.iter().filter_map(|p| p.last_used_at).min() else {
        return Vec::new();
    };
    prompts
        .iter()
        .filter(|p| p.last_used_at == Some(oldest))
        .collect()
}

/// Least-recently-used rotation over a reusable prompt set, with random
/// tie-breaking so equal candidates do not surface in a fixed order.
pub struct PromptRotationSelector {
    repo: Arc<dyn PromptRepository>,
}

impl PromptRotationSelector {
    pub fn new(repo: Arc<dyn PromptRepository>) -> Self {
        Self { repo }
    }

    /// Pick and claim the next prompt for `category`. The pick and the usage
    /// stamp form one compare-and-set so two concurrent callers never walk
    /// away with the same prompt from the same tier.
    pub async fn next(
        &self,
        category: ContentCategory,
        now: DateTime<Utc>,
    ) -> DomainResult<Prompt> {
        for attempt in 1..=MAX_CLAIM_ATTEMPTS {
            let prompts = self.repo.list(Some(category)).await?;
            let tier = least_recently_used(&prompts);
            let Some(chosen) = tier.choose(&mut rand::rng()).copied() else {
                return Err(DomainError::NotFound(format!(
                    "no prompts available in category {category}"
                )));
            };

            if self.repo.mark_used_if(chosen.id, chosen.last_used_at, now).await? {
                let mut claimed = chosen.clone();
                claimed.last_used_at = Some(now);
                tracing::debug!(prompt_id = %claimed.id, %category, "prompt selected");
                return Ok(claimed);
            }
            tracing::debug!(prompt_id = %chosen.id, attempt, "prompt claimed concurrently, retrying");
        }

        Err(DomainError::Conflict(format!(
            "prompt selection for {category} kept colliding with concurrent selections, please retry"
        )))
    }

    pub async fn mark_used(&self, id: PromptId, now: DateTime<Utc>) -> DomainResult<Prompt> {
        self.repo.mark_used(id, now).await
    }
}
