use crate::domain::category::ContentCategory;
use crate::domain::errors::DomainResult;
use crate::domain::prompt::entity::{NewPrompt, Prompt};
use crate::domain::prompt::value_objects::PromptId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait PromptRepository: Send + Sync {
    async fn insert(&self, prompt: NewPrompt) -> DomainResult<Prompt>;
    async fn find_by_id(&self, id: PromptId) -> DomainResult<Option<Prompt>>;
    async fn list(&self, category: Option<ContentCategory>) -> DomainResult<Vec<Prompt>>;

    /// Stamp `used_at` only if the prompt's `last_used_at` still equals
    /// `expected`. Returns `false` when another writer got there first.
    async fn mark_used_if(
        &self,
        id: PromptId,
        expected: Option<DateTime<Utc>>,
        used_at: DateTime<Utc>,
    ) -> DomainResult<bool>;

    /// Unconditionally stamp `used_at`; `NotFound` if the prompt is missing.
    async fn mark_used(&self, id: PromptId, used_at: DateTime<Utc>) -> DomainResult<Prompt>;
}
