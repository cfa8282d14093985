use crate::domain::errors::DomainResult;
use crate::domain::pool::entity::{AnonymousPoolPrompt, NewPoolPrompt};
use crate::domain::pool::value_objects::{PoolPromptId, PoolPromptStatus, WellnessTopic};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolUsage {
    pub total_used: u64,
    pub used_since: u64,
}

#[async_trait]
pub trait PoolRepository: Send + Sync {
    async fn insert(&self, prompt: NewPoolPrompt) -> DomainResult<AnonymousPoolPrompt>;
    async fn find_by_id(&self, id: PoolPromptId) -> DomainResult<Option<AnonymousPoolPrompt>>;

    /// Atomically mark the oldest active prompt as used and return it.
    async fn take_oldest_active(
        &self,
        used_at: DateTime<Utc>,
    ) -> DomainResult<Option<AnonymousPoolPrompt>>;

    async fn set_status(
        &self,
        id: PoolPromptId,
        status: PoolPromptStatus,
    ) -> DomainResult<AnonymousPoolPrompt>;

    /// Active counts per topic; topics without prompts may be omitted.
    async fn count_active_by_topic(&self) -> DomainResult<Vec<(WellnessTopic, u64)>>;
    async fn usage(&self, since: DateTime<Utc>) -> DomainResult<PoolUsage>;
}
