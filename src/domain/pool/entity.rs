use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pool::value_objects::{PoolPromptId, PoolPromptStatus, WellnessTopic};
use crate::domain::prompt::PromptText;
use chrono::{DateTime, Utc};

/// Prompt contributed to the anonymous pool. Carries no contributor identity.
#[derive(Debug, Clone)]
pub struct AnonymousPoolPrompt {
    pub id: PoolPromptId,
    pub text: PromptText,
    pub topic: WellnessTopic,
    pub status: PoolPromptStatus,
    pub created_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

impl AnonymousPoolPrompt {
    pub fn archive(&mut self) -> DomainResult<()> {
        match self.status {
            PoolPromptStatus::Active => {
                self.status = PoolPromptStatus::Archived;
                Ok(())
            }
            PoolPromptStatus::Archived => Ok(()),
            PoolPromptStatus::Used => Err(DomainError::Conflict(format!(
                "pool prompt {} was already published and cannot be archived",
                self.id
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPoolPrompt {
    pub text: PromptText,
    pub topic: WellnessTopic,
    pub created_at: DateTime<Utc>,
}
