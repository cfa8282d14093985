// src/application/commands/pool.rs
use crate::{
    application::{
        dto::{BulkAddRejection, BulkAddReport, PoolPromptDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        errors::DomainResult,
        pool::{NewPoolPrompt, PoolPromptId, PoolPromptStatus, PoolRepository, WellnessTopic},
        prompt::PromptText,
    },
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AddPoolPromptCommand {
    pub text: String,
    pub category: String,
}

pub struct PoolCommandService {
    repo: Arc<dyn PoolRepository>,
    clock: Arc<dyn Clock>,
}

impl PoolCommandService {
    pub fn new(repo: Arc<dyn PoolRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn add_pool_prompt(
        &self,
        command: AddPoolPromptCommand,
    ) -> ApplicationResult<PoolPromptDto> {
        let new_prompt = self.validate(command)?;
        let created = self.repo.insert(new_prompt).await?;
        tracing::info!(pool_prompt_id = %created.id, topic = %created.topic, "anonymous prompt added");
        Ok(created.into())
    }

    /// Partial commit: every valid item is stored even if others fail. Check
    /// `BulkAddReport::aggregate_error` for the rejected part.
    pub async fn bulk_add(&self, commands: Vec<AddPoolPromptCommand>) -> BulkAddReport {
        let mut report = BulkAddReport::default();
        for (index, command) in commands.into_iter().enumerate() {
            let outcome = match self.validate(command) {
                Ok(new_prompt) => self.repo.insert(new_prompt).await,
                Err(err) => Err(err),
            };
            match outcome {
                Ok(created) => report.added.push(created.into()),
                Err(err) => report.rejected.push(BulkAddRejection {
                    index,
                    reason: err.to_string(),
                }),
            }
        }
        if let Some(err) = report.aggregate_error() {
            tracing::warn!(added = report.added.len(), error = %err, "bulk pool add partially failed");
        }
        report
    }

    /// Consume the oldest active prompt (FIFO).
    pub async fn select_for_publication(&self) -> ApplicationResult<PoolPromptDto> {
        let taken = self
            .repo
            .take_oldest_active(self.clock.now())
            .await?
            .ok_or_else(|| ApplicationError::not_found("anonymous pool is empty"))?;
        tracing::info!(pool_prompt_id = %taken.id, topic = %taken.topic, "anonymous prompt selected");
        Ok(taken.into())
    }

    pub async fn archive_pool_prompt(&self, id: i64) -> ApplicationResult<PoolPromptDto> {
        let id = PoolPromptId::new(id)?;
        let mut prompt = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("pool prompt {id} not found")))?;
        if prompt.status == PoolPromptStatus::Archived {
            return Ok(prompt.into());
        }
        prompt.archive()?;
        let archived = self.repo.set_status(id, prompt.status).await?;
        Ok(archived.into())
    }

    fn validate(&self, command: AddPoolPromptCommand) -> DomainResult<NewPoolPrompt> {
        let topic: WellnessTopic = command.category.parse()?;
        let text = PromptText::new(command.text)?;
        Ok(NewPoolPrompt {
            text,
            topic,
            created_at: self.clock.now(),
        })
    }
}
