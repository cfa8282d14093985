// src/application/commands/prompts.rs
use crate::{
    application::{dto::PromptDto, error::ApplicationResult, ports::time::Clock},
    domain::{
        category::ContentCategory,
        prompt::{NewPrompt, PromptId, PromptRepository, PromptRotationSelector, PromptText},
    },
};
use std::sync::Arc;

pub struct AddPromptCommand {
    pub text: String,
    pub category: String,
}

pub struct NextPromptCommand {
    pub category: String,
}

pub struct PromptCommandService {
    selector: Arc<PromptRotationSelector>,
    repo: Arc<dyn PromptRepository>,
    clock: Arc<dyn Clock>,
}

impl PromptCommandService {
    pub fn new(
        selector: Arc<PromptRotationSelector>,
        repo: Arc<dyn PromptRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            selector,
            repo,
            clock,
        }
    }

    pub async fn add_prompt(&self, command: AddPromptCommand) -> ApplicationResult<PromptDto> {
        let category = ContentCategory::parse(&command.category)?;
        let text = PromptText::new(command.text)?;
        let created = self
            .repo
            .insert(NewPrompt {
                text,
                category,
                created_at: self.clock.now(),
            })
            .await?;
        Ok(created.into())
    }

    /// Select the next prompt for the category and stamp it as used.
    pub async fn next_prompt(&self, command: NextPromptCommand) -> ApplicationResult<PromptDto> {
        let category = ContentCategory::parse(&command.category)?;
        let prompt = self.selector.next(category, self.clock.now()).await?;
        Ok(prompt.into())
    }

    pub async fn mark_prompt_used(&self, id: i64) -> ApplicationResult<PromptDto> {
        let id = PromptId::new(id)?;
        let prompt = self.selector.mark_used(id, self.clock.now()).await?;
        Ok(prompt.into())
    }
}
