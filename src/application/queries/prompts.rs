use crate::{
    application::{dto::PromptDto, error::ApplicationResult},
    domain::{category::ContentCategory, prompt::PromptRepository},
};
use std::sync::Arc;

pub struct ListPromptsQuery {
    pub category: Option<String>,
}

pub struct PromptQueryService {
    repo: Arc<dyn PromptRepository>,
}

impl PromptQueryService {
    pub fn new(repo: Arc<dyn PromptRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_prompts(&self, query: ListPromptsQuery) -> ApplicationResult<Vec<PromptDto>> {
        let category = query
            .category
            .as_deref()
            .map(ContentCategory::parse)
            .transpose()?;
        let prompts = self.repo.list(category).await?;
        Ok(prompts.into_iter().map(Into::into).collect())
    }
}
