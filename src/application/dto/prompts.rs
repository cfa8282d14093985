use crate::domain::prompt::Prompt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Summary;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PromptDto {
    pub id: i64,
    pub text: String,
    pub category: String,
    #[serde(default)]
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Prompt> for PromptDto {
    fn from(prompt: Prompt) -> Self {
        Self {
            id: prompt.id.into(),
            text: prompt.text.into_inner(),
            category: prompt.category.as_str().to_string(),
            last_used_at: prompt.last_used_at,
            created_at: prompt.created_at,
        }
    }
}

impl Summary for PromptDto {
    fn summary(&self) -> String {
        format!("Prompt #{} ({}): {}", self.id, self.category, self.text)
    }
}
