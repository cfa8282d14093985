use crate::domain::category::ContentCategory;
use crate::domain::prompt::value_objects::{PromptId, PromptText};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Prompt {
    pub id: PromptId,
    pub text: PromptText,
    pub category: ContentCategory,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPrompt {
    pub text: PromptText,
    pub category: ContentCategory,
    pub created_at: DateTime<Utc>,
}
