use crate::application::error::ApplicationError;
use crate::domain::pool::AnonymousPoolPrompt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::Summary;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PoolPromptDto {
    pub id: i64,
    pub text: String,
    pub category: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub used_at: Option<DateTime<Utc>>,
}

impl From<AnonymousPoolPrompt> for PoolPromptDto {
    fn from(prompt: AnonymousPoolPrompt) -> Self {
        Self {
            id: prompt.id.into(),
            text: prompt.text.into_inner(),
            category: prompt.topic.as_str().to_string(),
            status: prompt.status.as_str().to_string(),
            created_at: prompt.created_at,
            used_at: prompt.used_at,
        }
    }
}

impl Summary for PoolPromptDto {
    fn summary(&self) -> String {
        format!("Anonymous prompt #{} ({}): {}", self.id, self.category, self.text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PoolStatusDto {
    pub total_active: u64,
    /// Active prompts per wellness category; every category is present.
    pub by_category: BTreeMap<String, u64>,
    pub health: String,
    pub recommended_action: String,
    pub total_used: u64,
    pub used_last_30_days: u64,
}

impl Summary for PoolStatusDto {
    fn summary(&self) -> String {
        self.recommended_action.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkAddRejection {
    /// Position of the rejected item in the submitted batch.
    pub index: usize,
    pub reason: String,
}

/// Outcome of a partial-commit batch insert. Accepted items are stored even
/// when others in the same batch were rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BulkAddReport {
    pub added: Vec<PoolPromptDto>,
    pub rejected: Vec<BulkAddRejection>,
}

impl BulkAddReport {
    pub fn aggregate_error(&self) -> Option<ApplicationError> {
        if self.rejected.is_empty() {
            return None;
        }
        let details: Vec<String> = self
            .rejected
            .iter()
            .map(|r| format!("item {}: {}", r.index, r.reason))
            .collect();
        Some(ApplicationError::partial_failure(format!(
            "{} of {} pool prompts rejected ({})",
            self.rejected.len(),
            self.added.len() + self.rejected.len(),
            details.join("; ")
        )))
    }
}

impl Summary for BulkAddReport {
    fn summary(&self) -> String {
        match self.aggregate_error() {
            None => format!("Added {} anonymous prompts.", self.added.len()),
            Some(err) => format!("Added {} anonymous prompts; {err}", self.added.len()),
        }
    }
}
