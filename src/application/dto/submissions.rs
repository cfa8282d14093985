use crate::domain::submission::ProcessedResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Summary;

/// Immediate acknowledgement of an accepted submission. Processing continues
/// in the background.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionReceipt {
    pub submission_id: i64,
    pub receipt_id: String,
    #[serde(default)]
    pub assignment_id: Option<i64>,
    pub message: String,
}

impl Summary for SubmissionReceipt {
    fn summary(&self) -> String {
        self.message.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessedResultDto {
    pub id: i64,
    pub submission_id: i64,
    #[serde(default)]
    pub issue_id: Option<i64>,
    pub profile: String,
    pub content: String,
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    pub retry_count: i32,
    pub word_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
}

impl From<ProcessedResult> for ProcessedResultDto {
    fn from(result: ProcessedResult) -> Self {
        Self {
            id: result.id.into(),
            submission_id: result.submission_id.into(),
            issue_id: result.issue_id.map(Into::into),
            profile: result.profile.as_str().to_string(),
            content: result.content,
            status: result.status.as_str().to_string(),
            error: result.error,
            retry_count: result.retry_count,
            word_count: result.word_count,
            created_at: result.created_at,
            updated_at: result.updated_at,
            processed_at: result.processed_at,
        }
    }
}

impl Summary for ProcessedResultDto {
    fn summary(&self) -> String {
        match &self.error {
            Some(err) => format!("Submission #{} {}: {err}", self.submission_id, self.status),
            None => format!(
                "Submission #{} {} as a {} piece ({} words).",
                self.submission_id, self.status, self.profile, self.word_count
            ),
        }
    }
}
