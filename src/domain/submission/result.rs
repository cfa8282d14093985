// src/domain/submission/result.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::IssueId;
use crate::domain::submission::value_objects::{
    ProcessedResultId, ProcessingStatus, SubmissionId, TransformationProfile,
};
use chrono::{DateTime, Utc};

/// Generated article derived from one submission.
#[derive(Debug, Clone)]
pub struct ProcessedResult {
    pub id: ProcessedResultId,
    pub submission_id: SubmissionId,
    pub issue_id: Option<IssueId>,
    pub profile: TransformationProfile,
    pub content: String,
    pub status: ProcessingStatus,
    pub error: Option<String>,
    pub retry_count: i32,
    pub word_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

impl ProcessedResult {
    pub fn ensure_consistent(&self) -> DomainResult<()> {
        if self.status == ProcessingStatus::Success && self.content.trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "processed result for submission {} is marked success without content",
                self.submission_id
            )));
        }
        Ok(())
    }
}

/// Successful generation ready to be stored. Construction enforces that
/// a success always carries content.
#[derive(Debug, Clone)]
pub struct NewProcessedResult {
    pub submission_id: SubmissionId,
    pub issue_id: IssueId,
    pub profile: TransformationProfile,
    pub content: String,
    pub word_count: i32,
    pub processed_at: DateTime<Utc>,
}

impl NewProcessedResult {
    pub fn success(
        submission_id: SubmissionId,
        issue_id: IssueId,
        profile: TransformationProfile,
        content: impl Into<String>,
        processed_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "content: generator returned no content for submission {submission_id}"
            )));
        }
        let word_count = i32::try_from(content.split_whitespace().count()).unwrap_or(i32::MAX);
        Ok(Self {
            submission_id,
            issue_id,
            profile,
            content,
            word_count,
            processed_at,
        })
    }

    pub const fn status(&self) -> ProcessingStatus {
        ProcessingStatus::Success
    }
}
