// src/infrastructure/repositories/postgres_submission.rs
use super::map_sqlx;
use crate::domain::assignment::PersonId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::IssueId;
use crate::domain::prompt::PromptId;
use crate::domain::submission::{
    NewSubmission, ProcessedResult, ProcessedResultId, ProcessedResultRepository, Submission,
    SubmissionId, SubmissionRepository, SubmissionText,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const SUBMISSION_COLUMNS: &str = "id, author_id, text, prompt_id, created_at";

pub(crate) const PROCESSED_RESULT_COLUMNS: &str = "id, submission_id, issue_id, profile, content, \
     processing_status, error, retry_count, word_count, created_at, updated_at, processed_at";

#[derive(Clone)]
pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresProcessedResultRepository {
    pool: PgPool,
}

impl PostgresProcessedResultRepository {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubmissionRow {
    id: i64,
    author_id: Option<String>,
    text: String,
    prompt_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = DomainError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SubmissionId::new(row.id)?,
            author: row.author_id.map(PersonId::new).transpose()?,
            text: SubmissionText::new(row.text)?,
            prompt_id: row.prompt_id.map(PromptId::new).transpose()?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ProcessedResultRow {
    id: i64,
    submission_id: i64,
    issue_id: Option<i64>,
    profile: String,
    content: String,
    processing_status: String,
    error: Option<String>,
    retry_count: i32,
    word_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProcessedResultRow> for ProcessedResult {
    type Error = DomainError;

    fn try_from(row: ProcessedResultRow) -> Result<Self, Self::Error> {
        let result = Self {
            id: ProcessedResultId::new(row.id)?,
            submission_id: SubmissionId::new(row.submission_id)?,
            issue_id: row.issue_id.map(IssueId::new).transpose()?,
            profile: row.profile.parse()?,
            content: row.content,
            status: row.processing_status.parse()?,
            error: row.error,
            retry_count: row.retry_count,
            word_count: row.word_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
            processed_at: row.processed_at,
        };
        result.ensure_consistent()?;
        Ok(result)
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn insert(&self, submission: NewSubmission) -> DomainResult<Submission> {
        let NewSubmission {
            author,
            text,
            prompt_id,
            created_at,
        } = submission;

        let sql = format!(
            "INSERT INTO submissions (author_id, text, prompt_id, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {SUBMISSION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(author.map(PersonId::into_inner))
            .bind(text.into_inner())
            .bind(prompt_id.map(i64::from))
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Submission::try_from(row)
    }

    async fn find_by_id(&self, id: SubmissionId) -> DomainResult<Option<Submission>> {
        let sql = format!("SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = $1");
        let row = sqlx::query_as::<_, SubmissionRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Submission::try_from).transpose()
    }

    async fn delete(&self, id: SubmissionId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("submission {id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl ProcessedResultRepository for PostgresProcessedResultRepository {
    async fn find_by_submission(
        &self,
        submission_id: SubmissionId,
    ) -> DomainResult<Option<ProcessedResult>> {
        let sql = format!(
            "SELECT {PROCESSED_RESULT_COLUMNS} FROM processed_results WHERE submission_id = $1"
        );
        let row = sqlx::query_as::<_, ProcessedResultRow>(&sql)
            .bind(i64::from(submission_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(ProcessedResult::try_from).transpose()
    }
}
