//! Content generation over HTTP with transactional persistence of the result.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::{
        content::{ContentGenerator, GenerationRequest},
        time::Clock,
    },
};
use crate::domain::errors::DomainError;
use crate::domain::submission::{NewProcessedResult, ProcessedResult};
use crate::infrastructure::repositories::{PROCESSED_RESULT_COLUMNS, ProcessedResultRow, map_sqlx};

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    submission_id: i64,
    text: &'a str,
    author_name: &'a str,
    author_department: &'a str,
    profile: &'static str,
    issue_id: i64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    content: String,
}

pub struct HttpContentGenerator {
    client: reqwest::Client,
    endpoint: String,
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl HttpContentGenerator {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        pool: PgPool,
        clock: Arc<dyn Clock>,
    ) -> ApplicationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApplicationError::infrastructure(format!("generator client: {err}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            pool,
            clock,
        })
    }

    async fn generate(&self, request: &GenerationRequest) -> ApplicationResult<String> {
        let body = GenerateBody {
            submission_id: i64::from(request.submission.id),
            text: request.submission.text.as_str(),
            author_name: &request.author_name,
            author_department: &request.author_department,
            profile: request.profile.as_str(),
            issue_id: i64::from(request.target_issue_id),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| ApplicationError::infrastructure(format!("content generator: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApplicationError::infrastructure(format!(
                "content generator returned HTTP {status}: {detail}"
            )));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|err| {
            ApplicationError::infrastructure(format!("content generator response: {err}"))
        })?;
        Ok(parsed.content)
    }

    async fn persist(&self, result: NewProcessedResult) -> ApplicationResult<ProcessedResult> {
        let status = result.status();
        let NewProcessedResult {
            submission_id,
            issue_id,
            profile,
            content,
            word_count,
            processed_at,
        } = result;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let issue_exists = sqlx::query_scalar::<_, i64>("SELECT id FROM issues WHERE id = $1 FOR SHARE")
            .bind(i64::from(issue_id))
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if issue_exists.is_none() {
            return Err(DomainError::NotFound(format!("issue {issue_id} not found")).into());
        }

        // Reprocessing replaces the previous outcome and counts the retry.
        let sql = format!(
            "INSERT INTO processed_results
                 (submission_id, issue_id, profile, content, processing_status, error,
                  retry_count, word_count, created_at, updated_at, processed_at)
             VALUES ($1, $2, $3, $4, $5, NULL, 0, $6, $7, $7, $7)
             ON CONFLICT (submission_id) DO UPDATE SET
                 issue_id = EXCLUDED.issue_id,
                 profile = EXCLUDED.profile,
                 content = EXCLUDED.content,
                 processing_status = EXCLUDED.processing_status,
                 error = NULL,
                 retry_count = processed_results.retry_count + 1,
                 word_count = EXCLUDED.word_count,
                 updated_at = EXCLUDED.updated_at,
                 processed_at = EXCLUDED.processed_at
             RETURNING {PROCESSED_RESULT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProcessedResultRow>(&sql)
            .bind(i64::from(submission_id))
            .bind(i64::from(issue_id))
            .bind(profile.as_str())
            .bind(content)
            .bind(status.as_str())
            .bind(word_count)
            .bind(processed_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx)?;

        let stored = ProcessedResult::try_from(row)?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(stored)
    }
}

#[async_trait]
impl ContentGenerator for HttpContentGenerator {
    async fn generate_and_persist(
        &self,
        request: GenerationRequest,
    ) -> ApplicationResult<ProcessedResult> {
        let content = self.generate(&request).await?;
        let result = NewProcessedResult::success(
            request.submission.id,
            request.target_issue_id,
            request.profile,
            content,
            self.clock.now(),
        )?;

        let stored = self.persist(result).await?;
        tracing::info!(
            submission_id = %stored.submission_id,
            issue_id = %request.target_issue_id,
            words = stored.word_count,
            retries = stored.retry_count,
            "processed result stored"
        );
        Ok(stored)
    }
}
