// src/infrastructure/repositories/postgres_prompt.rs
use super::map_sqlx;
use crate::domain::category::ContentCategory;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::prompt::{NewPrompt, Prompt, PromptId, PromptRepository, PromptText};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const PROMPT_COLUMNS: &str = "id, text, category, last_used_at, created_at";

#[derive(Clone)]
pub struct PostgresPromptRepository {
    pool: PgPool,
}

impl PostgresPromptRepository {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PromptRow {
    id: i64,
    text: String,
    category: String,
    last_used_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PromptRow> for Prompt {
    type Error = DomainError;

    fn try_from(row: PromptRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PromptId::new(row.id)?,
            text: PromptText::new(row.text)?,
            category: row.category.parse()?,
            last_used_at: row.last_used_at,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl PromptRepository for PostgresPromptRepository {
    async fn insert(&self, prompt: NewPrompt) -> DomainResult<Prompt> {
        let NewPrompt {
            text,
            category,
            created_at,
        } = prompt;

        let sql = format!(
            "INSERT INTO prompts (text, category, created_at) VALUES ($1, $2, $3)
             RETURNING {PROMPT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(text.into_inner())
            .bind(category.as_str())
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Prompt::try_from(row)
    }

    async fn find_by_id(&self, id: PromptId) -> DomainResult<Option<Prompt>> {
        let sql = format!("SELECT {PROMPT_COLUMNS} FROM prompts WHERE id = $1");
        let row = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Prompt::try_from).transpose()
    }

    async fn list(&self, category: Option<ContentCategory>) -> DomainResult<Vec<Prompt>> {
        let sql = format!(
            "SELECT {PROMPT_COLUMNS} FROM prompts
             WHERE ($1::TEXT IS NULL OR category = $1)
             ORDER BY last_used_at ASC NULLS FIRST, id ASC"
        );
        let rows = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(category.map(ContentCategory::as_str))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Prompt::try_from).collect()
    }

    async fn mark_used_if(
        &self,
        id: PromptId,
        expected: Option<DateTime<Utc>>,
        used_at: DateTime<Utc>,
    ) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE prompts SET last_used_at = $1
             WHERE id = $2 AND last_used_at IS NOT DISTINCT FROM $3",
        )
        .bind(used_at)
        .bind(i64::from(id))
        .bind(expected)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(result.rows_affected() == 1)
    }

    async fn mark_used(&self, id: PromptId, used_at: DateTime<Utc>) -> DomainResult<Prompt> {
        let sql = format!(
            "UPDATE prompts SET last_used_at = $1 WHERE id = $2 RETURNING {PROMPT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PromptRow>(&sql)
            .bind(used_at)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound(format!("prompt {id} not found")))?;

        Prompt::try_from(row)
    }
}
