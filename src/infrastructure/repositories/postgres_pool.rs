// src/infrastructure/repositories/postgres_pool.rs
use super::{count, map_sqlx};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pool::{
    AnonymousPoolPrompt, NewPoolPrompt, PoolPromptId, PoolPromptStatus, PoolRepository, PoolUsage,
    WellnessTopic,
};
use crate::domain::prompt::PromptText;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const POOL_COLUMNS: &str = "id, text, category, status, created_at, used_at";

#[derive(Clone)]
pub struct PostgresPoolRepository {
    pool: PgPool,
}

impl PostgresPoolRepository {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PoolPromptRow {
    id: i64,
    text: String,
    category: String,
    status: String,
    created_at: DateTime<Utc>,
    used_at: Option<DateTime<Utc>>,
}

impl TryFrom<PoolPromptRow> for AnonymousPoolPrompt {
    type Error = DomainError;

    fn try_from(row: PoolPromptRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PoolPromptId::new(row.id)?,
            text: PromptText::new(row.text)?,
            topic: row.category.parse()?,
            status: row.status.parse()?,
            created_at: row.created_at,
            used_at: row.used_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct TopicCountRow {
    category: String,
    active: i64,
}

#[derive(Debug, FromRow)]
struct UsageRow {
    total_used: i64,
    used_since: i64,
}

#[async_trait]
impl PoolRepository for PostgresPoolRepository {
    async fn insert(&self, prompt: NewPoolPrompt) -> DomainResult<AnonymousPoolPrompt> {
        let NewPoolPrompt {
            text,
            topic,
            created_at,
        } = prompt;

        let sql = format!(
            "INSERT INTO anonymous_pool_prompts (text, category, status, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {POOL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PoolPromptRow>(&sql)
            .bind(text.into_inner())
            .bind(topic.as_str())
            .bind(PoolPromptStatus::Active.as_str())
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        AnonymousPoolPrompt::try_from(row)
    }

    async fn find_by_id(&self, id: PoolPromptId) -> DomainResult<Option<AnonymousPoolPrompt>> {
        let sql = format!("SELECT {POOL_COLUMNS} FROM anonymous_pool_prompts WHERE id = $1");
        let row = sqlx::query_as::<_, PoolPromptRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(AnonymousPoolPrompt::try_from).transpose()
    }

    async fn take_oldest_active(
        &self,
        used_at: DateTime<Utc>,
    ) -> DomainResult<Option<AnonymousPoolPrompt>> {
        // One statement: concurrent selectors skip the row another
        // transaction has locked instead of handing out the same prompt.
        let sql = format!(
            "UPDATE anonymous_pool_prompts SET status = $1, used_at = $2
             WHERE id = (
                 SELECT id FROM anonymous_pool_prompts
                 WHERE status = $3
                 ORDER BY created_at ASC, id ASC
                 LIMIT 1
                 FOR UPDATE SKIP LOCKED
             )
             RETURNING {POOL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PoolPromptRow>(&sql)
            .bind(PoolPromptStatus::Used.as_str())
            .bind(used_at)
            .bind(PoolPromptStatus::Active.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(AnonymousPoolPrompt::try_from).transpose()
    }

    async fn set_status(
        &self,
        id: PoolPromptId,
        status: PoolPromptStatus,
    ) -> DomainResult<AnonymousPoolPrompt> {
        let sql = format!(
            "UPDATE anonymous_pool_prompts SET status = $1 WHERE id = $2 RETURNING {POOL_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PoolPromptRow>(&sql)
            .bind(status.as_str())
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound(format!("pool prompt {id} not found")))?;

        AnonymousPoolPrompt::try_from(row)
    }

    async fn count_active_by_topic(&self) -> DomainResult<Vec<(WellnessTopic, u64)>> {
        let rows = sqlx::query_as::<_, TopicCountRow>(
            "SELECT category, COUNT(*) AS active FROM anonymous_pool_prompts
             WHERE status = $1
             GROUP BY category",
        )
        .bind(PoolPromptStatus::Active.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|row| Ok((row.category.parse::<WellnessTopic>()?, count(row.active))))
            .collect()
    }

    async fn usage(&self, since: DateTime<Utc>) -> DomainResult<PoolUsage> {
        let row = sqlx::query_as::<_, UsageRow>(
            "SELECT COUNT(*) AS total_used,
                    COUNT(*) FILTER (WHERE used_at >= $2) AS used_since
             FROM anonymous_pool_prompts
             WHERE status = $1",
        )
        .bind(PoolPromptStatus::Used.as_str())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(PoolUsage {
            total_used: count(row.total_used),
            used_since: count(row.used_since),
        })
    }
}
