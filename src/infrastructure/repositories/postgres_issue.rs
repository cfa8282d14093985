// src/infrastructure/repositories/postgres_issue.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::{
    CycleKey, IssueId, IssueRepository, IssueStatus, IssueUpdate, IssueYear, NewIssue,
    PublicationIssue,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

const ISSUE_COLUMNS: &str =
    "id, week, year, title, body, status, publication_date, published_at, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresIssueRepository {
    pool: PgPool,
}

impl PostgresIssueRepository {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct IssueRow {
    id: i64,
    week: i32,
    year: i32,
    title: String,
    body: String,
    status: String,
    publication_date: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IssueRow> for PublicationIssue {
    type Error = DomainError;

    fn try_from(row: IssueRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: IssueId::new(row.id)?,
            key: CycleKey::new(i64::from(row.week), i64::from(row.year))?,
            title: row.title,
            body: row.body,
            status: row.status.parse::<IssueStatus>()?,
            publication_date: row.publication_date,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn week_param(key: CycleKey) -> i32 {
    i32::try_from(key.week.get()).unwrap_or(i32::MAX)
}

#[async_trait]
impl IssueRepository for PostgresIssueRepository {
    async fn find_or_insert(&self, issue: NewIssue) -> DomainResult<PublicationIssue> {
        let NewIssue {
            key,
            title,
            publication_date,
            created_at,
        } = issue;

        // Concurrent first references race on the (week, year) constraint;
        // the loser inserts nothing and reads the winner's row.
        sqlx::query(
            "INSERT INTO issues (week, year, title, body, status, publication_date, created_at, updated_at)
             VALUES ($1, $2, $3, '', $4, $5, $6, $6)
             ON CONFLICT (week, year) DO NOTHING",
        )
        .bind(week_param(key))
        .bind(key.year.get())
        .bind(title)
        .bind(IssueStatus::Draft.as_str())
        .bind(publication_date)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.find_by_key(key).await?.ok_or_else(|| {
            DomainError::Persistence(format!("issue for {key} vanished after insert"))
        })
    }

    async fn find_by_id(&self, id: IssueId) -> DomainResult<Option<PublicationIssue>> {
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = $1");
        let row = sqlx::query_as::<_, IssueRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(PublicationIssue::try_from).transpose()
    }

    async fn find_by_key(&self, key: CycleKey) -> DomainResult<Option<PublicationIssue>> {
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE week = $1 AND year = $2");
        let row = sqlx::query_as::<_, IssueRow>(&sql)
            .bind(week_param(key))
            .bind(key.year.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(PublicationIssue::try_from).transpose()
    }

    async fn list(&self, year: Option<IssueYear>) -> DomainResult<Vec<PublicationIssue>> {
        let sql = format!(
            "SELECT {ISSUE_COLUMNS} FROM issues
             WHERE ($1::INTEGER IS NULL OR year = $1)
             ORDER BY year DESC, week DESC"
        );
        let rows = sqlx::query_as::<_, IssueRow>(&sql)
            .bind(year.map(IssueYear::get))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(PublicationIssue::try_from).collect()
    }

    async fn update(&self, update: IssueUpdate) -> DomainResult<PublicationIssue> {
        let IssueUpdate {
            id,
            title,
            body,
            status,
            published_at,
            original_updated_at,
            updated_at,
        } = update;

        let sql = format!(
            "UPDATE issues
             SET title = $1, body = $2, status = $3, published_at = $4, updated_at = $5
             WHERE id = $6 AND updated_at = $7
             RETURNING {ISSUE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, IssueRow>(&sql)
            .bind(title)
            .bind(body)
            .bind(status.as_str())
            .bind(published_at)
            .bind(updated_at)
            .bind(i64::from(id))
            .bind(original_updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let row = match row {
            Some(row) => row,
            None if self.find_by_id(id).await?.is_none() => {
                return Err(DomainError::NotFound(format!("issue {id} not found")));
            }
            None => {
                return Err(DomainError::Conflict(
                    "issue update conflict, please retry".into(),
                ));
            }
        };

        PublicationIssue::try_from(row)
    }
}
