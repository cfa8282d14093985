// src/infrastructure/repositories/postgres_assignment.rs
use super::map_sqlx;
use crate::domain::assignment::{
    Assignment, AssignmentId, AssignmentRepository, NewAssignment, PersonId, RotationHistoryEntry,
    RotationHistoryFilter, RotationHistoryRepository,
};
use crate::domain::category::ContentCategory;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::issue::{CycleKey, IssueId};
use crate::domain::prompt::PromptId;
use crate::domain::submission::SubmissionId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const ASSIGNMENT_COLUMNS: &str =
    "id, issue_id, person_id, category, prompt_id, submission_id, created_at";

#[derive(Clone)]
pub struct PostgresAssignmentRepository {
    pool: PgPool,
}

impl PostgresAssignmentRepository {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresRotationHistoryRepository {
    pool: PgPool,
}

impl PostgresRotationHistoryRepository {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    id: i64,
    issue_id: i64,
    person_id: String,
    category: String,
    prompt_id: Option<i64>,
    submission_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AssignmentRow> for Assignment {
    type Error = DomainError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AssignmentId::new(row.id)?,
            issue_id: IssueId::new(row.issue_id)?,
            person: PersonId::new(row.person_id)?,
            category: row.category.parse()?,
            prompt_id: row.prompt_id.map(PromptId::new).transpose()?,
            submission_id: row.submission_id.map(SubmissionId::new).transpose()?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct HistoryRow {
    person_id: String,
    category: String,
    week: i32,
    year: i32,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<HistoryRow> for RotationHistoryEntry {
    type Error = DomainError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            person: PersonId::new(row.person_id)?,
            category: row.category.parse()?,
            cycle: CycleKey::new(i64::from(row.week), i64::from(row.year))?,
            recorded_at: row.recorded_at,
        })
    }
}

#[async_trait]
impl AssignmentRepository for PostgresAssignmentRepository {
    async fn insert(&self, assignment: NewAssignment) -> DomainResult<Assignment> {
        let NewAssignment {
            issue_id,
            person,
            category,
            prompt_id,
            created_at,
        } = assignment;

        let sql = format!(
            "INSERT INTO assignments (issue_id, person_id, category, prompt_id, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ASSIGNMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AssignmentRow>(&sql)
            .bind(i64::from(issue_id))
            .bind(person.as_str())
            .bind(category.as_str())
            .bind(prompt_id.map(i64::from))
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Assignment::try_from(row)
    }

    async fn find_by_id(&self, id: AssignmentId) -> DomainResult<Option<Assignment>> {
        let sql = format!("SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE id = $1");
        let row = sqlx::query_as::<_, AssignmentRow>(&sql)
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Assignment::try_from).transpose()
    }

    async fn find_by_issue_and_person(
        &self,
        issue_id: IssueId,
        person: &PersonId,
    ) -> DomainResult<Option<Assignment>> {
        let sql = format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE issue_id = $1 AND person_id = $2"
        );
        let row = sqlx::query_as::<_, AssignmentRow>(&sql)
            .bind(i64::from(issue_id))
            .bind(person.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Assignment::try_from).transpose()
    }

    async fn find_for(
        &self,
        issue_id: IssueId,
        person: &PersonId,
        category: ContentCategory,
    ) -> DomainResult<Option<Assignment>> {
        let sql = format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments
             WHERE issue_id = $1 AND person_id = $2 AND category = $3"
        );
        let row = sqlx::query_as::<_, AssignmentRow>(&sql)
            .bind(i64::from(issue_id))
            .bind(person.as_str())
            .bind(category.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Assignment::try_from).transpose()
    }

    async fn find_by_submission(
        &self,
        submission_id: SubmissionId,
    ) -> DomainResult<Option<Assignment>> {
        let sql = format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments
             WHERE submission_id = $1
             ORDER BY created_at DESC
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, AssignmentRow>(&sql)
            .bind(i64::from(submission_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        row.map(Assignment::try_from).transpose()
    }

    async fn list_by_issue(&self, issue_id: IssueId) -> DomainResult<Vec<Assignment>> {
        let sql = format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments
             WHERE issue_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, AssignmentRow>(&sql)
            .bind(i64::from(issue_id))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Assignment::try_from).collect()
    }

    async fn link_submission(
        &self,
        id: AssignmentId,
        submission_id: SubmissionId,
    ) -> DomainResult<Assignment> {
        let sql = format!(
            "UPDATE assignments SET submission_id = $1 WHERE id = $2 RETURNING {ASSIGNMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AssignmentRow>(&sql)
            .bind(i64::from(submission_id))
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound(format!("assignment {id} not found")))?;

        Assignment::try_from(row)
    }

    async fn delete(&self, id: AssignmentId) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected())
    }

    async fn delete_unfulfilled_for_person(&self, person: &PersonId) -> DomainResult<u64> {
        let result =
            sqlx::query("DELETE FROM assignments WHERE person_id = $1 AND submission_id IS NULL")
                .bind(person.as_str())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl RotationHistoryRepository for PostgresRotationHistoryRepository {
    async fn append(&self, entry: RotationHistoryEntry) -> DomainResult<()> {
        let RotationHistoryEntry {
            person,
            category,
            cycle,
            recorded_at,
        } = entry;

        sqlx::query(
            "INSERT INTO rotation_history (person_id, category, week, year, recorded_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(person.into_inner())
        .bind(category.as_str())
        .bind(i32::try_from(cycle.week.get()).unwrap_or(i32::MAX))
        .bind(cycle.year.get())
        .bind(recorded_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn list(&self, filter: RotationHistoryFilter) -> DomainResult<Vec<RotationHistoryEntry>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT person_id, category, week, year, recorded_at FROM rotation_history WHERE TRUE",
        );

        if let Some(person) = filter.person {
            builder.push(" AND person_id = ");
            builder.push_bind(person.into_inner());
        }
        if let Some(category) = filter.category {
            builder.push(" AND category = ");
            builder.push_bind(category.as_str());
        }
        if let Some(since) = filter.since {
            builder.push(" AND recorded_at >= ");
            builder.push_bind(since);
        }
        builder.push(" ORDER BY recorded_at DESC, id DESC");

        let rows = builder
            .build_query_as::<HistoryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(RotationHistoryEntry::try_from).collect()
    }
}
