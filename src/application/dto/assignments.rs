use crate::domain::assignment::{Assignment, RotationHistoryEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Summary;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentDto {
    pub id: i64,
    pub issue_id: i64,
    pub person: String,
    pub category: String,
    #[serde(default)]
    pub prompt_id: Option<i64>,
    #[serde(default)]
    pub submission_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<Assignment> for AssignmentDto {
    fn from(assignment: Assignment) -> Self {
        Self {
            id: assignment.id.into(),
            issue_id: assignment.issue_id.into(),
            person: assignment.person.into_inner(),
            category: assignment.category.as_str().to_string(),
            prompt_id: assignment.prompt_id.map(Into::into),
            submission_id: assignment.submission_id.map(Into::into),
            created_at: assignment.created_at,
        }
    }
}

impl Summary for AssignmentDto {
    fn summary(&self) -> String {
        let state = if self.submission_id.is_some() {
            "submitted"
        } else {
            "awaiting submission"
        };
        format!(
            "<@{}> is assigned {} for issue #{} ({state}).",
            self.person, self.category, self.issue_id
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RotationHistoryDto {
    pub person: String,
    pub category: String,
    pub week: u32,
    pub year: i32,
    pub recorded_at: DateTime<Utc>,
}

impl From<RotationHistoryEntry> for RotationHistoryDto {
    fn from(entry: RotationHistoryEntry) -> Self {
        Self {
            person: entry.person.into_inner(),
            category: entry.category.as_str().to_string(),
            week: entry.cycle.week.get(),
            year: entry.cycle.year.get(),
            recorded_at: entry.recorded_at,
        }
    }
}

impl Summary for RotationHistoryDto {
    fn summary(&self) -> String {
        format!(
            "<@{}> wrote {} in week {} of {}.",
            self.person, self.category, self.week, self.year
        )
    }
}
