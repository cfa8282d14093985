use crate::domain::issue::PublicationIssue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Summary;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueDto {
    pub id: i64,
    pub week: u32,
    pub year: i32,
    pub title: String,
    pub body: String,
    pub status: String,
    pub publication_date: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PublicationIssue> for IssueDto {
    fn from(issue: PublicationIssue) -> Self {
        Self {
            id: issue.id.into(),
            week: issue.key.week.get(),
            year: issue.key.year.get(),
            title: issue.title,
            body: issue.body,
            status: issue.status.as_str().to_string(),
            publication_date: issue.publication_date,
            published_at: issue.published_at,
            created_at: issue.created_at,
            updated_at: issue.updated_at,
        }
    }
}

impl Summary for IssueDto {
    fn summary(&self) -> String {
        format!(
            "Issue #{} ({}) is {}, publishing {}.",
            self.id,
            self.title,
            self.status,
            self.publication_date.format("%Y-%m-%d %H:%M UTC")
        )
    }
}
