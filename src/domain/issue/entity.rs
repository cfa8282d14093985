// src/domain/issue/entity.rs
use crate::domain::errors::DomainResult;
use crate::domain::issue::status::IssueStatus;
use crate::domain::issue::value_objects::{CycleKey, IssueId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct PublicationIssue {
    pub id: IssueId,
    pub key: CycleKey,
    pub title: String,
    pub body: String,
    pub status: IssueStatus,
    pub publication_date: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PublicationIssue {
    /// Apply an operator-requested status change. Returns `false` when the
    /// issue already had the requested status.
    pub fn advance_to(&mut self, target: IssueStatus, now: DateTime<Utc>) -> DomainResult<bool> {
        let next = self.status.transition_to(target)?;
        if next == self.status {
            return Ok(false);
        }
        self.status = next;
        if next == IssueStatus::Published {
            self.published_at = Some(now);
        }
        self.updated_at = now;
        Ok(true)
    }

    pub fn set_content(&mut self, title: Option<String>, body: Option<String>, now: DateTime<Utc>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(body) = body {
            self.body = body;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone)]
pub struct NewIssue {
    pub key: CycleKey,
    pub title: String,
    pub publication_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl NewIssue {
    pub fn new(key: CycleKey, publication_date: DateTime<Utc>, created_at: DateTime<Utc>) -> Self {
        Self {
            key,
            title: format!("Week {}, {}", key.week.get(), key.year.get()),
            publication_date,
            created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IssueUpdate {
    pub id: IssueId,
    pub title: String,
    pub body: String,
    pub status: IssueStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IssueUpdate {
    pub fn from_issue(issue: &PublicationIssue, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id: issue.id,
            title: issue.title.clone(),
            body: issue.body.clone(),
            status: issue.status,
            published_at: issue.published_at,
            original_updated_at,
            updated_at: issue.updated_at,
        }
    }
}
