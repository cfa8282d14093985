use crate::domain::assignment::value_objects::{AssignmentId, PersonId};
use crate::domain::category::ContentCategory;
use crate::domain::issue::IssueId;
use crate::domain::prompt::PromptId;
use crate::domain::submission::SubmissionId;
use chrono::{DateTime, Utc};

/// A person's obligation to deliver one piece of content for one issue.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub id: AssignmentId,
    pub issue_id: IssueId,
    pub person: PersonId,
    pub category: ContentCategory,
    pub prompt_id: Option<PromptId>,
    pub submission_id: Option<SubmissionId>,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    pub const fn is_fulfilled(&self) -> bool {
        self.submission_id.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub issue_id: IssueId,
    pub person: PersonId,
    pub category: ContentCategory,
    pub prompt_id: Option<PromptId>,
    pub created_at: DateTime<Utc>,
}
