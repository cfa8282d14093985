use crate::domain::assignment::PersonId;
use crate::domain::prompt::PromptId;
use crate::domain::submission::value_objects::{SubmissionId, SubmissionText};
use chrono::{DateTime, Utc};

/// Raw contribution. `author` is `None` for anonymous submissions and
/// `prompt_id` is `None` for unsolicited ones.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub author: Option<PersonId>,
    pub text: SubmissionText,
    pub prompt_id: Option<PromptId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub author: Option<PersonId>,
    pub text: SubmissionText,
    pub prompt_id: Option<PromptId>,
    pub created_at: DateTime<Utc>,
}
