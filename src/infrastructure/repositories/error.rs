use crate::domain::errors::DomainError;

const CNT_ISSUE_CYCLE: &str = "issues_week_year_key";
const CNT_ASSIGNMENT_ISSUE_PERSON: &str = "assignments_issue_person_key";
const CNT_ASSIGNMENT_ISSUE: &str = "assignments_issue_id_fkey";
const CNT_PROCESSED_SUBMISSION: &str = "processed_results_submission_key";
const CNT_PROCESSED_SUCCESS_CHECK: &str = "processed_results_success_requires_content_chk";
const CNT_POOL_USED_CHECK: &str = "anonymous_pool_used_requires_timestamp_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_ISSUE_CYCLE => {
                        DomainError::Conflict("an issue already exists for this cycle".into())
                    }
                    CNT_ASSIGNMENT_ISSUE_PERSON => DomainError::Conflict(
                        "person already has an assignment for this issue".into(),
                    ),
                    CNT_ASSIGNMENT_ISSUE => DomainError::NotFound("issue not found".into()),
                    CNT_PROCESSED_SUBMISSION => DomainError::Conflict(
                        "submission already has a processed result".into(),
                    ),
                    CNT_PROCESSED_SUCCESS_CHECK => DomainError::Validation(
                        "successful results require generated content".into(),
                    ),
                    CNT_POOL_USED_CHECK => {
                        DomainError::Validation("used pool prompts require used_at".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

/// Convert a stored count into the unsigned form the domain reports.
pub fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
