use crate::{
    application::{
        dto::ProcessedResultDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::submission::{ProcessedResultRepository, SubmissionId},
};
use std::sync::Arc;

pub struct SubmissionQueryService {
    results: Arc<dyn ProcessedResultRepository>,
}

impl SubmissionQueryService {
    pub fn new(results: Arc<dyn ProcessedResultRepository>) -> Self {
        Self { results }
    }

    pub async fn get_result(&self, submission_id: i64) -> ApplicationResult<ProcessedResultDto> {
        let id = SubmissionId::new(submission_id)?;
        let result = self
            .results
            .find_by_submission(id)
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found(format!("submission {id} has no processed result yet"))
            })?;
        Ok(result.into())
    }
}
