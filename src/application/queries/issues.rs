use crate::{
    application::{
        dto::IssueDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::issue::{IssueId, IssueRepository, IssueYear},
};
use std::sync::Arc;

pub struct GetIssueQuery {
    pub id: i64,
}

pub struct ListIssuesQuery {
    pub year: Option<i64>,
}

pub struct IssueQueryService {
    repo: Arc<dyn IssueRepository>,
}

impl IssueQueryService {
    pub fn new(repo: Arc<dyn IssueRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_issue(&self, query: GetIssueQuery) -> ApplicationResult<IssueDto> {
        let id = IssueId::new(query.id)?;
        let issue = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("issue {id} not found")))?;
        Ok(issue.into())
    }

    pub async fn list_issues(&self, query: ListIssuesQuery) -> ApplicationResult<Vec<IssueDto>> {
        let year = query.year.map(IssueYear::new).transpose()?;
        let issues = self.repo.list(year).await?;
        Ok(issues.into_iter().map(Into::into).collect())
    }
}
