// src/presentation/http/controllers/issues.rs
use crate::application::{
    commands::issues::{ResolveIssueCommand, SetIssueStatusCommand, UpdateIssueContentCommand},
    dto::{AssignmentDto, IssueDto},
    error::ApplicationError,
    queries::{
        assignments::AssignmentsByIssueQuery,
        issues::{GetIssueQuery, ListIssuesQuery},
    },
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Operator;
use crate::presentation::http::response::{self, Envelope};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ResolveIssueRequest {
    pub week: Option<i64>,
    pub year: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct IssueListParams {
    pub year: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Resolve the issue for an explicit cycle, or the current one when the
/// body names neither week nor year.
pub async fn resolve_issue(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Json(payload): Json<ResolveIssueRequest>,
) -> HttpResult<Envelope<IssueDto>> {
    let commands = &state.services.issue_commands;
    let issue = match (payload.week, payload.year) {
        (None, None) => commands.resolve_current_issue().await,
        (Some(week), Some(year)) => {
            commands
                .resolve_or_create_issue(ResolveIssueCommand { week, year })
                .await
        }
        _ => Err(ApplicationError::validation(
            "week/year: provide both or neither",
        )),
    }
    .into_http()?;

    Ok(response::ok(issue))
}

pub async fn list_issues(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Query(params): Query<IssueListParams>,
) -> HttpResult<Envelope<Vec<IssueDto>>> {
    state
        .services
        .issue_queries
        .list_issues(ListIssuesQuery { year: params.year })
        .await
        .into_http()
        .map(response::ok)
}

pub async fn get_issue(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Path(id): Path<i64>,
) -> HttpResult<Envelope<IssueDto>> {
    state
        .services
        .issue_queries
        .get_issue(GetIssueQuery { id })
        .await
        .into_http()
        .map(response::ok)
}

pub async fn set_issue_status(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Path(id): Path<i64>,
    Json(payload): Json<SetStatusRequest>,
) -> HttpResult<Envelope<IssueDto>> {
    state
        .services
        .issue_commands
        .set_status(SetIssueStatusCommand {
            id,
            status: payload.status,
        })
        .await
        .into_http()
        .map(response::ok)
}

pub async fn update_issue_content(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateContentRequest>,
) -> HttpResult<Envelope<IssueDto>> {
    state
        .services
        .issue_commands
        .update_content(UpdateIssueContentCommand {
            id,
            title: payload.title,
            body: payload.body,
        })
        .await
        .into_http()
        .map(response::ok)
}

pub async fn list_issue_assignments(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Path(issue_id): Path<i64>,
) -> HttpResult<Envelope<Vec<AssignmentDto>>> {
    state
        .services
        .assignment_queries
        .by_issue(AssignmentsByIssueQuery { issue_id })
        .await
        .into_http()
        .map(response::ok)
}
