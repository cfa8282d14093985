// src/presentation/http/controllers/assignments.rs
use crate::application::{
    commands::assignments::{
        CreateAssignmentCommand, DeleteAssignmentCommand, DeleteAssignmentsForPersonCommand,
        DistributeAssignmentCommand, LinkSubmissionCommand,
    },
    dto::{AssignmentDto, RotationHistoryDto},
    queries::assignments::{ActiveAssignmentQuery, RotationHistoryQuery},
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

const fn default_notify() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub issue_id: i64,
    pub person: String,
    pub category: String,
    #[serde(default)]
    pub prompt_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DistributeRequest {
    pub issue_id: i64,
    pub category: String,
    pub candidates: Vec<String>,
    #[serde(default = "default_notify")]
    pub notify: bool,
}

#[derive(Debug, Deserialize)]
pub struct LinkSubmissionRequest {
    pub submission_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ActiveAssignmentParams {
    pub person: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct RotationHistoryParams {
    pub person: Option<String>,
    pub category: Option<String>,
    pub since_weeks: Option<u32>,
}

pub async fn create_assignment(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Json(payload): Json<CreateAssignmentRequest>,
) -> HttpResult<Envelope<AssignmentDto>> {
    let command = CreateAssignmentCommand {
        issue_id: payload.issue_id,
        person: payload.person,
        category: payload.category,
        prompt_id: payload.prompt_id,
    };

    state
        .services
        .assignment_commands
        .create_assignment(command)
        .await
        .into_http()
        .map(response::created)
}

pub async fn distribute_assignment(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Json(payload): Json<DistributeRequest>,
) -> HttpResult<Envelope<AssignmentDto>> {
    let command = DistributeAssignmentCommand {
        issue_id: payload.issue_id,
        category: payload.category,
        candidates: payload.candidates,
        notify: payload.notify,
    };

    state
        .services
        .assignment_commands
        .distribute(command)
        .await
        .into_http()
        .map(response::created)
}

pub async fn delete_assignment(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Path(id): Path<i64>,
) -> HttpResult<Envelope<()>> {
    let removed = state
        .services
        .assignment_commands
        .delete_assignment(DeleteAssignmentCommand { id })
        .await
        .into_http()?;

    Ok(response::message_only(if removed == 0 {
        format!("Assignment #{id} did not exist; nothing removed.")
    } else {
        format!("Assignment #{id} removed.")
    }))
}

pub async fn delete_person_assignments(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Path(person): Path<String>,
) -> HttpResult<Envelope<()>> {
    let removed = state
        .services
        .assignment_commands
        .delete_for_person(DeleteAssignmentsForPersonCommand {
            person: person.clone(),
        })
        .await
        .into_http()?;

    Ok(response::message_only(format!(
        "Removed {removed} open assignment(s) for {person}."
    )))
}

pub async fn link_submission(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Path(assignment_id): Path<i64>,
    Json(payload): Json<LinkSubmissionRequest>,
) -> HttpResult<Envelope<AssignmentDto>> {
    state
        .services
        .assignment_commands
        .link_submission(LinkSubmissionCommand {
            assignment_id,
            submission_id: payload.submission_id,
        })
        .await
        .into_http()
        .map(response::ok)
}

pub async fn active_assignment(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Query(params): Query<ActiveAssignmentParams>,
) -> HttpResult<Envelope<AssignmentDto>> {
    state
        .services
        .assignment_queries
        .active_for(ActiveAssignmentQuery {
            person: params.person,
            category: params.category,
        })
        .await
        .into_http()
        .map(response::ok)
}

pub async fn rotation_history(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Query(params): Query<RotationHistoryParams>,
) -> HttpResult<Envelope<Vec<RotationHistoryDto>>> {
    state
        .services
        .assignment_queries
        .rotation_history(RotationHistoryQuery {
            person: params.person,
            category: params.category,
            since_weeks: params.since_weeks,
        })
        .await
        .into_http()
        .map(response::ok)
}
