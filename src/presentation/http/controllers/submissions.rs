// src/presentation/http/controllers/submissions.rs
use crate::application::{
    commands::submissions::{ReprocessSubmissionCommand, SubmitCommand},
    dto::{ProcessedResultDto, SubmissionReceipt},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Operator;
use crate::presentation::http::response::{self, Envelope};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub author: Option<String>,
    pub text: String,
    #[serde(default)]
    pub prompt_id: Option<i64>,
    #[serde(default)]
    pub response_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReprocessRequest {
    #[serde(default)]
    pub response_url: Option<String>,
}

pub async fn submit(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Json(payload): Json<SubmitRequest>,
) -> HttpResult<Envelope<SubmissionReceipt>> {
    let command = SubmitCommand {
        author: payload.author,
        text: payload.text,
        prompt_id: payload.prompt_id,
        response_url: payload.response_url,
    };

    state
        .services
        .submission_commands
        .submit(command)
        .await
        .into_http()
        .map(response::accepted)
}

pub async fn reprocess(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Path(submission_id): Path<i64>,
    payload: Option<Json<ReprocessRequest>>,
) -> HttpResult<Envelope<SubmissionReceipt>> {
    let response_url = payload.and_then(|Json(body)| body.response_url);
    state
        .services
        .submission_commands
        .reprocess(ReprocessSubmissionCommand {
            submission_id,
            response_url,
        })
        .await
        .into_http()
        .map(response::accepted)
}

pub async fn get_result(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Path(submission_id): Path<i64>,
) -> HttpResult<Envelope<ProcessedResultDto>> {
    state
        .services
        .submission_queries
        .get_result(submission_id)
        .await
        .into_http()
        .map(response::ok)
}
