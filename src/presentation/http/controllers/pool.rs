// src/presentation/http/controllers/pool.rs
use crate::application::{
    commands::pool::AddPoolPromptCommand,
    dto::{BulkAddReport, PoolPromptDto, PoolStatusDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Operator;
use crate::presentation::http::response::{self, Envelope};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AddPoolPromptRequest {
    pub text: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkAddRequest {
    pub items: Vec<AddPoolPromptRequest>,
}

impl From<AddPoolPromptRequest> for AddPoolPromptCommand {
    fn from(request: AddPoolPromptRequest) -> Self {
        Self {
            text: request.text,
            category: request.category,
        }
    }
}

pub async fn pool_status(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
) -> HttpResult<Envelope<PoolStatusDto>> {
    state
        .services
        .pool_queries
        .status()
        .await
        .into_http()
        .map(response::ok)
}

pub async fn add_pool_prompt(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Json(payload): Json<AddPoolPromptRequest>,
) -> HttpResult<Envelope<PoolPromptDto>> {
    state
        .services
        .pool_commands
        .add_pool_prompt(payload.into())
        .await
        .into_http()
        .map(response::created)
}

pub async fn bulk_add_pool_prompts(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Json(payload): Json<BulkAddRequest>,
) -> Envelope<BulkAddReport> {
    let commands = payload.items.into_iter().map(Into::into).collect();
    let report = state.services.pool_commands.bulk_add(commands).await;
    let failure = report.aggregate_error();
    response::partial(report, failure)
}

pub async fn select_pool_prompt(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
) -> HttpResult<Envelope<PoolPromptDto>> {
    state
        .services
        .pool_commands
        .select_for_publication()
        .await
        .into_http()
        .map(response::ok)
}

pub async fn archive_pool_prompt(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Path(id): Path<i64>,
) -> HttpResult<Envelope<PoolPromptDto>> {
    state
        .services
        .pool_commands
        .archive_pool_prompt(id)
        .await
        .into_http()
        .map(response::ok)
}
