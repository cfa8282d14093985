// src/presentation/http/controllers/prompts.rs
use crate::application::{
    commands::prompts::{AddPromptCommand, NextPromptCommand},
    dto::PromptDto,
    queries::prompts::ListPromptsQuery,
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
pub struct PromptListParams {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddPromptRequest {
    pub text: String,
    pub category: String,
}

#[derive(Debug, Deserialize)]
pub struct NextPromptRequest {
    pub category: String,
}

pub async fn list_prompts(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Query(params): Query<PromptListParams>,
) -> HttpResult<Envelope<Vec<PromptDto>>> {
    state
        .services
        .prompt_queries
        .list_prompts(ListPromptsQuery {
            category: params.category,
        })
        .await
        .into_http()
        .map(response::ok)
}

pub async fn add_prompt(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Json(payload): Json<AddPromptRequest>,
) -> HttpResult<Envelope<PromptDto>> {
    state
        .services
        .prompt_commands
        .add_prompt(AddPromptCommand {
            text: payload.text,
            category: payload.category,
        })
        .await
        .into_http()
        .map(response::created)
}

pub async fn next_prompt(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Json(payload): Json<NextPromptRequest>,
) -> HttpResult<Envelope<PromptDto>> {
    state
        .services
        .prompt_commands
        .next_prompt(NextPromptCommand {
            category: payload.category,
        })
        .await
        .into_http()
        .map(response::ok)
}

pub async fn mark_prompt_used(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Path(id): Path<i64>,
) -> HttpResult<Envelope<PromptDto>> {
    state
        .services
        .prompt_commands
        .mark_prompt_used(id)
        .await
        .into_http()
        .map(response::ok)
}
