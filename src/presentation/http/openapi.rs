// src/presentation/http/openapi.rs
use crate::application::dto::{
    AssignmentDto, BroadcastReport, BulkAddRejection, BulkAddReport, IssueDto, PoolPromptDto,
    PoolStatusDto, ProcessedResultDto, PromptDto, RotationHistoryDto, SubmissionReceipt,
};
use crate::presentation::http::error::ErrorResponse;
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "kawaraban",
        description = "Operator API for the weekly newsletter rotation engine."
    ),
    paths(super::routes::health),
    components(schemas(
        StatusResponse,
        ErrorResponse,
        IssueDto,
        AssignmentDto,
        RotationHistoryDto,
        PromptDto,
        PoolPromptDto,
        PoolStatusDto,
        BulkAddReport,
        BulkAddRejection,
        SubmissionReceipt,
        ProcessedResultDto,
        BroadcastReport
    )),
    modifiers(&OperatorSecurity),
    tags((name = "System", description = "Service status"))
)]
pub struct ApiDoc;

struct OperatorSecurity;

impl Modify for OperatorSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "operator_token",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub fn docs_router() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
