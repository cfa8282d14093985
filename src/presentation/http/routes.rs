// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{assignments, broadcast, issues, pool, prompts, slack, submissions},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/slack/commands", post(slack::slash_command))
        .route("/api/v1/issues", get(issues::list_issues))
        .route("/api/v1/issues/resolve", post(issues::resolve_issue))
        .route(
            "/api/v1/issues/{id}",
            get(issues::get_issue).patch(issues::update_issue_content),
        )
        .route("/api/v1/issues/{id}/status", post(issues::set_issue_status))
        .route(
            "/api/v1/issues/{id}/assignments",
            get(issues::list_issue_assignments),
        )
        .route("/api/v1/assignments", post(assignments::create_assignment))
        .route(
            "/api/v1/assignments/distribute",
            post(assignments::distribute_assignment),
        )
        .route(
            "/api/v1/assignments/active",
            get(assignments::active_assignment),
        )
        .route(
            "/api/v1/assignments/{id}",
            delete(assignments::delete_assignment),
        )
        .route(
            "/api/v1/assignments/{id}/submission",
            post(assignments::link_submission),
        )
        .route(
            "/api/v1/people/{person}/assignments",
            delete(assignments::delete_person_assignments),
        )
        .route(
            "/api/v1/rotation-history",
            get(assignments::rotation_history),
        )
        .route(
            "/api/v1/prompts",
            get(prompts::list_prompts).post(prompts::add_prompt),
        )
        .route("/api/v1/prompts/next", post(prompts::next_prompt))
        .route("/api/v1/prompts/{id}/used", post(prompts::mark_prompt_used))
        .route(
            "/api/v1/pool",
            get(pool::pool_status).post(pool::add_pool_prompt),
        )
        .route("/api/v1/pool/bulk", post(pool::bulk_add_pool_prompts))
        .route("/api/v1/pool/select", post(pool::select_pool_prompt))
        .route("/api/v1/pool/{id}/archive", post(pool::archive_pool_prompt))
        .route("/api/v1/broadcast", post(broadcast::broadcast))
        .route("/api/v1/messages/direct", post(broadcast::send_direct))
        .route("/api/v1/submissions", post(submissions::submit))
        .route(
            "/api/v1/submissions/{id}/reprocess",
            post(submissions::reprocess),
        )
        .route(
            "/api/v1/submissions/{id}/result",
            get(submissions::get_result),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
