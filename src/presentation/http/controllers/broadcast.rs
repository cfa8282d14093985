// src/presentation/http/controllers/broadcast.rs
use crate::application::{
    dto::BroadcastReport, error::ApplicationError, ports::messaging::DirectoryMember,
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Operator;
use crate::presentation::http::response::{self, Envelope};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::Deserialize;

const NAME_PLACEHOLDER: &str = "{name}";

#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    /// Message text; `{name}` is replaced with each recipient's display name.
    pub template: String,
}

#[derive(Debug, Deserialize)]
pub struct DirectMessageRequest {
    pub recipient: String,
    pub text: String,
}

fn render(template: &str, member: &DirectoryMember) -> String {
    template.replace(NAME_PLACEHOLDER, &member.display_name)
}

pub async fn broadcast(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Json(payload): Json<BroadcastRequest>,
) -> HttpResult<Envelope<BroadcastReport>> {
    if payload.template.trim().is_empty() {
        return Err(HttpError::from_error(ApplicationError::validation(
            "template: message cannot be empty",
        )));
    }

    let template = payload.template;
    let report = state
        .services
        .broadcaster
        .broadcast(|member| render(&template, member))
        .await
        .into_http()?;
    let failure = report.aggregate_error();
    Ok(response::partial(report, failure))
}

pub async fn send_direct(
    Extension(state): Extension<HttpState>,
    _operator: Operator,
    Json(payload): Json<DirectMessageRequest>,
) -> HttpResult<Envelope<()>> {
    state
        .services
        .broadcaster
        .send_direct(&payload.recipient, &payload.text)
        .await
        .into_http()?;

    Ok(response::message_only(format!(
        "Message sent to {}.",
        payload.recipient
    )))
}
