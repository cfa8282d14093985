//! Slash-command webhook. Requests are authenticated with the Slack signing
//! secret and always answered within Slack's three-second window; long work
//! is handed to the submission pipeline, which reports back through the
//! command's `response_url`.

use crate::application::{
    ApplicationResult,
    commands::submissions::SubmitCommand,
    dto::Summary,
    error::ApplicationError,
    queries::assignments::ActiveAssignmentQuery,
};
use crate::presentation::http::error::{HttpError, HttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, body::Bytes, http::HeaderMap};
use serde::{Deserialize, Serialize};

const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
const SIGNATURE_HEADER: &str = "x-slack-signature";

#[derive(Debug, Deserialize)]
pub struct SlashCommandForm {
    pub command: String,
    #[serde(default)]
    pub text: String,
    pub user_id: String,
    #[serde(default)]
    pub response_url: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SlackReply {
    pub response_type: &'static str,
    pub text: String,
}

impl SlackReply {
    fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: "ephemeral",
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlashCommand {
    Submit,
    SubmitAnonymous,
    Assignment,
}

impl SlashCommand {
    fn parse(command: &str) -> Option<Self> {
        match command.trim() {
            "/submit" => Some(Self::Submit),
            "/submit-anonymous" => Some(Self::SubmitAnonymous),
            "/assignment" => Some(Self::Assignment),
            _ => None,
        }
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

pub async fn slash_command(
    Extension(state): Extension<HttpState>,
    headers: HeaderMap,
    body: Bytes,
) -> HttpResult<Json<SlackReply>> {
    state
        .slack_verifier
        .verify(
            header(&headers, TIMESTAMP_HEADER),
            header(&headers, SIGNATURE_HEADER),
            &body,
            state.clock.now(),
        )
        .map_err(|err| {
            tracing::warn!(error = %err, "rejected slack request");
            HttpError::from_error(ApplicationError::unauthorized(err.to_string()))
        })?;

    let form: SlashCommandForm = serde_urlencoded::from_bytes(&body).map_err(|err| {
        HttpError::from_error(ApplicationError::validation(format!(
            "slash command payload: {err}"
        )))
    })?;

    let Some(command) = SlashCommand::parse(&form.command) else {
        return Ok(Json(SlackReply::ephemeral(format!(
            "Unknown command `{}`.",
            form.command
        ))));
    };

    let outcome = dispatch(&state, command, form).await;
    let text = match outcome {
        Ok(text) => text,
        Err(err) => {
            if !(err.is_not_found() || err.is_validation() || err.is_conflict()) {
                tracing::error!(error = %err, "slash command failed");
            }
            err.to_string()
        }
    };
    Ok(Json(SlackReply::ephemeral(text)))
}

async fn dispatch(
    state: &HttpState,
    command: SlashCommand,
    form: SlashCommandForm,
) -> ApplicationResult<String> {
    match command {
        SlashCommand::Submit | SlashCommand::SubmitAnonymous => {
            let author = (command == SlashCommand::Submit).then_some(form.user_id);
            let receipt = state
                .services
                .submission_commands
                .submit(SubmitCommand {
                    author,
                    text: form.text,
                    prompt_id: None,
                    response_url: form.response_url,
                })
                .await?;
            Ok(receipt.summary())
        }
        SlashCommand::Assignment => {
            let assignment = state
                .services
                .assignment_queries
                .active_for(ActiveAssignmentQuery {
                    person: form.user_id,
                    category: form.text,
                })
                .await?;
            Ok(assignment.summary())
        }
    }
}
