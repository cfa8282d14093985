use crate::application::{dto::Summary, error::ApplicationError};
use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Every successful response carries a one-line message next to its payload
/// so thin clients can relay it as-is.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

pub type Envelope<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn ok<T: Summary>(data: T) -> Envelope<T> {
    with_status(StatusCode::OK, data)
}

pub fn created<T: Summary>(data: T) -> Envelope<T> {
    with_status(StatusCode::CREATED, data)
}

pub fn accepted<T: Summary>(data: T) -> Envelope<T> {
    with_status(StatusCode::ACCEPTED, data)
}

/// `207 Multi-Status` when the report carries a partial failure; the payload
/// still lists everything that succeeded.
pub fn partial<T: Summary>(data: T, failure: Option<ApplicationError>) -> Envelope<T> {
    let status = if failure.is_some() {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::OK
    };
    with_status(status, data)
}

pub fn message_only(message: impl Into<String>) -> Envelope<()> {
    (
        StatusCode::OK,
        Json(ApiResponse {
            message: message.into(),
            data: (),
        }),
    )
}

fn with_status<T: Summary>(status: StatusCode, data: T) -> Envelope<T> {
    (
        status,
        Json(ApiResponse {
            message: data.summary(),
            data,
        }),
    )
}
