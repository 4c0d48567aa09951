//! Uniform `{status, message, data}` response envelope

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<Value>,
}

/// Success envelope with an optional message and payload
pub fn success(code: StatusCode, message: Option<&str>, data: Option<Value>) -> Response {
    let body = Envelope {
        status: Status::Success,
        message: message.map(str::to_string),
        data,
    };
    (code, Json(body)).into_response()
}

/// Failure envelope, always with a message and never with data
pub fn fail(code: StatusCode, message: impl Into<String>) -> Response {
    let body = Envelope {
        status: Status::Fail,
        message: Some(message.into()),
        data: None,
    };
    (code, Json(body)).into_response()
}
