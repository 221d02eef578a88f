use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::models::domain::{Arguments, IntentDescriptor};
use crate::services::functions::FunctionOutput;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no_match_status must be 200 or 400, got {0}")]
pub struct InvalidNoMatchStatus(pub u16);

/// Status and message returned when no template matches the query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u16")]
pub enum NoMatchPolicy {
    /// 200 with `{"error": "Invalid query format"}`
    Ok,
    /// 400 with `{"error": "Unable to parse query."}`
    #[default]
    BadRequest,
}

impl NoMatchPolicy {
    pub fn status(self) -> StatusCode {
        match self {
            Self::Ok => StatusCode::OK,
            Self::BadRequest => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Ok => "Invalid query format",
            Self::BadRequest => "Unable to parse query.",
        }
    }
}

impl TryFrom<u16> for NoMatchPolicy {
    type Error = InvalidNoMatchStatus;

    fn try_from(status: u16) -> Result<Self, Self::Error> {
        match status {
            200 => Ok(Self::Ok),
            400 => Ok(Self::BadRequest),
            other => Err(InvalidNoMatchStatus(other)),
        }
    }
}

/// How `arguments` is emitted in an execute response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentsFormat {
    /// Nested JSON object with typed fields
    #[default]
    Object,
    /// JSON object encoded into a string field
    String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ArgumentsPayload {
    Object(Arguments),
    Encoded(String),
}

/// Response for the execute endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteResponse {
    pub name: String,
    pub arguments: ArgumentsPayload,
}

impl ExecuteResponse {
    pub fn from_descriptor(
        descriptor: IntentDescriptor,
        format: ArgumentsFormat,
    ) -> Result<Self, serde_json::Error> {
        let arguments = match format {
            ArgumentsFormat::Object => ArgumentsPayload::Object(descriptor.arguments),
            ArgumentsFormat::String => {
                ArgumentsPayload::Encoded(descriptor.arguments.to_json_string()?)
            }
        };

        Ok(Self {
            name: descriptor.name,
            arguments,
        })
    }
}

/// Response for the invoke endpoint
#[derive(Debug, Clone, Serialize)]
pub struct InvokeResponse {
    pub name: String,
    pub result: FunctionOutput,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
