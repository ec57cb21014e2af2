// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::providers::payos::PayosError;

/// Error code carried in the `error` field of failed responses.
const ERROR_CODE: i32 = -1;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub data: Option<Value>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: i32,
    message: String,
    data: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<PayosError> for ApiError {
    fn from(err: PayosError) -> Self {
        match err {
            PayosError::InvalidSignature => ApiError::bad_request("Invalid PayOS signature"),
            PayosError::Api { code, desc } => {
                ApiError::bad_gateway(format!("PayOS rejected the request ({code}): {desc}"))
            }
            PayosError::Client(message) => {
                error!(%message, "PayOS client error");
                ApiError::internal("PayOS client is unavailable")
            }
            PayosError::Request(message) | PayosError::InvalidResponse(message) => {
                error!(%message, "PayOS request failed");
                ApiError::bad_gateway("PayOS request failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: ERROR_CODE,
            message: self.message,
            data: self.data,
        });
        (self.status, body).into_response()
    }
}
