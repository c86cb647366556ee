// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::vision::UploadError;

/// API-level errors, rendered as JSON bodies of the form {"error": "..."}.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The multipart request carried no "file" field.
    #[error("No file uploaded")]
    MissingFile,

    /// The upload could not be decoded as an image.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Classifier or encoding failure.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile | ApiError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        ApiError::InvalidImage(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
