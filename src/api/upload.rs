// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multipart upload extraction

use axum_extra::extract::Multipart;
use bytes::Bytes;

use super::errors::ApiError;

/// Multipart field name both endpoints read the image from.
pub const UPLOAD_FIELD: &str = "file";

/// Pull the uploaded image bytes out of a multipart request.
///
/// Returns [`ApiError::MissingFile`] when no "file" field is present; that is
/// the one explicitly specified client error of the API.
pub async fn read_upload(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidImage(e.to_string()))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidImage(e.to_string()));
        }
    }
    Err(ApiError::MissingFile)
}
