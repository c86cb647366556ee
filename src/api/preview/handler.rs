// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Preview endpoint handler

use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::Multipart;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::api::upload::read_upload;
use crate::vision::{compose_preview, decode_upload, encode_jpeg, preprocess};

/// JPEG quality of the preview composite
const PREVIEW_JPEG_QUALITY: u8 = 95;

/// POST /preview - Return a 512x256 side-by-side JPEG
///
/// Left half is the uploaded image resized to 256x256, right half the
/// preprocessed equivalent. Responds 400 with `{"error": "No file uploaded"}`
/// when the multipart field is missing.
pub async fn preview_handler(multipart: Multipart) -> Result<Response, ApiError> {
    let bytes = read_upload(multipart).await?;
    let (image, info) = decode_upload(&bytes)?;
    debug!(
        "Preview request: {}x{}, {} bytes",
        info.width, info.height, info.size_bytes
    );

    let rgb = image.to_rgb8();
    let processed = preprocess(&rgb);
    let comparison = compose_preview(&rgb, &processed);

    let jpeg = encode_jpeg(&comparison, PREVIEW_JPEG_QUALITY)
        .map_err(|e| ApiError::Internal(format!("Failed to encode preview: {}", e)))?;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], jpeg).into_response())
}
