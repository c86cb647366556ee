// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction endpoint handler

use axum::extract::State;
use axum::Json;
use axum_extra::extract::Multipart;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::{debug, info};

use super::response::PredictResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::upload::read_upload;
use crate::classifier::ABNORMAL_CLASS_INDEX;
use crate::vision::{decode_upload, encode_jpeg, highlight_abnormal_cells, preprocess};

/// JPEG quality of the highlighted image payload
const HIGHLIGHT_JPEG_QUALITY: u8 = 90;

/// POST /predict - Classify a smear image
///
/// Stage 1 runs the blood gate on the raw image; a rejection short-circuits
/// with `{"prediction": "not_blood", "confidence": "<pct>%"}`. Stage 2
/// preprocesses the image, runs the leukemia classifier and returns the
/// verdict together with a highlighted copy of the raw image.
pub async fn predict_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiError> {
    let bytes = read_upload(multipart).await?;
    let (image, image_info) = decode_upload(&bytes)?;
    debug!(
        "Predict request: {}x{}, {} bytes",
        image_info.width, image_info.height, image_info.size_bytes
    );

    let rgb = image.to_rgb8();

    // Stage 1: blood gate on the raw image
    let gate = state
        .classifiers
        .blood_gate()
        .classify(&rgb)
        .map_err(|e| ApiError::Internal(format!("Blood gate failed: {}", e)))?;

    if gate.label == "not_blood" {
        info!("Blood gate rejected upload ({})", gate.confidence_percent());
        return Ok(Json(PredictResponse::rejected(&gate)));
    }

    // Stage 2: preprocess and classify ALL vs Normal
    let processed = preprocess(&rgb);
    let verdict = state
        .classifiers
        .disease()
        .classify(&processed)
        .map_err(|e| ApiError::Internal(format!("Leukemia classifier failed: {}", e)))?;

    info!(
        "Prediction: {} ({})",
        verdict.label,
        verdict.confidence_percent()
    );

    // The highlight runs on the raw image, not the preprocessed one
    let highlighted =
        highlight_abnormal_cells(&rgb, verdict.class_index == ABNORMAL_CLASS_INDEX);
    let jpeg = encode_jpeg(&highlighted, HIGHLIGHT_JPEG_QUALITY)
        .map_err(|e| ApiError::Internal(format!("Failed to encode highlight: {}", e)))?;
    let data_url = format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg));

    Ok(Json(PredictResponse::classified(&verdict, data_url)))
}
