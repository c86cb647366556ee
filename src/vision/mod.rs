// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Smear-image processing: ingestion, preprocessing and highlighting

pub mod color;
pub mod enhance;
pub mod highlight;
pub mod image_utils;
pub mod preprocess;
pub mod segment;

pub use color::{equalize_lightness, purple_mask};
pub use highlight::highlight_abnormal_cells;
pub use image_utils::{decode_upload, encode_jpeg, ImageInfo, UploadError, MAX_UPLOAD_SIZE};
pub use preprocess::{compose_preview, preprocess, PREVIEW_TILE};
pub use segment::isolate_largest_purple_cell;
