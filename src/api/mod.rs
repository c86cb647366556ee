// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP endpoint layer

pub mod errors;
pub mod http_server;
pub mod predict;
pub mod preview;
pub mod upload;

pub use errors::ApiError;
pub use http_server::{build_router, start_server, AppState};
pub use predict::PredictResponse;
pub use upload::{read_upload, UPLOAD_FIELD};
