// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classifier;
pub mod config;
pub mod vision;

// Re-export main types
pub use api::{build_router, start_server, ApiError, AppState, PredictResponse};
pub use classifier::{ClassifierSet, OnnxClassifier, Prediction};
pub use config::ServerConfig;
