// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /predict - two-stage classification endpoint

mod handler;
mod response;

pub use handler::predict_handler;
pub use response::{PredictResponse, ABNORMAL_DESCRIPTION, NORMAL_DESCRIPTION};
