// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction response payload

use serde::{Deserialize, Serialize};

use crate::classifier::{Prediction, ABNORMAL_CLASS_INDEX};

/// Description returned for the abnormal class
pub const ABNORMAL_DESCRIPTION: &str = "Large abnormal blast cell detected";
/// Description returned for the normal class
pub const NORMAL_DESCRIPTION: &str = "Normal blood smear detected";

/// Response body for POST /predict.
///
/// A gate rejection carries only prediction and confidence; a full
/// classification adds the description and the highlighted image data-URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// "not_blood", "ALL" or "Normal"
    pub prediction: String,
    /// Percentage string with two decimals, e.g. "97.31%"
    pub confidence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// "data:image/jpeg;base64,..." payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_image: Option<String>,
}

impl PredictResponse {
    /// Build the short-circuit response for a gate rejection.
    pub fn rejected(gate: &Prediction) -> Self {
        Self {
            prediction: gate.label.clone(),
            confidence: gate.confidence_percent(),
            description: None,
            highlighted_image: None,
        }
    }

    /// Build the full response for an accepted blood image.
    pub fn classified(verdict: &Prediction, highlighted_image: String) -> Self {
        let description = if verdict.class_index == ABNORMAL_CLASS_INDEX {
            ABNORMAL_DESCRIPTION
        } else {
            NORMAL_DESCRIPTION
        };

        Self {
            prediction: verdict.label.clone(),
            confidence: verdict.confidence_percent(),
            description: Some(description.to_string()),
            highlighted_image: Some(highlighted_image),
        }
    }
}
