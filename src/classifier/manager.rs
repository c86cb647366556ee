// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classifier set loaded at startup
//!
//! Both cascade stages load from one models directory. A missing model file
//! is a fatal startup error, never a request-time error.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use super::model::OnnxClassifier;

/// Blood-gate model file inside the models directory
pub const BLOOD_GATE_MODEL_FILE: &str = "blood_gate.onnx";
/// Leukemia classifier model file inside the models directory
pub const DISEASE_MODEL_FILE: &str = "leukemia.onnx";

/// Blood-gate class labels, in model output order
pub const BLOOD_GATE_CLASSES: [&str; 2] = ["not_blood", "valid_blood"];
/// Leukemia classifier class labels, in model output order
pub const DISEASE_CLASSES: [&str; 2] = ["ALL", "Normal"];

/// Index of the abnormal class in [`DISEASE_CLASSES`]
pub const ABNORMAL_CLASS_INDEX: usize = 0;

/// Summary of one loaded model, surfaced by /health
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    /// Model name
    pub name: String,
    /// Model file name
    pub file: String,
    /// Class labels
    pub classes: Vec<String>,
}

/// The two-stage classifier cascade
pub struct ClassifierSet {
    blood_gate: OnnxClassifier,
    disease: OnnxClassifier,
}

impl ClassifierSet {
    /// Load both classifiers from the models directory.
    pub async fn load(models_dir: &Path) -> Result<Self> {
        let blood_gate = OnnxClassifier::load(
            "blood-gate",
            models_dir.join(BLOOD_GATE_MODEL_FILE),
            &BLOOD_GATE_CLASSES,
        )
        .await
        .context("Failed to load blood-gate classifier")?;

        let disease = OnnxClassifier::load(
            "leukemia",
            models_dir.join(DISEASE_MODEL_FILE),
            &DISEASE_CLASSES,
        )
        .await
        .context("Failed to load leukemia classifier")?;

        Ok(Self { blood_gate, disease })
    }

    /// The blood/not-blood gate
    pub fn blood_gate(&self) -> &OnnxClassifier {
        &self.blood_gate
    }

    /// The ALL/Normal classifier
    pub fn disease(&self) -> &OnnxClassifier {
        &self.disease
    }

    /// List the loaded models for /health
    pub fn list_models(&self) -> Vec<ModelInfo> {
        vec![
            ModelInfo {
                name: self.blood_gate.name().to_string(),
                file: BLOOD_GATE_MODEL_FILE.to_string(),
                classes: self.blood_gate.class_names().to_vec(),
            },
            ModelInfo {
                name: self.disease.name().to_string(),
                file: DISEASE_MODEL_FILE.to_string(),
                classes: self.disease.class_names().to_vec(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_tables() {
        assert_eq!(BLOOD_GATE_CLASSES, ["not_blood", "valid_blood"]);
        assert_eq!(DISEASE_CLASSES, ["ALL", "Normal"]);
        assert_eq!(DISEASE_CLASSES[ABNORMAL_CLASS_INDEX], "ALL");
    }

    #[tokio::test]
    async fn test_load_fails_on_missing_models() {
        let result = ClassifierSet::load(Path::new("/nonexistent/models")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    #[ignore] // Only run if model files are downloaded
    async fn test_load_from_models_dir() {
        let dir = std::env::var("MODELS_DIR").unwrap_or_else(|_| "./models".to_string());
        let set = ClassifierSet::load(Path::new(&dir)).await.unwrap();
        assert_eq!(set.list_models().len(), 2);
    }
}
