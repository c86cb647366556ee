// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ONNX binary image classifier wrapper
//!
//! Wraps one ONNX Runtime session and its class-name table. Both cascade
//! stages (blood gate, leukemia classifier) are instances of this type; they
//! differ only in model file and labels.

use anyhow::{Context, Result};
use image::RgbImage;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use super::preprocessing::to_input_tensor;

/// A single classifier verdict: the winning label and its probability.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Winning class label
    pub label: String,
    /// Index of the winning class in the model's class table
    pub class_index: usize,
    /// Softmax probability of the winning class (0.0-1.0)
    pub confidence: f32,
}

impl Prediction {
    /// Render the confidence as a percentage string with two decimals.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}

/// ONNX-based image classifier
///
/// The session is wrapped in `Arc<Mutex>` for thread-safe shared access
/// across request handlers; the session itself is read-only after load.
#[derive(Clone)]
pub struct OnnxClassifier {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// Model input name, resolved from the session
    input_name: String,
    /// Class labels, indexed by model output position
    class_names: Vec<String>,
    /// Human-readable model name for logs and /health
    name: String,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("name", &self.name)
            .field("input_name", &self.input_name)
            .field("class_names", &self.class_names)
            .finish_non_exhaustive()
    }
}

impl OnnxClassifier {
    /// Load a classifier from an ONNX model file.
    ///
    /// # Errors
    /// Returns error if the model file is missing or ONNX Runtime fails to
    /// initialize. Callers treat this as fatal at startup.
    pub async fn load<P: AsRef<Path>>(
        name: impl Into<String>,
        model_path: P,
        class_names: &[&str],
    ) -> Result<Self> {
        let name = name.into();
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("Classifier model not found: {}", model_path.display());
        }

        info!("Loading {} classifier from {}", name, model_path.display());

        // CPU-only execution, matching the single-process serving model
        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load classifier model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "input".to_string());

        debug!("{} classifier input: {}", name, input_name);
        info!("✅ {} classifier loaded successfully (CPU-only)", name);

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            class_names: class_names.iter().map(|s| s.to_string()).collect(),
            name,
        })
    }

    /// Classify an RGB image.
    ///
    /// Runs resize/normalize preprocessing, one forward pass and a softmax
    /// over the logits, and returns the winning class with its probability.
    pub fn classify(&self, image: &RgbImage) -> Result<Prediction> {
        let tensor = to_input_tensor(image);

        let mut session = self.session.lock().unwrap();
        let input_value =
            Value::from_array(tensor).context("Failed to create input tensor")?;
        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Classifier inference failed")?;

        let logits_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;
        let logits: Vec<f32> = logits_tensor.iter().copied().collect();

        if logits.len() != self.class_names.len() {
            anyhow::bail!(
                "{} classifier produced {} logits (expected {})",
                self.name,
                logits.len(),
                self.class_names.len()
            );
        }

        let probabilities = softmax(&logits);
        let (class_index, confidence) = probabilities
            .iter()
            .copied()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .context("Classifier produced no probabilities")?;

        debug!(
            "{} classifier: {} ({:.4})",
            self.name, self.class_names[class_index], confidence
        );

        Ok(Prediction {
            label: self.class_names[class_index].clone(),
            class_index,
            confidence,
        })
    }

    /// Class labels in model output order
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// Model name for logs and /health
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Numerically stable softmax.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|&e| e / sum.max(1e-12)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.2, -0.4]);
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_softmax_preserves_ordering() {
        let probs = softmax(&[2.0, 0.5]);
        assert!(probs[0] > probs[1]);
    }

    #[test]
    fn test_softmax_handles_large_logits() {
        let probs = softmax(&[1000.0, 999.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!(probs[0] > probs[1]);
    }

    #[test]
    fn test_softmax_equal_logits_split_evenly() {
        let probs = softmax(&[3.0, 3.0]);
        assert!((probs[0] - 0.5).abs() < 1e-5);
        assert!((probs[1] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_confidence_percent_two_decimals() {
        let prediction = Prediction {
            label: "Normal".to_string(),
            class_index: 1,
            confidence: 0.98765,
        };
        assert_eq!(prediction.confidence_percent(), "98.77%");

        let half = Prediction {
            label: "ALL".to_string(),
            class_index: 0,
            confidence: 0.5,
        };
        assert_eq!(half.confidence_percent(), "50.00%");
    }

    #[test]
    fn test_confidence_percent_ends_with_percent_sign() {
        let prediction = Prediction {
            label: "not_blood".to_string(),
            class_index: 0,
            confidence: 0.731,
        };
        assert!(prediction.confidence_percent().ends_with('%'));
    }
}
