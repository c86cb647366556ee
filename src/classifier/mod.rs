// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Two-stage ONNX classification cascade

pub mod manager;
pub mod model;
pub mod preprocessing;

pub use manager::{
    ClassifierSet, ModelInfo, ABNORMAL_CLASS_INDEX, BLOOD_GATE_CLASSES, BLOOD_GATE_MODEL_FILE,
    DISEASE_CLASSES, DISEASE_MODEL_FILE,
};
pub use model::{softmax, OnnxClassifier, Prediction};
pub use preprocessing::{to_input_tensor, CLASSIFIER_INPUT_SIZE, MEAN, STD};
