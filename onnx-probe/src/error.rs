// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Status type returned by every fallible runtime call.

use std::path::PathBuf;

pub type ProbeResult<T> = Result<T, ProbeError>;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The model path does not point to a readable file.
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),
    /// The runtime rejected the model, the graph or the inputs.
    #[error("Runtime error: {0}")]
    Runtime(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The execution provider is not compiled into the bundled runtime.
    #[error("Execution provider {0} is not available in this build")]
    ProviderUnavailable(String),
    #[error("Shape {shape:?} holds {expected} elements, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },
    #[error("Tensor holds {actual} values, requested {requested}")]
    TypeMismatch { requested: String, actual: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Failures while fetching model bytes from remote storage.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ProbeError {
    /// Human readable message of the status, never empty.
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            "unknown error".to_string()
        } else {
            message
        }
    }
}

impl From<tract_onnx::prelude::TractError> for ProbeError {
    fn from(err: tract_onnx::prelude::TractError) -> Self {
        // `{:#}` keeps the whole context chain of the anyhow error on one line.
        ProbeError::Runtime(format!("{:#}", err))
    }
}
