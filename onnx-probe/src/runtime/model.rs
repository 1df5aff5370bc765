// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Loading ONNX graphs from disk or memory.

use std::io::Cursor;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

use tract_onnx::prelude::*;

use crate::error::{ProbeError, ProbeResult};
use crate::runtime::Environment;

/// A decoded, not yet optimised ONNX graph.
#[derive(Debug, Clone)]
pub struct Model {
    inner: InferenceModel,
}

fn default_environment() -> &'static Environment {
    static DEFAULT_ENV: OnceLock<Environment> = OnceLock::new();
    DEFAULT_ENV.get_or_init(Environment::default)
}

impl Model {
    /// Loads the model at `path` with the process wide default environment.
    pub fn load(path: impl AsRef<Path>) -> ProbeResult<Self> {
        Self::load_with(default_environment(), path)
    }

    pub fn load_with(env: &Environment, path: impl AsRef<Path>) -> ProbeResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ProbeError::ModelNotFound(path.to_path_buf()));
        }
        let start = Instant::now();
        let inner = env.onnx().model_for_path(path)?;
        tracing::info!(
            environment = env.name(),
            path = %path.display(),
            nodes = inner.nodes().len(),
            elapsed_micros = start.elapsed().as_micros() as u64,
            "model loaded"
        );
        Ok(Model { inner })
    }

    /// Decodes a model from an in-memory protobuf buffer.
    pub fn from_bytes(env: &Environment, bytes: &[u8]) -> ProbeResult<Self> {
        if bytes.is_empty() {
            return Err(ProbeError::InvalidArgument(
                "Model buffer is empty".to_string(),
            ));
        }
        let inner = env.onnx().model_for_read(&mut Cursor::new(bytes))?;
        Ok(Model { inner })
    }

    pub fn node_count(&self) -> usize {
        self.inner.nodes().len()
    }

    pub fn input_names(&self) -> ProbeResult<Vec<String>> {
        let outlets = self.inner.input_outlets()?;
        Ok(outlets
            .iter()
            .map(|outlet| self.inner.node(outlet.node).name.clone())
            .collect())
    }

    pub fn output_names(&self) -> ProbeResult<Vec<String>> {
        let outlets = self.inner.output_outlets()?;
        Ok(outlets
            .iter()
            .map(|outlet| {
                self.inner
                    .outlet_label(*outlet)
                    .map(str::to_string)
                    .unwrap_or_else(|| self.inner.node(outlet.node).name.clone())
            })
            .collect())
    }

    pub(crate) fn into_inner(self) -> InferenceModel {
        self.inner
    }
}
