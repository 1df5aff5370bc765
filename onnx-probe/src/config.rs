// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Harness configuration module to read the configurations from JSON string.

use std::path::Path;

use serde::Deserialize;

use crate::error::ProbeResult;
use crate::runtime::{GraphOptimizationLevel, LoggingLevel};

/// Environment variable naming a JSON configuration file for the benches.
pub const CONFIG_ENV_VAR: &str = "ONNX_PROBE_CONFIG";

fn default_load_model_path() -> String {
    "../models/opset8/test_tiny_yolov2/model.onnx".to_string()
}

fn default_session_model_path() -> String {
    "../models/opset8/test_bvlc_alexnet/model.onnx".to_string()
}

fn default_gpu_device_id() -> u32 {
    0
}

fn default_iterations() -> usize {
    10
}

fn default_sample_size() -> usize {
    10
}

fn default_measurement_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ProbeConfig {
    #[serde(default = "default_load_model_path")]
    pub load_model_path: String,
    #[serde(default = "default_session_model_path")]
    pub session_model_path: String,
    #[serde(default = "default_gpu_device_id")]
    pub gpu_device_id: u32,
    #[serde(default)]
    pub graph_optimization_level: GraphOptimizationLevel,
    #[serde(default)]
    pub log_level: LoggingLevel,
    /// Iterations of the command line loops.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Samples collected per criterion benchmark.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    #[serde(default = "default_measurement_secs")]
    pub measurement_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            load_model_path: default_load_model_path(),
            session_model_path: default_session_model_path(),
            gpu_device_id: default_gpu_device_id(),
            graph_optimization_level: GraphOptimizationLevel::default(),
            log_level: LoggingLevel::default(),
            iterations: default_iterations(),
            sample_size: default_sample_size(),
            measurement_secs: default_measurement_secs(),
        }
    }
}

impl ProbeConfig {
    pub fn from_json(json_str: &str) -> ProbeResult<Self> {
        let config: ProbeConfig = serde_json::from_str(json_str)?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let json_str = std::fs::read_to_string(path)?;
        Self::from_json(&json_str)
    }

    /// Reads the file named by [`CONFIG_ENV_VAR`], falling back to the defaults when unset.
    pub fn from_env() -> ProbeResult<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(ProbeConfig::default()),
        }
    }
}
