// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Options controlling how a session prepares a loaded model.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{ProbeError, ProbeResult};

/// How much graph rewriting happens while a session is created.
///
/// The integer codes are the runtime's stable ABI values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GraphOptimizationLevel {
    /// Typed graph as loaded, no simplification.
    #[serde(alias = "none")]
    DisableAll,
    /// Decluttered graph: constant folding and removal of no-op nodes.
    #[serde(alias = "basic")]
    EnableBasic,
    /// Fully optimised graph with fused, platform specific kernels.
    #[serde(alias = "extended")]
    EnableExtended,
    #[default]
    #[serde(alias = "all")]
    EnableAll,
}

impl GraphOptimizationLevel {
    pub fn code(&self) -> i32 {
        match self {
            GraphOptimizationLevel::DisableAll => 0,
            GraphOptimizationLevel::EnableBasic => 1,
            GraphOptimizationLevel::EnableExtended => 2,
            GraphOptimizationLevel::EnableAll => 99,
        }
    }

    pub fn from_code(code: i32) -> ProbeResult<Self> {
        match code {
            0 => Ok(GraphOptimizationLevel::DisableAll),
            1 => Ok(GraphOptimizationLevel::EnableBasic),
            2 => Ok(GraphOptimizationLevel::EnableExtended),
            99 => Ok(GraphOptimizationLevel::EnableAll),
            other => Err(ProbeError::InvalidArgument(format!(
                "{} is not a graph optimization level",
                other
            ))),
        }
    }
}

impl FromStr for GraphOptimizationLevel {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable_all" | "none" => Ok(GraphOptimizationLevel::DisableAll),
            "basic" | "enable_basic" => Ok(GraphOptimizationLevel::EnableBasic),
            "extended" | "enable_extended" => Ok(GraphOptimizationLevel::EnableExtended),
            "all" | "enable_all" => Ok(GraphOptimizationLevel::EnableAll),
            other => Err(ProbeError::InvalidArgument(format!(
                "Unknown graph optimization level '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for GraphOptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GraphOptimizationLevel::DisableAll => "disable_all",
            GraphOptimizationLevel::EnableBasic => "basic",
            GraphOptimizationLevel::EnableExtended => "extended",
            GraphOptimizationLevel::EnableAll => "all",
        };
        f.write_str(name)
    }
}

/// Backend a session executes its operators on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionProvider {
    Cpu,
    Cuda { device_id: u32 },
}

impl ExecutionProvider {
    pub fn name(&self) -> &'static str {
        match self {
            ExecutionProvider::Cpu => "CPUExecutionProvider",
            ExecutionProvider::Cuda { .. } => "CUDAExecutionProvider",
        }
    }

    /// The bundled runtime only ships CPU kernels.
    pub fn is_available(&self) -> bool {
        matches!(self, ExecutionProvider::Cpu)
    }
}

impl FromStr for ExecutionProvider {
    type Err = ProbeError;

    /// Parses `cpu`, `cuda` or `cuda:<device>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let mut parts = lowered.splitn(2, ':');
        match (parts.next(), parts.next()) {
            (Some("cpu"), None) => Ok(ExecutionProvider::Cpu),
            (Some("cuda"), None) => Ok(ExecutionProvider::Cuda { device_id: 0 }),
            (Some("cuda"), Some(device)) => {
                let device_id = device.parse::<u32>().map_err(|_| {
                    ProbeError::InvalidArgument(format!("Invalid CUDA device index '{}'", device))
                })?;
                Ok(ExecutionProvider::Cuda { device_id })
            }
            _ => Err(ProbeError::InvalidArgument(format!(
                "Unknown execution provider '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for ExecutionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionProvider::Cpu => f.write_str("cpu"),
            ExecutionProvider::Cuda { device_id } => write!(f, "cuda:{}", device_id),
        }
    }
}

/// Fixes the shape of one float input before the graph is typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputShapeOverride {
    pub input_index: usize,
    pub shape: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionOptions {
    optimization_level: GraphOptimizationLevel,
    execution_providers: Vec<ExecutionProvider>,
    input_shapes: Vec<InputShapeOverride>,
}

impl SessionOptions {
    pub fn new() -> Self {
        SessionOptions::default()
    }

    pub fn graph_optimization_level(&self) -> GraphOptimizationLevel {
        self.optimization_level
    }

    pub fn set_graph_optimization_level(
        &mut self,
        level: GraphOptimizationLevel,
    ) -> ProbeResult<()> {
        self.optimization_level = level;
        Ok(())
    }

    pub fn set_graph_optimization_level_code(&mut self, code: i32) -> ProbeResult<()> {
        let level = GraphOptimizationLevel::from_code(code)?;
        self.set_graph_optimization_level(level)
    }

    /// Registers a provider; sessions try providers in registration order.
    pub fn append_execution_provider(&mut self, provider: ExecutionProvider) -> ProbeResult<()> {
        if !provider.is_available() {
            return Err(ProbeError::ProviderUnavailable(provider.name().to_string()));
        }
        if !self.execution_providers.contains(&provider) {
            self.execution_providers.push(provider);
        }
        Ok(())
    }

    pub fn execution_providers(&self) -> &[ExecutionProvider] {
        &self.execution_providers
    }

    /// Provider the session is bound to: the first registered one, CPU otherwise.
    pub fn primary_provider(&self) -> ExecutionProvider {
        self.execution_providers
            .first()
            .copied()
            .unwrap_or(ExecutionProvider::Cpu)
    }

    pub fn override_input_shape(
        &mut self,
        input_index: usize,
        shape: Vec<usize>,
    ) -> ProbeResult<()> {
        if shape.iter().any(|dim| *dim == 0) {
            return Err(ProbeError::InvalidArgument(format!(
                "Input {} shape {:?} has a zero sized dimension",
                input_index, shape
            )));
        }
        self.input_shapes.retain(|o| o.input_index != input_index);
        self.input_shapes.push(InputShapeOverride { input_index, shape });
        Ok(())
    }

    pub fn input_shapes(&self) -> &[InputShapeOverride] {
        &self.input_shapes
    }
}
