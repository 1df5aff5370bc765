// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Runtime environment shared by every model and session created from it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::Level;

use crate::error::ProbeResult;
use crate::runtime::Model;

/// Severity threshold of the runtime's own log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoggingLevel {
    Verbose,
    Info,
    #[default]
    Warning,
    Error,
    Fatal,
}

impl LoggingLevel {
    pub fn as_tracing_level(&self) -> Level {
        match self {
            LoggingLevel::Verbose => Level::TRACE,
            LoggingLevel::Info => Level::INFO,
            LoggingLevel::Warning => Level::WARN,
            LoggingLevel::Error | LoggingLevel::Fatal => Level::ERROR,
        }
    }
}

/// Owns the ONNX framework instance (operator registry and protobuf loader).
///
/// Building the framework registers every supported operator, so it is done
/// once per environment and shared by all the loads and sessions that follow.
#[derive(Clone)]
pub struct Environment {
    name: String,
    log_level: LoggingLevel,
    onnx: Arc<tract_onnx::Onnx>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("name", &self.name)
            .field("log_level", &self.log_level)
            .finish_non_exhaustive()
    }
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        EnvironmentBuilder::default().name(name).build()
    }

    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn log_level(&self) -> LoggingLevel {
        self.log_level
    }

    /// Whether records of `level` pass this environment's threshold.
    ///
    /// Runtime records are not gated on this; the installed subscriber filters
    /// them, with `log_level` as its default directive.
    pub fn logs(&self, level: LoggingLevel) -> bool {
        level >= self.log_level
    }

    pub(crate) fn onnx(&self) -> &tract_onnx::Onnx {
        &self.onnx
    }

    /// Loads a model through this environment's framework instance.
    pub fn load_model(&self, path: impl AsRef<Path>) -> ProbeResult<Model> {
        Model::load_with(self, path)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new("onnx-probe")
    }
}

#[derive(Debug, Default)]
pub struct EnvironmentBuilder {
    name: Option<String>,
    log_level: LoggingLevel,
}

impl EnvironmentBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn log_level(mut self, log_level: LoggingLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn build(self) -> Environment {
        let name = self.name.unwrap_or_else(|| "onnx-probe".to_string());
        tracing::debug!(environment = %name, log_level = ?self.log_level, "creating environment");
        Environment {
            name,
            log_level: self.log_level,
            onnx: Arc::new(tract_onnx::onnx()),
        }
    }
}
