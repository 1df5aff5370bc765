// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Measurement and smoke-test harness around an ONNX inference runtime.
//!
//! The [`runtime`] module wraps `tract-onnx` behind a small handle-style API
//! (environment, session options, model, session, tensor). The [`harness`]
//! module times the expensive entry points of that API: loading a model and
//! creating a session.

pub mod config;
pub mod error;
pub mod harness;
pub mod io;
pub mod runtime;
pub mod telemetry;

pub use config::ProbeConfig;
pub use error::{ProbeError, ProbeResult};
pub use runtime::{
    Environment, ExecutionProvider, GraphOptimizationLevel, LoggingLevel, Model, Session,
    SessionOptions, Tensor, TensorInfo,
};
