// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Handle-style wrapper over the `tract-onnx` runtime.

use tract_onnx::prelude::{Graph, RunnableModel, TypedFact, TypedOp};

pub mod environment;
pub mod model;
pub mod session;
pub mod session_options;
pub mod tensor;

pub use environment::*;
pub use model::*;
pub use session::*;
pub use session_options::*;
pub use tensor::*;

pub(crate) type TractRunnableModel =
    RunnableModel<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;
