// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Sessions: models prepared into runnable plans according to [`SessionOptions`].

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tract_onnx::prelude::*;

use crate::error::{ProbeError, ProbeResult};
use crate::runtime::{
    Environment, ExecutionProvider, GraphOptimizationLevel, Model, SessionOptions, Tensor,
    TractRunnableModel,
};

/// A model bound to an execution provider and ready to run.
#[derive(Debug, Clone)]
pub struct Session {
    plan: Arc<TractRunnableModel>,
    optimization_level: GraphOptimizationLevel,
    provider: ExecutionProvider,
    input_count: usize,
    output_count: usize,
}

impl Session {
    /// Loads the model at `path` and prepares it.
    pub fn new(
        env: &Environment,
        path: impl AsRef<Path>,
        options: &SessionOptions,
    ) -> ProbeResult<Self> {
        let model = Model::load_with(env, path)?;
        Self::from_model(env, model, options)
    }

    pub fn from_model(
        env: &Environment,
        model: Model,
        options: &SessionOptions,
    ) -> ProbeResult<Self> {
        let provider = options.primary_provider();
        if !provider.is_available() {
            return Err(ProbeError::ProviderUnavailable(provider.name().to_string()));
        }
        let start = Instant::now();
        let mut inference = model.into_inner();
        let declared_inputs = inference.input_outlets()?.len();
        for shape_override in options.input_shapes() {
            let index = shape_override.input_index;
            if index >= declared_inputs {
                return Err(ProbeError::InvalidArgument(format!(
                    "Input {} is out of range, the model declares {} inputs",
                    index, declared_inputs
                )));
            }
            // Only the shape changes; the declared element type is kept.
            let mut fact = inference.input_fact(index)?.clone();
            fact.shape = shape_override.shape.clone().into();
            inference.set_input_fact(index, fact)?;
        }

        let optimization_level = options.graph_optimization_level();
        let typed: TypedModel = match optimization_level {
            GraphOptimizationLevel::DisableAll => inference.into_typed()?,
            GraphOptimizationLevel::EnableBasic => inference.into_typed()?.into_decluttered()?,
            GraphOptimizationLevel::EnableExtended | GraphOptimizationLevel::EnableAll => {
                inference.into_optimized()?
            }
        };
        let input_count = typed.input_outlets()?.len();
        let output_count = typed.output_outlets()?.len();
        let plan = typed.into_runnable()?;

        tracing::trace!(
            environment = env.name(),
            provider = %provider,
            level = %optimization_level,
            elapsed_micros = start.elapsed().as_micros() as u64,
            "session created"
        );
        Ok(Session {
            plan: Arc::new(plan),
            optimization_level,
            provider,
            input_count,
            output_count,
        })
    }

    pub fn optimization_level(&self) -> GraphOptimizationLevel {
        self.optimization_level
    }

    pub fn provider(&self) -> ExecutionProvider {
        self.provider
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn output_count(&self) -> usize {
        self.output_count
    }

    /// Runs the plan; inputs are matched to the graph inputs by position.
    pub fn run(&self, inputs: Vec<Tensor>) -> ProbeResult<Vec<Tensor>> {
        if inputs.len() != self.input_count {
            return Err(ProbeError::InvalidArgument(format!(
                "Session expects {} inputs, got {}",
                self.input_count,
                inputs.len()
            )));
        }
        let values: TVec<TValue> = inputs.into_iter().map(Tensor::into_value).collect();
        let outputs = self.plan.run(values)?;
        Ok(outputs.into_iter().map(Tensor::from_value).collect())
    }

    /// Releases the plan. Dropping the session has the same effect.
    pub fn release(self) {
        tracing::trace!(provider = %self.provider, "releasing session");
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_fails_before_preparation() {
        let env = Environment::default();
        let options = SessionOptions::new();
        let err = Session::new(&env, "../models/opset8/test_bvlc_alexnet/absent.onnx", &options)
            .unwrap_err();
        assert!(matches!(err, ProbeError::ModelNotFound(_)));
    }
}
