// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Tensors passed to and returned from sessions.

use std::sync::Arc;

use tract_onnx::prelude::*;

use crate::error::{ProbeError, ProbeResult};

/// Element type and dimensions of a tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorInfo {
    pub element_type: DatumType,
    pub shape: Vec<usize>,
}

impl TensorInfo {
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn element_count(&self) -> usize {
        self.shape.iter().product()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    inner: Arc<tract_onnx::prelude::Tensor>,
}

fn check_len(shape: &[usize], actual: usize) -> ProbeResult<()> {
    let expected: usize = shape.iter().product();
    if expected != actual {
        return Err(ProbeError::ShapeMismatch {
            shape: shape.to_vec(),
            expected,
            actual,
        });
    }
    Ok(())
}

impl Tensor {
    /// Builds a tensor by copying `data` laid out in row-major order.
    pub fn from_shape<T: Datum + Copy>(shape: &[usize], data: &[T]) -> ProbeResult<Self> {
        check_len(shape, data.len())?;
        let inner = tract_onnx::prelude::Tensor::from_shape(shape, data)?;
        Ok(Tensor {
            inner: inner.into_arc_tensor(),
        })
    }

    /// Builds a tensor taking ownership of `data`; works for non-`Copy` types such as `String`.
    pub fn from_vec<T: Datum>(shape: &[usize], data: Vec<T>) -> ProbeResult<Self> {
        check_len(shape, data.len())?;
        let array = tract_ndarray::ArrayD::from_shape_vec(tract_ndarray::IxDyn(shape), data)
            .map_err(|e| ProbeError::InvalidArgument(format!("Failed to shape tensor: {}", e)))?;
        Ok(Tensor {
            inner: array.into_arc_tensor(),
        })
    }

    pub fn scalar<T: Datum>(value: T) -> Self {
        Tensor {
            inner: tensor0(value).into_arc_tensor(),
        }
    }

    pub fn info(&self) -> TensorInfo {
        TensorInfo {
            element_type: self.inner.datum_type(),
            shape: self.inner.shape().to_vec(),
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.inner.rank() == 0
    }

    fn check_type<T: Datum>(&self) -> ProbeResult<()> {
        let actual = self.inner.datum_type();
        if actual != T::datum_type() {
            return Err(ProbeError::TypeMismatch {
                requested: format!("{:?}", T::datum_type()),
                actual: format!("{:?}", actual),
            });
        }
        Ok(())
    }

    /// Copies the elements out in row-major order.
    pub fn to_vec<T: Datum + Clone>(&self) -> ProbeResult<Vec<T>> {
        self.check_type::<T>()?;
        Ok(self.inner.as_slice::<T>()?.to_vec())
    }

    pub fn scalar_value<T: Datum + Clone>(&self) -> ProbeResult<T> {
        self.check_type::<T>()?;
        if !self.is_scalar() {
            return Err(ProbeError::InvalidArgument(format!(
                "Tensor of shape {:?} is not a scalar",
                self.inner.shape()
            )));
        }
        Ok(self.inner.to_scalar::<T>()?.clone())
    }

    /// Float view of a tensor holding `f32` or `f16` values.
    ///
    /// Half precision values are widened, which is lossless.
    pub fn to_f32_vec(&self) -> ProbeResult<Vec<f32>> {
        match self.inner.datum_type() {
            DatumType::F32 => self.to_vec::<f32>(),
            DatumType::F16 => {
                let widened = self.inner.cast_to::<f32>()?;
                Ok(widened.as_slice::<f32>()?.to_vec())
            }
            other => Err(ProbeError::TypeMismatch {
                requested: "F32".to_string(),
                actual: format!("{:?}", other),
            }),
        }
    }

    pub(crate) fn into_value(self) -> TValue {
        TValue::Const(self.inner)
    }

    pub(crate) fn from_value(value: TValue) -> Self {
        Tensor {
            inner: value.into_arc_tensor(),
        }
    }
}
