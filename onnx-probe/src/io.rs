// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Fetching model and configuration bytes from local disk or S3.

pub mod file_reader;

pub use file_reader::*;

use crate::error::ProbeResult;
use crate::runtime::{Environment, Model};

/// Whether `path` addresses an object in S3 rather than a local file.
pub fn is_s3_path(path: &str) -> bool {
    path.starts_with("s3://")
}

/// Reads the model bytes through `reader` and decodes them in `env`.
pub async fn load_model_from<R: FileReader + ?Sized>(
    reader: &R,
    env: &Environment,
    path: &str,
) -> ProbeResult<Model> {
    let bytes = reader.read_bytes(path).await?;
    tracing::debug!(path, bytes = bytes.len(), "model bytes fetched");
    Model::from_bytes(env, &bytes)
}
