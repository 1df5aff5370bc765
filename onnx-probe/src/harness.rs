// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Timed loops around the expensive runtime entry points.
//!
//! Every loop is synchronous and stops at the first failing iteration, returning
//! that failure instead of the samples collected so far.

use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::ProbeResult;
use crate::runtime::{Environment, Session, SessionOptions};

/// Times `iterations` model loads of the file at `path`.
pub fn time_model_load(
    env: &Environment,
    path: impl AsRef<Path>,
    iterations: usize,
) -> ProbeResult<Vec<Duration>> {
    let path = path.as_ref();
    let mut samples = Vec::with_capacity(iterations);
    for iteration in 0..iterations {
        let start = Instant::now();
        let loaded = env.load_model(path);
        let elapsed = start.elapsed();
        if let Err(e) = loaded {
            tracing::error!(iteration, error = %e, "model load failed");
            return Err(e);
        }
        samples.push(elapsed);
    }
    Ok(samples)
}

/// Times `iterations` session creations; releasing each session is not timed.
pub fn time_session_create(
    env: &Environment,
    path: impl AsRef<Path>,
    options: &SessionOptions,
    iterations: usize,
) -> ProbeResult<Vec<Duration>> {
    let path = path.as_ref();
    let mut samples = Vec::with_capacity(iterations);
    for iteration in 0..iterations {
        let start = Instant::now();
        let created = Session::new(env, path, options);
        let elapsed = start.elapsed();
        match created {
            Ok(session) => session.release(),
            Err(e) => {
                tracing::error!(iteration, error = %e, "session creation failed");
                return Err(e);
            }
        }
        samples.push(elapsed);
    }
    Ok(samples)
}

/// Total creation time of `iterations` create/release cycles.
///
/// Shaped for `criterion`'s `iter_custom`, which expects the summed duration.
pub fn session_cycles(
    env: &Environment,
    path: impl AsRef<Path>,
    options: &SessionOptions,
    iterations: u64,
) -> ProbeResult<Duration> {
    let samples = time_session_create(env, path, options, iterations as usize)?;
    Ok(samples.iter().sum())
}

/// Latency statistics over a set of samples, in microseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencySummary {
    pub count: usize,
    pub mean_micros: f64,
    pub min_micros: f64,
    pub max_micros: f64,
    pub p50_micros: f64,
    pub p99_micros: f64,
}

impl LatencySummary {
    /// Returns `None` for an empty sample set.
    pub fn from_samples(samples: &[Duration]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut micros: Vec<f64> = samples
            .iter()
            .map(|d| d.as_nanos() as f64 / 1_000.0)
            .collect();
        micros.sort_by(|a, b| a.total_cmp(b));

        let count = micros.len();
        let mean_micros = micros.iter().sum::<f64>() / count as f64;
        Some(LatencySummary {
            count,
            mean_micros,
            min_micros: micros[0],
            max_micros: micros[count - 1],
            p50_micros: micros[count / 2],
            p99_micros: micros[((count as f64 * 0.99) as usize).min(count - 1)],
        })
    }
}
