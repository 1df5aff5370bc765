// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! Model loading and session creation benchmarks.
//!
//! ```bash
//! cargo bench --package onnx-probe
//! ONNX_PROBE_CONFIG=probe.json cargo bench --package onnx-probe -- create_session
//! ```
//!
//! Model paths are relative to the working directory. A benchmark whose
//! preflight call fails is skipped and the runtime's message is logged.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use onnx_probe::{harness, telemetry};
use onnx_probe::{Environment, ExecutionProvider, ProbeConfig, Session, SessionOptions};

fn load_config() -> ProbeConfig {
    match ProbeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e.message(), "falling back to the default configuration");
            ProbeConfig::default()
        }
    }
}

fn environment(config: &ProbeConfig) -> Environment {
    Environment::builder()
        .name("onnx-probe-bench")
        .log_level(config.log_level)
        .build()
}

fn bench_load_model(c: &mut Criterion) {
    let config = load_config();
    let env = environment(&config);
    let path = config.load_model_path.as_str();

    if let Err(e) = env.load_model(path) {
        tracing::error!(benchmark = "load_model", error = %e.message(), "skipping");
        return;
    }

    c.bench_function("load_model", |b| {
        b.iter(|| {
            let model = env
                .load_model(black_box(path))
                .unwrap_or_else(|e| panic!("load_model failed: {}", e.message()));
            black_box(model)
        })
    });
}

fn bench_session_cycles(
    c: &mut Criterion,
    name: &str,
    env: &Environment,
    path: &str,
    options: &SessionOptions,
) {
    match Session::new(env, path, options) {
        Ok(session) => session.release(),
        Err(e) => {
            tracing::error!(benchmark = name, error = %e.message(), "skipping");
            return;
        }
    }

    c.bench_function(name, |b| {
        b.iter_custom(|iters| {
            harness::session_cycles(env, path, options, iters)
                .unwrap_or_else(|e| panic!("{} failed: {}", name, e.message()))
        })
    });
}

fn bench_create_session(c: &mut Criterion) {
    let config = load_config();
    let env = environment(&config);
    let mut options = SessionOptions::new();
    if let Err(e) = options.set_graph_optimization_level(config.graph_optimization_level) {
        tracing::error!(benchmark = "create_session", error = %e.message(), "skipping");
        return;
    }
    bench_session_cycles(c, "create_session", &env, &config.session_model_path, &options);
}

fn bench_create_session_with_gpu(c: &mut Criterion) {
    let config = load_config();
    let env = environment(&config);
    let mut options = SessionOptions::new();
    let provider = ExecutionProvider::Cuda {
        device_id: config.gpu_device_id,
    };
    if let Err(e) = options.append_execution_provider(provider) {
        tracing::error!(benchmark = "create_session_with_gpu", error = %e.message(), "skipping");
        return;
    }
    bench_session_cycles(
        c,
        "create_session_with_gpu",
        &env,
        &config.session_model_path,
        &options,
    );
}

fn criterion_config() -> Criterion {
    let config = load_config();
    // Already installed when criterion builds the config more than once.
    let _ = telemetry::init(config.log_level);
    Criterion::default()
        .sample_size(config.sample_size.max(10))
        .measurement_time(Duration::from_secs(config.measurement_secs.max(1)))
}

criterion_group!(
    name = model_benches;
    config = criterion_config();
    targets = bench_load_model, bench_create_session, bench_create_session_with_gpu
);
criterion_main!(model_benches);
