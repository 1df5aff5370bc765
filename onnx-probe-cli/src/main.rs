// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

use std::path::{Path, PathBuf};

use clap::Parser;
use cli::{ProbeArgs, ProbeCommand};
use onnx_probe::harness::{self, LatencySummary};
use onnx_probe::io::{self as probe_io, FileReader, S3Reader};
use onnx_probe::{telemetry, Environment, ProbeConfig, SessionOptions};
use report::BenchReport;

pub(crate) mod cli;
pub(crate) mod report;

/// Resolves `path` to a local file, downloading S3 objects into the temp directory.
async fn resolve_model_path(
    s3_reader: Option<&S3Reader>,
    path: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if !probe_io::is_s3_path(path) {
        return Ok(PathBuf::from(path));
    }
    let reader = s3_reader.ok_or("S3 client is not configured")?;
    let file_name = path.rsplit('/').next().unwrap_or("model.onnx");
    let local_path =
        std::env::temp_dir().join(format!("onnx-probe-{}-{}", uuid::Uuid::new_v4(), file_name));
    reader.download_to_file(path, &local_path).await?;
    tracing::info!(s3_path = path, local_path = %local_path.display(), "model downloaded");
    Ok(local_path)
}

fn remove_download(model_path: &str, local_path: &Path) {
    if probe_io::is_s3_path(model_path) {
        let _ = std::fs::remove_file(local_path);
    }
}

async fn load_config(
    s3_reader: Option<&S3Reader>,
    path: Option<&str>,
) -> Result<ProbeConfig, Box<dyn std::error::Error>> {
    let config = match (path, s3_reader) {
        (Some(path), Some(reader)) if probe_io::is_s3_path(path) => {
            ProbeConfig::from_json(&reader.read_string(path).await?)?
        }
        (Some(path), _) => ProbeConfig::from_file(path)?,
        (None, _) => ProbeConfig::from_env()?,
    };
    Ok(config)
}

fn needs_s3(args: &ProbeArgs) -> bool {
    let model_path = match &args.command {
        ProbeCommand::Load { path } | ProbeCommand::Session { path, .. } => path.as_deref(),
    };
    [args.common.config.as_deref(), model_path]
        .into_iter()
        .flatten()
        .any(probe_io::is_s3_path)
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ProbeArgs::parse();

    let io_runtime = tokio::runtime::Builder::new_current_thread()
        .thread_name("onnx-probe-io")
        .enable_all()
        .build()?;

    let aws_config = if needs_s3(&args) || args.common.cloudwatch_namespace.is_some() {
        Some(io_runtime.block_on(aws_config::load_from_env()))
    } else {
        None
    };
    let s3_reader = aws_config
        .as_ref()
        .map(|c| S3Reader::new(aws_sdk_s3::Client::new(c)));

    let config =
        io_runtime.block_on(load_config(s3_reader.as_ref(), args.common.config.as_deref()))?;
    if let Err(e) = telemetry::init(config.log_level) {
        eprintln!("{}", e);
    }
    let iterations = args.common.iterations.unwrap_or(config.iterations);
    let env = Environment::builder()
        .name("onnx-probe-cli")
        .log_level(config.log_level)
        .build();

    let report = match &args.command {
        ProbeCommand::Load { path } => {
            let model_path = path.as_deref().unwrap_or(&config.load_model_path);
            let local_path =
                io_runtime.block_on(resolve_model_path(s3_reader.as_ref(), model_path))?;
            tracing::info!(path = model_path, iterations, "timing model loads");
            let samples = harness::time_model_load(&env, &local_path, iterations);
            remove_download(model_path, &local_path);
            let summary = LatencySummary::from_samples(&samples?).ok_or("no iterations were run")?;
            BenchReport::new("load_model", model_path, summary)
        }
        ProbeCommand::Session {
            path,
            opt_level,
            provider,
        } => {
            let model_path = path.as_deref().unwrap_or(&config.session_model_path);
            let mut options = SessionOptions::new();
            options.set_graph_optimization_level(
                opt_level.unwrap_or(config.graph_optimization_level),
            )?;
            options.append_execution_provider(*provider)?;

            let local_path =
                io_runtime.block_on(resolve_model_path(s3_reader.as_ref(), model_path))?;
            tracing::info!(
                path = model_path,
                iterations,
                provider = %provider,
                level = %options.graph_optimization_level(),
                "timing session creation"
            );
            let samples = harness::time_session_create(&env, &local_path, &options, iterations);
            remove_download(model_path, &local_path);
            let summary = LatencySummary::from_samples(&samples?).ok_or("no iterations were run")?;
            let mut report = BenchReport::new("create_session", model_path, summary);
            report.optimization_level = Some(options.graph_optimization_level().to_string());
            report.provider = Some(provider.to_string());
            report
        }
    };

    let report_json = serde_json::to_string_pretty(&report)?;
    println!("{}", report_json);
    if let Some(report_path) = &args.common.report {
        std::fs::write(report_path, &report_json)?;
    }

    if let (Some(namespace), Some(aws_config)) =
        (&args.common.cloudwatch_namespace, &aws_config)
    {
        let cloudwatch_client = aws_sdk_cloudwatch::Client::new(aws_config);
        io_runtime.block_on(report::publish(&cloudwatch_client, namespace, &report))?;
    }

    io_runtime.shutdown_background();
    Ok(())
}
