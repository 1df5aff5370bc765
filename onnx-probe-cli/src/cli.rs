// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use onnx_probe::{ExecutionProvider, GraphOptimizationLevel};

#[derive(Parser, Debug)]
#[command(
    name = "onnx-probe",
    version,
    about = "Times ONNX model loading and session creation"
)]
pub struct ProbeArgs {
    #[command(subcommand)]
    pub command: ProbeCommand,
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ProbeCommand {
    /// Time repeated loads of a model file.
    Load {
        /// Local path or s3://bucket/key; defaults to `load_model_path` from the config.
        path: Option<String>,
    },
    /// Time repeated session create/release cycles; release is not timed.
    Session {
        /// Local path or s3://bucket/key; defaults to `session_model_path` from the config.
        path: Option<String>,
        /// One of disable_all, basic, extended, all.
        #[arg(long)]
        opt_level: Option<GraphOptimizationLevel>,
        /// `cpu`, `cuda` or `cuda:<device>`.
        #[arg(long, default_value = "cpu")]
        provider: ExecutionProvider,
    },
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// JSON configuration file (local path or s3://bucket/key).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Overrides `iterations` from the config.
    #[arg(long, global = true)]
    pub iterations: Option<usize>,
    /// Write the JSON report to this file as well as stdout.
    #[arg(long, global = true)]
    pub report: Option<PathBuf>,
    /// Publish the latency summary to this CloudWatch namespace.
    #[arg(long, global = true)]
    pub cloudwatch_namespace: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_load() {
        let args =
            ProbeArgs::try_parse_from(["onnx-probe", "load", "model.onnx", "--iterations", "7"])
                .unwrap();
        assert_eq!(
            args.command,
            ProbeCommand::Load {
                path: Some("model.onnx".to_string())
            }
        );
        assert_eq!(args.common.iterations, Some(7));
        assert!(args.common.report.is_none());
    }

    #[test]
    fn test_parse_session_defaults() {
        let args = ProbeArgs::try_parse_from(["onnx-probe", "session"]).unwrap();
        assert_eq!(
            args.command,
            ProbeCommand::Session {
                path: None,
                opt_level: None,
                provider: ExecutionProvider::Cpu,
            }
        );
    }

    #[test]
    fn test_parse_session_with_gpu() {
        let args = ProbeArgs::try_parse_from([
            "onnx-probe",
            "session",
            "s3://models/alexnet.onnx",
            "--opt-level",
            "extended",
            "--provider",
            "cuda:1",
            "--cloudwatch-namespace",
            "OnnxProbe/Bench",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            ProbeCommand::Session {
                path: Some("s3://models/alexnet.onnx".to_string()),
                opt_level: Some(GraphOptimizationLevel::EnableExtended),
                provider: ExecutionProvider::Cuda { device_id: 1 },
            }
        );
        assert_eq!(
            args.common.cloudwatch_namespace.as_deref(),
            Some("OnnxProbe/Bench")
        );
    }

    #[test]
    fn test_rejects_unknown_provider() {
        let result = ProbeArgs::try_parse_from(["onnx-probe", "session", "--provider", "tpu"]);
        assert!(result.is_err());
    }
}
