// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::runtime::LoggingLevel;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Failed to initialize telemetry subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

fn env_filter(default_level: LoggingLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level.as_tracing_level()).into())
        .from_env_lossy()
}

/// Installs a stderr `fmt` subscriber; `RUST_LOG` overrides `default_level`.
pub fn init(default_level: LoggingLevel) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(env_filter(default_level))
        .try_init()?;
    Ok(())
}
