// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

use aws_sdk_cloudwatch::types::{Dimension, MetricDatum, StandardUnit};
use onnx_probe::harness::LatencySummary;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct BenchReport {
    pub run_id: String,
    pub recorded_at: String,
    pub benchmark: String,
    pub model_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub iterations: usize,
    pub summary: LatencySummary,
}

impl BenchReport {
    pub fn new(benchmark: &str, model_path: &str, summary: LatencySummary) -> Self {
        BenchReport {
            run_id: uuid::Uuid::new_v4().to_string(),
            recorded_at: chrono::Utc::now().to_rfc3339(),
            benchmark: benchmark.to_string(),
            model_path: model_path.to_string(),
            optimization_level: None,
            provider: None,
            iterations: summary.count,
            summary,
        }
    }

    pub fn metric_data(&self) -> Vec<MetricDatum> {
        let dimension = Dimension::builder()
            .name("Benchmark")
            .value(&self.benchmark)
            .build();
        [
            ("Latency_Avg", self.summary.mean_micros),
            ("Latency_P50", self.summary.p50_micros),
            ("Latency_P99", self.summary.p99_micros),
            ("Latency_Max", self.summary.max_micros),
        ]
        .into_iter()
        .map(|(name, value)| {
            MetricDatum::builder()
                .metric_name(name)
                .dimensions(dimension.clone())
                .value(value)
                .unit(StandardUnit::Microseconds)
                .build()
        })
        .collect()
    }
}

pub(crate) async fn publish(
    client: &aws_sdk_cloudwatch::Client,
    namespace: &str,
    report: &BenchReport,
) -> Result<(), Box<dyn std::error::Error>> {
    client
        .put_metric_data()
        .namespace(namespace)
        .set_metric_data(Some(report.metric_data()))
        .send()
        .await?;
    tracing::info!(namespace, benchmark = %report.benchmark, "latency summary published");
    Ok(())
}
