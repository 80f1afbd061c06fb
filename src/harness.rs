//! Harness
//!
//! Top-level flow of a benchmark run:
//!
//! 1. Validate the config
//! 2. Prepare (and optionally clear) each backend's directory
//! 3. Generate every workload once
//! 4. Open the backends
//! 5. Run each workload through each backend, streaming results to the sink

use crate::backend::{open_backend, StorageBackend};
use crate::config::Config;
use crate::error::Result;
use crate::runner::{BenchmarkRunner, ResultSink};
use crate::workload::Workload;

/// Run the benchmark described by `config`
pub fn run<S: ResultSink + ?Sized>(config: &Config, sink: &mut S) -> Result<()> {
    config.validate()?;
    config.prepare_dirs()?;

    let workloads = generate_workloads(config)?;
    let backends = open_backends(config)?;

    let mut runner = BenchmarkRunner::new(backends).verify_values(config.verify_values);
    runner.run(&workloads, sink)
}

/// Generate the configured workloads, in order
pub fn generate_workloads(config: &Config) -> Result<Vec<Workload>> {
    config
        .workloads
        .iter()
        .map(|mode| {
            tracing::info!(
                "Generating {} workload ({} records, seed {})",
                mode,
                config.record_count,
                config.seed
            );
            Workload::generate(*mode, config.record_count, config.seed, config.item_codec)
        })
        .collect()
}

/// Open the configured backends, in order
pub fn open_backends(config: &Config) -> Result<Vec<Box<dyn StorageBackend>>> {
    config
        .backends
        .iter()
        .map(|kind| open_backend(*kind, config))
        .collect()
}
