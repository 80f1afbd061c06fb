//! storebench binary
//!
//! Runs the write/read benchmark and prints one line per timing to stdout.
//! Logs go to stderr.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use storebench::backend::{BackendKind, ReadOrder};
use storebench::codec::ItemCodec;
use storebench::{harness, Config, Report, ReportFormat, WorkloadMode};
use tracing_subscriber::{fmt, EnvFilter};

/// Storage engine write/read benchmark
#[derive(Parser, Debug)]
#[command(name = "storebench")]
#[command(about = "Compare write and read throughput of an LSM store and SQLite")]
#[command(version)]
struct Args {
    /// Root directory for backend files
    #[arg(short, long, default_value = "./storebench_data")]
    data_dir: PathBuf,

    /// Log store directory (default: <data-dir>/logstore)
    #[arg(long)]
    logstore_path: Option<PathBuf>,

    /// Relational store directory (default: <data-dir>/relational)
    #[arg(long)]
    relational_path: Option<PathBuf>,

    /// Records per workload
    #[arg(short = 'n', long, default_value_t = 100_000)]
    records: usize,

    /// Seed for the structured-random workload
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Workloads to run, comma separated
    #[arg(
        short,
        long = "workload",
        value_enum,
        value_delimiter = ',',
        default_values_t = [WorkloadMode::SequentialIntegers, WorkloadMode::StructuredRandom]
    )]
    workloads: Vec<WorkloadMode>,

    /// Backends to run, comma separated
    #[arg(
        short,
        long = "backend",
        value_enum,
        value_delimiter = ',',
        default_values_t = [BackendKind::Relational, BackendKind::LogStore]
    )]
    backends: Vec<BackendKind>,

    /// Encoding of structured item values
    #[arg(long, value_enum, default_value_t = ItemCodec::Json)]
    item_codec: ItemCodec,

    /// Row the relational backend returns for a duplicated key
    #[arg(long, value_enum, default_value_t = ReadOrder::FirstWrite)]
    read_order: ReadOrder,

    /// Skip comparing read values with written values
    #[arg(long)]
    no_verify: bool,

    /// Reuse existing backend files instead of starting empty
    #[arg(long)]
    keep_existing: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_level = if args.quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    tracing::info!("storebench v{}", storebench::VERSION);

    let mut builder = Config::builder()
        .data_dir(&args.data_dir)
        .record_count(args.records)
        .seed(args.seed)
        .workloads(args.workloads)
        .backends(args.backends)
        .item_codec(args.item_codec)
        .read_order(args.read_order)
        .verify_values(!args.no_verify)
        .reset(!args.keep_existing)
        .report_format(args.format);
    if let Some(path) = args.logstore_path {
        builder = builder.logstore_path(path);
    }
    if let Some(path) = args.relational_path {
        builder = builder.relational_path(path);
    }
    let config = builder.build();

    tracing::info!("Data directory: {}", config.data_dir.display());

    let mut report = Report::new(io::stdout().lock(), config.report_format);
    if let Err(e) = harness::run(&config, &mut report) {
        tracing::error!("Benchmark aborted: {}", e);
        // The filter may silence tracing entirely
        eprintln!("storebench: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Benchmark complete");
}
