//! Report output
//!
//! Emits one line per timing result, in the order received. No aggregation:
//! a run is a single pass, not a statistical sample.
//!
//! ## Formats
//! - text: `relational items write took 1.52s (100000 records, 16500000 bytes)`,
//!   preceded by a header line per workload
//! - json: one object per result, no header lines

use std::io::Write;

use crate::config::ReportFormat;
use crate::error::{BenchError, Result};
use crate::runner::{ResultSink, TimingResult};
use crate::workload::WorkloadSummary;

/// Writes results to any `Write` sink
pub struct Report<W: Write> {
    out: W,
    format: ReportFormat,
}

impl<W: Write> Report<W> {
    pub fn new(out: W, format: ReportFormat) -> Self {
        Self { out, format }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render a result as a single line, without the newline
    pub fn format_result(&self, result: &TimingResult) -> Result<String> {
        match self.format {
            ReportFormat::Text => Ok(format!(
                "{} {} {} took {:?} ({} records, {} bytes)",
                result.backend,
                result.workload,
                result.phase,
                result.elapsed,
                result.records,
                result.bytes
            )),
            ReportFormat::Json => serde_json::to_string(result)
                .map_err(|e| BenchError::Serialization(format!("JSON report failed: {}", e))),
        }
    }
}

impl<W: Write> ResultSink for Report<W> {
    fn begin_workload(&mut self, summary: &WorkloadSummary) -> Result<()> {
        if self.format == ReportFormat::Text {
            writeln!(
                self.out,
                "{} records, value size {} ({}, fingerprint {:08x})",
                summary.records, summary.value_size, summary.label, summary.fingerprint
            )?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn record(&mut self, result: &TimingResult) -> Result<()> {
        let line = self.format_result(result)?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}
