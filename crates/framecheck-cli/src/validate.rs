//! `framecheck validate`: checksum every case in a directory.

use std::io::{self, Write};

use framecheck_core::{BatchConfig, BatchReport, run_batch};

/// Run the batch and print its report.
pub async fn print_report<W: Write>(config: &BatchConfig, out: &mut W) -> io::Result<BatchReport> {
    let report = run_batch(config).await;
    writeln!(out, "{report}")?;
    Ok(report)
}
