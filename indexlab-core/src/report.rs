//! Report orchestration — fetch, reduce and print each index in turn.
//!
//! Indices are processed sequentially in declaration order. A failure on one
//! index prints an error line and the loop continues with the next one.
//!
//! Console labels (`[index]`, `no data`, `[error]`) are English; index display
//! names are printed as configured, so the built-in set shows its Chinese names.

use crate::aggregate::yearly_ohlc;
use crate::data::{DataError, DataProvider};
use crate::domain::{IndexDescriptor, YearlyBar};
use crate::window::DateWindow;
use std::io::{self, Write};

/// Column labels aligned with the row format below.
pub const TABLE_HEADER: &str = "year    open      high      low       close";

/// Printed in place of the table when an index has no bars in the window.
pub const NO_DATA: &str = "no data";

/// Print one index's yearly table.
pub fn render_table<W: Write>(
    out: &mut W,
    index: &IndexDescriptor,
    yearly: &[YearlyBar],
    years: usize,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "[index] {index} yearly OHLC, last {years} years:")?;
    if yearly.is_empty() {
        writeln!(out, "{NO_DATA}")?;
        return Ok(());
    }
    writeln!(out, "{TABLE_HEADER}")?;
    for row in yearly {
        writeln!(
            out,
            "{}  {:8.2}  {:8.2}  {:8.2}  {:8.2}",
            row.year, row.open, row.high, row.low, row.close
        )?;
    }
    Ok(())
}

/// Fetch and reduce one index.
fn report_single(
    provider: &dyn DataProvider,
    index: &IndexDescriptor,
    window: &DateWindow,
    max_years: usize,
) -> Result<Vec<YearlyBar>, DataError> {
    let daily = provider.fetch_daily(&index.ts_code, window)?;
    Ok(yearly_ohlc(&daily, max_years))
}

/// Run the report over `indexes`, writing tables and error lines to `out`.
///
/// Only I/O errors on `out` abort the loop; data errors are recorded in the
/// returned summary.
pub fn run_report<W: Write>(
    provider: &dyn DataProvider,
    indexes: &[IndexDescriptor],
    window: &DateWindow,
    max_years: usize,
    out: &mut W,
) -> io::Result<ReportSummary> {
    let total = indexes.len();
    let mut succeeded = 0;
    let mut errors: Vec<(IndexDescriptor, DataError)> = Vec::new();

    tracing::info!(
        provider = provider.name(),
        total,
        start = %window.start,
        end = %window.end,
        "starting yearly OHLC report"
    );

    for index in indexes {
        match report_single(provider, index, window, max_years) {
            Ok(yearly) => {
                render_table(out, index, &yearly, max_years)?;
                succeeded += 1;
            }
            Err(e) => {
                tracing::warn!(index = %index, error = %e, "index failed");
                writeln!(out, "[error] {index}: {e}")?;
                errors.push((index.clone(), e));
            }
        }
    }

    let summary = ReportSummary {
        total,
        succeeded,
        failed: errors.len(),
        errors,
    };
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        total = summary.total,
        "report complete"
    );
    Ok(summary)
}

/// Summary of a report run.
#[derive(Debug)]
pub struct ReportSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<(IndexDescriptor, DataError)>,
}

impl ReportSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
