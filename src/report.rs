use crate::error::Result;
use crate::stats::{StatisticsTable, Summary};
use indicatif::MultiProgress;
use std::io::{self, Write};
use std::sync::Arc;

/// Prints the per-url summary in a fixed human-readable layout.
pub struct ConsoleReport {
    multi: Option<Arc<MultiProgress>>,
}

impl ConsoleReport {
    pub fn new(multi: Option<Arc<MultiProgress>>) -> Self {
        Self { multi }
    }

    pub fn render(table: &StatisticsTable) -> String {
        let mut out = String::new();
        for (url, summary) in table {
            Self::render_summary(&mut out, url, summary);
        }
        out
    }

    fn render_summary(out: &mut String, url: &str, summary: &Summary) {
        out.push_str(&format!(
            "{}, successes: {}, failures: {}\n\
             \tminTime: {} ms\n\
             \tmeanTime: {} ms\n\
             \tmaxTime: {} ms\n",
            url,
            summary.successes,
            summary.failures,
            summary.min_latency.as_millis(),
            summary.mean_latency.as_millis(),
            summary.max_latency.as_millis(),
        ));
    }

    /// Writes the report to stdout, even while a progress bar is drawn.
    pub fn print(&self, table: &StatisticsTable) -> Result<()> {
        let stdout = io::stdout();
        self.write_to(table, &mut stdout.lock())
    }

    /// Bars are suspended while writing so report lines never land in the
    /// bar's own (possibly hidden) draw target.
    pub fn write_to<W: Write>(&self, table: &StatisticsTable, out: &mut W) -> Result<()> {
        let output = Self::render(table);
        let mut emit = || -> io::Result<()> {
            out.write_all(output.as_bytes())?;
            out.flush()
        };

        match &self.multi {
            Some(multi) => multi.suspend(emit)?,
            None => emit()?,
        }
        Ok(())
    }
}

impl Default for ConsoleReport {
    fn default() -> Self {
        Self::new(None)
    }
}
