//! CSV and error-log artifacts for a finished sweep.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use invsweep_common::inventory::{FIELD_SCHEMA, InventoryRecord, SweepFailure, SweepResult};
use tracing::debug;

/// Paths actually written by [`ReportWriter::write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub csv: PathBuf,
    /// `None` when the sweep had no failures.
    pub errors: Option<PathBuf>,
}

pub struct ReportWriter {
    output_dir: PathBuf,
    stamp: String,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>, stamp: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            stamp: stamp.into(),
        }
    }

    /// Names both artifacts after the current local time, `YYYYMMDD_HHMMSS`.
    pub fn timestamped(output_dir: impl Into<PathBuf>) -> Self {
        let stamp: String = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self::new(output_dir, stamp)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("inventory_{}.csv", self.stamp))
    }

    pub fn errors_path(&self) -> PathBuf {
        self.output_dir.join(format!("errors_{}.txt", self.stamp))
    }

    pub fn write(&self, result: &SweepResult) -> anyhow::Result<ReportPaths> {
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("creating output directory {}", self.output_dir.display()))?;

        let csv_path: PathBuf = self.csv_path();
        write_file(&csv_path, &render_csv(&result.records)?)?;

        let errors: Option<PathBuf> = if result.has_failures() {
            let errors_path: PathBuf = self.errors_path();
            write_file(&errors_path, &render_errors(&result.failures))?;
            Some(errors_path)
        } else {
            None
        };

        Ok(ReportPaths {
            csv: csv_path,
            errors,
        })
    }
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Header of bare schema names, then one fully quoted row per record.
pub fn render_csv(records: &[InventoryRecord]) -> anyhow::Result<String> {
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(FIELD_SCHEMA)?;
    let buffer: Vec<u8> = header
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV writer error: {e}"))?;

    let mut rows = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);
    for record in records {
        rows.write_record(record.values())?;
    }
    let data: Vec<u8> = rows
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV writer error: {e}"))?;

    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// One `address: reason` line per failure.
pub fn render_errors(failures: &[SweepFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("{failure}\n"))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
