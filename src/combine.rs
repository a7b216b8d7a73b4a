// src/combine.rs
use anyhow::{Context, Result};
use std::{
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    modes::{self, Mode},
    paths,
    table::{LoadError, Table},
};

/// Totals for a combine run that wrote its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineSummary {
    pub output: PathBuf,
    pub files_read: usize,
    pub files_missing: usize,
    pub rows: usize,
    pub columns: usize,
}

/// What a combine run did. None of these are failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombineOutcome {
    /// The mode name is not in the mode table; nothing was read or written.
    UnsupportedMode,
    /// Every input was missing; nothing was written.
    NothingToCombine,
    Written(CombineSummary),
}

/// Combine every partition of `csv_type` under `base_dir` into
/// `<base_dir>/csvs/negation_dataset/combined/<csv_type>.csv`.
///
/// Missing partitions are skipped with a warning. Any other read or write
/// failure is returned as an error.
#[instrument(level = "info", skip(base_dir), fields(base_dir = %base_dir.as_ref().display()))]
pub fn combine<P: AsRef<Path>>(base_dir: P, csv_type: &str) -> Result<CombineOutcome> {
    let base_dir = base_dir.as_ref();
    let Some(mode) = modes::lookup(csv_type) else {
        error!(
            "Unsupported csv_type '{}'. Expected one of: {}",
            csv_type,
            modes::names().collect::<Vec<_>>().join(", ")
        );
        return Ok(CombineOutcome::UnsupportedMode);
    };
    combine_mode(base_dir, mode)
}

fn combine_mode(base_dir: &Path, mode: &Mode) -> Result<CombineOutcome> {
    let start = Instant::now();
    let output = paths::output_path(base_dir, mode);

    let mut combined: Option<Table> = None;
    let mut files_read = 0;
    let mut files_missing = 0;

    for path in paths::input_paths(base_dir, mode) {
        info!("Reading {}...", path.display());
        match Table::read_csv(&path) {
            Ok(table) => {
                files_read += 1;
                combined.get_or_insert_with(Table::default).append(table);
            }
            Err(LoadError::NotFound(p)) => {
                warn!("{} not found. Skipping.", p.display());
                files_missing += 1;
            }
            Err(LoadError::Other(e)) => {
                return Err(e.context(format!("reading partition {}", path.display())))
            }
        }
    }

    let Some(table) = combined else {
        info!("No files were found to combine.");
        return Ok(CombineOutcome::NothingToCombine);
    };

    info!("Saving combined CSV to {}...", output.display());
    table
        .write_csv(&output)
        .with_context(|| format!("writing combined CSV for {}", mode.name))?;
    info!("All files combined successfully!");

    let summary = CombineSummary {
        output,
        files_read,
        files_missing,
        rows: table.num_rows(),
        columns: table.headers.len(),
    };
    debug!(
        rows = summary.rows,
        columns = summary.columns,
        files_read,
        files_missing,
        elapsed = ?start.elapsed(),
        "combine finished"
    );
    Ok(CombineOutcome::Written(summary))
}
