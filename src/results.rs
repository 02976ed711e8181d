use crate::batch::RunRecord;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::Path;

const HEADER: &str = "rows,cols,prob,generations,outcome,init_board\n";

/// Appends finished runs to the CSV results log, creating the file (and
/// its parent directory) with a header row on first use.
///
/// The whole batch is formatted up front and written with a single
/// `write_all`, so a row is never interleaved with rows from another
/// writer appending to the same file.
pub fn append_records(path: &Path, records: &[RunRecord]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let fresh = !path.exists();
    let mut out = String::new();
    if fresh {
        out.push_str(HEADER);
    }
    for record in records {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            record.rows,
            record.cols,
            record.prob,
            record.generations,
            record.outcome,
            record.init_board,
        );
    }

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    file.write_all(out.as_bytes())
        .with_context(|| format!("failed to append to {}", path.display()))?;
    Ok(())
}
