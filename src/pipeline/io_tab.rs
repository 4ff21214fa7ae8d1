// Primitives for reading the tab-delimited source files.

use crate::pipeline::io_common::Cell;
use crate::pipeline::*;

/// Reads a whole tab-delimited file into rows of cells.
///
/// The source files are plain tab-separated dumps, not quoted CSV, so quoting
/// is disabled and ragged rows are accepted. A line the reader cannot split at
/// all fails the whole read: that is not a malformation these files exhibit.
pub fn read_delimited(path: &Path) -> PipelineResult<Vec<Vec<Cell>>> {
    let p = path.display().to_string();
    let rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_path(path)
        .context(OpeningDelimitedSnafu { path: p.clone() })?;

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for line_r in rdr.into_records() {
        let line = line_r.context(DelimitedLineSnafu { path: p.clone() })?;
        let row: Vec<Cell> = line
            .iter()
            .map(|s| {
                if s.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(s.to_string())
                }
            })
            .collect();
        rows.push(row);
    }
    debug!("read_delimited: {:?} rows in {:?}", rows.len(), p);
    Ok(rows)
}
