// Primitives for reading the description spreadsheet.

use calamine::{open_workbook, Reader, Xls};

use crate::pipeline::io_common::Cell;
use crate::pipeline::*;

/// Reads one worksheet into rows of cells.
pub fn read_sheet(path: &Path, worksheet: &str) -> PipelineResult<Vec<Vec<Cell>>> {
    let p = path.display().to_string();
    let mut workbook: Xls<_> = open_workbook(path).context(OpeningExcelSnafu { path: p.clone() })?;
    let wrange = workbook
        .worksheet_range(worksheet)
        .context(MissingWorksheetSnafu {
            worksheet,
            path: p.clone(),
        })?
        .context(OpeningExcelSnafu { path: p.clone() })?;

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for row in wrange.rows() {
        rows.push(row.iter().map(read_cell).collect());
    }
    debug!("read_sheet: {:?} rows in {:?}", rows.len(), p);
    Ok(rows)
}

fn read_cell(cell: &calamine::DataType) -> Cell {
    match cell {
        calamine::DataType::String(s) => Cell::Text(s.clone()),
        calamine::DataType::Float(f) => Cell::Number(*f),
        calamine::DataType::Int(i) => Cell::Number(*i as f64),
        calamine::DataType::Bool(b) => Cell::Text(b.to_string()),
        // Error cells and everything else carry nothing this pipeline reads.
        _ => Cell::Empty,
    }
}
