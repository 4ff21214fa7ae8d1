// Cell and record primitives shared by the delimited and spreadsheet readers.

use crate::pipeline::*;

/// A raw cell from either a delimited file or a spreadsheet sheet.
///
/// A missing or empty cell is an explicit `Empty`, never a crash: ragged rows
/// are common in these sources.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn text(&self) -> Option<String> {
        match self {
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Empty => None,
        }
    }

    /// A strict decimal integer, the encoding of `ccode` in the ideal-points
    /// file. Float-formatted input ("2.0") is rejected here.
    pub fn int(&self) -> Option<u32> {
        match self {
            Cell::Text(s) => s.trim().parse::<u32>().ok(),
            Cell::Number(n) if n.fract() == 0.0 && *n >= 0.0 && *n <= u32::MAX as f64 => {
                Some(*n as u32)
            }
            _ => None,
        }
    }

    /// An integer stored either as a decimal-point-formatted string ("17.0"),
    /// the encoding of every numeric field in the vote file, or as a true
    /// numeric spreadsheet cell. Parsed as a float and truncated.
    pub fn float_int(&self) -> Option<u32> {
        let f = match self {
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Number(n) => *n,
            Cell::Empty => return None,
        };
        let t = f.trunc();
        if t >= 0.0 && t <= u32::MAX as f64 {
            Some(t as u32)
        } else {
            None
        }
    }
}

/// One data row zipped against the header row, fields keyed by column name.
#[derive(PartialEq, Debug, Clone)]
pub struct Record {
    fields: BTreeMap<String, Cell>,
}

impl Record {
    pub fn get(&self, name: &str) -> Cell {
        self.fields.get(name).cloned().unwrap_or(Cell::Empty)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).text()
    }

    pub fn int(&self, name: &str) -> Option<u32> {
        self.get(name).int()
    }

    pub fn float_int(&self, name: &str) -> Option<u32> {
        self.get(name).float_int()
    }
}

/// Treats the first row as the header and zips every following row against it
/// positionally. Rows shorter than the header leave the trailing fields
/// absent; rows longer than the header silently drop the extra cells.
pub fn to_records(rows: &[Vec<Cell>]) -> Vec<Record> {
    let header: Vec<String> = match rows.first() {
        Some(h) => h.iter().map(|c| c.text().unwrap_or_default()).collect(),
        None => return Vec::new(),
    };
    debug!("to_records: header: {:?}", header);
    rows[1..]
        .iter()
        .map(|row| {
            let fields: BTreeMap<String, Cell> = header
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .filter(|(name, _)| !name.is_empty())
                .collect();
            Record { fields }
        })
        .collect()
}
