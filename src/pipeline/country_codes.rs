use crate::pipeline::io_common::Record;
use crate::pipeline::*;

/// A country as described in the ideal-points table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Country {
    pub full_name: String,
    pub abbreviation: String,
}

/// Builds the country code table from the ideal-points file.
pub fn read_country_codes(path: &Path) -> PipelineResult<BTreeMap<u32, Country>> {
    let rows = io_tab::read_delimited(path)?;
    let records = io_common::to_records(&rows);
    info!(
        "read_country_codes: {:?} rows in {:?}",
        records.len(),
        path
    );
    country_codes_from_records(&records)
}

/// Extracts the `ccode`/`CountryName`/`CountryAbb` fields of every record.
///
/// The ideal-points table carries one row per country and year, so the same
/// code appears many times; the last occurrence wins. A `ccode` that does not
/// parse as a plain integer is fatal.
pub fn country_codes_from_records(
    records: &[Record],
) -> PipelineResult<BTreeMap<u32, Country>> {
    let mut res: BTreeMap<u32, Country> = BTreeMap::new();
    for rec in records.iter() {
        let code = rec.int("ccode").context(NotAnIntegerSnafu {
            field: "ccode",
            content: rec.text("ccode").unwrap_or_default(),
        })?;
        let country = Country {
            full_name: rec.text("CountryName").unwrap_or_default(),
            abbreviation: rec.text("CountryAbb").unwrap_or_default(),
        };
        res.insert(code, country);
    }
    debug!("country_codes_from_records: {:?} distinct codes", res.len());
    Ok(res)
}
