use crate::pipeline::io_common::Record;
use crate::pipeline::*;

/// Reads the resolution descriptions from the spreadsheet, keyed by
/// resolution.
pub fn read_descriptions(
    path: &Path,
    worksheet: &str,
) -> PipelineResult<BTreeMap<ResolutionKey, ResolutionDescription>> {
    let rows = io_xls::read_sheet(path, worksheet)?;
    let records = io_common::to_records(&rows);
    info!(
        "read_descriptions: {:?} description rows in {:?}",
        records.len(),
        path
    );
    Ok(descriptions_from_records(&records))
}

/// Extracts one [`ResolutionDescription`] per record.
///
/// `session` and `rcid` may be stored as true numeric spreadsheet cells or as
/// float-formatted strings; both are accepted. A row without a usable key is
/// ignored. On a duplicate key, the first occurrence wins.
pub fn descriptions_from_records(
    records: &[Record],
) -> BTreeMap<ResolutionKey, ResolutionDescription> {
    let mut res: BTreeMap<ResolutionKey, ResolutionDescription> = BTreeMap::new();
    for rec in records.iter() {
        let (session, rcid) = match (rec.float_int("session"), rec.float_int("rcid")) {
            (Some(s), Some(r)) => (s, r),
            _ => {
                warn!(
                    "descriptions_from_records: skipping row without a session/rcid: {:?}",
                    rec
                );
                continue;
            }
        };
        let key = ResolutionKey { session, rcid };
        let desc = ResolutionDescription {
            resolution: key,
            unres: rec.text("unres").unwrap_or_default(),
            yes: rec.float_int("yes").unwrap_or(0),
            no: rec.float_int("no").unwrap_or(0),
            abstain: rec.float_int("abstain").unwrap_or(0),
        };
        res.entry(key).or_insert(desc);
    }
    debug!(
        "descriptions_from_records: {:?} distinct resolutions",
        res.len()
    );
    res
}
