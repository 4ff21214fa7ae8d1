use crate::pipeline::*;

/// Writes the final tab-delimited table, overwriting any existing file.
///
/// Header row: session, rcid, unres, then one column per country identifier in
/// the given order.
pub fn write_roll_calls(
    path: &Path,
    country_headers: &[String],
    rows: &[Vec<String>],
) -> PipelineResult<()> {
    let p = path.display().to_string();
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .context(WritingOutputSnafu { path: p.clone() })?;

    let mut header: Vec<String> = vec![
        "session".to_string(),
        "rcid".to_string(),
        "unres".to_string(),
    ];
    header.extend(country_headers.iter().cloned());
    wtr.write_record(&header)
        .context(WritingOutputSnafu { path: p.clone() })?;

    for row in rows.iter() {
        wtr.write_record(row)
            .context(WritingOutputSnafu { path: p.clone() })?;
    }
    wtr.flush().context(FlushingOutputSnafu { path: p })?;
    Ok(())
}
