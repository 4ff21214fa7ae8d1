use log::{debug, info, warn};

use roll_call::*;
use snafu::{prelude::*, Snafu};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod country_codes;
pub mod descriptions;
pub mod fetch;
pub mod io_common;
pub mod io_tab;
pub mod io_xls;
pub mod normalize;
pub mod output;

#[derive(Debug, Snafu)]
pub enum PipelineError {
    #[snafu(display("Missing input file {path} (retrieve it from {url})"))]
    MissingInput { path: String, url: String },
    #[snafu(display("Error opening delimited file {path}"))]
    OpeningDelimited { source: csv::Error, path: String },
    #[snafu(display("Error reading a line of {path}"))]
    DelimitedLine { source: csv::Error, path: String },
    #[snafu(display("Error opening spreadsheet {path}"))]
    OpeningExcel {
        source: calamine::XlsError,
        path: String,
    },
    #[snafu(display("Missing worksheet {worksheet} in {path}"))]
    MissingWorksheet { worksheet: String, path: String },
    #[snafu(display("Expected an integer for field {field}, got {content:?}"))]
    NotAnInteger { field: String, content: String },
    #[snafu(display("Error writing output file {path}"))]
    WritingOutput { source: csv::Error, path: String },
    #[snafu(display("Error flushing output file {path}"))]
    FlushingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening summary file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PipelineResult<T> = Result<T, PipelineError>;

pub struct PipelineOptions {
    pub data_dir: PathBuf,
    pub out_path: PathBuf,
    pub summary: Option<String>,
    pub reference: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TallySummary {
    pub yes: u32,
    pub no: u32,
    pub abstain: u32,
}

/// One resolution whose recomputed tally disagrees with the published one.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TallyMismatch {
    pub session: u32,
    pub rcid: u32,
    pub unres: String,
    pub official: TallySummary,
    pub recomputed: TallySummary,
}

/// The counters collected over one run. Everything in here is non-fatal: the
/// output file is complete even when some of these are not zero.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunReport {
    pub resolutions: usize,
    pub countries: usize,
    pub vote_records: usize,
    pub skipped_rows: usize,
    pub unknown_country_codes: usize,
    pub unknown_vote_codes: usize,
    pub missing_descriptions: usize,
    pub tally_mismatches: Vec<TallyMismatch>,
}

/// Runs the whole reconciliation: reads the three sources from the data
/// directory, writes the combined roll-call table, then prints the run summary
/// and checks it against the reference when one is provided.
pub fn run_pipeline(opts: &PipelineOptions) -> PipelineResult<()> {
    let paths = fetch::ensure_local_inputs(&opts.data_dir, &fetch::ManualFetcher {})?;

    let countries = country_codes::read_country_codes(&paths.ideal_points)?;
    info!("run_pipeline: {:?} known country codes", countries.len());

    let vote_rows = io_tab::read_delimited(&paths.raw_votes)?;
    let vote_records = io_common::to_records(&vote_rows);
    info!(
        "run_pipeline: {:?} raw vote rows in {:?}",
        vote_records.len(),
        paths.raw_votes
    );
    let normalized = normalize::normalize_votes(&vote_records, &countries);
    info!(
        "run_pipeline: {:?} normalized vote records ({:?})",
        normalized.votes.len(),
        normalized.stats
    );

    let resolutions = aggregate(&normalized.votes);
    let headers = country_headers(&resolutions);
    info!(
        "run_pipeline: {:?} resolutions, {:?} countries",
        resolutions.len(),
        headers.len()
    );

    let descriptions =
        descriptions::read_descriptions(&paths.descriptions, fetch::DESCRIPTIONS_WORKSHEET)?;
    let (annotated, mismatches, missing_descriptions) =
        annotate_resolutions(resolutions, &descriptions);

    let rows = render_rows(&annotated, &headers);
    output::write_roll_calls(&opts.out_path, &headers, &rows)?;
    info!(
        "run_pipeline: wrote {:?} rows of {:?} columns to {:?}",
        rows.len(),
        3 + headers.len(),
        opts.out_path
    );

    let report = RunReport {
        resolutions: rows.len(),
        countries: headers.len(),
        vote_records: normalized.votes.len(),
        skipped_rows: normalized.stats.skipped_rows,
        unknown_country_codes: normalized.stats.unknown_country_codes,
        unknown_vote_codes: normalized.stats.unknown_vote_codes,
        missing_descriptions,
        tally_mismatches: mismatches,
    };

    let summary_js = build_summary_js(&report);
    let pretty_js_summary = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    match opts.summary.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_summary),
        Some(p) => fs::write(p, &pretty_js_summary).context(OpeningJsonSnafu {
            path: p.to_string(),
        })?,
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &opts.reference {
        let summary_ref = read_summary(reference_path)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_summary {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_summary.as_ref(),
                "\n",
            );
            whatever!("Difference detected between computed summary and reference summary");
        }
    }

    Ok(())
}

/// Attaches each resolution's description and checks the published tallies
/// against the recomputed ones. Mismatches and missing descriptions are
/// reported, never fatal.
fn annotate_resolutions(
    resolutions: Vec<ResolutionVotes>,
    descriptions: &BTreeMap<ResolutionKey, ResolutionDescription>,
) -> (Vec<AnnotatedResolution>, Vec<TallyMismatch>, usize) {
    let mut annotated: Vec<AnnotatedResolution> = Vec::new();
    let mut mismatches: Vec<TallyMismatch> = Vec::new();
    let mut missing_descriptions = 0usize;
    for rv in resolutions {
        let description = descriptions.get(&rv.resolution).cloned();
        match description {
            Some(ref desc) => {
                if !check_consistency(&rv, desc) {
                    let tally = compute_tally(&rv);
                    warn!(
                        "annotate_resolutions: tally mismatch for {:?} ({}): official {}/{}/{}, recomputed {}/{}/{}",
                        rv.resolution,
                        desc.unres,
                        desc.yes,
                        desc.no,
                        desc.abstain,
                        tally.yes,
                        tally.no,
                        tally.abstain
                    );
                    mismatches.push(TallyMismatch {
                        session: rv.resolution.session,
                        rcid: rv.resolution.rcid,
                        unres: desc.unres.clone(),
                        official: TallySummary {
                            yes: desc.yes,
                            no: desc.no,
                            abstain: desc.abstain,
                        },
                        recomputed: TallySummary {
                            yes: tally.yes,
                            no: tally.no,
                            abstain: tally.abstain,
                        },
                    });
                }
            }
            None => {
                debug!(
                    "annotate_resolutions: no description for {:?}",
                    rv.resolution
                );
                missing_descriptions += 1;
            }
        }
        annotated.push(AnnotatedResolution {
            votes: rv,
            description,
        });
    }
    (annotated, mismatches, missing_descriptions)
}

fn build_summary_js(report: &RunReport) -> JSValue {
    json!({
        "resolutions": report.resolutions,
        "countries": report.countries,
        "voteRecords": report.vote_records,
        "skippedRows": report.skipped_rows,
        "unknownCountryCodes": report.unknown_country_codes,
        "unknownVoteCodes": report.unknown_vote_codes,
        "missingDescriptions": report.missing_descriptions,
        "tallyMismatches": report.tally_mismatches,
    })
}

pub fn read_summary(path: &str) -> PipelineResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.to_string(),
    })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
