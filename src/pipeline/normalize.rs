use crate::pipeline::io_common::Record;
use crate::pipeline::*;

use crate::pipeline::country_codes::Country;

/// One row of the vote-events source, before normalization. All four fields
/// are stored in the file as decimal-point-formatted integer strings.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawVoteRecord {
    pub session: u32,
    pub rcid: u32,
    pub ccode: u32,
    pub vote: u32,
}

/// Counters for the non-fatal conditions met while normalizing.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct NormalizeStats {
    pub skipped_rows: usize,
    pub unknown_country_codes: usize,
    pub unknown_vote_codes: usize,
}

pub struct NormalizedVotes {
    pub votes: Vec<VoteRecord>,
    pub stats: NormalizeStats,
}

pub fn parse_raw_vote(rec: &Record) -> PipelineResult<RawVoteRecord> {
    Ok(RawVoteRecord {
        session: float_int_field(rec, "session")?,
        rcid: float_int_field(rec, "rcid")?,
        ccode: float_int_field(rec, "ccode")?,
        vote: float_int_field(rec, "vote")?,
    })
}

fn float_int_field(rec: &Record, field: &'static str) -> PipelineResult<u32> {
    rec.float_int(field).context(NotAnIntegerSnafu {
        field,
        content: rec.text(field).unwrap_or_default(),
    })
}

/// Turns the raw vote rows into normalized [`VoteRecord`]s.
///
/// - A row with a genuinely non-numeric field is skipped and counted, keeping
///   the run alive.
/// - A country code missing from the table falls back to the stringified code
///   as the country identifier.
/// - A vote code outside {1, 2, 3, 8, 9} drops the record entirely: the
///   country is omitted from that resolution's vote map rather than kept under
///   a null or unknown marker.
pub fn normalize_votes(
    records: &[Record],
    countries: &BTreeMap<u32, Country>,
) -> NormalizedVotes {
    let mut stats = NormalizeStats::default();
    let mut votes: Vec<VoteRecord> = Vec::new();
    for (idx, rec) in records.iter().enumerate() {
        let raw = match parse_raw_vote(rec) {
            Ok(r) => r,
            Err(e) => {
                // Line numbers start at 1 and the header is the first line.
                warn!("normalize_votes: skipping malformed row {}: {}", idx + 2, e);
                stats.skipped_rows += 1;
                continue;
            }
        };
        let country = match countries.get(&raw.ccode) {
            Some(c) => c.abbreviation.clone(),
            None => {
                debug!("normalize_votes: unknown country code {:?}", raw.ccode);
                stats.unknown_country_codes += 1;
                raw.ccode.to_string()
            }
        };
        let vote = match VoteValue::from_code(raw.vote) {
            Some(v) => v,
            None => {
                debug!(
                    "normalize_votes: unknown vote code {:?} for country {:?}",
                    raw.vote, country
                );
                stats.unknown_vote_codes += 1;
                continue;
            }
        };
        votes.push(VoteRecord {
            resolution: ResolutionKey {
                session: raw.session,
                rcid: raw.rcid,
            },
            country,
            vote,
        });
    }
    NormalizedVotes { votes, stats }
}
