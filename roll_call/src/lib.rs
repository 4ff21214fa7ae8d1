mod model;
use log::{debug, info};

use std::collections::{BTreeMap, BTreeSet};

pub use crate::model::*;

/// Groups normalized vote records by resolution and merges each group into a
/// single mapping from country to vote.
///
/// The output is ordered by resolution key ascending (session, then rcid).
/// Within a group, records are folded in source order: a later record for the
/// same country overwrites an earlier one. Duplicates are not expected in the
/// dataset but are not rejected.
pub fn aggregate(records: &[VoteRecord]) -> Vec<ResolutionVotes> {
    info!("aggregate: processing {:?} vote records", records.len());
    let mut groups: BTreeMap<ResolutionKey, BTreeMap<String, VoteValue>> = BTreeMap::new();
    for r in records.iter() {
        groups
            .entry(r.resolution)
            .or_default()
            .insert(r.country.clone(), r.vote);
    }
    debug!("aggregate: {:?} distinct resolutions", groups.len());
    groups
        .into_iter()
        .map(|(resolution, votes)| ResolutionVotes { resolution, votes })
        .collect()
}

/// Recomputes the yes/no/abstain counts from a merged vote map. Categories
/// with no votes stay at zero.
pub fn compute_tally(rv: &ResolutionVotes) -> Tally {
    let mut tally = Tally::default();
    for v in rv.votes.values() {
        match v {
            VoteValue::Yes => tally.yes += 1,
            VoteValue::No => tally.no += 1,
            VoteValue::Abstain => tally.abstain += 1,
            VoteValue::Absent | VoteValue::NonMember => {}
        }
    }
    tally
}

/// Compares the recomputed tally against the official tallies published with
/// the resolution description. Exact integer equality, no tolerance.
///
/// Pure predicate: a mismatch is for the caller to report, not a failure.
pub fn check_consistency(rv: &ResolutionVotes, desc: &ResolutionDescription) -> bool {
    let tally = compute_tally(rv);
    tally.yes == desc.yes && tally.no == desc.no && tally.abstain == desc.abstain
}

/// The full column header set: the union of all country identifiers appearing
/// in any vote map, lexicographically sorted, without duplicates.
pub fn country_headers(all: &[ResolutionVotes]) -> Vec<String> {
    let mut countries: BTreeSet<String> = BTreeSet::new();
    for rv in all.iter() {
        for c in rv.votes.keys() {
            countries.insert(c.clone());
        }
    }
    countries.into_iter().collect()
}

/// Renders one output row per resolution, in aggregator order.
///
/// Row layout: session, rcid, the resolution identifier (empty when no
/// description was published), then one column per header country holding the
/// stringified numeric vote code, or an empty field when that country has no
/// recorded vote on the resolution.
pub fn render_rows(annotated: &[AnnotatedResolution], headers: &[String]) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    for ar in annotated.iter() {
        let mut row: Vec<String> = Vec::with_capacity(3 + headers.len());
        row.push(ar.votes.resolution.session.to_string());
        row.push(ar.votes.resolution.rcid.to_string());
        row.push(
            ar.description
                .as_ref()
                .map(|d| d.unres.clone())
                .unwrap_or_default(),
        );
        for country in headers.iter() {
            let cell = match ar.votes.votes.get(country) {
                Some(v) => v.code().to_string(),
                None => String::new(),
            };
            row.push(cell);
        }
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(session: u32, rcid: u32, country: &str, vote: VoteValue) -> VoteRecord {
        VoteRecord {
            resolution: ResolutionKey { session, rcid },
            country: country.to_string(),
            vote,
        }
    }

    #[test]
    fn vote_code_round_trip() {
        for code in [1, 2, 3, 8, 9] {
            let v = VoteValue::from_code(code).unwrap();
            assert_eq!(v.code(), code);
        }
        for code in [0, 4, 5, 6, 7, 10, 100] {
            assert_eq!(VoteValue::from_code(code), None);
        }
    }

    #[test]
    fn aggregate_groups_and_orders() {
        // Out of key order on purpose.
        let records = vec![
            rec(6, 1, "USA", VoteValue::Yes),
            rec(5, 22, "USA", VoteValue::Yes),
            rec(5, 22, "CAN", VoteValue::No),
            rec(5, 3, "CAN", VoteValue::Abstain),
        ];
        let agg = aggregate(&records);
        let keys: Vec<ResolutionKey> = agg.iter().map(|rv| rv.resolution).collect();
        assert_eq!(
            keys,
            vec![
                ResolutionKey { session: 5, rcid: 3 },
                ResolutionKey { session: 5, rcid: 22 },
                ResolutionKey { session: 6, rcid: 1 },
            ]
        );
        assert_eq!(agg[1].votes.get("USA"), Some(&VoteValue::Yes));
        assert_eq!(agg[1].votes.get("CAN"), Some(&VoteValue::No));
    }

    #[test]
    fn aggregate_last_write_wins() {
        let records = vec![
            rec(5, 22, "USA", VoteValue::Yes),
            rec(5, 22, "USA", VoteValue::No),
        ];
        let agg = aggregate(&records);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg[0].votes.len(), 1);
        assert_eq!(agg[0].votes.get("USA"), Some(&VoteValue::No));
    }

    #[test]
    fn aggregate_idempotent() {
        let records = vec![
            rec(5, 22, "USA", VoteValue::Yes),
            rec(5, 22, "CAN", VoteValue::No),
            rec(6, 1, "FRN", VoteValue::Abstain),
        ];
        let agg = aggregate(&records);
        // Flatten the aggregate back to single-vote records and re-aggregate.
        let flattened: Vec<VoteRecord> = agg
            .iter()
            .flat_map(|rv| {
                rv.votes.iter().map(|(country, vote)| VoteRecord {
                    resolution: rv.resolution,
                    country: country.clone(),
                    vote: *vote,
                })
            })
            .collect();
        assert_eq!(aggregate(&flattened), agg);
    }

    #[test]
    fn tally_and_consistency() {
        let agg = aggregate(&[
            rec(5, 22, "USA", VoteValue::Yes),
            rec(5, 22, "CAN", VoteValue::No),
            rec(5, 22, "CUB", VoteValue::Absent),
        ]);
        let tally = compute_tally(&agg[0]);
        assert_eq!(
            tally,
            Tally {
                yes: 1,
                no: 1,
                abstain: 0
            }
        );

        let desc = ResolutionDescription {
            resolution: ResolutionKey { session: 5, rcid: 22 },
            unres: "R/5/22".to_string(),
            yes: 1,
            no: 1,
            abstain: 0,
        };
        assert!(check_consistency(&agg[0], &desc));

        let desc_off = ResolutionDescription { abstain: 2, ..desc };
        assert!(!check_consistency(&agg[0], &desc_off));
    }

    #[test]
    fn country_headers_sorted_unique() {
        let agg = aggregate(&[
            rec(5, 22, "USA", VoteValue::Yes),
            rec(5, 22, "CAN", VoteValue::No),
            rec(6, 1, "USA", VoteValue::Abstain),
            rec(6, 1, "ALB", VoteValue::Yes),
        ]);
        let headers = country_headers(&agg);
        assert_eq!(headers, vec!["ALB", "CAN", "USA"]);
    }

    #[test]
    fn render_rows_scenario() {
        let agg = aggregate(&[
            rec(5, 22, "USA", VoteValue::Yes),
            rec(5, 22, "CAN", VoteValue::No),
        ]);
        let desc = ResolutionDescription {
            resolution: ResolutionKey { session: 5, rcid: 22 },
            unres: "R/5/22".to_string(),
            yes: 1,
            no: 1,
            abstain: 0,
        };
        let headers = country_headers(&agg);
        assert_eq!(headers, vec!["CAN", "USA"]);
        let annotated = vec![AnnotatedResolution {
            votes: agg[0].clone(),
            description: Some(desc),
        }];
        let rows = render_rows(&annotated, &headers);
        assert_eq!(rows, vec![vec!["5", "22", "R/5/22", "3", "1"]]);
    }

    #[test]
    fn render_rows_missing_description() {
        let agg = aggregate(&[
            rec(5, 22, "USA", VoteValue::Yes),
            rec(6, 1, "CAN", VoteValue::No),
        ]);
        let headers = country_headers(&agg);
        let annotated: Vec<AnnotatedResolution> = agg
            .iter()
            .map(|rv| AnnotatedResolution {
                votes: rv.clone(),
                description: None,
            })
            .collect();
        let rows = render_rows(&annotated, &headers);
        // One row per distinct resolution, 3 fixed columns plus one per country.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3 + headers.len());
        assert_eq!(rows[0], vec!["5", "22", "", "", "1"]);
        assert_eq!(rows[1], vec!["6", "1", "", "3", ""]);
    }
}
