// ********* Input data structures ***********

use std::collections::BTreeMap;

/// The value of one vote cast by one country on one roll call.
///
/// The dataset encodes these as the integer codes 1, 2, 3, 8 and 9. Any other
/// code has no corresponding value.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum VoteValue {
    Yes,
    Abstain,
    No,
    /// The country was a member of the assembly but did not take part in the vote.
    Absent,
    /// The country was not a member of the assembly at the time of the vote.
    NonMember,
}

impl VoteValue {
    /// Decodes a raw vote code. Total over {1, 2, 3, 8, 9}, `None` otherwise.
    pub fn from_code(code: u32) -> Option<VoteValue> {
        match code {
            1 => Some(VoteValue::Yes),
            2 => Some(VoteValue::Abstain),
            3 => Some(VoteValue::No),
            8 => Some(VoteValue::Absent),
            9 => Some(VoteValue::NonMember),
            _ => None,
        }
    }

    /// The inverse of [`VoteValue::from_code`].
    pub fn code(&self) -> u32 {
        match self {
            VoteValue::Yes => 1,
            VoteValue::Abstain => 2,
            VoteValue::No => 3,
            VoteValue::Absent => 8,
            VoteValue::NonMember => 9,
        }
    }
}

/// Identifies one roll-call vote event.
///
/// Uniqueness is assumed within the scope of this dataset, not verified against
/// all of UN history. The derived ordering (session first, then rcid) is the
/// ordering of the output file.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct ResolutionKey {
    pub session: u32,
    pub rcid: u32,
}

/// One normalized vote: a country identifier and its vote on one resolution.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteRecord {
    pub resolution: ResolutionKey,
    /// The country abbreviation when the country code resolved, otherwise the
    /// stringified raw code.
    pub country: String,
    pub vote: VoteValue,
}

// ******** Output data structures *********

/// All the votes recorded for one resolution, keyed by country identifier.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResolutionVotes {
    pub resolution: ResolutionKey,
    pub votes: BTreeMap<String, VoteValue>,
}

/// The published metadata for one resolution, sourced independently from the
/// description spreadsheet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResolutionDescription {
    pub resolution: ResolutionKey,
    /// The UN document identifier, e.g. "R/5/22".
    pub unres: String,
    pub yes: u32,
    pub no: u32,
    pub abstain: u32,
}

/// A resolution's votes together with its description, when one was published.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AnnotatedResolution {
    pub votes: ResolutionVotes,
    pub description: Option<ResolutionDescription>,
}

/// Yes/no/abstain counts recomputed from a vote map.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct Tally {
    pub yes: u32,
    pub no: u32,
    pub abstain: u32,
}
