// ********* Input data structures ***********

use std::collections::HashMap;

/// A single ballot: candidate tokens in the order the voter listed them.
///
/// Ranked methods read `choices` as a preference order, index 0 being the
/// most preferred candidate. Approval voting uses the same shape but ignores
/// the order. Candidates are opaque tokens compared by exact string match;
/// a well-formed ballot names each candidate at most once.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    pub choices: Vec<String>,
}

impl Ballot {
    pub fn new(choices: Vec<String>) -> Ballot {
        Ballot { choices }
    }

    /// The first-preference candidate, if the ballot ranks anyone at all.
    pub fn first(&self) -> Option<&str> {
        self.choices.first().map(|c| c.as_str())
    }

    /// The rank of a candidate on this ballot (0 = most preferred), taking
    /// the first occurrence if the token is repeated.
    pub fn position(&self, candidate: &str) -> Option<usize> {
        self.choices.iter().position(|c| c == candidate)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

// ******** Output data structures *********

/// Per-candidate integer scores, iterated in the order candidates were
/// first seen.
///
/// The iteration order is part of the contract: it drives the display order
/// of every report, so it must not depend on hashing. Entries live in an
/// ordered vector, with a side index for lookups.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Tally {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Tally {
    pub fn new() -> Tally {
        Tally::default()
    }

    /// Makes sure a candidate has an entry, starting it at zero.
    pub fn declare(&mut self, candidate: &str) {
        if !self.index.contains_key(candidate) {
            self.index.insert(candidate.to_string(), self.entries.len());
            self.entries.push((candidate.to_string(), 0));
        }
    }

    /// Adds to a candidate's score, declaring the candidate on first sight.
    pub fn add(&mut self, candidate: &str, score: u64) {
        match self.index.get(candidate) {
            Some(&idx) => self.entries[idx].1 += score,
            None => {
                self.index.insert(candidate.to_string(), self.entries.len());
                self.entries.push((candidate.to_string(), score));
            }
        }
    }

    pub fn get(&self, candidate: &str) -> Option<u64> {
        self.index.get(candidate).map(|&idx| self.entries[idx].1)
    }

    /// The (candidate, score) pairs, in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, (String, u64)> {
        self.entries.iter()
    }

    /// Sum of all scores.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, score)| *score).sum()
    }

    pub fn max_score(&self) -> Option<u64> {
        self.entries.iter().map(|(_, score)| *score).max()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of the majority check over a plurality tally.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MajorityDecision {
    /// Votes needed for a majority: strictly more than half of all votes.
    pub threshold: u64,
    /// Every candidate at the maximum count, when that maximum reaches the
    /// threshold. Empty when there is no majority winner.
    pub winners: Vec<String>,
}

impl MajorityDecision {
    pub fn has_majority(&self) -> bool {
        !self.winners.is_empty()
    }
}

/// Outcome of the Condorcet head-to-head sweep.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CondorcetResult {
    /// The candidate beating every other one in the universe, if any.
    pub winner: Option<String>,
    /// Pairwise wins per candidate over the rest of the universe.
    pub pairwise_wins: Tally,
}

/// The outcome of every supported method for one election.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionResult {
    pub plurality: Tally,
    pub majority: MajorityDecision,
    pub borda: Tally,
    pub approval: Tally,
    pub condorcet: CondorcetResult,
}

// ********* Configuration **********

/// Which candidates a method considers when it needs a universe up front
/// (seeding the plurality counters, bounding the Condorcet sweep).
///
/// The historical behavior of this program is `FirstBallot`: the universe
/// is whatever the first ballot names. A candidate appearing only on later
/// ballots is still counted by plurality once it collects first
/// preferences, but stays invisible to the Condorcet sweep. `AllBallots`
/// removes that inconsistency by taking the union over every ballot.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum CandidateUniverse {
    /// Candidates named on the first ballot, in ballot order.
    FirstBallot,
    /// Union of the candidates on every ballot, in first-appearance order.
    AllBallots,
}
