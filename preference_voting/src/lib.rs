//! Tallying methods for ranked-preference and approval ballots: plurality,
//! majority, Borda count, approval and Condorcet.
//!
//! See the [manual] module for the ballot file format and the house rules
//! of each method.

mod config;
pub mod manual;

use log::{debug, info};
use std::collections::HashSet;

pub use crate::config::*;

/// Parses the text of a ballot file into ballots.
///
/// One ballot per line; the tokens on a line are whitespace-separated
/// candidate identifiers, in preference order for ranked ballots. The final
/// line break of a file does not open a new ballot, so a file that ends in
/// a newline holds exactly one ballot per line. Any other blank line yields
/// a ballot of length zero.
pub fn parse_ballots(text: &str) -> Vec<Ballot> {
    text.lines()
        .map(|line| {
            Ballot::new(
                line.split_whitespace()
                    .map(|token| token.to_string())
                    .collect(),
            )
        })
        .collect()
}

/// The candidates a method considers up front, per the universe policy, in
/// first-appearance order and deduplicated.
pub fn candidate_universe(ballots: &[Ballot], universe: CandidateUniverse) -> Vec<String> {
    let scanned: &[Ballot] = match universe {
        CandidateUniverse::FirstBallot => match ballots.first() {
            Some(first) => std::slice::from_ref(first),
            None => &[],
        },
        CandidateUniverse::AllBallots => ballots,
    };
    let mut seen: HashSet<&str> = HashSet::new();
    let mut res: Vec<String> = Vec::new();
    for ballot in scanned {
        for candidate in ballot.choices.iter() {
            if seen.insert(candidate.as_str()) {
                res.push(candidate.clone());
            }
        }
    }
    res
}

/// Counts first-preference votes.
///
/// The counters for the configured universe are created up front at zero;
/// any other candidate collecting a first preference gets a counter on
/// first sight. Ballots that rank nobody are skipped.
pub fn tally_plurality(ballots: &[Ballot], universe: CandidateUniverse) -> Tally {
    let mut tally = Tally::new();
    for candidate in candidate_universe(ballots, universe) {
        tally.declare(&candidate);
    }
    for ballot in ballots {
        if let Some(first) = ballot.first() {
            tally.add(first, 1);
        }
    }
    debug!("tally_plurality: {:?}", tally);
    tally
}

/// Decides whether a plurality tally has a majority winner.
///
/// The threshold is `total / 2 + 1` votes, strictly more than half of all
/// first preferences. Every candidate at the maximum count is reported when
/// that maximum reaches the threshold; at most one candidate can clear it.
pub fn decide_majority(tally: &Tally) -> MajorityDecision {
    let total = tally.total();
    let threshold = total / 2 + 1;
    let top = tally.max_score().unwrap_or(0);
    let winners: Vec<String> = if top >= threshold {
        tally
            .iter()
            .filter(|(_, score)| *score == top)
            .map(|(candidate, _)| candidate.clone())
            .collect()
    } else {
        Vec::new()
    };
    debug!(
        "decide_majority: total: {} threshold: {} winners: {:?}",
        total, threshold, winners
    );
    MajorityDecision { threshold, winners }
}

/// Computes Borda scores.
///
/// On a ballot ranking `L` candidates, the candidate at 0-indexed position
/// `i` gains `L - i` points: the top choice is worth `L`, the bottom choice
/// 1. The weight follows each ballot's own length, so a short ballot hands
/// out less than a long one. Candidates enter the tally in first-appearance
/// order across all ballots.
pub fn tally_borda(ballots: &[Ballot]) -> Tally {
    let mut tally = Tally::new();
    for ballot in ballots {
        let len = ballot.len();
        for (pos, candidate) in ballot.choices.iter().enumerate() {
            tally.add(candidate, (len - pos) as u64);
        }
    }
    debug!("tally_borda: {:?}", tally);
    tally
}

/// Counts approval mentions: every token on every ballot adds one to that
/// candidate's score, regardless of its position on the line.
pub fn tally_approval(ballots: &[Ballot]) -> Tally {
    let mut tally = Tally::new();
    for ballot in ballots {
        for candidate in ballot.choices.iter() {
            tally.add(candidate, 1);
        }
    }
    debug!("tally_approval: {:?}", tally);
    tally
}

/// Decides which side of a pairwise contest a single ballot counts for,
/// given the ranks of the two candidates on that ballot.
///
/// The ballot counts for the first candidate whenever the second one is not
/// strictly preferred, i.e. whenever the second rank is greater than or
/// equal to the first. A candidate missing from the ballot ranks after
/// everyone present; when both are missing the tie goes to the first
/// candidate. The asymmetry matters: swapping the arguments can change the
/// answer on a tied ballot.
pub fn ballot_favors_first(first_rank: Option<usize>, second_rank: Option<usize>) -> bool {
    match (first_rank, second_rank) {
        (Some(first), Some(second)) => second >= first,
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => true,
    }
}

/// Runs the pairwise contest between two candidates over the whole ballot
/// set: does `first` beat `second`?
///
/// Each ballot counts for one side per [`ballot_favors_first`], and `first`
/// takes the contest when its count is greater than or equal to the other
/// side's. A consequence worth knowing: a candidate always beats itself,
/// since both rank lookups land on the same spot and every ballot falls in
/// the tie branch.
pub fn pairwise_beats(ballots: &[Ballot], first: &str, second: &str) -> bool {
    let mut first_count: u64 = 0;
    let mut second_count: u64 = 0;
    for ballot in ballots {
        if ballot_favors_first(ballot.position(first), ballot.position(second)) {
            first_count += 1;
        } else {
            second_count += 1;
        }
    }
    debug!(
        "pairwise_beats: {} vs {}: {} to {}",
        first, second, first_count, second_count
    );
    first_count >= second_count
}

/// Finds the Condorcet winner: the candidate beating every other candidate
/// of the universe in head-to-head contests.
///
/// Self-contests are left out of the sweep, so the winning score is `N - 1`
/// for a universe of `N` candidates. Because pairwise contests are
/// asymmetric, several candidates can reach the winning score on mutually
/// tied ballots; the first one in universe order is reported.
pub fn find_condorcet_winner(ballots: &[Ballot], universe: CandidateUniverse) -> CondorcetResult {
    let candidates = candidate_universe(ballots, universe);
    let mut wins = Tally::new();
    for candidate in candidates.iter() {
        wins.declare(candidate);
    }
    for first in candidates.iter() {
        for second in candidates.iter() {
            if first == second {
                continue;
            }
            if pairwise_beats(ballots, first, second) {
                wins.add(first, 1);
            }
        }
    }
    let full_score = candidates.len().saturating_sub(1) as u64;
    let winner = if candidates.is_empty() {
        None
    } else if wins.max_score() == Some(full_score) {
        wins.iter()
            .find(|(_, score)| *score == full_score)
            .map(|(candidate, _)| candidate.clone())
    } else {
        None
    };
    debug!(
        "find_condorcet_winner: wins: {:?} full score: {} winner: {:?}",
        wins, full_score, winner
    );
    CondorcetResult {
        winner,
        pairwise_wins: wins,
    }
}

/// Runs every supported method over one election.
///
/// `ranked` feeds plurality, Borda and the Condorcet sweep; `approval` is
/// the separate approval ballot set; the majority decision derives from the
/// plurality tally. Each method can also be called on its own.
///
/// ```
/// use preference_voting::*;
///
/// let ranked = parse_ballots("A B\nA B\nB A\n");
/// let approval = parse_ballots("A\nA B\n");
/// let res = run_election_methods(&ranked, &approval, CandidateUniverse::FirstBallot);
/// assert_eq!(res.plurality.get("A"), Some(2));
/// assert_eq!(res.majority.winners, vec!["A".to_string()]);
/// assert_eq!(res.condorcet.winner, Some("A".to_string()));
/// ```
pub fn run_election_methods(
    ranked: &[Ballot],
    approval: &[Ballot],
    universe: CandidateUniverse,
) -> ElectionResult {
    info!(
        "run_election_methods: {} ranked ballots, {} approval ballots",
        ranked.len(),
        approval.len()
    );
    let plurality = tally_plurality(ranked, universe);
    let majority = decide_majority(&plurality);
    let borda = tally_borda(ranked);
    let approval = tally_approval(approval);
    let condorcet = find_condorcet_winner(ranked, universe);
    ElectionResult {
        plurality,
        majority,
        borda,
        approval,
        condorcet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_the_trailing_line_break() {
        let ballots = parse_ballots("A B\nB A\n");
        assert_eq!(ballots.len(), 2);
        assert_eq!(ballots[0].choices, vec!["A", "B"]);
        assert_eq!(ballots[1].choices, vec!["B", "A"]);
    }

    #[test]
    fn parse_keeps_interior_blank_lines_as_empty_ballots() {
        let ballots = parse_ballots("A B\n\nB A\n");
        assert_eq!(ballots.len(), 3);
        assert!(ballots[1].is_empty());
    }

    #[test]
    fn parse_handles_whitespace_runs_and_missing_final_newline() {
        let ballots = parse_ballots("  A \t B \nC");
        assert_eq!(ballots.len(), 2);
        assert_eq!(ballots[0].choices, vec!["A", "B"]);
        assert_eq!(ballots[1].choices, vec!["C"]);
    }

    #[test]
    fn parse_accepts_windows_line_endings() {
        let ballots = parse_ballots("A B\r\nB A\r\n");
        assert_eq!(ballots.len(), 2);
        assert_eq!(ballots[1].choices, vec!["B", "A"]);
    }

    #[test]
    fn ballot_position_takes_the_first_occurrence() {
        let ballot = Ballot::new(vec!["A".into(), "B".into(), "A".into()]);
        assert_eq!(ballot.position("A"), Some(0));
        assert_eq!(ballot.position("C"), None);
    }

    #[test]
    fn tally_iterates_in_first_seen_order() {
        let mut tally = Tally::new();
        tally.add("B", 1);
        tally.declare("A");
        tally.add("B", 2);
        tally.add("C", 5);
        let entries: Vec<(String, u64)> = tally.iter().cloned().collect();
        assert_eq!(
            entries,
            vec![
                ("B".to_string(), 3),
                ("A".to_string(), 0),
                ("C".to_string(), 5)
            ]
        );
        assert_eq!(tally.max_score(), Some(5));
        assert_eq!(tally.total(), 8);
        assert_eq!(tally.get("D"), None);
    }

    #[test]
    fn plurality_counts_first_preferences() {
        let data = parse_ballots("A B C\nA C B\nB A C\n");
        let tally = tally_plurality(&data, CandidateUniverse::FirstBallot);
        assert_eq!(tally.get("A"), Some(2));
        assert_eq!(tally.get("B"), Some(1));
        assert_eq!(tally.get("C"), Some(0));
        assert_eq!(tally.total(), data.len() as u64);
    }

    #[test]
    fn plurality_seeds_the_first_ballot_and_grows_on_new_candidates() {
        let data = parse_ballots("A B\nC A\nC B\n");
        let tally = tally_plurality(&data, CandidateUniverse::FirstBallot);
        let names: Vec<&str> = tally.iter().map(|(c, _)| c.as_str()).collect();
        // A and B come from the first ballot; C only once it collects a vote.
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(tally.get("B"), Some(0));
        assert_eq!(tally.get("C"), Some(2));
    }

    #[test]
    fn zero_length_ballots_count_nowhere() {
        let data = parse_ballots("A B\n\nB A\n");
        assert_eq!(tally_plurality(&data, CandidateUniverse::FirstBallot).total(), 2);
        assert_eq!(tally_borda(&data).total(), 6);
    }

    #[test]
    fn majority_needs_strictly_more_than_half() {
        let half = tally_plurality(
            &parse_ballots("A B\nA B\nB A\nB A\n"),
            CandidateUniverse::FirstBallot,
        );
        let decision = decide_majority(&half);
        assert_eq!(decision.threshold, 3);
        assert!(!decision.has_majority());

        let over = tally_plurality(
            &parse_ballots("A B\nA B\nB A\n"),
            CandidateUniverse::FirstBallot,
        );
        let decision = decide_majority(&over);
        assert_eq!(decision.threshold, 2);
        assert_eq!(decision.winners, vec!["A".to_string()]);
    }

    #[test]
    fn majority_of_no_votes_is_no_winner() {
        let decision = decide_majority(&Tally::new());
        assert_eq!(decision.threshold, 1);
        assert!(!decision.has_majority());
    }

    #[test]
    fn borda_weights_sum_to_the_triangle_number_on_one_ballot() {
        let tally = tally_borda(&parse_ballots("A B C D\n"));
        assert_eq!(tally.get("A"), Some(4));
        assert_eq!(tally.get("D"), Some(1));
        assert_eq!(tally.total(), 4 + 3 + 2 + 1);
    }

    #[test]
    fn borda_weight_follows_each_ballot_length() {
        // The top choice of a two-candidate ballot is worth 2, not a global
        // candidate count.
        let tally = tally_borda(&parse_ballots("A B C\nB A\n"));
        assert_eq!(tally.get("A"), Some(3 + 1));
        assert_eq!(tally.get("B"), Some(2 + 2));
        assert_eq!(tally.get("C"), Some(1));
    }

    #[test]
    fn approval_counts_every_mention() {
        let data = parse_ballots("A B\nA C\n");
        let tally = tally_approval(&data);
        assert_eq!(tally.get("A"), Some(2));
        assert_eq!(tally.get("B"), Some(1));
        assert_eq!(tally.get("C"), Some(1));
        let token_count: usize = data.iter().map(|b| b.len()).sum();
        assert_eq!(tally.total(), token_count as u64);
    }

    #[test]
    fn approval_counts_repeated_tokens_on_one_ballot() {
        let tally = tally_approval(&parse_ballots("A A B\n"));
        assert_eq!(tally.get("A"), Some(2));
        assert_eq!(tally.get("B"), Some(1));
    }

    #[test]
    fn tie_break_favors_the_first_candidate() {
        assert!(ballot_favors_first(Some(0), Some(1)));
        assert!(ballot_favors_first(Some(2), Some(2)));
        assert!(!ballot_favors_first(Some(1), Some(0)));
        // Omissions rank after everyone present; a double omission is a tie.
        assert!(ballot_favors_first(Some(3), None));
        assert!(!ballot_favors_first(None, Some(0)));
        assert!(ballot_favors_first(None, None));
    }

    #[test]
    fn pairwise_tie_goes_to_the_first_argument() {
        let data = parse_ballots("A B\nB A\n");
        // One ballot each: the final >= hands the contest to whichever
        // candidate is asked about first.
        assert!(pairwise_beats(&data, "A", "B"));
        assert!(pairwise_beats(&data, "B", "A"));
    }

    #[test]
    fn a_candidate_always_pairwise_beats_itself() {
        let data = parse_ballots("A B\nB A\nB A\n");
        assert!(pairwise_beats(&data, "A", "A"));
        assert!(pairwise_beats(&data, "B", "B"));
    }

    #[test]
    fn unanimous_ranking_wins_condorcet() {
        let _ = env_logger::builder().is_test(true).try_init();
        let data = parse_ballots("A B C\nA B C\nA C B\n");
        let res = find_condorcet_winner(&data, CandidateUniverse::FirstBallot);
        assert_eq!(res.winner, Some("A".to_string()));
        assert_eq!(res.pairwise_wins.get("A"), Some(2));
    }

    #[test]
    fn cyclic_preferences_have_no_condorcet_winner() {
        let data = parse_ballots("A B C\nB C A\nC A B\n");
        let res = find_condorcet_winner(&data, CandidateUniverse::FirstBallot);
        assert_eq!(res.winner, None);
        assert_eq!(res.pairwise_wins.get("A"), Some(1));
        assert_eq!(res.pairwise_wins.get("B"), Some(1));
        assert_eq!(res.pairwise_wins.get("C"), Some(1));
    }

    #[test]
    fn mutual_wins_report_the_first_candidate_in_universe_order() {
        // Both contests of the pair favor their first argument, so both
        // candidates score 1; the resolver reports the first one seen.
        let data = parse_ballots("A B\nB A\n");
        let res = find_condorcet_winner(&data, CandidateUniverse::FirstBallot);
        assert_eq!(res.pairwise_wins.get("A"), Some(1));
        assert_eq!(res.pairwise_wins.get("B"), Some(1));
        assert_eq!(res.winner, Some("A".to_string()));
    }

    #[test]
    fn condorcet_universe_is_fixed_by_the_first_ballot() {
        let _ = env_logger::builder().is_test(true).try_init();
        // C dominates but is absent from the first ballot: plurality still
        // counts it, the sweep never sees it.
        let data = parse_ballots("A B\nC A\nC B\n");
        let first = find_condorcet_winner(&data, CandidateUniverse::FirstBallot);
        assert_eq!(first.pairwise_wins.get("C"), None);
        assert_eq!(first.winner, Some("A".to_string()));

        let all = find_condorcet_winner(&data, CandidateUniverse::AllBallots);
        assert_eq!(all.winner, Some("C".to_string()));
    }

    #[test]
    fn empty_election_has_no_condorcet_winner() {
        let res = find_condorcet_winner(&[], CandidateUniverse::FirstBallot);
        assert_eq!(res.winner, None);
        assert!(res.pairwise_wins.is_empty());
    }

    #[test]
    fn worked_example_two_mirrored_ballots() {
        let ranked = parse_ballots("A B\nB A\n");
        let approval = parse_ballots("A B\nA C\n");
        let res = run_election_methods(&ranked, &approval, CandidateUniverse::FirstBallot);
        assert_eq!(res.plurality.get("A"), Some(1));
        assert_eq!(res.plurality.get("B"), Some(1));
        assert_eq!(res.majority.threshold, 2);
        assert!(!res.majority.has_majority());
        assert_eq!(res.borda.get("A"), Some(3));
        assert_eq!(res.borda.get("B"), Some(3));
        assert_eq!(res.approval.get("A"), Some(2));
        assert_eq!(res.approval.get("B"), Some(1));
        assert_eq!(res.approval.get("C"), Some(1));
        assert_eq!(res.condorcet.winner, Some("A".to_string()));
    }
}
