/*!

This is the long-form manual for `preference_voting` and `polltab`.

## Ballot files

A ballot file is plain text, one ballot per line. A ballot is a list of
candidate identifiers separated by spaces or tabs. Identifiers are opaque
tokens: `A`, `alice` and `candidate_1` are all fine, and two tokens name the
same candidate exactly when they are equal as strings.

```text
A B C
A C B
B A C
```

For the ranked file, the order on the line is the voter's preference order,
the first token being the most preferred. For the approval file, the line is
the set of candidates the voter approves of and the order carries no
meaning.

Notes:
- the line break ending the file does not open a ballot, so a file ending in
  a newline holds exactly one ballot per line
- any other blank line is kept as a ballot that ranks nobody; such a ballot
  is skipped by plurality and contributes nothing to Borda or approval
  scores, but it still counts in pairwise contests (as a tie, see below)
- a well-formed ballot names each candidate at most once; if a token is
  repeated, ranked methods use its first occurrence and approval counts
  every occurrence

## Methods

### Plurality

One vote per ballot, for the first choice on the line. Counters for the
candidate universe (see below) are created at zero before counting, so a
candidate nobody puts first is still reported.

### Majority

A reading of the plurality tally: a candidate with strictly more than half
of the first-preference votes, i.e. at least `total / 2 + 1` of them, is the
majority winner. With 4 votes the threshold is 3; with 5 votes, also 3.
There may be no such candidate, and the report says so.

### Borda count

On a ballot ranking `L` candidates, the choice in position `i` (counting
from 0) receives `L - i` points. The weight follows the ballot's own length:
the top choice of a 3-candidate ballot is worth 3 points, the top choice of
a 2-candidate ballot only 2. The candidate with the most points leads the
tally; no winner is singled out beyond the ordering of the report.

### Approval

Every candidate named on a ballot of the approval file gains one point.

### Condorcet

Every pair of distinct candidates in the universe meets in a head-to-head
contest. On each ballot, the pair's winner is the candidate ranked closer to
the front; a candidate missing from a ballot ranks behind everyone present.
Ties (both missing, or the same position) go to the candidate the contest
was asked about first, and so does an overall tied contest. A candidate
winning all of its `N - 1` contests is the Condorcet winner; with cyclic
preferences there is none.

The tie rule makes contests asymmetric: `A` against `B` and `B` against `A`
can both come out true on mirrored ballots. When that lifts several
candidates to a full score, the first one in universe order is reported.

## The candidate universe

Two methods need the list of candidates before counting anything: plurality
(to seed its counters) and Condorcet (to know which pairs to sweep). By
default that list is taken from the first ballot of the ranked file, which
matches the historical behavior of this program: a candidate appearing only
on later ballots still collects plurality votes, but is invisible to the
Condorcet sweep. Library users can pass
[`CandidateUniverse::AllBallots`](crate::CandidateUniverse) instead to take
the union over every ballot.

## Output

`polltab` prints a plain-text report of all five methods, then a JSON
summary that is stable enough to diff. Counts are rendered as strings in the
JSON so that arbitrarily large tallies survive readers that parse numbers as
floats. With `--out <path>` the summary is written to a file (`--out stdout`
prints it instead), and `--reference <path>` compares the freshly computed
summary against a saved one, failing loudly on any difference.

 */
