use crate::poll::*;
use std::path::Path;

/// Reads a ballot file into memory and parses it, one ballot per line.
pub fn read_ballots(path: &str) -> PollResult<Vec<Ballot>> {
    info!("Attempting to read ballot file {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningBallotFileSnafu { path })?;
    let ballots = parse_ballots(contents.as_str());
    debug!("read {} ballots from {:?}", ballots.len(), path);
    Ok(ballots)
}

/// The file name without its directory, so that summaries do not depend on
/// where the inputs live.
pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplify_keeps_only_the_file_name() {
        assert_eq!(simplify_file_name("/a/b/data.txt"), "data.txt");
        assert_eq!(simplify_file_name("approval.txt"), "approval.txt");
    }

    #[test]
    fn missing_file_reports_its_path() {
        let res = read_ballots("definitely_not_here.txt");
        match res {
            Err(PollError::OpeningBallotFile { path, .. }) => {
                assert_eq!(path, "definitely_not_here.txt");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn reads_a_checked_in_fixture() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/tied_pair/data.txt");
        let ballots = read_ballots(path).unwrap();
        assert_eq!(ballots.len(), 2);
        assert_eq!(ballots[0].choices, vec!["A", "B"]);
    }
}
