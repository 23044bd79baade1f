use log::{debug, info, warn};

use preference_voting::*;
use snafu::{prelude::*, ErrorCompat, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::poll::ballot_file::*;

pub mod ballot_file;

#[derive(Debug, Snafu)]
pub enum PollError {
    #[snafu(display("Error opening ballot file {path}"))]
    OpeningBallotFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening summary file {path}"))]
    OpeningSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing summary file {path}"))]
    ParsingSummary {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display(""))]
    RenderingSummary { source: serde_json::Error },
    #[snafu(display("Error writing summary file {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type PollResult<T> = Result<T, PollError>;

/// Where the tabulation reads its ballots from.
///
/// The paths travel explicitly from the command line down to the readers;
/// nothing below the argument parser hardcodes a file name.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TabulationConfig {
    pub ranked_ballot_path: String,
    pub approval_ballot_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct SummaryConfig {
    #[serde(rename = "rankedBallotFile")]
    ranked_ballot_file: String,
    #[serde(rename = "approvalBallotFile")]
    approval_ballot_file: String,
}

fn tally_to_json(tally: &Tally) -> JSValue {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for (name, count) in tally.iter() {
        m.insert(name.clone(), json!(count.to_string()));
    }
    json!(m)
}

fn build_summary_js(config: &TabulationConfig, result: &ElectionResult) -> JSValue {
    let c = SummaryConfig {
        ranked_ballot_file: simplify_file_name(config.ranked_ballot_path.as_str()),
        approval_ballot_file: simplify_file_name(config.approval_ballot_path.as_str()),
    };
    json!({
        "config": c,
        "results": {
            "plurality": { "tally": tally_to_json(&result.plurality) },
            "majority": {
                "threshold": result.majority.threshold.to_string(),
                "winners": result.majority.winners
            },
            "borda": { "tally": tally_to_json(&result.borda) },
            "approval": { "tally": tally_to_json(&result.approval) },
            "condorcet": {
                "winner": result.condorcet.winner,
                "pairwiseWins": tally_to_json(&result.condorcet.pairwise_wins)
            }
        }
    })
}

fn push_tally_section(out: &mut String, title: &str, tally: &Tally) {
    out.push_str(title);
    out.push('\n');
    for (name, count) in tally.iter() {
        out.push_str(format!("{}\t{}\n", name, count).as_str());
    }
}

/// The plain-text report: one section per method, in the order the methods
/// run, separated by blank lines.
pub fn render_report(result: &ElectionResult) -> String {
    let mut out = String::new();
    push_tally_section(&mut out, "Plurality", &result.plurality);
    out.push('\n');
    out.push_str("Majority\n");
    if result.majority.has_majority() {
        for winner in result.majority.winners.iter() {
            out.push_str(format!("Majority Winner is {}\n", winner).as_str());
        }
    } else {
        out.push_str("No Majority Winner in this data.\n");
    }
    out.push('\n');
    push_tally_section(&mut out, "Borda", &result.borda);
    out.push('\n');
    push_tally_section(&mut out, "Approval", &result.approval);
    out.push('\n');
    out.push_str("Condorcet\n");
    match &result.condorcet.winner {
        Some(winner) => {
            out.push_str(winner.as_str());
            out.push('\n');
        }
        None => out.push_str("No Condorcet Winner exists in this data.\n"),
    }
    out
}

fn read_summary(path: &str) -> PollResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningSummarySnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue =
        serde_json::from_str(contents.as_str()).context(ParsingSummarySnafu { path })?;
    Ok(js)
}

/// Reads both ballot files, runs every method, prints the report and
/// handles the summary output and the reference check.
pub fn run_tabulation(
    config: &TabulationConfig,
    summary_out: &Option<String>,
    reference_path: &Option<String>,
) -> PollResult<()> {
    let ranked = read_ballots(config.ranked_ballot_path.as_str())?;
    let approval = read_ballots(config.approval_ballot_path.as_str())?;

    let result = run_election_methods(&ranked, &approval, CandidateUniverse::FirstBallot);
    info!("result: {:?}", result);

    print!("{}", render_report(&result));

    let result_js = build_summary_js(config, &result);
    let pretty_js_stats =
        serde_json::to_string_pretty(&result_js).context(RenderingSummarySnafu {})?;

    match summary_out.as_deref() {
        Some("stdout") => {
            println!("{}", pretty_js_stats);
        }
        Some(path) => {
            info!("Writing summary to {}", path);
            fs::write(path, pretty_js_stats.as_str()).context(WritingSummarySnafu { path })?;
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = reference_path {
        let summary_ref = read_summary(summary_p.as_str())?;
        debug!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(RenderingSummarySnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

fn run_tabulation_test(
    test_name: &str,
    data_lpath: &str,
    approval_lpath: &str,
    summary_lpath: &str,
) {
    let test_dir =
        option_env!("POLLTAB_TEST_DIR").unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data"));
    info!("Running test {}", test_name);
    let config = TabulationConfig {
        ranked_ballot_path: format!("{}/{}/{}", test_dir, test_name, data_lpath),
        approval_ballot_path: format!("{}/{}/{}", test_dir, test_name, approval_lpath),
    };
    let res = run_tabulation(
        &config,
        &None,
        &Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
    );
    if let Err(e) = &res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(e) {
            eprintln!("trace: {}", bt);
        } else {
            eprintln!("No trace found");
        }
    }
    assert!(res.is_ok(), "tabulation failed for {}", test_name);
}

pub fn test_wrapper(test_name: &str) {
    run_tabulation_test(test_name, "data.txt", "approval.txt", "expected_summary.json")
}
