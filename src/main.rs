use clap::Parser;
use log::info;
use snafu::ErrorCompat;

mod args;
pub mod poll;

use crate::args::Args;
use crate::poll::{run_tabulation, TabulationConfig};

fn main() {
    let args = Args::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    if args.verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    }
    log_builder.init();

    let config = TabulationConfig {
        ranked_ballot_path: args.data.unwrap_or_else(|| "data.txt".to_string()),
        approval_ballot_path: args.approval.unwrap_or_else(|| "approval.txt".to_string()),
    };
    info!("config: {:?}", config);

    let res = run_tabulation(&config, &args.out, &args.reference);
    if let Err(e) = res {
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        } else {
            eprintln!("No trace found");
        }
        std::process::exit(1);
    }
}
