use clap::Parser;

/// This is a poll tabulation program for ranked and approval ballots.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, default data.txt) The file containing the ranked ballots, one ballot per line with the
    /// candidates in preference order. For more information about the file format, read the documentation.
    #[clap(short, long, value_parser)]
    pub data: Option<String>,

    /// (file path, default approval.txt) The file containing the approval ballots, one ballot per line with
    /// all the candidates the voter approves of.
    #[clap(short, long, value_parser)]
    pub approval: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the poll will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of a poll in JSON format. If provided, polltab will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
