use clap::Parser;

/// Reconciles the UN General Assembly roll-call datasets into one table.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (directory path) The directory holding the three source files
    /// (idealpoints.tab, rawvotingdata13.tab, descriptions.xls). The files must
    /// have been downloaded beforehand; a missing file aborts the run with the
    /// address it can be retrieved from.
    #[clap(short, long, value_parser)]
    pub data_dir: Option<String>,

    /// (file path) Where the combined roll-call table is written. Defaults to
    /// roll-calls.tab inside the data directory. Any existing file is
    /// overwritten.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the run will be
    /// written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path) A reference run summary in JSON format. If provided, unrollcalls
    /// will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
