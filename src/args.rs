use clap::Parser;

/// This is a ranked ballot tabulation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the election. It may name the input file and the
    /// counting method.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, '-' or empty) The file containing the ballots in the text format. When empty, the
    /// ballots are read from the standard input. Setting this option overrides the input file that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default instant_runoff) The counting method: two_round, instant_runoff or coombs.
    #[clap(short, long, value_parser)]
    pub algorithm: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON
    /// format to the given location. With --generate, the generated ballots are written there instead.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the outcome of an election in JSON format. If provided,
    /// the tabulated output is checked against the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Ballot generation
    /// (number of participants) Instead of counting, generates a random ballot file.
    #[clap(long, value_parser)]
    pub generate: Option<usize>,

    /// (list of comma-separated names) The candidates of the generated ballot file.
    #[clap(long, value_parser, use_value_delimiter = true)]
    pub candidates: Option<Vec<String>>,

    /// (default: all the candidates) The number of candidates ranked by each generated participant.
    #[clap(long, value_parser)]
    pub ranks: Option<usize>,

    /// The seed of the random generator, for reproducible ballot files.
    #[clap(long, value_parser)]
    pub seed: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
