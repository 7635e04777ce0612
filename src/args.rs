use clap::{Parser, Subcommand};

/// Lucky draws and random groups from a list of names.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the inputs and the settings. The other flags take
    /// precedence over the content of this file.
    #[clap(short, long, value_parser, global = true)]
    pub config: Option<String>,

    /// (file path, can be repeated) A file with the names of the participants.
    #[clap(short, long, value_parser, global = true)]
    pub input: Vec<String>,

    /// (default csv) The type of the input files: csv or xlsx.
    #[clap(long, value_parser, global = true)]
    pub input_type: Option<String>,

    /// (default: the only worksheet) When using an Excel file, the name of the worksheet to use.
    #[clap(long, value_parser, global = true)]
    pub excel_worksheet_name: Option<String>,

    /// (text) Names separated by commas or newlines, added after the input files.
    #[clap(long, value_parser, global = true)]
    pub names: Option<String>,

    /// If passed as an argument, adds the demo names to the roster.
    #[clap(long, takes_value = false, global = true)]
    pub demo: bool,

    /// If passed as an argument, only the first participant with a given name is kept.
    #[clap(long, takes_value = false, global = true)]
    pub dedup: bool,

    /// (file path, 'stdout' or empty) Where to write the JSON summary. Defaults to the standard
    /// output.
    #[clap(short, long, value_parser, global = true)]
    pub out: Option<String>,

    /// (integer, optional) Makes the draws and the groups reproducible.
    #[clap(long, value_parser, global = true)]
    pub seed: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Prints the roster and the duplicated names.
    Roster,
    /// Draws winners.
    Draw {
        /// (default 1) The number of winners to draw.
        #[clap(long, value_parser)]
        count: Option<u32>,
        /// If passed as an argument, a winner stays in the pool for the next draws.
        #[clap(long, takes_value = false)]
        allow_repeats: bool,
        /// If passed as an argument, the winners are drawn without the spinning names.
        #[clap(long, takes_value = false)]
        no_animation: bool,
    },
    /// Splits the roster into random groups.
    Group {
        /// (default 4) The number of people per group.
        #[clap(long, value_parser)]
        size: Option<String>,
        /// (file path, optional) Writes the groups to a CSV file.
        #[clap(long, value_parser)]
        export: Option<String>,
    },
    /// Starts an interactive session on the standard input.
    Session,
}
