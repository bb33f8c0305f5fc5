use clap::Parser;

/// This is a scheduling program for volunteer snow-removal teams.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (day name) The day of the week to schedule (e.g. Monday). If not provided, the day
    /// is read from the standard input.
    #[clap(short, long, value_parser)]
    pub day: Option<String>,

    /// (file path) The configuration file naming the credential, the workbook and the
    /// two worksheets to read.
    #[clap(short, long, value_parser, default_value = "config.json")]
    pub config: String,

    /// If passed as an argument, prints the full availability pool before the team.
    #[clap(short, long, takes_value = false)]
    pub verbose: bool,
}
