use clap::Parser;
use log::debug;

mod args;
mod sched;

use crate::args::Args;
use crate::sched::config_reader;

fn main() {
    env_logger::init();

    let args = Args::parse();
    debug!("args: {:?}", args);

    // Configuration problems are a startup failure, before any source
    // is touched.
    let config = match config_reader::read_config(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading configuration: {}", e);
            std::process::exit(2);
        }
    };

    match sched::run(config, args.day, args.verbose) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    }
}
