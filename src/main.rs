use std::process;

use clap::Parser;

use lunchpoll::cli::{self, Cli};
use lunchpoll::config::Config;
use lunchpoll::logging;

fn main() {
    let args = Cli::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    logging::init(&config.log);

    if let Err(e) = cli::run(args, &config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
