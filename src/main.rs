mod args;
mod vote;

use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use crate::args::Args;

fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "info"
    } else {
        "error"
    }
}

fn main() {
    let args = Args::parse();

    // RUST_LOG, when set, takes precedence over --verbose.
    let env = Env::default().default_filter_or(default_log_level(args.verbose));
    env_logger::Builder::from_env(env).init();

    info!("args: {:?}", args);

    let res = match args.generate {
        Some(num_participants) => vote::generator::run_generate(&args, num_participants),
        None => vote::run_election(&args),
    };

    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_the_default_level() {
        assert_eq!(default_log_level(true), "info");
        assert_eq!(default_log_level(false), "error");
        let env = Env::new()
            .filter("TALLY_TEST_UNSET_LOG")
            .default_filter_or(default_log_level(true));
        let logger = env_logger::Builder::from_env(env).build();
        assert_eq!(logger.filter(), log::LevelFilter::Info);
    }

    #[test]
    fn log_variable_wins_over_verbose() {
        std::env::set_var("TALLY_TEST_DEBUG_LOG", "debug");
        let env = Env::new()
            .filter("TALLY_TEST_DEBUG_LOG")
            .default_filter_or(default_log_level(true));
        let logger = env_logger::Builder::from_env(env).build();
        assert_eq!(logger.filter(), log::LevelFilter::Debug);
    }
}
