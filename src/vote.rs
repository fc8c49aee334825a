use log::{debug, info, warn};

use ranked_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::vote::config_reader::*;

pub mod config_reader;
pub mod generator;
pub mod io_text;
pub mod report;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum VoteError {
    #[snafu(display("Error opening file {path}"))]
    OpeningInput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the standard input"))]
    ReadingStdin { source: std::io::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Line {lineno}: {message}"))]
    ParsingInput { lineno: usize, message: String },
    #[snafu(display("No candidate found in the input"))]
    MissingCandidates {},
    #[snafu(display("{message}"))]
    UnknownAlgorithm { message: String },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Invalid election: {source}"))]
    Tallying { source: TallyErrors },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    SummaryMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type VoteResult<T> = Result<T, VoteError>;

fn read_input(path: Option<&str>) -> VoteResult<String> {
    match path {
        None | Some("-") => {
            info!("Reading ballots from the standard input");
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context(ReadingStdinSnafu {})?;
            Ok(buffer)
        }
        Some(p) => {
            info!("Attempting to read ballot file {:?}", p);
            fs::read_to_string(p).context(OpeningInputSnafu { path: p })
        }
    }
}

fn write_output(path: &str, contents: &str) -> VoteResult<()> {
    if path == "stdout" {
        println!("{}", contents);
        return Ok(());
    }
    info!("Writing summary to {:?}", path);
    fs::write(path, contents).context(WritingOutputSnafu { path })
}

/// Parses a ballot file and runs the counting method on it.
pub fn tally_text(contents: &str, method: Method) -> VoteResult<TallyResult> {
    let parsed = io_text::read_text(contents)?;
    debug!("parsed election: {:?}", parsed);
    let mut ballot = io_text::to_ballot(&parsed)?;
    ranked_tally::run_election(&mut ballot, method).context(TallyingSnafu {})
}

fn resolve_method(args: &Args, config: &Option<ElectionConfig>) -> VoteResult<Method> {
    match (args.algorithm.as_deref(), config) {
        (Some(name), _) => parse_method(name),
        (None, Some(c)) => c.rules.method(),
        (None, None) => Ok(Method::InstantRunoff),
    }
}

// Paths in the configuration are relative to the configuration file.
fn config_relative(config_path: &str, p: &str) -> VoteResult<String> {
    let root = Path::new(config_path)
        .parent()
        .context(MissingParentDirSnafu {})?;
    let full: PathBuf = root.join(p);
    Ok(full.display().to_string())
}

pub fn run_election(args: &Args) -> VoteResult<()> {
    let config: Option<ElectionConfig> = match args.config.as_deref() {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    info!("config: {:?}", config);

    let method = resolve_method(args, &config)?;

    let input_path: Option<String> = match (&args.input, &args.config, &config) {
        (Some(p), _, _) => Some(p.clone()),
        (None, Some(cp), Some(ElectionConfig {
            input_file: Some(f),
            ..
        })) => Some(config_relative(cp, f)?),
        _ => None,
    };
    let contents = read_input(input_path.as_deref())?;

    let result = tally_text(&contents, method)?;
    report::log_rounds(&result);
    println!("Winner: {}", result.winner_name);

    let output_config = OutputConfig {
        contest: config
            .as_ref()
            .map(|c| c.output_settings.contest_name.clone())
            .unwrap_or_default(),
        date: config
            .as_ref()
            .and_then(|c| c.output_settings.contest_date.clone()),
        algorithm: method.name().to_string(),
    };
    let result_js = report::build_summary_js(&output_config, &result);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    let out_path: Option<String> = match (&args.out, &args.config, &config) {
        (Some(p), _, _) => Some(p.clone()),
        (None, Some(cp), Some(c)) => match c.output_settings.output_directory.as_deref() {
            Some(dir) => Some(config_relative(
                cp,
                &format!("{}/{}_summary.json", dir, c.output_settings.contest_name),
            )?),
            None => None,
        },
        _ => None,
    };
    if let Some(p) = out_path {
        write_output(&p, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = args.reference.as_deref() {
        let summary_ref: JSValue = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return SummaryMismatchSnafu {}.fail();
        }
        info!("The summary matches the reference {:?}", summary_p);
    }

    Ok(())
}
