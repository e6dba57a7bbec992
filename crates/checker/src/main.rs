//! CLI entry point for the PAL style checker.

use std::env;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono as _;
use pal_checker::checker::check_source;
use pal_checker::errors::CheckError;
use pal_checker::report::{render_report, write_report, ReportHeader};
use pal_checker::source::{default_report_path, load_source};
#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;
use thiserror as _;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const USAGE_TEXT: &str = "\
Usage: pal-check [<input>] [options]

Checks a PAL source file and writes a report next to it.
Prompts for the file name when <input> is omitted.

Options:
  -o, --output <file>   Report path (default: input stem + .log)
      --author <name>   Author line of the report header
      --course <label>  Course line of the report header
  -v, --verbose         Log check progress to stderr
  -h, --help            Show this help message

Examples:
  pal-check lab1.pal
  pal-check lab1.pal -o reports/lab1.log
  pal-check lab1.pal --author \"Grace Hopper\" --course \"CS 3210\"
";

const PROMPT_TEXT: &str = "Enter the filename of the file to check";

#[derive(Debug, Default, PartialEq, Eq)]
struct CheckArgs {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    author: Option<String>,
    course: Option<String>,
    verbose: bool,
}

#[derive(Debug)]
enum ParseResult {
    Command(CheckArgs),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut parsed = CheckArgs::default();

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--verbose" || arg == "-v" {
            parsed.verbose = true;
            continue;
        }

        if arg == "-o" || arg == "--output" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -o".to_string())?;
            parsed.output = Some(PathBuf::from(value));
            continue;
        }

        if arg == "--author" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --author".to_string())?;
            parsed.author = Some(value.to_string_lossy().into_owned());
            continue;
        }

        if arg == "--course" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for --course".to_string())?;
            parsed.course = Some(value.to_string_lossy().into_owned());
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if parsed.input.is_some() {
            return Err("multiple input paths provided".to_string());
        }
        parsed.input = Some(PathBuf::from(arg));
    }

    Ok(ParseResult::Command(parsed))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn prompt_for_input(mut stdin: impl BufRead, mut stdout: impl Write) -> Result<PathBuf, CheckError> {
    writeln!(stdout, "{PROMPT_TEXT}")
        .and_then(|()| stdout.flush())
        .map_err(CheckError::Prompt)?;

    let mut answer = String::new();
    stdin.read_line(&mut answer).map_err(CheckError::Prompt)?;
    Ok(PathBuf::from(answer.trim()))
}

fn build_header(args: &CheckArgs) -> ReportHeader {
    let mut header = ReportHeader::today();
    if let Some(author) = &args.author {
        header = header.with_author(author.as_str());
    }
    if let Some(course) = &args.course {
        header = header.with_course(course.as_str());
    }
    header
}

fn report_path(args: &CheckArgs, input: &Path) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| default_report_path(input))
}

fn run(args: &CheckArgs) -> Result<(), CheckError> {
    let input = match &args.input {
        Some(input) => input.clone(),
        None => prompt_for_input(io::stdin().lock(), io::stdout().lock())?,
    };

    let lines = load_source(&input)?;
    let result = check_source(&lines);

    let output = report_path(args, &input);
    let report = render_report(&build_header(args), &input, &result);
    write_report(&output, &report)?;
    debug!(report = %output.display(), "report complete");

    println!(
        "Checked {} ({} errors, {} warnings) -> {}",
        input.display(),
        result.total_errors(),
        result.warnings.len(),
        output.display()
    );
    Ok(())
}

fn report_check_error(error: &CheckError) {
    eprintln!("error: {error}");
    if error.is_missing_input() {
        eprintln!("Please check your input file and try again.");
    }
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Command(args)) => {
            init_tracing(args.verbose);
            if let Err(error) = run(&args) {
                report_check_error(&error);
            }
            0
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}
