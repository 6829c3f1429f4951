//! Reads a grammar file, then prints `YES` or `NO` for every line of stdin.
//!
//! Usage:
//!   earley --grammar grammar.txt < words.txt
//!   echo "aabb" | earley -g grammar.txt --debug
//!
//! With `--debug` the chart of every word is printed before its verdict.

#![allow(clippy::print_stderr)]

use clap::Parser;
use earley_recognizer::{Error, Grammar, Recognizer};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Prints YES or NO for every line of stdin derivable from a grammar")]
struct Args {
    /// file with grammar, one rule per line
    #[arg(short, long)]
    grammar: PathBuf,

    /// print all states of the chart to stdout
    #[arg(short, long)]
    debug: bool,
}

fn read_grammar(path: &Path) -> Result<Grammar, Error> {
    let text = fs::read_to_string(path)?;
    Grammar::from_rules(text.lines().map(str::trim))
}

fn recognize_lines<R, W>(grammar: &Grammar, debug: bool, input: R, mut output: W) -> Result<(), Error>
where
    R: BufRead,
    W: Write,
{
    let mut recognizer = Recognizer::new(grammar);

    for line in input.lines() {
        let line = line?;
        let accepted = recognizer.recognize(line.trim());

        if debug {
            write!(output, "{}", recognizer.chart())?;
        }
        writeln!(output, "{}", if accepted { "YES" } else { "NO" })?;
    }

    output.flush()?;
    Ok(())
}

fn run(args: &Args) -> Result<(), Error> {
    let grammar = read_grammar(&args.grammar)?;
    recognize_lines(&grammar, args.debug, io::stdin().lock(), io::stdout().lock())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("earley: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};
    let filter_layer = EnvFilter::from_default_env();
    let fmt_layer = fmt::Layer::default().with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

#[cfg(not(feature = "tracing"))]
const fn init_tracing() {}
