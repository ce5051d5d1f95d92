//! # chatlog-parser CLI
//!
//! Reads a chat export and prints the parsed messages as JSON.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use chatlog_parser::{ParseError, ParseStringOptions, date_range, parse_file, unique_authors};

/// Parse a chat export into structured messages.
#[derive(Parser, Debug)]
#[command(name = "chatlog-parser")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlog-parser chat.txt
    chatlog-parser chat.txt --month-first --pretty
    chatlog-parser chat.txt --options options.json --summary")]
struct Args {
    /// Path to the exported chat
    input: PathBuf,

    /// JSON file with parse options (`daysFirst`, `parseAttachments`)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Dates start with the day
    #[arg(long, conflicts_with = "month_first")]
    day_first: bool,

    /// Dates start with the month
    #[arg(long)]
    month_first: bool,

    /// Extract attachment file names
    #[arg(short, long)]
    attachments: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Print authors and date range instead of the messages
    #[arg(long)]
    summary: bool,
}

impl Args {
    fn parse_options(&self) -> Result<ParseStringOptions, ParseError> {
        let mut options = match &self.options {
            Some(path) => ParseStringOptions::from_json(&fs::read_to_string(path)?)?,
            None => ParseStringOptions::new(),
        };

        if self.day_first {
            options = options.with_days_first(true);
        } else if self.month_first {
            options = options.with_days_first(false);
        }
        if self.attachments {
            options = options.with_attachments(true);
        }

        Ok(options)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), ParseError> {
    let args = Args::parse();
    let options = args.parse_options()?;
    let messages = parse_file(&args.input, Some(options))?;

    let output = if args.summary {
        let (first, last) = date_range(&messages).unzip();
        json!({
            "messages": messages.len(),
            "authors": unique_authors(&messages),
            "firstDate": first,
            "lastDate": last,
        })
    } else {
        serde_json::to_value(&messages).map_err(io::Error::from)?
    };

    write_json(io::stdout().lock(), &output, args.pretty)
}

/// Writes `value` followed by a newline. Serialization failures are [`ParseError::Io`].
fn write_json(
    mut out: impl Write,
    value: &serde_json::Value,
    pretty: bool,
) -> Result<(), ParseError> {
    if pretty {
        serde_json::to_writer_pretty(&mut out, value).map_err(io::Error::from)?;
    } else {
        serde_json::to_writer(&mut out, value).map_err(io::Error::from)?;
    }
    writeln!(out)?;

    Ok(())
}
