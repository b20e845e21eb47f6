//! `ini` CLI — convert between INI and JSON from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to INI (stdin → stdout)
//! echo '{"name":"game","server":{"port":443}}' | ini encode
//!
//! # Encode from file to file, wrapping top-level fields in a section
//! ini encode -i config.json -o config.ini --section main
//!
//! # Decode INI back to pretty-printed JSON
//! ini decode -i config.ini
//!
//! # Decode, failing on malformed quoted values, without value transforms
//! ini decode --strict --no-transforms -i config.ini
//!
//! # Validate a file and print a short summary
//! ini check -i config.ini
//! ```
//!
//! Logs go to stderr. `-v` enables debug output, `-vv` trace output, and
//! `RUST_LOG` overrides both.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use ini_core::{Decoder, EncodeOptions, LineEnding, TransformRegistry};
use serde_json::{Map, Value};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ini", version, about = "INI <-> JSON converter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON object to INI format
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Write top-level fields under this section
        #[arg(long)]
        section: Option<String>,
        /// Terminate lines with CRLF instead of LF
        #[arg(long)]
        crlf: bool,
    },
    /// Decode INI to JSON format
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Fail on malformed quoted values instead of keeping their raw text
        #[arg(long)]
        strict: bool,
        /// Keep `name(argument)` values as plain text
        #[arg(long)]
        no_transforms: bool,
        /// Emit minified JSON
        #[arg(long)]
        compact: bool,
    },
    /// Strictly decode INI and report its size
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode {
            input,
            output,
            section,
            crlf,
        } => {
            let json = read_input(input.as_deref())?;

            let mut options = EncodeOptions::default();
            if let Some(section) = section {
                options = options.section(section);
            }
            if crlf {
                options = options.line_ending(LineEnding::CrLf);
            }

            let ini =
                ini_core::encode_json_with(&json, options).context("Failed to encode JSON to INI")?;
            tracing::debug!(bytes = ini.len(), "encoded document");
            write_output(output.as_deref(), &ini)?;
        }
        Commands::Decode {
            input,
            output,
            strict,
            no_transforms,
            compact,
        } => {
            let ini = read_input(input.as_deref())?;
            let mut decoder = Decoder::new().strict(strict);
            if no_transforms {
                decoder = decoder.transforms(TransformRegistry::empty());
            }
            let document = decoder
                .decode(&ini)
                .context("Failed to decode INI to JSON")?;

            let value = Value::Object(document);
            let json = if compact {
                serde_json::to_string(&value)?
            } else {
                serde_json::to_string_pretty(&value)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Check { input } => {
            let ini = read_input(input.as_deref())?;
            let document = Decoder::new()
                .strict(true)
                .decode(&ini)
                .context("Invalid INI")?;
            let (sections, keys) = count(&document);
            println!("OK: {} sections, {} keys", sections, keys);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Count nested sections and non-section fields.
fn count(map: &Map<String, Value>) -> (usize, usize) {
    map.values().fold((0, 0), |(sections, keys), value| match value {
        Value::Object(child) => {
            let (s, k) = count(child);
            (sections + 1 + s, keys + k)
        }
        _ => (sections, keys + 1),
    })
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
