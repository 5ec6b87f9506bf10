//! respwire CLI
//!
//! Decode RESP frames into a readable form, or encode a command into wire bytes.

use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use respwire::protocol::{write_value, Reader, Value};
use respwire::{Command, Config, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// respwire CLI
#[derive(Parser, Debug)]
#[command(name = "respwire-cli")]
#[command(about = "Inspect and produce RESP protocol frames")]
#[command(version)]
struct Args {
    /// Maximum array nesting depth accepted when decoding
    #[arg(long, default_value = "64")]
    max_depth: usize,

    /// Maximum bulk string length in bytes accepted when decoding
    #[arg(long, default_value = "536870912")]
    max_bulk_len: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every frame read from a file or stdin
    Decode {
        /// Input file (stdin when omitted)
        input: Option<PathBuf>,

        /// Interpret each frame as a client command
        #[arg(short, long)]
        commands: bool,
    },

    /// Write a command as an array of bulk strings to stdout
    Encode {
        /// Command name followed by its arguments
        #[arg(required = true)]
        args: Vec<String>,
    },
}

fn main() {
    // Logs go to stderr so decoded output stays clean
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,respwire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .max_depth(args.max_depth)
        .max_bulk_len(args.max_bulk_len)
        .build();

    let result = match args.command {
        Commands::Decode { input, commands } => decode(input, commands, config),
        Commands::Encode { args } => encode(args),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn decode(input: Option<PathBuf>, commands: bool, config: Config) -> Result<()> {
    let source: Box<dyn Read> = match input {
        Some(path) => {
            tracing::debug!("Reading frames from {}", path.display());
            Box::new(File::open(path)?)
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut reader = Reader::with_config(BufReader::new(source), config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut count = 0usize;

    if commands {
        while let Some(command) = reader.read_command()? {
            let args: Vec<String> = (0..command.arg_count())
                .map(|i| format!("{:?}", command.value(i)))
                .collect();
            writeln!(out, "{}", args.join(" "))?;
            count += 1;
        }
    } else {
        for frame in reader.frames() {
            let mut text = String::new();
            render(&frame?, 0, &mut text);
            writeln!(out, "{}", text)?;
            count += 1;
        }
    }

    tracing::info!("Decoded {} frames", count);
    Ok(())
}

fn encode(args: Vec<String>) -> Result<()> {
    let command = Command::new(args)?;
    let mut out = io::stdout().lock();
    write_value(&mut out, &command.to_value())
}

/// Render a value the way interactive clients print replies
fn render(value: &Value, indent: usize, out: &mut String) {
    match value {
        Value::SimpleString(s) => out.push_str(&String::from_utf8_lossy(s)),
        Value::Error(e) => {
            out.push_str("(error) ");
            out.push_str(&String::from_utf8_lossy(e));
        }
        Value::Integer(n) => out.push_str(&format!("(integer) {}", n)),
        Value::BulkString(Some(data)) => {
            out.push_str(&format!("{:?}", String::from_utf8_lossy(data)))
        }
        Value::BulkString(None) | Value::Array(None) => out.push_str("(nil)"),
        Value::Array(Some(items)) if items.is_empty() => out.push_str("(empty array)"),
        Value::Array(Some(items)) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                    out.push_str(&" ".repeat(indent));
                }
                let prefix = format!("{}) ", i + 1);
                out.push_str(&prefix);
                render(item, indent + prefix.len(), out);
            }
        }
    }
}
