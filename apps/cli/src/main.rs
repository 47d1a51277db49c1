use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use engine::{evaluate, EngineOptions, InputOutcome, Session};
use shared::protocol::ComputeResponse;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Digital roots of numbers, lists (`1,2,3`) and ranges (`5-10*2`).
#[derive(Parser, Debug)]
#[command(name = "droot")]
struct Args {
    /// Inputs evaluated one by one.
    inputs: Vec<String>,
    /// Treat each stdin line as the next value of one input field.
    #[arg(long)]
    interactive: bool,
    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
    #[arg(long, default_value_t = engine::options::DEFAULT_STOP_AT)]
    stop_at: u64,
    #[arg(long, default_value_t = engine::options::DEFAULT_MAX_TERMS)]
    max_terms: usize,
    #[arg(long, default_value_t = engine::options::DEFAULT_MAX_OUTPUT_BYTES)]
    max_output_bytes: usize,
}

impl Args {
    fn options(&self) -> EngineOptions {
        EngineOptions {
            stop_at: self.stop_at,
            max_terms: self.max_terms,
            max_output_bytes: self.max_output_bytes,
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.interactive {
        let stdin = io::stdin();
        run_interactive(stdin.lock(), &mut out, args.options(), args.json)?;
    } else {
        run_once(&args.inputs, &mut out, args.options(), args.json)?;
    }
    Ok(())
}

fn run_once(
    inputs: &[String],
    out: &mut impl Write,
    options: EngineOptions,
    json: bool,
) -> Result<()> {
    for input in inputs {
        let evaluation = evaluate(input, &options);
        if json {
            let response = ComputeResponse::from(evaluation);
            writeln!(out, "{}", serde_json::to_string(&response)?)?;
        } else {
            write_rendered(out, &evaluation.rendered, evaluation.truncated)?;
        }
    }
    Ok(())
}

fn run_interactive(
    input: impl BufRead,
    out: &mut impl Write,
    options: EngineOptions,
    json: bool,
) -> Result<()> {
    let mut session = Session::new(options);

    for line in input.lines() {
        let line = line.context("failed to read stdin")?;
        let update = match session.handle_input(&line) {
            InputOutcome::Updated(update) => update,
            other => {
                debug!(sanitized = other.sanitized(), "no update");
                continue;
            }
        };

        if json {
            let response = ComputeResponse::from(update);
            writeln!(out, "{}", serde_json::to_string(&response)?)?;
        } else {
            write_rendered(out, &update.rendered, update.truncated)?;
        }
        out.flush()?;
    }
    Ok(())
}

fn write_rendered(out: &mut impl Write, rendered: &str, truncated: bool) -> Result<()> {
    if rendered.ends_with('\n') {
        write!(out, "{rendered}")?;
    } else {
        writeln!(out, "{rendered}")?;
    }
    if truncated {
        writeln!(out, "(range truncated)")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
