//! yaml-canon - rewrite YAML in canonical form, keeping comments

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yaml_canon::{LintOptions, Linter};

use config::ConfigFile;

/// Format YAML documents canonically
#[derive(Parser, Debug)]
#[command(name = "yaml-canon")]
#[command(version, about = "Rewrite YAML in canonical form, keeping comments", long_about = None)]
struct Args {
    /// YAML files to format. Reads stdin when none are given.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Rewrite files in place
    #[arg(long, conflicts_with = "check")]
    write: bool,

    /// List inputs that are not in canonical form and exit with status 1
    #[arg(long)]
    check: bool,

    /// Width past which strings are written as folded blocks
    #[arg(long, value_name = "N")]
    columns: Option<usize>,

    /// Skip the round-trip check of the formatted output
    #[arg(long)]
    no_paranoid: bool,

    /// Config file (defaults to .yaml-canon.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yaml_canon=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Returns `false` when `--check` found input that would change.
fn run() -> Result<bool> {
    let args = Args::parse();
    let options = ConfigFile::load(args.config.as_deref())?.into_options(args.columns, args.no_paranoid);

    if args.files.is_empty() {
        if args.write {
            anyhow::bail!("--write needs at least one file");
        }
        return run_stdin(&args, &options);
    }

    let mut canonical = true;
    for path in &args.files {
        let input = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;
        let output = format_text(&input, &options)
            .with_context(|| format!("Failed to format {}", path.display()))?;

        if args.check {
            if output != input {
                println!("{}", path.display());
                canonical = false;
            }
        } else if args.write {
            if output != input {
                fs::write(path, &output)
                    .with_context(|| format!("Failed to write file: {}", path.display()))?;
                tracing::info!(path = %path.display(), "reformatted");
            }
        } else {
            io::stdout().write_all(output.as_bytes())?;
        }
    }
    Ok(canonical)
}

fn run_stdin(args: &Args, options: &LintOptions) -> Result<bool> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read standard input")?;
    let output = format_text(&input, options).context("Failed to format standard input")?;

    if args.check {
        if output != input {
            println!("<stdin>");
            return Ok(false);
        }
        return Ok(true);
    }
    io::stdout().write_all(output.as_bytes())?;
    Ok(true)
}

fn format_text(input: &str, options: &LintOptions) -> Result<String> {
    let linter = Linter::new(input, options.clone())?;
    Ok(linter.dump())
}
