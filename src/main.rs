use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod export;
mod model;
mod render;
mod report;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "normalize")]
#[command(
    about = "Collapse classification records with identical attributes into migration groups",
    long_about = None
)]
struct Cli {
    /// Classification export to load (YAML or JSON mapping of records).
    input_file: PathBuf,

    /// Display details on consistency discovered in input file.
    #[arg(short = 'd', long)]
    details: bool,

    /// Write output to custom FILE (`.json` writes JSON).
    #[arg(
        short = 'o',
        long = "output_file",
        visible_alias = "output-file",
        value_name = "FILE",
        default_value = render::DEFAULT_OUTPUT_FILE
    )]
    output_file: PathBuf,

    /// Fail on an export with no records.
    #[arg(long)]
    strict: bool,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // 1) Load export.
    let records = export::parse_export_file(&cli.input_file)
        .with_context(|| format!("load export {}", cli.input_file.display()))?;
    info!(records = records.len(), "loaded export");

    // 2) Group + key.
    let (groups, normalized) = model::normalize(
        &records,
        model::NormalizeOptions { strict: cli.strict },
    )
    .with_context(|| format!("normalize {}", cli.input_file.display()))?;
    info!(groups = groups.len(), entries = normalized.len(), "grouped records");

    // 3) Optional summary; never touches the output.
    if cli.details {
        report::Summary::from_groups(records.len(), &groups)
            .print()
            .context("print details")?;
    }

    // 4) Write.
    render::write_output(&cli.output_file, &normalized)
        .with_context(|| format!("write output {}", cli.output_file.display()))?;
    println!("Wrote {}", cli.output_file.display());

    Ok(())
}
