mod output;
mod sources;

use anyhow::Result;
use clap::Parser;
use prodnorm::{Catalog, FilterState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Products to load (JSON array or JSON lines). Built-in seed data if omitted.
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Input format; guessed from the file extension when omitted.
    #[arg(long)]
    format: Option<String>,

    /// Start from an empty catalog instead of the seed data.
    #[arg(long, conflicts_with = "file")]
    no_seed: bool,

    /// Add a product, NAME=JSON. Repeatable, applied in order.
    #[arg(long = "add", value_name = "NAME=JSON", value_parser = parse_addition)]
    additions: Vec<(String, String)>,

    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    capacity: Option<String>,

    #[arg(short, long, default_value = "stdout")]
    output: String,
}

fn parse_addition(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, data)| (name.to_string(), data.to_string()))
        .ok_or_else(|| format!("expected NAME=JSON, got '{s}'"))
}

/// Apply `--add` requests in order. A rejected payload leaves the catalog as it
/// was and yields one message for the user; the rest still run.
fn apply_additions(catalog: &mut Catalog, additions: &[(String, String)]) -> Vec<String> {
    additions
        .iter()
        .filter_map(|(name, data)| {
            catalog
                .add(name, data)
                .err()
                .map(|err| format!("Invalid JSON data for '{}': {}", name, err))
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut catalog = match &args.file {
        Some(path) => Catalog::new(sources::load_path(path, args.format.as_deref())?),
        None if args.no_seed => Catalog::default(),
        None => Catalog::seeded(),
    };
    info!(products = catalog.len(), "catalog loaded");

    for message in apply_additions(&mut catalog, &args.additions) {
        eprintln!("{}", message);
    }

    let filter = FilterState::new(args.color, args.capacity);
    let snapshot = catalog.snapshot(&filter);

    let mut writer = output::create_writer(&args.output)?;
    writer.write_snapshot(&snapshot)?;
    writer.finish()?;

    Ok(())
}
