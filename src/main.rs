use canis_locus::observable::{find_parent, CsvBuilder};
use canis_locus::prelude::*;
use clap::Parser;
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Offspring coat color probabilities for a canine cross
#[derive(Parser)]
#[command(name = "canis-cross")]
#[command(version, long_about = None)]
struct Cli {
    /// CSV file with a `name` column and one column per locus (E, A, B, D, M, S)
    parents: Option<PathBuf>,

    /// Name of the first parent in the CSV file
    #[arg(long, requires = "parents")]
    sire: Option<String>,

    /// Name of the second parent in the CSV file
    #[arg(long, requires = "parents")]
    dam: Option<String>,

    /// First parent inline, e.g. "E:E/e A:Ay/at B:B/b D:D/d M:M/m S:n/n"
    #[arg(long, conflicts_with = "parents")]
    parent1: Option<Genotype>,

    /// Second parent inline
    #[arg(long, conflicts_with = "parents")]
    parent2: Option<Genotype>,

    /// Language of phenotype names and messages (en, pt)
    #[arg(short, long, default_value = "en")]
    language: Language,

    /// Field delimiter of the CSV file
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parents(cli: &Cli) -> Result<(Genotype, Genotype), Box<dyn Error>> {
    if let (Some(parent1), Some(parent2)) = (&cli.parent1, &cli.parent2) {
        return Ok((parent1.clone(), parent2.clone()));
    }

    let path = cli
        .parents
        .as_ref()
        .ok_or("either a CSV file or --parent1 and --parent2 are required")?;
    let (sire, dam) = match (&cli.sire, &cli.dam) {
        (Some(sire), Some(dam)) => (sire, dam),
        _ => return Err("--sire and --dam are required with a CSV file".into()),
    };

    let mut builder = CsvBuilder::new();
    builder.delimiter(u8::try_from(cli.delimiter)?);
    let lookup = |name: &str| -> Result<Genotype, Box<dyn Error>> {
        let rows = builder.from_reader(Box::new(File::open(path)?))?;
        find_parent(rows, name)?
            .ok_or_else(|| format!("no parent named {:?} in {}", name, path.display()).into())
    };
    Ok((lookup(sire)?, lookup(dam)?))
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn Error>> {
    let (parent1, parent2) = parents(cli)?;
    debug!(parent1 = %parent1, parent2 = %parent2, "parents loaded");

    let cross = CrossBuilder::new().language(cli.language).build();
    let buckets = match cross.calculate(&parent1, &parent2) {
        Ok(buckets) => buckets,
        Err(err) => {
            eprintln!("{}", err);
            return Ok(ExitCode::from(2));
        }
    };
    info!(phenotypes = buckets.len(), "cross calculated");

    let json = if cli.compact {
        serde_json::to_string(&buckets)?
    } else {
        serde_json::to_string_pretty(&buckets)?
    };
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
