use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::fs;
use std::path::PathBuf;
use zkp_commitment_fixtures::{
    commit,
    config::{Config, DEFAULT_CONFIG_FILE},
    history::{record_commitment, try_load_records},
    FixtureAssembler,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Build the Merkle tree for a commitment and print circuit inputs",
    long_about = "Reads the first record of the commitment file, places it at leaf 0 of a \
                  fixed-depth tree filled with random leaves and prints the circuit inputs \
                  to stdout, one value group per line. Logs go to stderr."
)]
struct Args {
    /// Commitment file written by generate-commit (overrides the config file)
    #[arg(long)]
    commitment_file: Option<PathBuf>,

    /// History file to append to (overrides the config file)
    #[arg(long)]
    history: Option<PathBuf>,

    /// Tree depth (overrides the config file)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Seed for filler leaves (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Also write the circuit input lines to this file
    #[arg(short, long)]
    inputs_file: Option<PathBuf>,

    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::load_from_file_or_default(&args.config)?;
    debug!("Loaded config: {config:?}");

    let commitment_file = args.commitment_file.unwrap_or(config.files.commitment_file);
    let history_file = args.history.unwrap_or(config.files.history_file);
    let depth = args.depth.unwrap_or(config.tree.depth);
    let seed = args.seed.or(config.fixture.seed);

    info!("Loading commitment from: {}", commitment_file.display());
    let records = try_load_records(&commitment_file).with_context(|| {
        format!(
            "Failed to load commitment file '{}'",
            commitment_file.display()
        )
    })?;
    let stored = records.into_iter().next().with_context(|| {
        format!(
            "No commitment found in '{}'. Run generate-commit first.",
            commitment_file.display()
        )
    })?;

    let commitment = stored
        .commitment_digest()
        .context("Stored commitment is not a 32-byte hex digest")?;
    if commitment != commit(&stored.nullifier, &stored.secret) {
        warn!("Stored commitment does not match its nullifier and secret");
    }

    let mut rng: Box<dyn RngCore> = match seed {
        Some(seed) => {
            info!("Using seeded filler leaves (seed {seed})");
            Box::new(StdRng::seed_from_u64(seed))
        }
        None => Box::new(rand::thread_rng()),
    };

    info!("Building Merkle tree of depth {depth}...");
    let fixture = FixtureAssembler::new(depth)
        .assemble_with_commitment(stored.nullifier, stored.secret, commitment, &mut *rng)
        .context("Failed to assemble fixture")?;
    info!("Merkle root: {}", hex::encode(fixture.root()));

    let lines = fixture.inputs.to_lines();
    for line in &lines {
        println!("{line}");
    }

    if let Some(path) = &args.inputs_file {
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(path, content)
            .with_context(|| format!("Failed to write inputs file: {}", path.display()))?;
        info!("Circuit inputs written to {}", path.display());
    }

    record_commitment(&history_file, fixture.to_record()).with_context(|| {
        format!("Failed to update history file: {}", history_file.display())
    })?;

    Ok(())
}
