use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use num_bigint::{BigUint, RandBigInt};
use std::path::PathBuf;
use zkp_commitment_fixtures::{
    commit,
    config::{Config, DEFAULT_CONFIG_FILE},
    history::save_records,
    utils::{encode_u32_limbs, limbs_to_string},
    CommitmentRecord, SecretValue,
};

const DEFAULT_NULLIFIER: u64 = 1234545679;
const DEFAULT_SECRET: u64 = 987654321;

/// Random values are drawn from `[1, 2^RANDOM_VALUE_BITS]`.
const RANDOM_VALUE_BITS: usize = 250;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute a commitment and write the commitment file", long_about = None)]
struct Args {
    /// Nullifier, decimal or 0x-prefixed hex
    #[arg(short, long, conflicts_with = "random")]
    nullifier: Option<SecretValue>,

    /// Secret, decimal or 0x-prefixed hex
    #[arg(short, long, conflicts_with = "random")]
    secret: Option<SecretValue>,

    /// Draw a fresh nullifier and secret
    #[arg(short, long)]
    random: bool,

    /// Commitment file to write (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn random_value() -> Result<SecretValue> {
    let low = BigUint::from(1u8);
    let high = (BigUint::from(1u8) << RANDOM_VALUE_BITS) + 1u8;
    let value = rand::thread_rng().gen_biguint_range(&low, &high);
    SecretValue::from_biguint(&value).context("Random value does not fit in 256 bits")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::load_from_file_or_default(&args.config)?;
    debug!("Loaded config: {config:?}");

    let (nullifier, secret) = if args.random {
        info!("Drawing random nullifier and secret");
        (random_value()?, random_value()?)
    } else {
        (
            args.nullifier
                .unwrap_or_else(|| SecretValue::from(DEFAULT_NULLIFIER)),
            args.secret.unwrap_or_else(|| SecretValue::from(DEFAULT_SECRET)),
        )
    };

    let commitment = commit(&nullifier, &secret);
    println!("Commitment (bytes): {}", hex::encode(commitment));
    println!(
        "Commitment (u32 format): {}",
        limbs_to_string(&encode_u32_limbs(&commitment))
    );

    let output = args.output.unwrap_or(config.files.commitment_file);
    let record = CommitmentRecord::new(nullifier, secret, &commitment);
    save_records(&output, &[record])
        .with_context(|| format!("Failed to write commitment file: {}", output.display()))?;
    info!("Commitment written to {}", output.display());

    Ok(())
}
