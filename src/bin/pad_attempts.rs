use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use arcrun::submission::{pad_attempts, read_submission, write_submission, ATTEMPTS_PER_CASE};

/// Pad every case of a submission JSON to the full number of attempts.
#[derive(Parser, Debug)]
#[clap(name = "pad_attempts")]
struct Cli {
    #[clap(value_parser)]
    input_json: PathBuf,
    #[clap(value_parser)]
    output_json: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let submission = pad_attempts(read_submission(&cli.input_json)?)?;
    write_submission(&cli.output_json, &submission)?;
    info!(
        "padded {} puzzles to {ATTEMPTS_PER_CASE} attempts: {:?}",
        submission.len(),
        &cli.output_json
    );
    Ok(())
}
