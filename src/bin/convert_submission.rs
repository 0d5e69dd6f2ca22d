use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use arcrun::submission::{from_csv, write_submission};

/// Convert the solver's CSV output into a submission JSON.
#[derive(Parser, Debug)]
#[clap(name = "convert_submission")]
struct Cli {
    #[clap(value_parser)]
    input_csv: PathBuf,
    #[clap(value_parser)]
    output_json: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let file = std::fs::File::open(&cli.input_csv)
        .context(format!("path is not found?: {:?}", &cli.input_csv))?;
    let submission = from_csv(file).context(format!("converting {:?}", &cli.input_csv))?;
    write_submission(&cli.output_json, &submission)?;
    info!(
        "wrote {} puzzles to {:?}",
        submission.len(),
        &cli.output_json
    );
    Ok(())
}
