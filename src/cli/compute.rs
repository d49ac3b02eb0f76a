use std::{
    fs,
    path::{PathBuf, absolute},
};

use clap::Parser;
use serde_json::value::RawValue;

use crate::{
    cli::ProfileArgs,
    error::TariffError,
    output::{ComputedDocument, write_json},
    pipeline::estimate,
    prelude::*,
    tables::build_breakdown_table,
};

#[derive(Parser)]
pub struct ComputeArgs {
    /// Tariff document.
    #[clap(long, short = 'i')]
    pub input: PathBuf,

    /// Where to write the input document together with the estimate.
    #[clap(long, short = 'o')]
    pub output: PathBuf,

    #[clap(flatten)]
    pub profile: ProfileArgs,
}

#[instrument(skip_all)]
pub fn compute(args: &ComputeArgs) -> Result {
    let input_path = absolute(&args.input)?;
    let output_path = absolute(&args.output)?;
    info!(input = %input_path.display(), "computing…");

    let raw = fs::read_to_string(&input_path)
        .with_context(|| format!("failed to read `{}`", input_path.display()))?;
    let input: &RawValue = serde_json::from_str(&raw)
        .map_err(|error| TariffError::MalformedInput(error.to_string()))
        .with_context(|| format!("failed to parse `{}`", input_path.display()))?;
    let profile = args.profile.load()?;

    let breakdown = estimate(input.get(), &profile)?;
    println!("{}", build_breakdown_table(&breakdown));

    write_json(&output_path, &ComputedDocument { input, output: breakdown.to_result() })
}
