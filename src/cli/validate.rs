use std::{
    fs,
    path::{PathBuf, absolute},
};

use clap::Parser;

use crate::{
    output::{ComputedDocument, write_json},
    prelude::*,
    tables::build_validation_table,
    validation::{ProviderId, ReferenceTable, Validator},
};

#[derive(Parser)]
pub struct ValidateArgs {
    /// Document written by `compute`. Its file name must contain the provider number.
    #[clap(long, short = 'i')]
    pub input_json: PathBuf,

    /// ElCom reference table with `provider_id,reference_tariff` columns.
    #[clap(long, short = 'e')]
    pub input_elcom: PathBuf,

    /// Where to write the computed document together with the validation outcome.
    #[clap(long, short = 'o')]
    pub output_json: PathBuf,
}

#[instrument(skip_all)]
pub fn validate(args: &ValidateArgs) -> Result {
    let input_path = absolute(&args.input_json)?;
    let reference_path = absolute(&args.input_elcom)?;
    let output_path = absolute(&args.output_json)?;
    info!(input = %input_path.display(), "validating…");

    let raw = fs::read_to_string(&input_path)
        .with_context(|| format!("failed to read `{}`", input_path.display()))?;
    let computed = ComputedDocument::parse(&raw)?;
    let reference = ReferenceTable::read(&reference_path)?;

    let provider_id = ProviderId::from_file_name(&input_path);
    let outcome = Validator::new(&reference).validate(provider_id, computed.output);
    println!("{}", build_validation_table(computed.output, outcome));

    write_json(&output_path, &computed.with_validation(outcome))
}
