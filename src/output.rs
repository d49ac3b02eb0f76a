use std::{
    fs::{File, create_dir_all},
    io::{BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::{aggregate::PriceResult, prelude::*, validation::ValidationOutcome};

/// Result of the `compute` command: the input document is embedded verbatim.
#[derive(Serialize, Deserialize)]
pub struct ComputedDocument<'a> {
    #[serde(borrow)]
    pub input: &'a RawValue,

    pub output: PriceResult,
}

/// Result of the `validate` command.
#[derive(Serialize)]
pub struct ValidatedDocument<'a> {
    pub input: &'a RawValue,
    pub output: PriceResult,
    pub validation: ValidationOutcome,
}

impl<'a> ComputedDocument<'a> {
    pub fn parse(raw: &'a str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse the computed document")
    }

    pub const fn with_validation(self, validation: ValidationOutcome) -> ValidatedDocument<'a> {
        ValidatedDocument { input: self.input, output: self.output, validation }
    }
}

/// Pretty-print the document into the file, creating the parent directories.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_json(path: &Path, document: &impl Serialize) -> Result {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }
    let mut writer = BufWriter::new(
        File::create(path).with_context(|| format!("failed to create `{}`", path.display()))?,
    );
    serde_json::to_writer_pretty(&mut writer, document)?;
    writeln!(writer)?;
    writer.flush()?;
    info!("written");
    Ok(())
}
