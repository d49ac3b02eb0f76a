mod compute;
mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use self::{
    compute::{ComputeArgs, compute},
    validate::{ValidateArgs, validate},
};
use crate::{prelude::*, profile::ConsumptionProfile, quantity::energy::KilowattHours};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Estimate the lowest and highest annual average price of a tariff document.
    #[clap(name = "compute")]
    Compute(Box<ComputeArgs>),

    /// Compare a computed estimate with the ElCom reference tariffs.
    #[clap(name = "validate")]
    Validate(Box<ValidateArgs>),
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Consumption table with `season,hour,weight` columns. Defaults to the built-in H4 profile.
    #[clap(long = "consumption-profile", env = "CONSUMPTION_PROFILE")]
    pub path: Option<PathBuf>,

    /// Annual consumption the table must sum up to. Defaults to the H4 total of 4500 kWh.
    #[clap(long = "annual-consumption-kwh", env = "ANNUAL_CONSUMPTION_KWH")]
    pub annual_total: Option<KilowattHours>,
}

impl ProfileArgs {
    fn annual_total(&self) -> KilowattHours {
        self.annual_total.unwrap_or(ConsumptionProfile::H4_ANNUAL_TOTAL)
    }

    pub fn load(&self) -> Result<ConsumptionProfile> {
        let path = self.path.as_deref().map(std::path::absolute).transpose()?;
        ConsumptionProfile::load(path.as_deref(), self.annual_total())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn profile_args(args: &[&str]) -> ProfileArgs {
        let args = ["tariff-estimator", "compute", "-i", "input.json", "-o", "output.json"]
            .into_iter()
            .chain(args.iter().copied());
        match Args::try_parse_from(args).unwrap().command {
            Command::Compute(args) => args.profile,
            Command::Validate(_) => unreachable!(),
        }
    }

    #[test]
    fn test_default_annual_total() {
        let args = profile_args(&[]);
        assert_abs_diff_eq!(args.annual_total().0, ConsumptionProfile::H4_ANNUAL_TOTAL.0);
    }

    #[test]
    fn test_explicit_annual_total() {
        let args = profile_args(&["--annual-consumption-kwh", "5000"]);
        assert_abs_diff_eq!(args.annual_total().0, 5000.0);
    }
}
