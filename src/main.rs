#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod aggregate;
mod cli;
mod error;
mod output;
mod period;
mod pipeline;
mod prelude;
mod profile;
mod quantity;
mod tables;
mod tariff;
mod text;
mod validation;

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, compute, validate},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Compute(args) => compute(&args)?,
        Command::Validate(args) => validate(&args)?,
    }

    info!("done!");
    Ok(())
}
