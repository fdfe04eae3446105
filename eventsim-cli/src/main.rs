#![deny(clippy::pedantic)]

#[macro_use]
extern crate log;

use anyhow::Result;
use clap::Parser;

mod args;
mod cli;
mod minimal_logger;

use crate::{args::EventsimArgs, minimal_logger::MinimalLogger};

static MINIMAL_LOGGER: MinimalLogger = MinimalLogger;

fn main() -> Result<()> {
    // Set up the minimal logger to stdout/stderr
    log::set_logger(&MINIMAL_LOGGER)?;
    log::set_max_level(log::LevelFilter::Info);

    match EventsimArgs::parse() {
        EventsimArgs::Sample(sample_args) => cli::sample::sample_with_logger(sample_args),
    }
}
