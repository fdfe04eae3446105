use std::{
    fs::OpenOptions,
    io::{self, BufWriter, Write},
};

use anyhow::{Context, Result};

use eventsim_core::{
    cogs::{IntensityMap, SeedableRng},
    event::EventList,
};
use eventsim_impls::rng::WyHash;

use crate::{
    args::{CommandArgs, SampleArgs},
    minimal_logger::level_filter_from_verbosity,
};

#[allow(clippy::module_name_repetitions)]
pub fn sample_with_logger(command_args: CommandArgs) -> Result<()> {
    log::set_max_level(level_filter_from_verbosity(command_args.verbose));

    let sample_args = SampleArgs::try_parse(&command_args.config_string()?)?;
    debug!("Parsed sample arguments:\n{:#?}", sample_args);

    let sampler = sample_args.build_sampler()?;

    info!(
        "Sampling events from a {:?} map with {} predicted events over [{}, {}) ...",
        sample_args.map.shape(),
        sample_args.map.total(),
        sample_args.tmin,
        sample_args.tmax,
    );

    let mut rng = WyHash::seed_from_u64(sample_args.seed);

    let events = sampler
        .sample_events(&mut rng)
        .context("Failed to sample the events.")?;

    info!("Sampled {} events.", events.len());

    match &command_args.output {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(path)
                .with_context(|| format!("Could not open {:?}", path))?;

            write_csv(&events, BufWriter::new(file))
                .with_context(|| format!("Failed to write the events to {:?}.", path))?;

            info!("Wrote the events to {:?}.", path);
        },
        None => {
            write_csv(&events, BufWriter::new(io::stdout().lock()))
                .context("Failed to write the events to stdout.")?;
        },
    }

    Ok(())
}

/// Writes the `events` as CSV, with one header row of column names.
pub fn write_csv<W: Write>(events: &EventList, mut writer: W) -> io::Result<()> {
    writeln!(writer, "{}", events.columns().join(","))?;

    for event in events {
        for coordinate in event.coordinates() {
            write!(writer, "{},", coordinate)?;
        }

        writeln!(writer, "{}", event.time())?;
    }

    writer.flush()
}
