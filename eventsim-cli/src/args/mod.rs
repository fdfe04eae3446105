use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;

use eventsim_impls::{
    event_sampler::{MapEventSampler, TimeWindow},
    intensity::InMemoryIntensityMap,
    light_curve::TableLightCurve,
};

pub mod parse;

#[cfg(test)]
mod tests;

#[derive(Debug, Parser)]
#[clap(name = "eventsim", about = "Simulates event lists from predicted-count maps.")]
#[allow(clippy::module_name_repetitions)]
pub enum EventsimArgs {
    /// Samples one event list and writes it as CSV
    Sample(CommandArgs),
}

#[derive(Debug, Parser)]
#[clap(setting(clap::AppSettings::AllowLeadingHyphen))]
#[allow(clippy::module_name_repetitions)]
pub struct CommandArgs {
    /// Read the RON configuration from a file instead of the arguments
    #[clap(long, parse(from_os_str))]
    pub config: Option<PathBuf>,
    /// Write the events to a CSV file instead of stdout
    #[clap(short, long, parse(from_os_str))]
    pub output: Option<PathBuf>,
    /// Log more, repeat for even more output
    #[clap(short, long, parse(from_occurrences))]
    pub verbose: u8,
    args: Vec<String>,
}

impl CommandArgs {
    /// Returns the RON configuration, either from the `--config` file or from
    /// the remaining arguments.
    ///
    /// # Errors
    ///
    /// Fails if both or neither are given, or if the file cannot be read.
    pub fn config_string(&self) -> Result<String> {
        match (&self.config, self.args.is_empty()) {
            (Some(path), true) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read the configuration file {:?}.", path)),
            (None, false) => Ok(self.args.join(" ")),
            (Some(_), false) => Err(anyhow::anyhow!(
                "The configuration must be given either as arguments or with --config, not both."
            )),
            (None, true) => Err(anyhow::anyhow!(
                "The configuration must be given either as arguments or with --config."
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Sample")]
#[serde(deny_unknown_fields)]
#[allow(clippy::module_name_repetitions)]
pub struct SampleArgs {
    #[serde(alias = "random_state")]
    pub seed: u64,
    pub tmin: f64,
    pub tmax: f64,
    #[serde(alias = "n_time_bins")]
    #[serde(default)]
    pub time_bins: Option<usize>,
    pub map: InMemoryIntensityMap,
    #[serde(default)]
    pub light_curve: Option<TableLightCurve>,
}

impl SampleArgs {
    /// # Errors
    ///
    /// Fails if the RON `config` does not describe a valid `SampleArgs`.
    pub fn try_parse(config: &str) -> Result<Self> {
        parse::try_parse("sample", &parse::into_ron_args(config))
    }

    /// Builds the event sampler described by these arguments.
    ///
    /// # Errors
    ///
    /// Fails if the time window, the time grid or the map are invalid.
    pub fn build_sampler(
        &self,
    ) -> Result<MapEventSampler<&InMemoryIntensityMap, &TableLightCurve>> {
        let window = TimeWindow::new(self.tmin, self.tmax).context("Invalid time window.")?;

        let sampler = MapEventSampler::new(&self.map, window, self.light_curve.as_ref())
            .context("Invalid predicted-count map.")?;

        match self.time_bins {
            Some(time_bins) => sampler
                .with_time_bins(time_bins)
                .context("Invalid number of time bins."),
            None => Ok(sampler),
        }
    }
}
