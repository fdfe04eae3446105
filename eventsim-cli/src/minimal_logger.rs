use colored::Colorize;
use log::{Level, LevelFilter, Metadata, Record};

pub struct MinimalLogger;

impl log::Log for MinimalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_string = match record.level() {
            Level::Error => record.level().to_string().red(),
            Level::Warn => record.level().to_string().yellow(),
            Level::Info => record.level().to_string().cyan(),
            Level::Debug => record.level().to_string().purple(),
            Level::Trace => record.level().to_string().normal(),
        };

        // Events may be written to stdout, so all log messages go to stderr
        if record.level() > LevelFilter::Error {
            eprintln!("{:<5} {}", level_string, record.args());
        } else {
            eprintln!("{:<5} {} {}", level_string, "!".red().bold(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Maps the number of `--verbose` flags onto the maximum log level.
pub fn level_filter_from_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use log::LevelFilter;

    use super::level_filter_from_verbosity;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(level_filter_from_verbosity(0), LevelFilter::Info);
        assert_eq!(level_filter_from_verbosity(1), LevelFilter::Debug);
        assert_eq!(level_filter_from_verbosity(7), LevelFilter::Trace);
    }
}
