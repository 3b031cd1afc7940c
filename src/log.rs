use std::{
    collections::HashMap,
    fs::OpenOptions,
    path::PathBuf,
};
use serde::Deserialize;
use tracing_subscriber::{
    filter::{FilterFn, LevelFilter},
    prelude::*,
};

use crate::prelude::*;


#[derive(Debug, confique::Config)]
pub struct LogConfig {
    /// Specifies what log messages to emit, based on the module path and log level.
    ///
    /// This is a map where the key specifies a module path prefix, and the
    /// value specifies a minimum log level. For each log message, the map
    /// entry with the longest prefix matching the log's module path is chosen.
    /// If no such entry exists, the log is not emitted. Otherwise, that
    /// entry's level is used to check whether the log message should be
    /// emitted. Valid log levels: off, error, warn, info, debug, trace.
    ///
    /// Example: the following config allows ≥"info" logs from api_loadtest
    /// generally, ≥"trace" logs from its `behavior` module (every single
    /// registration), and ≥"info" logs from the load test driver `goose`.
    ///
    ///    [log]
    ///    filters.api_loadtest = "info"
    ///    filters."api_loadtest::behavior" = "trace"
    ///    filters.goose = "info"
    #[config(default = { "api_loadtest": "info", "goose": "warn" })]
    pub filters: Filters,

    /// If this is set, log messages are also written to this file.
    pub file: Option<PathBuf>,

    /// If this is set to `false`, log messages are not written to stdout.
    #[config(default = true)]
    pub stdout: bool,
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "HashMap<String, String>")]
pub struct Filters(HashMap<String, LevelFilter>);

impl TryFrom<HashMap<String, String>> for Filters {
    type Error = String;
    fn try_from(value: HashMap<String, String>) -> Result<Self, Self::Error> {
        value.into_iter()
            .map(|(target_prefix, level)| {
                let level = parse_level_filter(&level)?;
                Ok((target_prefix, level))
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }
}

impl Filters {
    /// Whether an event with `target` and `level` passes, see the config
    /// doc comment.
    fn allows(&self, target: &str, level: &tracing::Level) -> bool {
        self.0.iter()
            .filter(|(target_prefix, _)| target.starts_with(target_prefix.as_str()))
            .max_by_key(|(target_prefix, _)| target_prefix.len())
            .map(|(_, level_filter)| level <= level_filter)
            .unwrap_or(false)
    }
}

fn parse_level_filter(s: &str) -> Result<LevelFilter, String> {
    match s {
        "off" => Ok(LevelFilter::OFF),
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        other => Err(format!("invalid log level '{other}'")),
    }
}

pub fn init(config: &LogConfig) -> Result<()> {
    let filter = {
        let filters = Filters(config.filters.0.clone());
        let max_level = filters.0.values().max().copied().unwrap_or(LevelFilter::OFF);
        // There are only ever a few entries, a linear scan is fine.
        let filter = FilterFn::new(move |metadata| {
            filters.allows(metadata.target(), metadata.level())
        });
        filter.with_max_level_hint(max_level)
    };

    macro_rules! subscriber {
        ($writer:expr) => {
            tracing_subscriber::fmt::layer().with_writer($writer)
        };
    }

    let stdout_output = if config.stdout {
        Some(subscriber!(std::io::stdout))
    } else {
        None
    };

    let file_output = if let Some(path) = &config.file {
        use std::io::Write;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .with_context(|| format!("failed to open/create log file '{}'", path.display()))?;

        // Add an empty line separator to see separate runs easier.
        file.write_all(b"\n\n").context("could not write to log file")?;

        Some(subscriber!(file).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_output)
        .with(stdout_output)
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    fn filters(entries: &[(&str, &str)]) -> Filters {
        let map = entries.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Filters::try_from(map).unwrap()
    }

    #[test]
    fn longest_prefix_wins() {
        let f = filters(&[
            ("api_loadtest", "info"),
            ("api_loadtest::behavior", "trace"),
            ("api_loadtest::attack", "off"),
        ]);
        assert!(f.allows("api_loadtest::user", &Level::INFO));
        assert!(!f.allows("api_loadtest::user", &Level::DEBUG));
        assert!(f.allows("api_loadtest::behavior::auth", &Level::TRACE));
        assert!(!f.allows("api_loadtest::attack::client", &Level::ERROR));
    }

    #[test]
    fn unknown_targets_are_dropped() {
        let f = filters(&[("api_loadtest", "trace")]);
        assert!(!f.allows("goose::metrics", &Level::ERROR));
    }

    #[test]
    fn invalid_level_is_rejected() {
        let map = HashMap::from([("api_loadtest".to_owned(), "verbose".to_owned())]);
        assert!(Filters::try_from(map).is_err());
    }
}
