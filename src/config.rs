use std::{path::{Path, PathBuf}, time::Duration};
use confique::{serde::{self, Deserialize as _}, Config as _};

use crate::{
    attack::{AttackConfig, ScenarioConfig, TargetConfig},
    log::LogConfig,
    prelude::*,
};


pub const ENV_CONFIG_PATH: &str = "API_LOADTEST_CONFIG_PATH";
pub const DEFAULT_PATHS: &[&str] = &["config.toml", "/etc/api-loadtest/config.toml"];


/// Loads the config from `path`, or from `API_LOADTEST_CONFIG_PATH`, or from
/// the first default location that exists. Returns the path that was used.
pub fn load(path: Option<&Path>) -> Result<(Config, PathBuf)> {
    let path = match path {
        Some(path) => path.to_owned(),
        None => match std::env::var_os(ENV_CONFIG_PATH) {
            Some(path) => PathBuf::from(path),
            None => DEFAULT_PATHS.iter()
                .map(PathBuf::from)
                .find(|p| p.exists())
                .ok_or_else(|| anyhow!(
                    "no config file found in default locations ({}), use --config or `{}`",
                    DEFAULT_PATHS.join(", "),
                    ENV_CONFIG_PATH,
                ))?,
        },
    };

    let config = Config::from_file(&path)
        .with_context(|| format!("failed to load config file '{}'", path.display()))?;
    Ok((config, path))
}

pub fn template() -> String {
    let mut options = confique::toml::FormatOptions::default();
    options.general.nested_field_gap = 2;
    confique::toml::template::<Config>(options)
}

#[derive(Debug, confique::Config)]
pub struct Config {
    #[config(nested)]
    pub target: TargetConfig,

    #[config(nested)]
    pub attack: AttackConfig,

    #[config(nested)]
    pub scenario: ScenarioConfig,

    #[config(nested)]
    pub log: LogConfig,
}


/// Makes sure that the given string is a valid URL path.
pub fn validate_url_path(value: &String) -> Result<(), &'static str> {
    if !value.starts_with('/') {
        return Err("path must start with '/'");
    }
    match hyper::http::uri::PathAndQuery::try_from(value.as_str()) {
        Ok(pq) if pq.query().is_none() => Ok(()),
        _ => Err("not a valid URI path"),
    }
}


/// Custom format for durations. We allow a couple useful units and required
/// a unit to increase readability of config files.
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(D::Error::custom)
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    // Allow unit-less zeroes
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    let start_unit = s.find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| "no time unit for duration".to_owned())?;
    let (num, unit) = s.split_at(start_unit);
    let num: u32 = num.parse()
        .map_err(|e| format!("invalid integer for duration: {e}"))?;
    let num: u64 = num.into();

    match unit {
        "ms" => Ok(Duration::from_millis(num)),
        "s" => Ok(Duration::from_secs(num)),
        "min" => Ok(Duration::from_secs(num * 60)),
        "h" => Ok(Duration::from_secs(num * 60 * 60)),
        "d" => Ok(Duration::from_secs(num * 60 * 60 * 24)),
        _ => Err("invalid unit of time for duration".into()),
    }
}


#[cfg(test)]
mod tests {
    use confique::Config as _;

    use super::*;

    fn from_toml(toml: &str) -> Result<Config, String> {
        let layer = toml::from_str(toml).map_err(|e| e.to_string())?;
        Config::builder()
            .preloaded(layer)
            .load()
            .map_err(|e| e.to_string())
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration("3s"), Ok(Duration::from_secs(3)));
        assert_eq!(parse_duration("2min"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("1d"), Ok(Duration::from_secs(86400)));
        assert!(parse_duration("3").is_err());
        assert!(parse_duration("s").is_err());
        assert!(parse_duration("3 s").is_err());
        assert!(parse_duration("3weeks").is_err());
        assert!(parse_duration("-3s").is_err());
    }

    #[test]
    fn url_paths() {
        assert!(validate_url_path(&"/api/status".into()).is_ok());
        assert!(validate_url_path(&"api/status".into()).is_err());
        assert!(validate_url_path(&"/api/status?x=1".into()).is_err());
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config.target.host.as_str(), "http://localhost:8080");
        assert_eq!(config.target.health_path, "/api/status");
        assert_eq!(config.attack.users, None);
        assert_eq!(config.attack.run_time, Duration::ZERO);
        assert_eq!(config.attack.request_timeout, Duration::from_secs(60));
        assert_eq!(config.scenario.profile_weight, 2);
        assert_eq!(config.scenario.wait_min, Duration::from_secs(1));
        assert_eq!(config.scenario.wait_max, Duration::from_secs(3));
        assert!(config.log.stdout);
    }

    #[test]
    fn full_file() {
        let config = from_toml(r#"
            [target]
            host = "https://api.example.com"
            health_path = "/health"

            [attack]
            users = 50
            hatch_rate = "2.5"
            run_time = "5min"
            request_timeout = "10s"
            report_file = "report.html"

            [scenario]
            profile_weight = 3
            wait_min = "500ms"
            wait_max = "2s"

            [log]
            filters.api_loadtest = "debug"
            filters.goose = "off"
            stdout = false
        "#).unwrap();

        assert_eq!(config.target.host.as_str(), "https://api.example.com");
        assert_eq!(config.attack.users, Some(50));
        assert_eq!(config.attack.hatch_rate.as_deref(), Some("2.5"));
        assert_eq!(config.attack.run_time, Duration::from_secs(300));
        assert_eq!(config.attack.report_file, Some(PathBuf::from("report.html")));
        assert_eq!(config.scenario.profile_weight, 3);
        assert_eq!(config.scenario.wait_min, Duration::from_millis(500));
        assert!(!config.log.stdout);
    }

    #[test]
    fn rejects_invalid_values() {
        for toml in [
            "target.host = \"localhost:8080\"",
            "target.host = \"ftp://localhost\"",
            "target.host = \"http://localhost/api\"",
            "target.host = \"http://user@localhost\"",
            "target.health_path = \"status\"",
            "attack.hatch_rate = \"fast\"",
            "attack.hatch_rate = \"0\"",
            "attack.users = 0",
            "attack.request_timeout = \"0\"",
            "attack.run_time = \"500ms\"",
            "attack.run_time = \"1500ms\"",
            "attack.startup_time = \"200ms\"",
            "scenario.profile_weight = 0",
            "scenario.wait_min = \"5s\"",
            "log.filters.api_loadtest = \"loud\"",
        ] {
            assert!(from_toml(toml).is_err(), "accepted: {toml}");
        }
    }

    #[test]
    fn whole_second_millis_are_accepted() {
        let config = from_toml("attack.run_time = \"2000ms\"").unwrap();
        assert_eq!(config.attack.run_time, Duration::from_secs(2));
    }

    #[test]
    fn hatch_rate_and_startup_time_are_exclusive() {
        let toml = "[attack]\nhatch_rate = \"1\"\nstartup_time = \"10s\"";
        assert!(from_toml(toml).is_err());
        assert!(from_toml("attack.startup_time = \"10s\"").is_ok());
    }

    #[test]
    fn template_loads() {
        // All options in the template are commented out, so this is the
        // same as an empty file.
        assert!(from_toml(&template()).is_ok());
    }
}
