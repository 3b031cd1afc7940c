use std::{path::PathBuf, time::Duration};

use http::{Uri, uri::Scheme};


#[derive(Debug, confique::Config)]
pub struct TargetConfig {
    /// Base URL of the API under test, without path. All request paths of
    /// the simulated users are relative to this.
    #[config(default = "http://localhost:8080")]
    pub host: TargetHost,

    /// Path of the health endpoint probed by the `check` command.
    #[config(default = "/api/status", validate = crate::config::validate_url_path)]
    pub health_path: String,
}

#[derive(Debug, confique::Config)]
#[config(validate = Self::validate)]
pub struct AttackConfig {
    /// Number of simulated users to launch. If unset, the driver decides
    /// (number of CPU cores).
    pub users: Option<usize>,

    /// How many users to launch per second, e.g. "2" or "0.5". Cannot be
    /// combined with `startup_time`.
    pub hatch_rate: Option<String>,

    /// Launch all users evenly spread over this duration instead of using a
    /// fixed `hatch_rate`. "0" means unused.
    #[config(default = "0", deserialize_with = crate::config::deserialize_duration)]
    pub startup_time: Duration,

    /// How long the load test runs once all users are launched. "0" runs
    /// until interrupted with Ctrl+C.
    #[config(default = "0", deserialize_with = crate::config::deserialize_duration)]
    pub run_time: Duration,

    /// Timeout for every single request sent by a simulated user.
    #[config(
        default = "60s",
        deserialize_with = crate::config::deserialize_duration,
        validate(!request_timeout.is_zero(), "must not be zero"),
    )]
    pub request_timeout: Duration,

    /// If set, an HTML report of the run is written to this file.
    pub report_file: Option<PathBuf>,

    /// Whether to start the driver's telnet (port 5116) and WebSocket (port
    /// 5117) controllers, which allow changing a running load test.
    #[config(default = false)]
    pub controllers: bool,
}

impl AttackConfig {
    fn validate(&self) -> Result<(), &'static str> {
        if self.users == Some(0) {
            return Err("`users` must be at least 1");
        }
        if let Some(rate) = &self.hatch_rate {
            validate_hatch_rate(rate)?;
        }
        if self.run_time.subsec_nanos() != 0 {
            return Err("`run_time` must be a whole number of seconds");
        }
        if self.startup_time.subsec_nanos() != 0 {
            return Err("`startup_time` must be a whole number of seconds");
        }
        if self.hatch_rate.is_some() && !self.startup_time.is_zero() {
            return Err("`hatch_rate` and `startup_time` cannot both be set");
        }
        Ok(())
    }
}

fn validate_hatch_rate(rate: &str) -> Result<(), &'static str> {
    match rate.parse::<f32>() {
        Ok(r) if r.is_finite() && r > 0.0 => Ok(()),
        _ => Err("`hatch_rate` must be a positive number"),
    }
}

#[derive(Debug, Clone, confique::Config)]
#[config(validate = Self::validate)]
pub struct ScenarioConfig {
    /// Relative weight of the profile request. Only matters relative to
    /// other repeated requests, of which there are none at the moment.
    #[config(default = 2, validate(*profile_weight > 0, "must be at least 1"))]
    pub profile_weight: usize,

    /// Lower bound of the random pause between two requests of one user.
    #[config(default = "1s", deserialize_with = crate::config::deserialize_duration)]
    pub wait_min: Duration,

    /// Upper bound of the random pause between two requests of one user.
    #[config(default = "3s", deserialize_with = crate::config::deserialize_duration)]
    pub wait_max: Duration,
}

impl ScenarioConfig {
    fn validate(&self) -> Result<(), &'static str> {
        if self.wait_min > self.wait_max {
            return Err("`wait_min` must not be larger than `wait_max`");
        }
        Ok(())
    }
}


/// Scheme and authority of the API under test.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct TargetHost {
    raw: String,
    uri: Uri,
}

impl TargetHost {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Full URI for `path`, which must start with `/`.
    pub fn join(&self, path: &str) -> Result<Uri, http::Error> {
        let mut parts = self.uri.clone().into_parts();
        parts.path_and_query = Some(path.try_into()?);
        Ok(Uri::from_parts(parts)?)
    }
}

impl TryFrom<String> for TargetHost {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        let uri: Uri = s.parse().map_err(|e| format!("invalid URI: {e}"))?;

        if uri.scheme() != Some(&Scheme::HTTP) && uri.scheme() != Some(&Scheme::HTTPS) {
            return Err("must start with 'http://' or 'https://'".into());
        }
        match uri.authority() {
            None => return Err("must have authority part".into()),
            Some(authority) if authority.as_str().contains('@')
                => return Err("must not contain user part".into()),
            _ => {}
        }
        if uri.path_and_query().is_some_and(|pq| pq.as_str() != "/") {
            return Err("must not contain a path or query, request paths are fixed".into());
        }

        Ok(Self {
            raw: s.trim_end_matches('/').to_owned(),
            uri,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_host() {
        let host = TargetHost::try_from("http://localhost:8080/".to_owned()).unwrap();
        assert_eq!(host.as_str(), "http://localhost:8080");
        assert_eq!(
            host.join("/api/status").unwrap(),
            "http://localhost:8080/api/status",
        );

        let host = TargetHost::try_from("https://api.example.com".to_owned()).unwrap();
        assert_eq!(host.join("/x").unwrap(), "https://api.example.com/x");

        for bad in ["localhost", "/api", "ws://localhost", "http://a@localhost", "http://h/p", "http://h?q=1"] {
            assert!(TargetHost::try_from(bad.to_owned()).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn hatch_rate() {
        for ok in ["1", "2.5", "0.1"] {
            assert!(validate_hatch_rate(ok).is_ok(), "rejected: {ok}");
        }
        for bad in ["0", "-1", "fast", "", "inf", "NaN"] {
            assert!(validate_hatch_rate(bad).is_err(), "accepted: {bad}");
        }
    }
}
