//! Glue between the simulated user and the load test driver (goose).
//!
//! Goose owns the concurrency: it launches users, runs the `on_start`
//! transaction of each user first, then picks weighted transactions in a
//! loop with a random pause in between. Each goose user keeps its
//! `SimulatedUser` as session data.

use std::sync::Arc;

use goose::{config::GooseConfiguration, metrics::GooseMetrics, prelude::*};
use gumdrop::Options as _;

use crate::{config::Config, prelude::*, user::SimulatedUser};

mod client;
mod config;

pub use self::{
    client::GooseClient,
    config::{AttackConfig, ScenarioConfig, TargetConfig, TargetHost},
};


pub const SCENARIO_NAME: &str = "ApiUser";


/// Runs the whole load test and returns the metrics goose collected.
pub async fn run(config: &Config) -> Result<GooseMetrics> {
    let attack = &config.attack;

    // Goose would otherwise parse our own command line arguments.
    let no_args: &[&str] = &[];
    let goose_config = GooseConfiguration::parse_args_default(no_args)
        .map_err(|e| anyhow!("failed to build load test configuration: {e}"))?;

    let timeout = attack.request_timeout.as_secs_f32().to_string();
    let mut goose = GooseAttack::initialize_with_config(goose_config)?
        .register_scenario(scenario(&config.scenario)?)
        .set_default(GooseDefault::Host, config.target.host.as_str())?
        .set_default(GooseDefault::RunTime, attack.run_time.as_secs() as usize)?
        .set_default(GooseDefault::Timeout, timeout.as_str())?
        .set_default(GooseDefault::NoTelnet, !attack.controllers)?
        .set_default(GooseDefault::NoWebSocket, !attack.controllers)?;

    if let Some(users) = attack.users {
        goose = goose.set_default(GooseDefault::Users, users)?;
    }
    if let Some(rate) = &attack.hatch_rate {
        goose = goose.set_default(GooseDefault::HatchRate, rate.as_str())?;
    }
    if !attack.startup_time.is_zero() {
        goose = goose.set_default(GooseDefault::StartupTime, attack.startup_time.as_secs() as usize)?;
    }
    if let Some(path) = &attack.report_file {
        let path = path.to_str().context("`attack.report_file` is not valid UTF-8")?;
        goose = goose.set_default(GooseDefault::ReportFile, path)?;
    }

    info!(
        host = config.target.host.as_str(),
        users = ?attack.users,
        run_time = ?attack.run_time,
        "starting load test"
    );
    let metrics = goose.execute().await.context("load test failed")?;
    info!("load test finished");

    Ok(metrics)
}

/// The single scenario: register once, then fetch the profile repeatedly.
pub fn scenario(config: &ScenarioConfig) -> Result<Scenario, GooseError> {
    let scenario = scenario!(SCENARIO_NAME)
        .set_wait_time(config.wait_min, config.wait_max)?
        .register_transaction(transaction!(register).set_name("register").set_on_start())
        .register_transaction(
            transaction!(profile).set_name("profile").set_weight(config.profile_weight)?
        );
    Ok(scenario)
}

async fn register(user: &mut GooseUser) -> TransactionResult {
    let mut sim = SimulatedUser::new();
    let result = sim.start(&mut GooseClient::new(user)).await;

    // Stored in any case: if registration failed, the profile requests are
    // sent without a token.
    user.set_session_data(Arc::new(sim));

    result.map(|outcome| trace!(?outcome, user = user.weighted_users_index, "user started"))
}

async fn profile(user: &mut GooseUser) -> TransactionResult {
    let sim = user.get_session_data::<Arc<SimulatedUser>>()
        .cloned()
        .unwrap_or_default();
    sim.profile(&mut GooseClient::new(user)).await?;
    Ok(())
}
