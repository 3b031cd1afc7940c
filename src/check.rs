use std::time::Duration;

use crate::{config::Config, prelude::*, util};


const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);


/// Preflight check: the config was already loaded and validated at this
/// point, this only makes sure the target API is reachable and healthy.
pub async fn run(config: &Config) -> Result<()> {
    let uri = config.target.host.join(&config.target.health_path)
        .context("failed to build health check URI")?;
    let client = util::http_client()?;

    info!(%uri, "checking target API health");
    let (status, body) = util::get(&client, uri.clone(), HEALTH_TIMEOUT).await?;
    if !status.is_success() {
        bail!(
            "health endpoint '{uri}' replied with {status}: {}",
            String::from_utf8_lossy(&body),
        );
    }

    info!(%status, "target API is healthy");
    Ok(())
}
