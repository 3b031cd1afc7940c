use std::{fs, io::{self, Write}};

use anyhow::Result;
use clap::Parser as _;

use api_loadtest::{
    attack, check,
    cli::{Cli, Command},
    config, log,
};


#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::GenConfigTemplate { out } => {
            let template = config::template();
            match out {
                Some(path) => fs::write(path, &template)?,
                None => io::stdout().write_all(template.as_bytes())?,
            }
        }

        Command::Check => {
            let (config, path) = config::load(cli.config.as_deref())?;
            log::init(&config.log)?;
            tracing::info!("loaded config from '{}'", path.display());
            check::run(&config).await?;
        }

        Command::Run => {
            let (config, path) = config::load(cli.config.as_deref())?;
            log::init(&config.log)?;
            tracing::info!("loaded config from '{}'", path.display());
            attack::run(&config).await?;
        }
    }

    Ok(())
}
