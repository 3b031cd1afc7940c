use std::path::PathBuf;


#[derive(clap::Parser)]
#[command(version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub cmd: Command,

    /// Specifies config file location. Default locations are: 'config.toml' and
    /// '/etc/api-loadtest/config.toml'. Can also be set via env
    /// `API_LOADTEST_CONFIG_PATH`.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Runs the load test against the configured target.
    Run,

    /// Checks the config and whether the target API is reachable and healthy.
    /// Useful to run before starting a long load test.
    Check,

    /// Outputs a template of the configuration, including all config options
    /// with descriptions, great as a starting point.
    GenConfigTemplate {
        /// File to write it to. If unspecified, written to stdout.
        #[clap(short, long)]
        out: Option<PathBuf>,
    },
}
