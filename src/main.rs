use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use webrunner::Profile;
use webrunner::cli::Cli;
use webrunner::host::Host;
use webrunner::model::config::{RunnerConfig, default_data_dir};
use webrunner::profile::icons::{CHROME_DIR_LIST, DirectoryService};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RunnerConfig::load(cli.config.as_deref())?;

    // Initialize logging to file (never stdout)
    let log_dir = default_data_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "webrunner.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::new(&config.general.log_filter))
        .init();

    tracing::info!("webrunner starting");

    let host = Host::new(config.app_dirs()?);
    host.dirs.ensure()?;

    let working_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut args = cli.into_launch_args(working_dir);
    let profile = Profile::from_command_line(&mut args, &host);

    let mut directories = DirectoryService::new();
    if let Some(provider) = profile.icon_provider() {
        directories.register_provider(Box::new(provider));
    }
    match directories.get_files(CHROME_DIR_LIST) {
        Ok(dirs) => tracing::info!(?dirs, "chrome icon directories"),
        Err(err) => tracing::debug!("{err}"),
    }

    print!("{}", toml::to_string(&profile.summary())?);
    Ok(())
}
