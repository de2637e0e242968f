//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction};
use crate::{commands, logging};
use anyhow::Result;
use tribo_core::{ConfigLoader, TriboConfig};

/// Resolve configuration, set up logging and run the chosen command
pub async fn route(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    logging::init(&config.logging);
    tracing::debug!(?config, "Resolved configuration");

    match cli.command {
        Commands::Serve { .. } => commands::serve::execute(config).await,
        Commands::Get { n, .. } => commands::get::execute(&config, n).await,
        Commands::Config {
            action: ConfigAction::Show,
        } => commands::config::show(&config),
    }
}

/// Defaults, then the config file, then `TRIBO_*` variables, then flags
fn load_config(cli: &Cli) -> Result<TriboConfig> {
    let mut loader = ConfigLoader::new().with_defaults();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let config = loader.with_env().with_overrides(cli.overrides()).load()?;
    Ok(config)
}
