//! `tribo config`

use anyhow::Result;
use tribo_core::TriboConfig;

pub fn show(config: &TriboConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
