//! `dce config path|show`.

use anyhow::Result;
use dce_core::config::{self, DceConfig};

pub fn run_config_path() -> Result<()> {
    println!("{}", config::config_path()?.display());
    Ok(())
}

pub fn run_config_show(cfg: &DceConfig) -> Result<()> {
    print!("{}", cfg.to_toml_string()?);
    Ok(())
}
