//! `dce build export|query [--field value...]` – print a generated API URL.

use anyhow::Result;
use dce_core::config::DceConfig;

use crate::cli::BuildTarget;

pub fn run_build(cfg: &DceConfig, target: &BuildTarget) -> Result<()> {
    let mut session = cfg.session();
    session.set_mode(target.mode());
    for (name, value) in target.overrides() {
        session.set_param(name, value)?;
    }
    println!("{}", session.generate_url());
    Ok(())
}
