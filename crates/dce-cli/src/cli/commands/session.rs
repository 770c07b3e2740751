//! `dce session` – line-oriented form editing on stdin.

use anyhow::Result;
use dce_core::config::DceConfig;
use dce_core::params::Mode;
use dce_core::session::Session;
use std::io::{self, BufRead, Write};

const HELP: &str = "\
commands:
  mode export|query     switch the active API
  set <field> <value>   edit a field of the active API (token is fixed)
  show                  print the active fields
  url                   generate the URL for the active fields
  load <url>            fill the form from an existing URL
  help                  this text
  quit                  leave the session
";

pub fn run_session(cfg: &DceConfig) -> Result<()> {
    let mut session = cfg.session();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    drive(&mut session, stdin.lock(), &mut stdout)
}

fn drive<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> Result<()> {
    writeln!(out, "dce session ({} mode); type 'help' for commands", session.mode())?;
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim_start()),
            None => (line, ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => write!(out, "{HELP}")?,
            "mode" => match rest.parse::<Mode>() {
                Ok(mode) => {
                    session.set_mode(mode);
                    writeln!(out, "mode = {mode}")?;
                }
                Err(e) => writeln!(out, "error: {e}")?,
            },
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                match session.set_param(name, value.trim_start()) {
                    Ok(()) => writeln!(out, "{name} = {}", value.trim_start())?,
                    Err(e) => writeln!(out, "error: {e}")?,
                }
            }
            "show" => {
                writeln!(out, "mode = {}", session.mode())?;
                for (name, value) in session.active_fields() {
                    writeln!(out, "{name} = {value}")?;
                }
                if let Some(url) = session.generated_url() {
                    writeln!(out, "url = {url}")?;
                }
            }
            "url" => {
                let url = session.generate_url();
                writeln!(out, "{url}")?;
            }
            "load" => match session.load_url(rest) {
                Ok(mode) => writeln!(out, "loaded {mode} url")?,
                Err(e) => {
                    tracing::debug!("load failed: {}", e);
                    writeln!(out, "error: {}", session.error().unwrap_or("invalid URL"))?;
                }
            },
            other => writeln!(out, "unknown command {other:?}; type 'help'")?,
        }
    }
    Ok(())
}
