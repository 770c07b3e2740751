//! CLI for the DataCommon API explorer.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dce_core::config;
use dce_core::params::{Mode, DATABASES, FORMATS, SCHEMAS};

use commands::{run_build, run_config_path, run_config_show, run_decode, run_preview, run_session};

/// Top-level CLI for the DataCommon API explorer.
#[derive(Debug, Parser)]
#[command(name = "dce")]
#[command(about = "DCE: build, decode and preview DataCommon API URLs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Build an API URL; unset fields use the configured defaults.
    Build {
        #[command(subcommand)]
        target: BuildTarget,
    },

    /// Parse an API URL back into form fields.
    Decode {
        /// Absolute Export or Query API URL.
        url: String,
    },

    /// Fetch a URL and show the first records of the response.
    Preview {
        /// URL to fetch (default: the default Export API URL).
        url: Option<String>,
        /// Number of records to show (default from config).
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },

    /// Edit the form one field at a time, reading commands from stdin.
    Session,

    /// Inspect the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum BuildTarget {
    /// Export API URL (whole-table download in a chosen format).
    Export(ExportArgs),
    /// Query API URL (custom SQL, JSON response).
    Query(QueryArgs),
}

#[derive(Debug, Default, Args)]
pub struct ExportArgs {
    /// Database to export from.
    #[arg(long, value_parser = DATABASES)]
    pub database: Option<String>,
    /// Schema name.
    #[arg(long, value_parser = SCHEMAS)]
    pub schema: Option<String>,
    /// Table name, e.g. hous_building_permits_m.
    #[arg(long)]
    pub table: Option<String>,
    /// Output format; geojson and shapefile take no years.
    #[arg(long, value_parser = FORMATS)]
    pub format: Option<String>,
    /// Years filter: 2024, 2019-23, or a comma-separated list of either.
    #[arg(long)]
    pub years: Option<String>,
}

#[derive(Debug, Default, Args)]
pub struct QueryArgs {
    /// Database to run the query against.
    #[arg(long)]
    pub database: Option<String>,
    /// SQL text; always schema-qualify tables (tabular.table_name).
    #[arg(long)]
    pub query: Option<String>,
}

impl BuildTarget {
    pub fn mode(&self) -> Mode {
        match self {
            BuildTarget::Export(_) => Mode::Export,
            BuildTarget::Query(_) => Mode::Query,
        }
    }

    /// Fields given on the command line, in form order.
    pub fn overrides(&self) -> Vec<(&'static str, &str)> {
        let fields: Vec<(&'static str, &Option<String>)> = match self {
            BuildTarget::Export(a) => vec![
                ("database", &a.database),
                ("schema", &a.schema),
                ("table", &a.table),
                ("format", &a.format),
                ("years", &a.years),
            ],
            BuildTarget::Query(a) => vec![("database", &a.database), ("query", &a.query)],
        };
        fields
            .into_iter()
            .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
            .collect()
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the config file location.
    Path,
    /// Print the effective configuration.
    Show,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Build { target } => run_build(&cfg, &target)?,
            CliCommand::Decode { url } => run_decode(&cfg, &url)?,
            CliCommand::Preview { url, limit } => run_preview(&cfg, url.as_deref(), limit)?,
            CliCommand::Session => run_session(&cfg)?,
            CliCommand::Config { action } => match action {
                ConfigAction::Path => run_config_path()?,
                ConfigAction::Show => run_config_show(&cfg)?,
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
