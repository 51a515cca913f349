//! Read and write single variables of a WRF namelist document.
//!
//! Keys are written `section:variable`, or `section:variable:index` for a
//! single list element (0-based). New values take the type of the value
//! they replace.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info};

use namelist_store::{format_value, KeyPath, Namelist};
use nestwrf::{exit_code, LogFormat, ToolConfig};
use wrf_common::WrfError;

#[derive(Parser, Debug)]
#[command(name = "namelist")]
#[command(about = "Read and write variables in a WRF namelist document")]
struct Args {
    /// Namelist document (YAML, or JSON by extension)
    namelist: PathBuf,

    #[command(subcommand)]
    command: Command,

    /// Log level (overrides NESTWRF_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format (overrides NESTWRF_LOG_FORMAT)
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a variable
    Get {
        /// `section:variable[:index]`
        key: KeyPath,
    },
    /// Replace a variable, keeping its type
    ///
    /// Lists are given comma separated; booleans as `.true.` or `.false.`.
    Set {
        /// `section:variable[:index]`
        key: KeyPath,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{:#}", err), "namelist failed");
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = ToolConfig::from_env()?.with_overrides(args.log_level.clone(), args.log_format);
    config.init_logging()?;
    debug!(?args, "Parsed arguments");

    let path = &args.namelist;
    let mut namelist = Namelist::load(path)
        .map_err(WrfError::from)
        .with_context(|| format!("failed to read {}", path.display()))?;

    match &args.command {
        Command::Get { key } => {
            let value = namelist
                .get_path(key)
                .map_err(WrfError::from)
                .with_context(|| format!("cannot read {}", key))?;
            println!("{}", format_value(value));
        }
        Command::Set { key, value } => {
            namelist
                .set_from_str(key, value)
                .map_err(WrfError::from)
                .with_context(|| format!("cannot set {}", key))?;
            namelist
                .save(path)
                .map_err(WrfError::from)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(key = %key, value = %value, path = %path.display(), "Updated namelist");
        }
    }

    Ok(())
}
