//! Rendering of tool results and mapping of errors to exit codes.

use anyhow::Result;
use clap::ValueEnum;
use serde_json::json;

use nest_geometry::{DomainReport, NestPlacement};
use wrf_common::WrfError;

/// Format of what the tools print on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Render domain reports, one block per domain.
pub fn render_reports(reports: &[DomainReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(reports
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)? + "\n"),
    }
}

/// Render the outcome of a nest insertion.
pub fn render_placement(domain: usize, placement: &NestPlacement, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "Added domain {} (parent {}, ratio {})\n\
             i_parent_start: {:>8}\n\
             j_parent_start: {:>8}\n\
             e_we:           {:>8}\n\
             e_sn:           {:>8}\n",
            domain,
            placement.parent_id,
            placement.grid_ratio,
            placement.i_start,
            placement.j_start,
            placement.e_we,
            placement.e_sn,
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "domain": domain,
            "placement": placement,
        }))? + "\n"),
    }
}

/// Process exit code for a failed run.
///
/// Errors that carry a [`WrfError`] anywhere in their chain use its code;
/// anything else is reported as an I/O failure.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<WrfError>())
        .map(WrfError::exit_code)
        .unwrap_or(1)
}
