//! Nested-grid tool for WRF namelists.
//!
//! Without a nest option, prints the location and size of every domain.
//! With `--center` or `--box`, appends a nest aligned to its parent grid
//! and writes the namelist back.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};

use namelist_store::Namelist;
use nest_geometry::{domain_reports, Configuration, NestRequest};
use nestwrf::output::{render_placement, render_reports};
use nestwrf::{exit_code, LogFormat, OutputFormat, ToolConfig};
use wrf_common::{BoundingBox, WrfError};

#[derive(Parser, Debug)]
#[command(name = "nestwrf")]
#[command(about = "Report on WRF domains or add a nested grid to a namelist")]
struct Args {
    /// Namelist with `share` and `geogrid` sections (YAML, or JSON by extension)
    namelist: PathBuf,

    /// Output namelist, defaults to the input namelist
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Add a nest centred on this point
    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["LON", "LAT"],
        allow_negative_numbers = true,
        conflicts_with = "bbox"
    )]
    center: Option<Vec<f64>>,

    /// Add a nest covering this box (degrees)
    #[arg(
        short = 'b',
        long = "box",
        num_args = 4,
        value_names = ["NORTH", "WEST", "SOUTH", "EAST"],
        allow_negative_numbers = true
    )]
    bbox: Option<Vec<f64>>,

    /// Parent domain of the new nest (1-based)
    #[arg(short, long, default_value_t = 1)]
    parent_id: i64,

    /// Parent grid ratio of the new nest
    #[arg(short, long, default_value_t = 5)]
    ratio: i64,

    /// West-east size of a centred nest in km
    #[arg(short = 'x', long, default_value_t = 10.0)]
    size_x: f64,

    /// South-north size of a centred nest in km
    #[arg(short = 'y', long, default_value_t = 10.0)]
    size_y: f64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level (overrides NESTWRF_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (overrides NESTWRF_LOG_FORMAT)
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl Args {
    fn nest_request(&self) -> Option<NestRequest> {
        if let Some(center) = &self.center {
            return Some(NestRequest::centered(
                self.parent_id,
                self.ratio,
                center[0],
                center[1],
                self.size_x,
                self.size_y,
            ));
        }
        self.bbox.as_ref().map(|edges| {
            NestRequest::bounding_box(
                self.parent_id,
                self.ratio,
                BoundingBox::from_edges(edges[0], edges[1], edges[2], edges[3]),
            )
        })
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{:#}", err), "nestwrf failed");
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = ToolConfig::from_env()?.with_overrides(args.log_level.clone(), args.log_format);
    config.init_logging()?;
    debug!(?args, "Parsed arguments");

    let mut namelist = load_namelist(&args.namelist)?;
    let mut grid = Configuration::from_namelist(&namelist)
        .with_context(|| format!("invalid grid configuration in {}", args.namelist.display()))?;

    let request = match args.nest_request() {
        Some(request) => request,
        None => {
            let reports = domain_reports(&grid)?;
            if args.format == OutputFormat::Text {
                println!("{}", args.namelist.display());
            }
            print!("{}", render_reports(&reports, args.format)?);
            return Ok(());
        }
    };

    let placement = grid.insert_nest(&request).context("failed to add nest")?;
    grid.apply_to(&mut namelist);

    let out = args.out.as_deref().unwrap_or(&args.namelist);
    namelist
        .save(out)
        .map_err(WrfError::from)
        .with_context(|| format!("failed to write {}", out.display()))?;
    info!(path = %out.display(), max_dom = grid.max_dom(), "Wrote namelist");

    print!("{}", render_placement(grid.max_dom(), &placement, args.format)?);
    Ok(())
}

fn load_namelist(path: &Path) -> Result<Namelist> {
    Namelist::load(path)
        .map_err(WrfError::from)
        .with_context(|| format!("failed to read {}", path.display()))
}
