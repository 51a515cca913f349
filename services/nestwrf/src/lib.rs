//! Command-line front ends for the WRF nested-grid tools.
//!
//! Two binaries share this library: `nestwrf`, which reports on and adds
//! nested domains, and `namelist`, which reads and writes single variables.

pub mod config;
pub mod output;

pub use config::{LogFormat, ToolConfig};
pub use output::{exit_code, OutputFormat};
