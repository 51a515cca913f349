//! Common types and utilities shared across the WRF grid tools.

pub mod bbox;
pub mod error;
pub mod time;

pub use bbox::BoundingBox;
pub use error::{WrfError, WrfResult};
pub use time::{TimeParseError, WrfDateTime};
