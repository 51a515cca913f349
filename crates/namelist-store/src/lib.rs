//! Ordered key/value store holding WRF namelist settings.
//!
//! A namelist is a sequence of sections (`share`, `geogrid`, ...), each an
//! ordered mapping from variable name to a scalar or a list. Documents are
//! persisted as YAML or JSON, chosen by file extension. Section and variable
//! lookups are case-insensitive, as in Fortran namelists.

pub mod error;
pub mod path;
pub mod store;
pub mod value;

pub use error::{StoreError, StoreResult};
pub use path::KeyPath;
pub use store::{DocumentFormat, Namelist};
pub use value::{coerce_like, format_value};

pub use serde_yaml::{Mapping, Value};
