//! Nested-grid geometry for WRF domain configurations.
//!
//! Computes the projected extent of every domain in a configuration and
//! places new nests so that their boundary grid points coincide with grid
//! points of the parent domain.
//!
//! # Example
//!
//! ```ignore
//! use namelist_store::Namelist;
//! use nest_geometry::{Configuration, NestRequest};
//!
//! let mut namelist = Namelist::load("namelist.wps.yaml")?;
//! let mut config = Configuration::from_namelist(&namelist)?;
//! let placement = config.insert_nest(&NestRequest::centered(1, 5, 5.0, 52.0, 4.0, 4.0))?;
//! config.apply_to(&mut namelist);
//! namelist.save("namelist.wps.yaml")?;
//! ```

pub mod config;
pub mod extent;
pub mod nest;
pub mod report;

pub use config::{Configuration, Domain};
pub use extent::{compute_extents, DomainExtent, GridExtents};
pub use nest::{plan_nest, NestPlacement, NestRequest};
pub use report::{domain_reports, DomainReport, LatLonPair};
