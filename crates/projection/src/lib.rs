//! Coordinate reference system transformations for WRF grids.
//!
//! Implements the Lambert conformal conic projection on the WGS84
//! ellipsoid from scratch without external dependencies.

pub mod ellipsoid;
pub mod lambert;
pub mod params;

pub use ellipsoid::Ellipsoid;
pub use lambert::LambertConformal;
pub use params::{MapProjection, ProjectionParams};
