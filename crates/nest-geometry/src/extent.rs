//! Projected extents of all domains.
//!
//! The outer grid is centred on the projection origin. Each nest is placed
//! from its parent's south-west grid point, offset by whole parent cells,
//! so domains must be resolved in index order.

use serde::Serialize;
use tracing::debug;

use projection::LambertConformal;
use wrf_common::{BoundingBox, WrfError, WrfResult};

use crate::config::Configuration;

/// Projected extent and spacing of one domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainExtent {
    /// Edges in projected meters.
    pub bounds: BoundingBox,
    /// Grid spacing west-east (meters)
    pub dx: f64,
    /// Grid spacing south-north (meters)
    pub dy: f64,
}

impl DomainExtent {
    pub fn west(&self) -> f64 {
        self.bounds.west()
    }

    pub fn east(&self) -> f64 {
        self.bounds.east()
    }

    pub fn south(&self) -> f64 {
        self.bounds.south()
    }

    pub fn north(&self) -> f64 {
        self.bounds.north()
    }

    /// Projected position of the 1-based grid point (i, j).
    pub fn grid_point(&self, i: i64, j: i64) -> (f64, f64) {
        (
            self.west() + (i - 1) as f64 * self.dx,
            self.south() + (j - 1) as f64 * self.dy,
        )
    }

    /// Nearest 1-based grid point to a projected position.
    ///
    /// Halfway cases round away from zero.
    pub fn nearest_index(&self, x: f64, y: f64) -> (i64, i64) {
        (
            ((x - self.west()) / self.dx).round() as i64 + 1,
            ((y - self.south()) / self.dy).round() as i64 + 1,
        )
    }
}

/// Extents of every domain, in domain order, with the projection used.
#[derive(Debug, Clone)]
pub struct GridExtents {
    pub domains: Vec<DomainExtent>,
    pub projection: LambertConformal,
}

impl GridExtents {
    /// Extent by 1-based domain id.
    pub fn get(&self, id: i64) -> Option<&DomainExtent> {
        if id < 1 {
            return None;
        }
        self.domains.get((id - 1) as usize)
    }

    /// Geographic (lon, lat) of a projected position.
    pub fn to_geographic(&self, x: f64, y: f64) -> (f64, f64) {
        self.projection.inverse(x, y)
    }
}

/// Compute the projected extent of every domain.
///
/// Pure function of the configuration.
pub fn compute_extents(config: &Configuration) -> WrfResult<GridExtents> {
    let projection = config.projection.build()?;
    let mut extents: Vec<DomainExtent> = Vec::with_capacity(config.max_dom());

    for (d, domain) in config.domains.iter().enumerate() {
        let extent = if d == 0 {
            let half_we = config.dx * (domain.e_we - 1) as f64 * 0.5;
            let half_sn = config.dy * (domain.e_sn - 1) as f64 * 0.5;
            DomainExtent {
                bounds: BoundingBox::new(-half_we, -half_sn, half_we, half_sn),
                dx: config.dx,
                dy: config.dy,
            }
        } else {
            let parent = domain.parent_id - 1;
            if parent < 0 || parent as usize >= d {
                return Err(WrfError::configuration(format!(
                    "domain {} references parent {} which is not an earlier domain",
                    d + 1,
                    domain.parent_id
                )));
            }
            if domain.grid_ratio < 1 {
                return Err(WrfError::configuration(format!(
                    "domain {} has parent_grid_ratio {}",
                    d + 1,
                    domain.grid_ratio
                )));
            }
            let p = &extents[parent as usize];

            let dx = p.dx / domain.grid_ratio as f64;
            let dy = p.dy / domain.grid_ratio as f64;
            let west = p.west() + (domain.i_start - 1) as f64 * p.dx;
            let south = p.south() + (domain.j_start - 1) as f64 * p.dy;
            let east = west + (domain.e_we - 1) as f64 * dx;
            let north = south + (domain.e_sn - 1) as f64 * dy;

            DomainExtent {
                bounds: BoundingBox::new(west, south, east, north),
                dx,
                dy,
            }
        };

        debug!(
            domain = d + 1,
            west = extent.west(),
            east = extent.east(),
            south = extent.south(),
            north = extent.north(),
            dx = extent.dx,
            "Computed domain extent"
        );
        extents.push(extent);
    }

    Ok(GridExtents {
        domains: extents,
        projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use namelist_store::Namelist;
    use test_utils::{assert_approx_eq, assert_coords_approx_eq, fixtures, NamelistBuilder};

    fn config(yaml: &str) -> Configuration {
        Configuration::from_namelist(&Namelist::from_yaml_str(yaml).unwrap()).unwrap()
    }

    #[test]
    fn test_root_is_symmetric() {
        let cfg = config(&NamelistBuilder::new(500.0, 500.0, 5, 5).to_yaml());
        let extents = compute_extents(&cfg).unwrap();
        let root = extents.get(1).unwrap();
        assert_eq!(root.west(), -1000.0);
        assert_eq!(root.east(), 1000.0);
        assert_eq!(root.south(), -1000.0);
        assert_eq!(root.north(), 1000.0);
    }

    #[test]
    fn test_root_fixture_extent() {
        let extents = compute_extents(&config(fixtures::ROOT_ONLY)).unwrap();
        let root = &extents.domains[0];
        assert_eq!(root.bounds, BoundingBox::new(-10000.0, -10000.0, 10000.0, 10000.0));
        assert_eq!((root.dx, root.dy), (500.0, 500.0));
    }

    #[test]
    fn test_chain_accumulates_spacing() {
        let cfg = config(fixtures::THREE_DOMAIN_CHAIN);
        let extents = compute_extents(&cfg).unwrap();

        assert_eq!(extents.domains[1].dx, 9000.0 / 3.0);
        assert_eq!(extents.domains[2].dx, extents.domains[1].dx / 5.0);
        assert_approx_eq!(extents.domains[2].dx, 9000.0 / (3.0 * 5.0), 1e-9);
        assert_approx_eq!(extents.domains[2].dy, 600.0, 1e-9);
    }

    #[test]
    fn test_nest_offsets_use_parent_cells() {
        let extents = compute_extents(&config(fixtures::THREE_DOMAIN_CHAIN)).unwrap();
        let d1 = &extents.domains[0];
        let d2 = &extents.domains[1];
        let d3 = &extents.domains[2];

        // d01: 41 points at 9 km -> +-180 km
        assert_eq!(d1.west(), -180_000.0);
        // d02 starts 10 parent cells in: -180 + 90 = -90 km, spans 60 * 3 km
        assert_eq!(d2.west(), -90_000.0);
        assert_eq!(d2.east(), 90_000.0);
        // d03 starts 5 d02 cells in: -90 + 15 = -75 km, spans 50 * 600 m
        assert_approx_eq!(d3.west(), -75_000.0, 1e-6);
        assert_approx_eq!(d3.east(), -45_000.0, 1e-6);
    }

    #[test]
    fn test_invalid_parent_order_detected() {
        let mut cfg = config(fixtures::THREE_DOMAIN_CHAIN);
        cfg.domains[1].parent_id = 3;
        let err = compute_extents(&cfg).unwrap_err();
        assert!(matches!(err, WrfError::Configuration(_)));
    }

    #[test]
    fn test_grid_point_and_nearest_index_agree() {
        let extents = compute_extents(&config(fixtures::ROOT_ONLY)).unwrap();
        let root = &extents.domains[0];
        assert_eq!(root.grid_point(21, 21), (0.0, 0.0));
        assert_eq!(root.nearest_index(0.0, 0.0), (21, 21));
        assert_eq!(root.nearest_index(-10000.0, 10000.0), (1, 41));
        // 250 m is half a cell: rounds away from the west edge
        assert_eq!(root.nearest_index(-9750.0, -10000.0), (2, 1));
    }

    #[test]
    fn test_geographic_center() {
        let extents = compute_extents(&config(fixtures::ROOT_ONLY)).unwrap();
        let (lon, lat) = extents.to_geographic(0.0, 0.0);
        assert_coords_approx_eq!((lon, lat), (5.0, 52.0), 1e-9);
    }
}
