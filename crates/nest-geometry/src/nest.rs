//! Nest placement and insertion.
//!
//! A nest request is turned into parent grid indices by projecting its
//! corners and snapping them to the nearest parent grid points. The child
//! grid is then sized so that its first and last points fall exactly on
//! those parent points.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use wrf_common::{BoundingBox, WrfError, WrfResult};

use crate::config::{Configuration, Domain};
use crate::extent::compute_extents;

/// Where a new nest goes, in parent grid indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestPlacement {
    pub parent_id: i64,
    pub grid_ratio: i64,
    pub i_start: i64,
    pub j_start: i64,
    pub e_we: i64,
    pub e_sn: i64,
}

impl NestPlacement {
    /// Parent column of the nest's last west-east point.
    pub fn i_end(&self) -> i64 {
        self.i_start + (self.e_we - 1) / self.grid_ratio
    }

    /// Parent row of the nest's last south-north point.
    pub fn j_end(&self) -> i64 {
        self.j_start + (self.e_sn - 1) / self.grid_ratio
    }
}

/// A request for a new nest inside an existing domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NestRequest {
    /// Nest of a given size in kilometers around a geographic center.
    Centered {
        parent_id: i64,
        grid_ratio: i64,
        lon: f64,
        lat: f64,
        size_x_km: f64,
        size_y_km: f64,
    },
    /// Nest covering a geographic box (degrees).
    Box {
        parent_id: i64,
        grid_ratio: i64,
        bbox: BoundingBox,
    },
}

impl NestRequest {
    pub fn centered(
        parent_id: i64,
        grid_ratio: i64,
        lon: f64,
        lat: f64,
        size_x_km: f64,
        size_y_km: f64,
    ) -> Self {
        Self::Centered {
            parent_id,
            grid_ratio,
            lon,
            lat,
            size_x_km,
            size_y_km,
        }
    }

    pub fn bounding_box(parent_id: i64, grid_ratio: i64, bbox: BoundingBox) -> Self {
        Self::Box {
            parent_id,
            grid_ratio,
            bbox,
        }
    }

    pub fn parent_id(&self) -> i64 {
        match self {
            Self::Centered { parent_id, .. } | Self::Box { parent_id, .. } => *parent_id,
        }
    }

    pub fn grid_ratio(&self) -> i64 {
        match self {
            Self::Centered { grid_ratio, .. } | Self::Box { grid_ratio, .. } => *grid_ratio,
        }
    }
}

/// Work out the grid indices of a requested nest without changing the
/// configuration.
pub fn plan_nest(config: &Configuration, request: &NestRequest) -> WrfResult<NestPlacement> {
    let parent_id = request.parent_id();
    let grid_ratio = request.grid_ratio();

    let parent = config
        .domain(parent_id)
        .ok_or_else(|| WrfError::invalid_parent(parent_id, config.max_dom()))?;
    if grid_ratio < 1 {
        return Err(WrfError::geometry(format!(
            "grid ratio must be at least 1, got {}",
            grid_ratio
        )));
    }

    check_request_coordinates(request)?;

    let extents = compute_extents(config)?;
    let proj = &extents.projection;

    // Projected corners: (xs, ys) south-west, (xe, ye) north-east.
    let (xs, ys, xe, ye) = match request {
        NestRequest::Centered {
            lon,
            lat,
            size_x_km,
            size_y_km,
            ..
        } => {
            if !(size_x_km.is_finite() && size_y_km.is_finite()) || *size_x_km <= 0.0 || *size_y_km <= 0.0 {
                return Err(WrfError::geometry(format!(
                    "nest size must be positive, got {} x {} km",
                    size_x_km, size_y_km
                )));
            }
            let (x, y) = proj.forward(*lon, *lat);
            let half_x = size_x_km * 500.0;
            let half_y = size_y_km * 500.0;
            (x - half_x, y - half_y, x + half_x, y + half_y)
        }
        NestRequest::Box { bbox, .. } => {
            let (xs, ye) = proj.forward(bbox.west(), bbox.north());
            let (xe, ys) = proj.forward(bbox.east(), bbox.south());
            (xs, ys, xe, ye)
        }
    };

    if !BoundingBox::new(xs, ys, xe, ye).is_valid() {
        return Err(WrfError::geometry(format!(
            "projected nest box is empty or inverted: x {:.1}..{:.1} m, y {:.1}..{:.1} m",
            xs, xe, ys, ye
        )));
    }

    let parent_extent = extents
        .get(parent_id)
        .ok_or_else(|| WrfError::invalid_parent(parent_id, config.max_dom()))?;
    let (i_start, j_start) = parent_extent.nearest_index(xs, ys);
    let (i_end, j_end) = parent_extent.nearest_index(xe, ye);

    debug!(
        parent_id,
        xs, xe, ys, ye, i_start, i_end, j_start, j_end, "Snapped nest corners to parent grid"
    );

    if i_end <= i_start || j_end <= j_start {
        return Err(WrfError::geometry(format!(
            "nest collapses to zero size on the parent grid: i {}..{}, j {}..{}",
            i_start, i_end, j_start, j_end
        )));
    }
    if i_start < 1 || j_start < 1 || i_end > parent.e_we || j_end > parent.e_sn {
        return Err(WrfError::geometry(format!(
            "nest spans parent indices i {}..{}, j {}..{} outside domain {} ({} x {})",
            i_start, i_end, j_start, j_end, parent_id, parent.e_we, parent.e_sn
        )));
    }

    Ok(NestPlacement {
        parent_id,
        grid_ratio,
        i_start,
        j_start,
        e_we: child_points(i_end - i_start, grid_ratio)?,
        e_sn: child_points(j_end - j_start, grid_ratio)?,
    })
}

/// Number of child points spanning `parent_cells` parent cells.
fn child_points(parent_cells: i64, grid_ratio: i64) -> WrfResult<i64> {
    parent_cells
        .checked_mul(grid_ratio)
        .and_then(|cells| cells.checked_add(1))
        .ok_or_else(|| {
            WrfError::geometry(format!(
                "nest of {} parent cells at ratio {} is too large",
                parent_cells, grid_ratio
            ))
        })
}

/// Reject coordinates that cannot be projected.
fn check_request_coordinates(request: &NestRequest) -> WrfResult<()> {
    let points = match request {
        NestRequest::Centered { lon, lat, .. } => vec![(*lon, *lat)],
        NestRequest::Box { bbox, .. } => vec![
            (bbox.west(), bbox.south()),
            (bbox.east(), bbox.north()),
        ],
    };
    for (lon, lat) in points {
        if !lon.is_finite() || !(-360.0..=360.0).contains(&lon) {
            return Err(WrfError::geometry(format!(
                "longitude must be within [-360, 360] degrees, got {}",
                lon
            )));
        }
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(WrfError::geometry(format!(
                "latitude must be within [-90, 90] degrees, got {}",
                lat
            )));
        }
    }
    Ok(())
}

impl Configuration {
    /// Append a domain at the given placement.
    ///
    /// The new domain inherits its parent's `geog_data_res` and run dates.
    /// Returns the 1-based id of the new domain. Nothing is changed when the
    /// parent does not exist.
    pub fn append_nest(&mut self, placement: NestPlacement) -> WrfResult<usize> {
        let parent = self
            .domain(placement.parent_id)
            .ok_or_else(|| WrfError::invalid_parent(placement.parent_id, self.max_dom()))?;

        let domain = Domain {
            parent_id: placement.parent_id,
            grid_ratio: placement.grid_ratio,
            i_start: placement.i_start,
            j_start: placement.j_start,
            e_we: placement.e_we,
            e_sn: placement.e_sn,
            geog_data_res: parent.geog_data_res.clone(),
            start_date: parent.start_date.clone(),
            end_date: parent.end_date.clone(),
        };
        self.domains.push(domain);

        let id = self.max_dom();
        info!(
            domain = id,
            parent_id = placement.parent_id,
            ratio = placement.grid_ratio,
            i_start = placement.i_start,
            j_start = placement.j_start,
            e_we = placement.e_we,
            e_sn = placement.e_sn,
            "Inserted nest"
        );
        Ok(id)
    }

    /// Plan a nest and append it.
    pub fn insert_nest(&mut self, request: &NestRequest) -> WrfResult<NestPlacement> {
        let placement = plan_nest(self, request)?;
        self.append_nest(placement)?;
        Ok(placement)
    }
}
